//! Action handlers.
//!
//! | File         | Invocation                        | Description                  |
//! |--------------|-----------------------------------|------------------------------|
//! | `script.rs`  | `db-orchestrate init/delete/seed` | Execute the action's SQL file |
//! | `backup.rs`  | `db-orchestrate backup`           | Dump the database            |

pub mod backup;
pub mod script;

use crate::{action::Action, config::Config, error::OrchestrateError};

/// Run `action` to completion.
pub async fn dispatch(action: Action, cfg: &Config) -> Result<(), OrchestrateError> {
    tracing::info!(%action, "dispatching");
    match cfg.scripts.path_for(action) {
        Some(path) => script::run(&cfg.database, path).await,
        None => backup::run(cfg).map(drop),
    }
}
