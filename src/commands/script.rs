//! `init`, `delete` and `seed`: run one SQL file.

use std::{future::Future, path::Path};

use crate::{config::DatabaseConfig, error::OrchestrateError, executor, ui};

pub async fn run(db: &DatabaseConfig, path: &Path) -> Result<(), OrchestrateError> {
    report(path, executor::run_sql_file(db, path)).await
}

/// Status line printed once `path` has been executed and committed.
pub fn success_message(path: &Path) -> String {
    format!("Successfully executed {}", path.display())
}

/// Await `exec` behind a spinner, then print the success line.
///
/// Errors are returned untouched and nothing is printed for them; `main`
/// reports them.
async fn report<F>(path: &Path, exec: F) -> Result<(), OrchestrateError>
where
    F: Future<Output = Result<(), OrchestrateError>>,
{
    let label = format!("Executing {}", path.display());
    ui::with_spinner(&label, exec).await?;
    ui::success(&success_message(path));
    Ok(())
}
