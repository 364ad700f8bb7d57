//! `db-orchestrate` — run one administrative action against the application
//! database.
//!
//! # Overview
//!
//! The binary takes exactly one action, runs it, and exits `0` on success or
//! `1` on any failure:
//!
//! ```text
//! db-orchestrate init     # execute ./commands/init_db.sql
//! db-orchestrate delete   # execute ./commands/del_db.sql
//! db-orchestrate seed     # execute ./commands/seed_db.sql
//! db-orchestrate backup   # pg_dump into ./backups/backup_<timestamp>.sql
//! db-orchestrate --print-config
//! ```
//!
//! Connection settings come from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`
//! and `DB_PASSWORD` (optionally via a `.env` file), layered over an optional
//! `orchestrate.toml`.  Set `RUST_LOG=debug` for diagnostics on stderr.
//!
//! # Module layout
//!
//! | Module                | Responsibility                               |
//! |-----------------------|----------------------------------------------|
//! | [`cli`]               | Argument types parsed by clap                |
//! | [`action`]            | Action selection and usage messages          |
//! | [`config`]            | `Config` struct, TOML loader, env overrides  |
//! | [`error`]             | Domain error type                            |
//! | [`executor`]          | SQL file execution over sqlx                 |
//! | [`runner`]            | Backup path and dump argument construction   |
//! | [`ui`]                | Spinner, captured execution, status lines    |
//! | [`commands::script`]  | `init` / `delete` / `seed`                   |
//! | [`commands::backup`]  | `backup`                                     |

mod action;
mod cli;
mod commands;
mod config;
mod error;
mod executor;
mod runner;
mod ui;

use std::process::ExitCode;

use action::{Action, SelectError};
use clap::{Parser, error::ErrorKind};
use cli::Cli;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        },
        Err(e) => {
            let _ = e.print();
            println!("{}", action::USAGE);
            return ExitCode::FAILURE;
        },
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Selection errors are plain usage text, not failures of an action.
            if let Some(select) = e.downcast_ref::<SelectError>() {
                println!("{select}");
            } else {
                ui::failure(&format!("{e:#}"));
            }
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.print_config {
        // `--print-config` runs no action, so any positional is a misuse.
        if !cli.action.is_empty() {
            Action::from_args(&cli.action)?;
            return Err(SelectError::Usage.into());
        }
        println!("{:#?}", load_config(cli)?);
        return Ok(());
    }

    // Argument errors win over config errors.
    let action = Action::from_args(&cli.action)?;
    let cfg = load_config(cli)?;
    commands::dispatch(action, &cfg).await?;
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<config::Config> {
    config::resolve(&cli.config, |k| std::env::var(k).ok())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`), so
/// they never mix with the status lines on stdout.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();
}
