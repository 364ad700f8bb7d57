//! Domain error type.
//!
//! Every variant is fatal for the current invocation: `main` prints it and
//! exits with status 1.  Nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestrateError {
    /// Reading, connecting, executing or committing a SQL file failed.
    ///
    /// `cause` is rendered inline and is not exposed as `source()`, so an
    /// `{:#}` chain does not print it twice.
    #[error("Error executing {}: {cause}", .path.display())]
    Execution { path: PathBuf, cause: ExecutionCause },

    /// The dump utility exited non-zero or could not be spawned.
    #[error("Backup failed: {detail}")]
    Backup { detail: String },

    /// `DB_PORT` is not a valid TCP port.
    #[error("invalid DB_PORT value '{value}': expected an integer between 0 and 65535")]
    InvalidPort { value: String },
}

/// The underlying failure behind [`OrchestrateError::Execution`].
#[derive(Debug, Error)]
pub enum ExecutionCause {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl OrchestrateError {
    pub fn execution(path: impl Into<PathBuf>, cause: impl Into<ExecutionCause>) -> Self {
        Self::Execution {
            path: path.into(),
            cause: cause.into(),
        }
    }
}
