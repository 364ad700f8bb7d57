//! The four recognised actions and the rules for selecting one.
//!
//! Exactly one positional argument is accepted.  It is matched
//! case-insensitively, so `INIT`, `Init` and `init` all select
//! [`Action::Init`].

use std::{fmt, str::FromStr};

/// Printed when the positional argument count is not exactly one.
pub const USAGE: &str = "Usage: db-orchestrate [init|delete|seed|backup]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create the schema.
    Init,
    /// Drop the schema.
    Delete,
    /// Load seed data.
    Seed,
    /// Dump the database to a timestamped archive.
    Backup,
}

impl Action {
    #[cfg(test)]
    pub const ALL: [Self; 4] = [Self::Init, Self::Delete, Self::Seed, Self::Backup];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Delete => "delete",
            Self::Seed => "seed",
            Self::Backup => "backup",
        }
    }

    /// Select an action from the raw positional arguments.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, SelectError> {
        match args {
            [one] => one.as_ref().parse(),
            _ => Err(SelectError::Usage),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "init" => Ok(Self::Init),
            "delete" => Ok(Self::Delete),
            "seed" => Ok(Self::Seed),
            "backup" => Ok(Self::Backup),
            _ => Err(SelectError::InvalidAction(s.to_string())),
        }
    }
}

/// Why no action could be selected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("{}", USAGE)]
    Usage,

    #[error("Invalid action '{0}'. Choose from: init, delete, seed, backup")]
    InvalidAction(String),
}

// ─── Tests ────────────────────────────────────────────────────────────────────
