//! Configuration types and loading logic.
//!
//! Connection settings come from three layers, lowest priority first:
//!
//! 1. Built-in defaults (a local `distributech` database owned by `postgres`).
//! 2. An optional `orchestrate.toml` in the working directory.
//! 3. The `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD`
//!    environment variables (a `.env` file is loaded into the environment by
//!    `main` before this module runs).
//!
//! # File format
//!
//! ```toml
//! [database]
//! host     = "db.internal"
//! port     = 5433
//! name     = "distributech"
//! user     = "admin"
//! password = ""            # prefer DB_PASSWORD
//!
//! [scripts]
//! init   = "./commands/init_db.sql"
//! delete = "./commands/del_db.sql"
//! seed   = "./commands/seed_db.sql"
//!
//! [backup]
//! dir     = "./backups"
//! program = "pg_dump"
//! ```
//!
//! The resulting [`Config`] is built once and handed to every command by
//! reference.  There is no global state.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{action::Action, error::OrchestrateError};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where and as whom to connect.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// SQL file for each script-backed action.
    #[serde(default)]
    pub scripts: ScriptsConfig,

    /// Where backups go and which dump program writes them.
    #[serde(default)]
    pub backup: BackupConfig,
}

// ─── [database] ───────────────────────────────────────────────────────────────

/// Resolved connection parameters.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    /// Database name, passed to the dump utility as its positional argument.
    pub name: String,
    pub user: String,
    /// Never printed, logged or placed on a command line.
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            name: "distributech".into(),
            user: "postgres".into(),
            password: "postgres".into(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ─── [scripts] ────────────────────────────────────────────────────────────────

/// SQL file paths, relative to the working directory unless absolute.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScriptsConfig {
    pub init: PathBuf,
    pub delete: PathBuf,
    pub seed: PathBuf,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            init: PathBuf::from("./commands/init_db.sql"),
            delete: PathBuf::from("./commands/del_db.sql"),
            seed: PathBuf::from("./commands/seed_db.sql"),
        }
    }
}

impl ScriptsConfig {
    /// The SQL file run by `action`, or `None` for [`Action::Backup`].
    pub fn path_for(&self, action: Action) -> Option<&Path> {
        match action {
            Action::Init => Some(&self.init),
            Action::Delete => Some(&self.delete),
            Action::Seed => Some(&self.seed),
            Action::Backup => None,
        }
    }
}

// ─── [backup] ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BackupConfig {
    /// Directory that receives `backup_<timestamp>.sql` files.  Created on
    /// demand.
    pub dir: PathBuf,

    /// Dump executable, looked up on `PATH` when not absolute.
    pub program: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./backups"),
            program: "pg_dump".into(),
        }
    }
}

// ─── Environment overrides ────────────────────────────────────────────────────

pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_NAME: &str = "DB_NAME";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";

impl DatabaseConfig {
    /// Overwrite fields with any `DB_*` variables that `lookup` returns.
    ///
    /// `lookup` is normally `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), OrchestrateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = parse_port(&port)?;
        }
        if let Some(name) = lookup(ENV_NAME) {
            self.name = name;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        Ok(())
    }
}

fn parse_port(raw: &str) -> Result<u16, OrchestrateError> {
    raw.trim()
        .parse()
        .map_err(|_| OrchestrateError::InvalidPort {
            value: raw.to_string(),
        })
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Read and parse a `Config` from `path`.
///
/// A missing file is not an error: every field has a default, so the tool
/// runs with environment variables alone.  A file that exists but cannot be
/// read or is not valid TOML is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let cfg = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(cfg)
}

/// [`load_config`] followed by the `DB_*` overrides from `lookup`.
pub fn resolve<F>(path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = load_config(path)?;
    cfg.database.apply_env(lookup)?;
    Ok(cfg)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
