//! `backup`: dump the database into a timestamped archive.
//!
//! 1. Compute `<backup.dir>/backup_<YYYYMMDD_HHMMSS>.sql` from local time.
//! 2. Create `backup.dir` if needed; the dump utility will not.
//! 3. Run the dump behind a spinner with `PGPASSWORD` in its environment.
//!
//! On failure the dump's captured output is replayed before the error is
//! returned.

use std::path::PathBuf;

use chrono::Local;

use crate::{
    config::Config,
    error::OrchestrateError,
    runner::{backup_path, build_dump_args, dump_env},
    ui,
};

pub fn run(cfg: &Config) -> Result<PathBuf, OrchestrateError> {
    let out = backup_path(&cfg.backup, &Local::now());

    std::fs::create_dir_all(&cfg.backup.dir).map_err(|e| OrchestrateError::Backup {
        detail: format!("creating {}: {e}", cfg.backup.dir.display()),
    })?;

    ui::info(&format!("Backing up database to {}", out.display()));

    let args = build_dump_args(&cfg.backup, &cfg.database, &out);
    tracing::info!(argv = ?args, "running dump");

    let outcome = ui::run_stage("Backup", &args, &dump_env(&cfg.database));
    if outcome.failed() {
        outcome.replay();
        return Err(OrchestrateError::Backup {
            detail: outcome.error.unwrap_or_else(|| "unknown error".into()),
        });
    }

    ui::success("Backup completed successfully");
    Ok(out)
}
