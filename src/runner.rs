//! Dump command construction helpers.
//!
//! This module builds the backup file path and the argument vector handed to
//! the dump utility.  It does not execute anything; process execution lives
//! in [`crate::ui`] so the spinner can own the terminal while the dump runs.
//!
//! Arguments are kept as a `Vec<String>` and passed straight to
//! [`std::process::Command`], never joined into a shell string, so a host or
//! database name containing spaces or quotes reaches the program verbatim.
//!
//! # Password
//!
//! The password is deliberately absent from [`build_dump_args`].  It travels
//! to the child through [`dump_env`] as `PGPASSWORD`, which keeps it out of
//! `ps` output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::config::{BackupConfig, DatabaseConfig};

/// `strftime` pattern for the timestamp embedded in backup file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ─── Backup path ──────────────────────────────────────────────────────────────

/// `backup_<YYYYMMDD_HHMMSS>.sql` for the instant `at`.
pub fn backup_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("backup_{}.sql", at.format(TIMESTAMP_FORMAT))
}

/// Full path of the backup written at `at`, inside `cfg.dir`.
pub fn backup_path<Tz>(cfg: &BackupConfig, at: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    cfg.dir.join(backup_file_name(at))
}

// ─── Dump command ─────────────────────────────────────────────────────────────

/// Builds the full dump invocation:
///
/// ```text
/// pg_dump --host=<h> --port=<p> --username=<u> -F c -b -v -f <out> <dbname>
/// ```
///
/// `-F c` selects the custom archive format, `-b` includes large objects and
/// `-v` makes the dump report progress on stderr.
pub fn build_dump_args(backup: &BackupConfig, db: &DatabaseConfig, out: &Path) -> Vec<String> {
    vec![
        backup.program.clone(),
        format!("--host={}", db.host),
        format!("--port={}", db.port),
        format!("--username={}", db.user),
        "-F".into(),
        "c".into(),
        "-b".into(),
        "-v".into(),
        "-f".into(),
        out.to_string_lossy().into_owned(),
        db.name.clone(),
    ]
}

/// Extra environment for the dump process.
pub fn dump_env(db: &DatabaseConfig) -> Vec<(String, String)> {
    vec![("PGPASSWORD".into(), db.password.clone())]
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, Utc};

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
            .and_utc()
    }

    fn make_db() -> DatabaseConfig {
        DatabaseConfig {
            host: "db.internal".into(),
            port: 6543,
            name: "distributech".into(),
            user: "admin".into(),
            password: "s3cr3t".into(),
        }
    }

    fn is_backup_name(name: &str) -> bool {
        let Some(stamp) = name
            .strip_prefix("backup_")
            .and_then(|rest| rest.strip_suffix(".sql"))
        else {
            return false;
        };
        let bytes = stamp.as_bytes();
        bytes.len() == 15
            && bytes[8] == b'_'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 8 || b.is_ascii_digit())
    }

    // ── backup path ───────────────────────────────────────────────────────────

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(
            backup_file_name(&at(2024, 3, 7, 9, 5, 1)),
            "backup_20240307_090501.sql"
        );
    }

    #[test]
    fn file_name_uses_the_zone_it_is_given() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = at(2024, 12, 31, 23, 30, 0).with_timezone(&offset);
        assert_eq!(backup_file_name(&local), "backup_20250101_013000.sql");
    }

    #[test]
    fn file_name_for_now_matches_pattern() {
        let name = backup_file_name(&chrono::Local::now());
        assert!(is_backup_name(&name), "unexpected backup name {name}");
    }

    #[test]
    fn backup_path_is_inside_configured_dir() {
        let cfg = BackupConfig {
            dir: "/var/backups/pg".into(),
            program: "pg_dump".into(),
        };
        assert_eq!(
            backup_path(&cfg, &at(2024, 1, 2, 3, 4, 5)),
            Path::new("/var/backups/pg/backup_20240102_030405.sql")
        );
    }

    // ── dump args ─────────────────────────────────────────────────────────────

    #[test]
    fn dump_args_start_with_program() {
        let args = build_dump_args(&BackupConfig::default(), &make_db(), Path::new("out.sql"));
        assert_eq!(args[0], "pg_dump");
    }

    #[test]
    fn dump_args_carry_connection_values_literally() {
        let args = build_dump_args(&BackupConfig::default(), &make_db(), Path::new("out.sql"));
        assert!(args.contains(&"--host=db.internal".to_string()));
        assert!(args.contains(&"--port=6543".to_string()));
        assert!(args.contains(&"--username=admin".to_string()));
        assert_eq!(args.last().unwrap(), "distributech");
    }

    #[test]
    fn dump_args_write_custom_format_to_output() {
        let args = build_dump_args(&BackupConfig::default(), &make_db(), Path::new("b/x.sql"));
        let f = args.iter().position(|a| a == "-F").unwrap();
        assert_eq!(args[f + 1], "c");
        let o = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[o + 1], "b/x.sql");
        assert!(args.contains(&"-v".to_string()));
    }

    #[test]
    fn dump_args_never_contain_password() {
        let args = build_dump_args(&BackupConfig::default(), &make_db(), Path::new("out.sql"));
        assert!(args.iter().all(|a| !a.contains("s3cr3t")));
    }

    #[test]
    fn dump_args_keep_awkward_values_as_single_arguments() {
        let mut db = make_db();
        db.name = "my db; rm -rf /".into();
        let args = build_dump_args(&BackupConfig::default(), &db, Path::new("out.sql"));
        assert_eq!(args.last().unwrap(), "my db; rm -rf /");
    }

    #[test]
    fn dump_env_passes_password() {
        assert_eq!(dump_env(&make_db()), vec![(
            "PGPASSWORD".to_string(),
            "s3cr3t".to_string()
        )]);
    }

    // ── insta snapshots ───────────────────────────────────────────────────────

    #[test]
    fn snapshot_dump_args_default() {
        let out = backup_path(&BackupConfig::default(), &at(2024, 5, 17, 14, 3, 9));
        insta::assert_debug_snapshot!(build_dump_args(
            &BackupConfig::default(),
            &DatabaseConfig::default(),
            &out
        ));
    }

    #[test]
    fn snapshot_dump_args_custom() {
        let backup = BackupConfig {
            dir: "/srv/backups".into(),
            program: "/usr/lib/postgresql/16/bin/pg_dump".into(),
        };
        let out = backup_path(&backup, &at(2025, 11, 30, 0, 0, 59));
        insta::assert_debug_snapshot!(build_dump_args(&backup, &make_db(), &out));
    }
}
