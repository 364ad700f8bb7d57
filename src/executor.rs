//! SQL file execution.
//!
//! A script is read whole and sent to PostgreSQL as one simple-protocol batch
//! inside a single transaction, so either every statement in the file takes
//! effect or none does.  Statements that refuse to run inside a transaction
//! block (`CREATE DATABASE`, `VACUUM`) therefore fail.
//!
//! The file is read before any connection is opened: a missing script never
//! touches the database.

use std::path::Path;

use sqlx::{
    Connection,
    postgres::{PgConnectOptions, PgConnection},
};

use crate::{config::DatabaseConfig, error::OrchestrateError};

/// Connection options for `db`.
pub fn connect_options(db: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.name)
        .username(&db.user)
        .password(&db.password)
}

/// Execute the contents of `path` against `db`.
pub async fn run_sql_file(db: &DatabaseConfig, path: &Path) -> Result<(), OrchestrateError> {
    let sql = std::fs::read_to_string(path).map_err(|e| OrchestrateError::execution(path, e))?;
    tracing::debug!(path = %path.display(), bytes = sql.len(), "read sql file");

    execute_batch(db, &sql)
        .await
        .map_err(|e| OrchestrateError::execution(path, e))
}

async fn execute_batch(db: &DatabaseConfig, sql: &str) -> Result<(), sqlx::Error> {
    tracing::debug!(host = %db.host, port = db.port, database = %db.name, user = %db.user, "connecting");
    let mut conn = PgConnection::connect_with(&connect_options(db)).await?;

    // Dropping an uncommitted transaction rolls it back.
    let mut tx = conn.begin().await?;
    sqlx::raw_sql(sql).execute(&mut *tx).await?;
    tx.commit().await?;

    conn.close().await
}
