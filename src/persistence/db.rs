//! `SQLite` connection pool, unit-of-work sessions, and schema bootstrap.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::{AppError, Result};

use super::schema;

/// Alias for the shared `SQLite` connection pool.
pub type Database = SqlitePool;

/// Scoped unit-of-work bound to the pool.
///
/// Must be committed to persist mutations. Dropping an uncommitted
/// session rolls it back and returns its connection to the pool.
pub type Session = Transaction<'static, Sqlite>;

/// Parse a connection string into `SQLite` connect options.
///
/// Only the `sqlite:` scheme is accepted; `sqlx` would otherwise treat
/// any other URL as a bare file name.
///
/// # Errors
///
/// Returns `AppError::Config` if the string is empty, uses another
/// scheme, or cannot be parsed.
pub fn parse_url(database_url: &str) -> Result<SqliteConnectOptions> {
    let trimmed = database_url.trim();
    if trimmed.is_empty() {
        return Err(AppError::Config("database_url must not be empty".into()));
    }
    if !trimmed.starts_with("sqlite:") {
        return Err(AppError::Config(format!(
            "database_url must use the sqlite: scheme, got `{trimmed}`"
        )));
    }
    SqliteConnectOptions::from_str(trimmed)
        .map_err(|err| AppError::Config(format!("invalid database_url: {err}")))
}

/// Connect to the file-backed database and apply schema.
///
/// The database file is created if missing.
///
/// # Errors
///
/// Returns `AppError::Config` for a malformed connection string and
/// `AppError::Db` if the connection or schema application fails.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Database> {
    let options = parse_url(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    schema::bootstrap_schema(&pool).await?;
    info!(max_connections, "sqlite pool ready");
    Ok(pool)
}

/// Connect to an in-memory `SQLite` database and apply schema.
///
/// The pool holds exactly one connection that is never recycled, since
/// each in-memory connection is its own database.
///
/// # Errors
///
/// Returns `AppError::Db` if the connection or schema application fails.
pub async fn connect_memory() -> Result<Database> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    schema::bootstrap_schema(&pool).await?;
    Ok(pool)
}

/// Open a new unit-of-work on the pool.
///
/// # Errors
///
/// Returns `AppError::Db` if no connection can be acquired.
pub async fn new_session(db: &Database) -> Result<Session> {
    Ok(db.begin().await?)
}
