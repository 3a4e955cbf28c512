//! `SQLite` schema bootstrap logic.
//!
//! The table definition uses `CREATE TABLE IF NOT EXISTS` and is safe to
//! re-run on every server startup. An existing table with a different
//! shape is left untouched.

use sqlx::SqlitePool;

use crate::Result;

/// Apply the todo table definition to the connected `SQLite` database.
///
/// # Errors
///
/// Returns `AppError::Db` if the DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS todo_item (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    description     TEXT,
    completed       INTEGER NOT NULL DEFAULT 0 CHECK(completed IN (0, 1))
);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
