//! Schema initializer for the `entries` table.
//!
//! The table definition is embedded at compile time and uses
//! `CREATE TABLE IF NOT EXISTS`, so running it is a no-op once the table is
//! present. There is no version tracking; the shape of the table is fixed.

use rusqlite::Connection;

use crate::error::DbError;

const ENTRIES_SCHEMA: &str = include_str!("schema/entries.sql");

/// Creates the `entries` table if it does not already exist.
///
/// # Errors
///
/// Returns `DbError::Schema` if the statement fails.
pub fn ensure_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(ENTRIES_SCHEMA).map_err(DbError::Schema)?;
    tracing::debug!("entries table ensured");
    Ok(())
}
