//! Scoped connection opening and runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::DbError;
use crate::schema::ensure_schema;

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// How long a connection waits on a locked database file, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Handle to the entrybook database file.
///
/// Holds only the location and settings; no connection is kept open between
/// operations. Cloning is cheap and every clone opens its own connections.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    settings: DbRuntimeSettings,
}

impl Database {
    /// Creates a handle for the database file at `path`.
    ///
    /// Nothing is touched on disk until [`Database::open`] or
    /// [`Database::initialize`] is called.
    pub fn new(path: impl Into<PathBuf>, settings: DbRuntimeSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Opens a fresh connection with WAL mode and the busy timeout applied.
    ///
    /// The connection is closed when dropped. An in-memory path (`:memory:`)
    /// yields a private database per call, so it is only useful when the
    /// caller keeps the returned connection around.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Open` if the file cannot be opened or created, and
    /// `DbError::Pragma` if the connection cannot be configured.
    pub fn open(&self) -> Result<Connection, DbError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

        let conn =
            Connection::open_with_flags(&self.path, flags).map_err(|source| DbError::Open {
                path: self.path.display().to_string(),
                source,
            })?;

        configure(&conn, self.settings).map_err(DbError::Pragma)?;
        Ok(conn)
    }

    /// Ensures the `entries` table exists, using a scoped connection.
    ///
    /// Safe to call any number of times; existing rows are never touched.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or the schema
    /// statement fails.
    pub fn initialize(&self) -> Result<(), DbError> {
        let conn = self.open()?;
        ensure_schema(&conn)?;
        tracing::info!(path = %self.path.display(), "database initialized");
        Ok(())
    }
}

fn configure(conn: &Connection, settings: DbRuntimeSettings) -> rusqlite::Result<()> {
    // Busy timeout first: switching a fresh file to WAL needs the write lock.
    conn.busy_timeout(Duration::from_millis(settings.busy_timeout_ms))?;

    // In-memory databases report "memory", which is expected and acceptable.
    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    if journal_mode != "wal" && journal_mode != "memory" {
        return Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            Some(format!(
                "failed to set WAL journal mode, got: {}",
                journal_mode
            )),
        ));
    }

    Ok(())
}
