//! Entry operations that manage their own connection.

use entrybook_db::Database;

use crate::error::EntryError;
use crate::model::{Entry, EntryFields};
use crate::store;

/// Entry operations backed by a database file.
///
/// Each call opens a scoped connection, runs a single statement, and drops
/// the connection before returning. Nothing is cached between calls, so
/// every read reflects the latest committed state of the file.
#[derive(Debug, Clone)]
pub struct EntryStore {
    db: Database,
}

impl EntryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Ensures the `entries` table exists.
    pub fn init(&self) -> Result<(), EntryError> {
        self.db.initialize()?;
        Ok(())
    }

    /// Inserts a new entry and returns its id.
    pub fn create(&self, fields: &EntryFields) -> Result<i64, EntryError> {
        let conn = self.db.open()?;
        let id = store::insert_entry(&conn, fields)?;
        tracing::info!(id, "entry created");
        Ok(id)
    }

    /// Lists all entries, newest first.
    pub fn list(&self) -> Result<Vec<Entry>, EntryError> {
        let conn = self.db.open()?;
        store::list_entries(&conn)
    }

    pub fn get(&self, id: i64) -> Result<Option<Entry>, EntryError> {
        let conn = self.db.open()?;
        store::get_entry(&conn, id)
    }

    /// Overwrites the mutable fields of entry `id`.
    ///
    /// Returns the number of rows changed; an unknown id changes nothing.
    pub fn update(&self, id: i64, fields: &EntryFields) -> Result<usize, EntryError> {
        let conn = self.db.open()?;
        let count = store::update_entry(&conn, id, fields)?;
        if count == 0 {
            tracing::debug!(id, "update matched no entry");
        } else {
            tracing::info!(id, "entry updated");
        }
        Ok(count)
    }

    /// Deletes entry `id`. Returns the number of rows removed.
    pub fn delete(&self, id: i64) -> Result<usize, EntryError> {
        let conn = self.db.open()?;
        let count = store::delete_entry(&conn, id)?;
        if count == 0 {
            tracing::debug!(id, "delete matched no entry");
        } else {
            tracing::info!(id, "entry deleted");
        }
        Ok(count)
    }
}
