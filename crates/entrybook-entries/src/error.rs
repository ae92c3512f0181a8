use entrybook_db::DbError;
use thiserror::Error;

/// Errors raised by storage operations on entries.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Db(#[from] DbError),
}

/// User input rejected before any storage call.
///
/// The display strings are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    EmptyName,
    #[error("Age must be between 0 and 150 (got {0}).")]
    AgeOutOfRange(i64),
    #[error("Age must be a whole number (got {0:?}).")]
    InvalidAge(String),
    #[error("Please confirm deletion by checking the box.")]
    MissingConfirmation,
    #[error("Select a record first.")]
    NoRecordSelected,
}
