//! Error types for the storage layer.

/// Errors that can occur when opening or preparing the database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The database file could not be opened or created.
    #[error("failed to open database at {path}: {source}")]
    Open {
        /// Path that was being opened.
        path: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A connection pragma was rejected.
    #[error("failed to configure database connection: {0}")]
    Pragma(rusqlite::Error),

    /// The schema statement failed.
    #[error("failed to initialize schema: {0}")]
    Schema(rusqlite::Error),
}
