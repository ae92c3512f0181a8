//! Storage layer for entrybook.
//!
//! Owns everything that touches the SQLite file directly: opening scoped
//! connections with the runtime pragmas applied, and the idempotent schema
//! initializer for the `entries` table.
//!
//! There is no connection pool. Callers open a [`Database::open`] connection
//! for a single operation and drop it when the operation returns, so every
//! statement commits before the connection is released.

mod connection;
mod error;
mod schema;

pub use connection::{Database, DbRuntimeSettings};
pub use error::DbError;
pub use schema::ensure_schema;
