//! Entry records for entrybook.
//!
//! Implements the data model, input validation, and the five data access
//! operations (insert, list, get, update, delete) on the `entries` table.
//!
//! Operations come in two layers:
//!
//! - free functions in [`store`] that run one parameterized statement on a
//!   borrowed [`rusqlite::Connection`];
//! - [`EntryStore`], which opens a scoped connection per call, runs the
//!   matching free function, and releases the connection before returning.
//!
//! Storage operations only accept [`EntryFields`], which can only be built
//! through validation, so an empty name never reaches the database.

mod error;
mod model;
mod scoped;
pub mod store;

pub use error::{EntryError, ValidationError};
pub use model::{parse_age_input, Entry, EntryFields, MAX_AGE};
pub use scoped::EntryStore;
pub use store::{delete_entry, get_entry, insert_entry, list_entries, update_entry};
