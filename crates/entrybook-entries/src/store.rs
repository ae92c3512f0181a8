//! Statement-level operations on the `entries` table.
//!
//! Every function runs exactly one parameterized statement on the borrowed
//! connection. None of them validate input or treat a missing row as an
//! error: update and delete report the number of affected rows instead.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::EntryError;
use crate::model::{Entry, EntryFields};

/// Inserts a new entry and returns its id.
///
/// `id` and `created_at` are assigned by SQLite.
pub fn insert_entry(conn: &Connection, fields: &EntryFields) -> Result<i64, EntryError> {
    let id = conn.query_row(
        "INSERT INTO entries (name, age, email) VALUES (?1, ?2, ?3) RETURNING id",
        params![fields.name(), fields.age(), fields.email()],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Lists every entry, most recent id first.
pub fn list_entries(conn: &Connection) -> Result<Vec<Entry>, EntryError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, email, created_at
        FROM entries ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], map_row_to_entry)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Fetches a single entry, or `None` if no row has that id.
pub fn get_entry(conn: &Connection, id: i64) -> Result<Option<Entry>, EntryError> {
    let entry = conn
        .query_row(
            "SELECT id, name, age, email, created_at
            FROM entries WHERE id = ?1",
            [id],
            map_row_to_entry,
        )
        .optional()?;
    Ok(entry)
}

/// Overwrites name, age and email of an entry in place.
///
/// Returns the number of rows changed (0 when `id` does not exist).
pub fn update_entry(conn: &Connection, id: i64, fields: &EntryFields) -> Result<usize, EntryError> {
    let count = conn.execute(
        "UPDATE entries SET name = ?1, age = ?2, email = ?3 WHERE id = ?4",
        params![fields.name(), fields.age(), fields.email(), id],
    )?;
    Ok(count)
}

/// Deletes an entry. Returns the number of rows removed.
pub fn delete_entry(conn: &Connection, id: i64) -> Result<usize, EntryError> {
    let count = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    Ok(count)
}

fn map_row_to_entry(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        email: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrybook_db::ensure_schema;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().expect("failed to open in-memory db");
        ensure_schema(&conn).expect("failed to create schema");
        conn
    }

    fn fields(name: &str, age: Option<i64>, email: &str) -> EntryFields {
        EntryFields::parse(name, age, email).expect("valid fields")
    }

    #[test]
    fn test_entry_crud() {
        let conn = setup_db();

        // Create
        let id = insert_entry(&conn, &fields("Alice", Some(30), "a@x.com")).expect("insert failed");

        // Read
        let entry = get_entry(&conn, id).expect("get failed").expect("entry should exist");
        assert_eq!(entry.id, id);
        assert_eq!(entry.name, "Alice");
        assert_eq!(entry.age, Some(30));
        assert_eq!(entry.email.as_deref(), Some("a@x.com"));
        assert!(entry.created_at.is_some());

        // Update
        let changed =
            update_entry(&conn, id, &fields("Alicia", None, "alicia@x.com")).expect("update failed");
        assert_eq!(changed, 1);
        let updated = get_entry(&conn, id).unwrap().unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.age, None);
        assert_eq!(updated.email.as_deref(), Some("alicia@x.com"));
        assert_eq!(updated.created_at, entry.created_at);

        // Delete
        let removed = delete_entry(&conn, id).expect("delete failed");
        assert_eq!(removed, 1);
        assert!(get_entry(&conn, id).unwrap().is_none());
    }

    #[test]
    fn test_list_entries_newest_first() {
        let conn = setup_db();
        let first = insert_entry(&conn, &fields("one", None, "")).unwrap();
        let second = insert_entry(&conn, &fields("two", None, "")).unwrap();
        let third = insert_entry(&conn, &fields("three", None, "")).unwrap();

        let ids: Vec<i64> = list_entries(&conn).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn test_list_entries_empty() {
        let conn = setup_db();
        assert!(list_entries(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_missing_rows_are_not_errors() {
        let conn = setup_db();
        let id = insert_entry(&conn, &fields("Keep", Some(5), "")).unwrap();

        assert!(get_entry(&conn, 9_999).unwrap().is_none());
        assert_eq!(update_entry(&conn, 9_999, &fields("Ghost", None, "")).unwrap(), 0);
        assert_eq!(delete_entry(&conn, 9_999).unwrap(), 0);

        let remaining = list_entries(&conn).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, id);
        assert_eq!(remaining[0].name, "Keep");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let conn = setup_db();
        let first = insert_entry(&conn, &fields("first", None, "")).unwrap();
        delete_entry(&conn, first).unwrap();

        let second = insert_entry(&conn, &fields("second", None, "")).unwrap();
        assert!(second > first, "autoincrement must not hand out {first} again");
    }

    #[test]
    fn test_rows_outside_validated_range_still_decode() {
        let conn = setup_db();
        conn.execute("INSERT INTO entries (name, age) VALUES ('Neg', -1)", [])
            .unwrap();
        conn.execute(
            "INSERT INTO entries (name, age, created_at) VALUES ('Undated', 9000, NULL)",
            [],
        )
        .unwrap();

        let entries = list_entries(&conn).expect("list must tolerate foreign rows");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Undated");
        assert_eq!(entries[0].age, Some(9000));
        assert_eq!(entries[0].created_at, None);
        assert_eq!(entries[1].name, "Neg");
        assert_eq!(entries[1].age, Some(-1));
        assert!(entries[1].created_at.is_some());

        let neg = get_entry(&conn, entries[1].id).unwrap().unwrap();
        assert_eq!(neg.age, Some(-1));
    }

    #[test]
    fn test_null_email_reads_as_none() {
        let conn = setup_db();
        conn.execute("INSERT INTO entries (name, email) VALUES ('Legacy', NULL)", [])
            .unwrap();
        let entries = list_entries(&conn).unwrap();
        assert_eq!(entries[0].email, None);
        assert_eq!(entries[0].age, None);
    }
}
