//! Entry data model and input validation.

use crate::error::ValidationError;

/// Largest accepted age.
pub const MAX_AGE: i64 = 150;

/// One row of the `entries` table.
///
/// Decoding is as loose as the schema: rows written outside entrybook may
/// carry any integer age or a NULL timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Row id assigned by SQLite; never reused.
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub email: Option<String>,
    /// Insert time in SQLite's `YYYY-MM-DD HH:MM:SS` UTC form.
    pub created_at: Option<String>,
}

/// The mutable fields of an entry, already validated.
///
/// `name` is trimmed and non-empty, `age` is absent or in `1..=150`, and
/// `email` is trimmed (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    name: String,
    age: Option<u32>,
    email: String,
}

impl EntryFields {
    /// Validates raw form input.
    ///
    /// An age of zero means "not provided" and is stored as NULL.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` when `name` is blank after
    /// trimming, or `ValidationError::AgeOutOfRange` for ages outside
    /// `0..=150`.
    pub fn parse(name: &str, age: Option<i64>, email: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let age = match age {
            None | Some(0) => None,
            Some(a) if (1..=MAX_AGE).contains(&a) => {
                Some(u32::try_from(a).map_err(|_| ValidationError::AgeOutOfRange(a))?)
            }
            Some(a) => return Err(ValidationError::AgeOutOfRange(a)),
        };

        Ok(Self {
            name: name.to_string(),
            age,
            email: email.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Parses the age field of a submitted form.
///
/// A blank field is treated like the stepper's default of zero, i.e. absent.
///
/// # Errors
///
/// Returns `ValidationError::InvalidAge` if the text is not an integer.
pub fn parse_age_input(raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidAge(raw.to_string()))
}
