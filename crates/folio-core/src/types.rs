//! Core record types for the folio catalog engine.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique identifier for records inside a store.
///
/// A `RecordId` is an arena handle: it equals the record's slot position in
/// the owning [`RecordStore`](crate::store::RecordStore) and stays valid for
/// the record's whole lifetime. Ids are never reused while the store lives
/// (a [`clear`](crate::store::RecordStore::clear) resets the assignment).
pub type RecordId = u64;

/// One catalog entry.
///
/// A record is a plain owned value: it carries no behaviour beyond equality
/// and text containment. The `key` field is the unique identifier (analogous
/// to an ISBN) and is immutable by convention for the record's lifetime.
///
/// # Equality
///
/// Two records are equal iff their `key` strings are equal by content,
/// regardless of which instance holds them. Equality never degenerates into
/// reference identity: `PartialEq`, `Eq` and `Hash` are implemented over the
/// key text alone, so a record compares equal to its own clone and to any
/// other instance carrying the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub category: String,
    pub key: String,
}

impl Record {
    /// Construct a record from its five fields.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        category: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            category: category.into(),
            key: key.into(),
        }
    }

    /// Case-insensitive containment check against `title` and `author`.
    ///
    /// The empty needle matches every record.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.author.to_lowercase().contains(&needle)
    }

    /// Check the record is well-formed enough to enter a store.
    ///
    /// A record without a key has no identity and is rejected with
    /// [`CatalogError::InvalidInput`] before any mutation happens.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.key.is_empty() {
            return Err(CatalogError::invalid_field("key", "record key must not be empty"));
        }
        Ok(())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} [{}]",
            self.title, self.author, self.year, self.category, self.key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str) -> Record {
        Record::new("Foundation", "Isaac Asimov", 1951, "Science", key)
    }

    #[test]
    fn equality_is_structural_on_key() {
        let a = record("KEY-000001");
        let b = Record::new("Cosmos", "Carl Sagan", 1980, "Science", "KEY-000001");
        let c = record("KEY-000002");

        // Same key, completely different fields: same logical record.
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let r = record("KEY-000001");

        assert!(r.matches_keyword("Foundation"));
        assert!(r.matches_keyword("foundation"));
        assert!(r.matches_keyword("ASIMOV"));
        assert!(!r.matches_keyword("Sagan"));
        // Empty needle matches everything.
        assert!(r.matches_keyword(""));
    }

    #[test]
    fn validate_rejects_empty_key() {
        let r = record("");
        let err = r.validate().unwrap_err();
        assert_eq!(err.category(), "invalid_input");

        assert!(record("KEY-000001").validate().is_ok());
    }

    #[test]
    fn display_includes_all_fields() {
        let r = record("KEY-000001");
        let rendered = r.to_string();
        assert_eq!(
            rendered,
            "Foundation by Isaac Asimov (1951) - Science [KEY-000001]"
        );
    }
}
