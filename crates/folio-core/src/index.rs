//! Secondary index set for the catalog.
//!
//! Three mappings over [`RecordId`] back-references into the primary store:
//! a unique key index and two grouped indexes (author, year). The index
//! never owns records — only ids — so it cannot hold a copy that drifts
//! from the arena.
//!
//! The consistency contract is purge-on-removal: once a record leaves the
//! index, no mapping may still reach its id, and a group emptied by the
//! removal is deleted outright rather than left as empty-vector residue.
//! Stale group entries are exactly the failure mode this module exists to
//! prevent.

use crate::types::{Record, RecordId};
use std::collections::HashMap;
use tracing::debug;

/// Statistics for the index set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Distinct keys known to the unique index.
    pub distinct_keys: usize,
    /// Author groups currently held.
    pub author_groups: usize,
    /// Year groups currently held.
    pub year_groups: usize,
    /// Total id references across both grouped indexes.
    pub total_group_refs: usize,
}

/// Secondary lookup structures over records owned by the primary store.
///
/// # Mappings
///
/// - `by_key`: key → id, at most one entry per key.
/// - `by_author`: author → ids, insertion order within the group.
/// - `by_year`: year → ids, insertion order within the group.
///
/// Replacing the record under an occupied key is orchestrated by the
/// catalog: it resolves the displaced record from the arena, removes it
/// here (purging its groups), then inserts the new one. See
/// [`Catalog::add_record`](crate::catalog::Catalog::add_record).
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_key: HashMap<String, RecordId>,
    by_author: HashMap<String, Vec<RecordId>>,
    by_year: HashMap<i32, Vec<RecordId>>,
}

impl CatalogIndex {
    /// Create a new empty index set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index set with pre-allocated key capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_key: HashMap::with_capacity(capacity),
            by_author: HashMap::new(),
            by_year: HashMap::new(),
        }
    }

    /// Index a record under all three mappings.
    ///
    /// The key must not be occupied: callers replacing a key remove the
    /// previous record first, so its group entries cannot be orphaned.
    pub fn insert(&mut self, record: &Record, id: RecordId) {
        let displaced = self.by_key.insert(record.key.clone(), id);
        debug_assert!(displaced.is_none(), "caller must unindex the previous record first");

        self.by_author.entry(record.author.clone()).or_default().push(id);
        self.by_year.entry(record.year).or_default().push(id);
        debug!(id, key = %record.key, "record indexed");
    }

    /// Remove a record's back-reference from all three mappings.
    ///
    /// The `by_key` entry is dropped only when it maps to this exact id, so
    /// removing an already-displaced record cannot evict its successor. The
    /// author and year groups are purged either way, and a group emptied by
    /// the purge is deleted.
    ///
    /// Returns whether the record was found in `by_key` prior to removal.
    pub fn remove(&mut self, record: &Record, id: RecordId) -> bool {
        let removed = match self.by_key.get(&record.key) {
            Some(&mapped) if mapped == id => {
                self.by_key.remove(&record.key);
                true
            }
            _ => false,
        };

        if let Some(ids) = self.by_author.get_mut(&record.author) {
            ids.retain(|&g| g != id);
            if ids.is_empty() {
                self.by_author.remove(&record.author);
            }
        }
        if let Some(ids) = self.by_year.get_mut(&record.year) {
            ids.retain(|&g| g != id);
            if ids.is_empty() {
                self.by_year.remove(&record.year);
            }
        }

        debug!(id, key = %record.key, removed, "record unindexed");
        removed
    }

    /// Look up the id indexed under `key`. O(1) expected.
    pub fn key_id(&self, key: &str) -> Option<RecordId> {
        self.by_key.get(key).copied()
    }

    /// Ids grouped under `author`, in insertion order.
    ///
    /// Unknown authors yield an empty slice, never "not found".
    pub fn author_ids(&self, author: &str) -> &[RecordId] {
        self.by_author.get(author).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids grouped under `year`, in insertion order.
    pub fn year_ids(&self, year: i32) -> &[RecordId] {
        self.by_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether `key` is indexed. O(1) expected.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Count of distinct known keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Check if the index set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Drop every entry from all three mappings.
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_author.clear();
        self.by_year.clear();
        debug!("index set cleared");
    }

    /// Get statistics about the index set.
    pub fn stats(&self) -> IndexStats {
        let total_group_refs = self.by_author.values().map(Vec::len).sum::<usize>()
            + self.by_year.values().map(Vec::len).sum::<usize>();
        IndexStats {
            distinct_keys: self.by_key.len(),
            author_groups: self.by_author.len(),
            year_groups: self.by_year.len(),
            total_group_refs,
        }
    }

    /// Iterate over every id reachable from the grouped mappings.
    ///
    /// Used by integrity checks: each of these ids must also be reachable
    /// through `by_key`.
    pub(crate) fn grouped_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.by_author
            .values()
            .chain(self.by_year.values())
            .flat_map(|ids| ids.iter().copied())
    }

    /// Check that no grouped mapping holds an empty group.
    pub(crate) fn has_empty_groups(&self) -> bool {
        self.by_author.values().any(Vec::is_empty) || self.by_year.values().any(Vec::is_empty)
    }
}
