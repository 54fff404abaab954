//! The catalog facade.
//!
//! `Catalog` composes the primary [`RecordStore`] and the secondary
//! [`CatalogIndex`] behind a single mutation/query API and keeps the two in
//! lockstep: every mutation fans out to both structures inside one
//! `&mut self` call with no suspension points, so no caller can observe a
//! half-indexed catalog. Reads are routed to whichever structure answers
//! fastest — key/author/year lookups to the index, category scans and
//! statistics to the store.

use crate::error::{CatalogError, CatalogResult};
use crate::index::CatalogIndex;
use crate::stats::CatalogStats;
use crate::store::RecordStore;
use crate::types::{Record, RecordId};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// In-memory record catalog with consistent secondary indexes.
///
/// # Consistency
///
/// The catalog maintains key uniqueness: adding a record under an occupied
/// key fully displaces the previous record from the store *and* from all
/// three index mappings before the new one becomes visible. This keeps
/// `store.len() == index.len()` after every catalog-level operation —
/// the no-drift property the whole design hangs on.
///
/// # Concurrency
///
/// Single-threaded by construction: mutations take `&mut self`, reads take
/// `&self`, and there is no interior mutability. Iterators hold a shared
/// borrow, so removing while scanning does not compile; callers materialise
/// candidates first (see [`keys`](Catalog::keys)) and then remove by key.
pub struct Catalog {
    name: String,
    collection: RecordStore,
    index: CatalogIndex,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        info!(name = %name, "catalog created");
        Self { name, collection: RecordStore::new(), index: CatalogIndex::new() }
    }

    /// Create a catalog with a capacity hint for the expected record count.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        let name = name.into();
        info!(name = %name, capacity, "catalog created with capacity hint");
        Self {
            name,
            collection: RecordStore::with_capacity(capacity),
            index: CatalogIndex::with_capacity(capacity),
        }
    }

    /// The catalog's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a record, appending it to the store and indexing it.
    ///
    /// If another record is already catalogued under the same key it is
    /// fully displaced first — removed from the store and purged from the
    /// key, author and year mappings — so nothing keeps a stale reference
    /// to it. Fails with [`CatalogError::InvalidInput`] on a malformed
    /// record; failure is side-effect-free.
    pub fn add_record(&mut self, record: Record) -> CatalogResult<RecordId> {
        record.validate()?;
        let key = record.key.clone();

        if let Some(old_id) = self.index.key_id(&key) {
            let old = self.collection.by_id(old_id).cloned().ok_or_else(|| {
                CatalogError::inconsistency("add_record", Some(key.as_str()), "indexed id missing from store")
            })?;
            self.index.remove(&old, old_id);
            if self.collection.remove_by_key(&key).is_none() {
                return Err(CatalogError::inconsistency(
                    "add_record",
                    Some(key.as_str()),
                    "key indexed but absent from store",
                ));
            }
            debug!(key = %key, "displaced previously catalogued record");
        }

        let id = self.collection.append(record)?;
        let stored = self.collection.by_id(id).ok_or_else(|| {
            CatalogError::inconsistency("add_record", Some(key.as_str()), "appended record not resolvable")
        })?;
        self.index.insert(stored, id);
        info!(id, key = %key, "record added to catalog");
        Ok(id)
    }

    /// Remove the record catalogued under `key`.
    ///
    /// Returns `Ok(false)` when the key is unknown — absence is a normal
    /// outcome, and the catalog is left untouched. When the key is known,
    /// both the store removal and the index purge must succeed; either one
    /// reporting absence means the two structures disagree and surfaces as
    /// [`CatalogError::InternalInconsistency`].
    pub fn remove_record(&mut self, key: &str) -> CatalogResult<bool> {
        let Some(id) = self.index.key_id(key) else {
            warn!(key, "record not found in catalog");
            return Ok(false);
        };
        let indexed = self.collection.by_id(id).cloned().ok_or_else(|| {
            CatalogError::inconsistency("remove_record", Some(key), "indexed id missing from store")
        })?;

        if self.collection.remove_by_key(key).is_none() {
            return Err(CatalogError::inconsistency(
                "remove_record",
                Some(key),
                "key indexed but absent from store",
            ));
        }
        if !self.index.remove(&indexed, id) {
            return Err(CatalogError::inconsistency(
                "remove_record",
                Some(key),
                "record vanished from index during removal",
            ));
        }
        info!(id, key, "record removed from catalog");
        Ok(true)
    }

    /// Look up a record by its unique key. O(1) expected.
    pub fn find_by_key(&self, key: &str) -> Option<&Record> {
        self.index.key_id(key).and_then(|id| self.collection.by_id(id))
    }

    /// All records by `author`, in insertion order. Empty for unknown authors.
    pub fn find_by_author(&self, author: &str) -> Vec<&Record> {
        self.index
            .author_ids(author)
            .iter()
            .filter_map(|&id| self.collection.by_id(id))
            .collect()
    }

    /// All records published in `year`, in insertion order.
    pub fn find_by_year(&self, year: i32) -> Vec<&Record> {
        self.index
            .year_ids(year)
            .iter()
            .filter_map(|&id| self.collection.by_id(id))
            .collect()
    }

    /// All records whose category equals `category` exactly.
    ///
    /// Full scan over the store. The predicate is a genuine string equality
    /// against the record's category field — not a truthiness shortcut that
    /// would match every record for any non-empty argument.
    pub fn find_by_category(&self, category: &str) -> Vec<&Record> {
        self.collection.iter().filter(|r| r.category == category).collect()
    }

    /// Compute aggregate statistics from the current store contents.
    ///
    /// Recomputed on every call; nothing is cached and no state is shared
    /// between calls.
    pub fn statistics(&self) -> CatalogStats {
        let mut authors = HashSet::new();
        let mut categories = BTreeSet::new();
        let mut year_range: Option<(i32, i32)> = None;

        for record in self.collection.iter() {
            authors.insert(record.author.as_str());
            categories.insert(record.category.clone());
            year_range = Some(match year_range {
                None => (record.year, record.year),
                Some((min, max)) => (min.min(record.year), max.max(record.year)),
            });
        }

        CatalogStats {
            total_records: self.collection.len(),
            unique_authors: authors.len(),
            year_range,
            categories: categories.into_iter().collect(),
        }
    }

    /// Number of catalogued records.
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Check if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Check whether `key` is catalogued. O(1) expected.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Read-only iteration over records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.collection.iter()
    }

    /// Owned snapshot of every catalogued key, in insertion order.
    ///
    /// This is the supported way to pick mutation candidates from a scan:
    /// materialise the keys, then remove by key — never remove through a
    /// live iteration handle.
    pub fn keys(&self) -> Vec<String> {
        self.collection.iter().map(|r| r.key.clone()).collect()
    }

    /// Positional read into the store. See [`RecordStore::get`].
    pub fn get(&self, position: usize) -> CatalogResult<&Record> {
        self.collection.get(position)
    }

    /// Read-only view of the primary store.
    pub fn collection(&self) -> &RecordStore {
        &self.collection
    }

    /// Read-only view of the index set.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Walk the full store/index invariant and report the first violation.
    ///
    /// Checks, in order: the store and key index agree on the record count;
    /// every stored record resolves through `by_key` to a field-identical
    /// record grouped under its author and year; every grouped id is
    /// reachable through `by_key`; no grouped mapping holds an empty group.
    pub fn verify_integrity(&self) -> CatalogResult<()> {
        if self.collection.len() != self.index.len() {
            return Err(CatalogError::inconsistency(
                "verify_integrity",
                None,
                format!(
                    "store holds {} records but index knows {} keys",
                    self.collection.len(),
                    self.index.len()
                ),
            ));
        }

        for record in self.collection.iter() {
            let id = self.index.key_id(&record.key).ok_or_else(|| {
                CatalogError::inconsistency(
                    "verify_integrity",
                    Some(record.key.as_str()),
                    "stored record missing from key index",
                )
            })?;
            let indexed = self.collection.by_id(id).ok_or_else(|| {
                CatalogError::inconsistency(
                    "verify_integrity",
                    Some(record.key.as_str()),
                    "key index points at a vacated slot",
                )
            })?;
            let fields_match = indexed.key == record.key
                && indexed.title == record.title
                && indexed.author == record.author
                && indexed.year == record.year
                && indexed.category == record.category;
            if !fields_match {
                return Err(CatalogError::inconsistency(
                    "verify_integrity",
                    Some(record.key.as_str()),
                    "key index resolves to a different record",
                ));
            }
            if !self.index.author_ids(&record.author).contains(&id) {
                return Err(CatalogError::inconsistency(
                    "verify_integrity",
                    Some(record.key.as_str()),
                    "record missing from its author group",
                ));
            }
            if !self.index.year_ids(record.year).contains(&id) {
                return Err(CatalogError::inconsistency(
                    "verify_integrity",
                    Some(record.key.as_str()),
                    "record missing from its year group",
                ));
            }
        }

        for id in self.index.grouped_ids() {
            let record = self.collection.by_id(id).ok_or_else(|| {
                CatalogError::inconsistency(
                    "verify_integrity",
                    None,
                    format!("grouped id {id} dangles into the store"),
                )
            })?;
            if self.index.key_id(&record.key) != Some(id) {
                return Err(CatalogError::inconsistency(
                    "verify_integrity",
                    Some(record.key.as_str()),
                    "grouped id not reachable through the key index",
                ));
            }
        }

        if self.index.has_empty_groups() {
            return Err(CatalogError::inconsistency(
                "verify_integrity",
                None,
                "grouped mapping holds an empty group",
            ));
        }

        Ok(())
    }
}
