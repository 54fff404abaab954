//! Primary record storage.
//!
//! `RecordStore` is the single owner of every record in a catalog. Records
//! live in an arena — a slot vector where a record's [`RecordId`] is its
//! slot position — while a separate id list preserves insertion order.
//! Secondary indexes hold `RecordId` back-references into this arena and
//! never own record copies that could drift out of sync.
//!
//! The store is deliberately duplicate-tolerant: two records with the same
//! key may coexist at this layer. Key uniqueness is a catalog-level concern,
//! enforced by [`Catalog`](crate::catalog::Catalog) through its index.

use crate::error::{CatalogError, CatalogResult};
use crate::types::{Record, RecordId};
use std::ops::Range;
use tracing::{debug, warn};

/// Ordered, duplicate-tolerant primary storage for records.
///
/// # Architecture
///
/// - **Arena storage**: `slots[id]` holds the record with that id; removal
///   vacates the slot without shifting ids, so outstanding back-references
///   stay valid.
/// - **Order list**: insertion order of live records; positional access and
///   iteration go through it.
///
/// Ids are assigned sequentially and never reused while the store lives;
/// [`clear`](RecordStore::clear) resets the assignment.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Direct indexing: record id == slot position.
    slots: Vec<Option<Record>>,
    /// Ids of live records in insertion order.
    order: Vec<RecordId>,
}

impl RecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { slots: Vec::new(), order: Vec::new() }
    }

    /// Create a store with pre-allocated capacity for records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), order: Vec::with_capacity(capacity) }
    }

    /// Append a record to the end of the store and return its id.
    ///
    /// O(1) amortised. Fails with [`CatalogError::InvalidInput`] when the
    /// record is malformed; the store is untouched on failure.
    pub fn append(&mut self, record: Record) -> CatalogResult<RecordId> {
        record.validate()?;

        let id = self.slots.len() as RecordId;
        debug!(id, key = %record.key, "record appended");
        self.slots.push(Some(record));
        self.order.push(id);
        Ok(id)
    }

    /// Get the record at `position` (0-based insertion order).
    ///
    /// Fails with [`CatalogError::IndexOutOfRange`] outside `[0, len)`.
    pub fn get(&self, position: usize) -> CatalogResult<&Record> {
        let id = *self
            .order
            .get(position)
            .ok_or_else(|| CatalogError::out_of_range(position, self.order.len()))?;
        self.resolve(id)
            .ok_or_else(|| CatalogError::inconsistency("get", None, "order entry has no record"))
    }

    /// Get the records at positions `[start, end)` — half-open, never
    /// inclusive of `end`.
    pub fn range(&self, range: Range<usize>) -> CatalogResult<Vec<&Record>> {
        let len = self.order.len();
        if range.start > range.end {
            return Err(CatalogError::out_of_range(range.start, len));
        }
        if range.end > len {
            return Err(CatalogError::out_of_range(range.end, len));
        }
        self.order[range].iter().map(|&id| {
            self.resolve(id).ok_or_else(|| {
                CatalogError::inconsistency("range", None, "order entry has no record")
            })
        }).collect()
    }

    /// Resolve an arena back-reference.
    ///
    /// Returns `None` for ids that were never assigned or whose record has
    /// been removed.
    pub fn by_id(&self, id: RecordId) -> Option<&Record> {
        self.resolve(id)
    }

    /// Remove the first record whose key equals `key`.
    ///
    /// Linear scan; remaining order is stable. Returns the freed id and the
    /// removed record, or `None` when no record carries the key.
    pub fn remove_by_key(&mut self, key: &str) -> Option<(RecordId, Record)> {
        let position = self
            .order
            .iter()
            .position(|&id| self.resolve(id).is_some_and(|r| r.key == key));
        match position {
            Some(position) => {
                let id = self.order.remove(position);
                let record = self.slots[id as usize].take()?;
                debug!(id, key = %record.key, "record removed");
                Some((id, record))
            }
            None => {
                warn!(key, "record not found in store");
                None
            }
        }
    }

    /// Remove and return the record at `position`.
    ///
    /// Out-of-range positions report absence (`None`) rather than failing.
    pub fn remove_at(&mut self, position: usize) -> Option<Record> {
        if position >= self.order.len() {
            return None;
        }
        let id = self.order.remove(position);
        let record = self.slots[id as usize].take()?;
        debug!(id, position, key = %record.key, "record removed at position");
        Some(record)
    }

    /// Empty the store. O(n). Id assignment restarts from zero.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        debug!("store cleared");
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over live records in insertion order.
    ///
    /// The iterator is lazy and restartable. It holds a shared borrow of the
    /// store, so mutating while an iteration is open does not compile;
    /// callers that need to mutate based on a scan materialise the
    /// candidates first (e.g. via [`Catalog::keys`](crate::catalog::Catalog::keys)).
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.order.iter().filter_map(|&id| self.resolve(id))
    }

    /// Check whether any live record carries `key`. Linear scan.
    pub fn contains_key(&self, key: &str) -> bool {
        self.iter().any(|r| r.key == key)
    }

    /// Check whether the store holds a record equal to `record` (key
    /// equality, per the record equality contract).
    pub fn contains(&self, record: &Record) -> bool {
        self.iter().any(|r| r == record)
    }

    fn resolve(&self, id: RecordId) -> Option<&Record> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }
}
