//! SyncChainTable: a [`ChainTable`] behind one coarse lock.
//!
//! Every operation holds the lock from start to finish, so operations on
//! one table are serialized and each is atomic with respect to the others.
//! There is no concurrent read path, no try-lock and no timeout.
//!
//! [`SyncCursor`] takes the lock once per call. Between two calls other
//! threads may change the table, so a `true` from `has_next` is not a
//! promise that the following `get_next` returns a value. Use
//! [`SyncChainTable::snapshot`] for a consistent view.

use crate::chain_table::ChainTable;
use crate::cursor::Position;
use crate::error::TableError;
use crate::hasher::{Djb2, SlotHasher};
use core::fmt;
use parking_lot::Mutex;

/// Thread-safe chained hash table with string keys.
///
/// Values are cloned out on lookup, since no reference can outlive the
/// lock; [`with_value`](Self::with_value) reads in place instead.
#[derive(Debug)]
pub struct SyncChainTable<V, H = Djb2> {
    inner: Mutex<ChainTable<V, H>>,
}

impl<V> SyncChainTable<V> {
    pub fn new(slot_count: usize) -> Self {
        Self::from(ChainTable::new(slot_count))
    }

    pub fn try_new(slot_count: usize) -> Result<Self, TableError> {
        ChainTable::try_new(slot_count).map(Self::from)
    }
}

impl<V> Default for SyncChainTable<V> {
    fn default() -> Self {
        Self::from(ChainTable::default())
    }
}

impl<V, H> From<ChainTable<V, H>> for SyncChainTable<V, H> {
    fn from(table: ChainTable<V, H>) -> Self {
        Self {
            inner: Mutex::new(table),
        }
    }
}

impl<V, H> SyncChainTable<V, H>
where
    H: SlotHasher,
{
    pub fn with_hasher(slot_count: usize, hasher: H) -> Self {
        Self::from(ChainTable::with_hasher(slot_count, hasher))
    }

    pub fn try_with_hasher(slot_count: usize, hasher: H) -> Result<Self, TableError> {
        ChainTable::try_with_hasher(slot_count, hasher).map(Self::from)
    }

    /// See [`ChainTable::put`].
    pub fn put(&self, key: &str, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Clone of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Runs `f` on the value stored under `key` while the lock is held.
    ///
    /// `f` must not call back into this table; the lock is not reentrant.
    pub fn with_value<R, F>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// See [`ChainTable::remove`].
    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().remove(key)
    }
}

impl<V, H> SyncChainTable<V, H> {
    pub fn slot_count(&self) -> usize {
        self.inner.lock().slot_count()
    }

    /// Number of stored entries, counted by walking every chain.
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Owned copy of every `(key, value)` in scan order, taken under a
    /// single lock acquisition.
    pub fn snapshot(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.inner
            .lock()
            .iter()
            .map(|(k, v)| (k.to_owned(), v.clone()))
            .collect()
    }

    /// See [`ChainTable::dump`].
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.inner.lock().dump(out)
    }

    /// Cursor positioned before the first entry. It locks the table once
    /// per call and holds no lock in between.
    pub fn cursor(&self) -> SyncCursor<'_, V, H> {
        SyncCursor {
            table: self,
            pos: Position::default(),
        }
    }

    /// Exclusive access to the underlying table; no locking is needed.
    pub fn get_mut(&mut self) -> &mut ChainTable<V, H> {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> ChainTable<V, H> {
        self.inner.into_inner()
    }
}

/// Cursor over a [`SyncChainTable`] with weak consistency.
///
/// If the entry the cursor stands on is removed between calls, the scan
/// resumes at the next slot; the rest of that entry's chain is skipped.
pub struct SyncCursor<'a, V, H = Djb2> {
    table: &'a SyncChainTable<V, H>,
    pos: Position,
}

impl<'a, V, H> SyncCursor<'a, V, H> {
    /// Whether another entry is reachable right now. Does not move the
    /// cursor.
    pub fn has_next(&self) -> bool {
        self.table.inner.lock().successor(self.pos).is_some()
    }

    /// Advances and returns a clone of the next key and value.
    pub fn next_entry(&mut self) -> Option<(String, V)>
    where
        V: Clone,
    {
        let table = self.table.inner.lock();
        match table.successor(self.pos) {
            Some((index, k)) => {
                self.pos = Position::at(index, k);
                table
                    .entry_at(k)
                    .map(|(key, value)| (key.to_owned(), value.clone()))
            }
            None => {
                self.pos = Position::exhausted(table.slot_count());
                None
            }
        }
    }

    /// Advances and returns a clone of the next value; `None` once
    /// exhausted, on every later call too.
    pub fn get_next(&mut self) -> Option<V>
    where
        V: Clone,
    {
        self.next_entry().map(|(_, v)| v)
    }
}

impl<'a, V: Clone, H> Iterator for SyncCursor<'a, V, H> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}
