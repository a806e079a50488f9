//! The operation set shared by both table variants.

use crate::chain_table::ChainTable;
use crate::hasher::SlotHasher;
use crate::sync_chain_table::SyncChainTable;

/// String-keyed table operations, implemented by [`ChainTable`] and
/// [`SyncChainTable`]. Lets callers pick the variant at construction and
/// write the rest of their code once.
pub trait Table<V> {
    /// Stores `value` under `key`, returning the value it replaced.
    fn put(&mut self, key: &str, value: V) -> Option<V>;

    fn get_cloned(&self, key: &str) -> Option<V>
    where
        V: Clone;

    fn contains_key(&self, key: &str) -> bool;

    fn remove(&mut self, key: &str) -> Option<V>;

    fn size(&self) -> usize;

    fn slot_count(&self) -> usize;
}

impl<V, H: SlotHasher> Table<V> for ChainTable<V, H> {
    fn put(&mut self, key: &str, value: V) -> Option<V> {
        ChainTable::put(self, key, value)
    }

    fn get_cloned(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get(key).cloned()
    }

    fn contains_key(&self, key: &str) -> bool {
        ChainTable::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        ChainTable::remove(self, key)
    }

    fn size(&self) -> usize {
        ChainTable::size(self)
    }

    fn slot_count(&self) -> usize {
        ChainTable::slot_count(self)
    }
}

impl<V, H: SlotHasher> Table<V> for SyncChainTable<V, H> {
    fn put(&mut self, key: &str, value: V) -> Option<V> {
        SyncChainTable::put(self, key, value)
    }

    fn get_cloned(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        SyncChainTable::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        SyncChainTable::remove(self, key)
    }

    fn size(&self) -> usize {
        SyncChainTable::size(self)
    }

    fn slot_count(&self) -> usize {
        SyncChainTable::slot_count(self)
    }
}
