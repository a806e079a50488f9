//! Table configuration.

use crate::chain_table::{ChainTable, DEFAULT_SLOT_COUNT};
use crate::error::TableError;
use crate::hasher::{Djb2, SlotHasher};
use crate::sync_chain_table::SyncChainTable;

/// Configures slot count and hasher, then builds either table variant.
///
/// ```
/// use chain_hashmap::{Sdbm, TableBuilder};
///
/// let table = TableBuilder::new().slot_count(64).hasher(Sdbm).build_sync::<u32>();
/// table.put("answer", 42);
/// assert_eq!(table.get("answer"), Some(42));
/// ```
#[derive(Clone, Debug)]
pub struct TableBuilder<H = Djb2> {
    slot_count: usize,
    hasher: H,
}

impl TableBuilder<Djb2> {
    pub fn new() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            hasher: Djb2,
        }
    }
}

impl Default for TableBuilder<Djb2> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SlotHasher> TableBuilder<H> {
    /// Number of buckets. 0 selects [`DEFAULT_SLOT_COUNT`].
    pub fn slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    pub fn hasher<T: SlotHasher>(self, hasher: T) -> TableBuilder<T> {
        TableBuilder {
            slot_count: self.slot_count,
            hasher,
        }
    }

    pub fn build<V>(self) -> ChainTable<V, H> {
        ChainTable::with_hasher(self.slot_count, self.hasher)
    }

    pub fn try_build<V>(self) -> Result<ChainTable<V, H>, TableError> {
        ChainTable::try_with_hasher(self.slot_count, self.hasher)
    }

    pub fn build_sync<V>(self) -> SyncChainTable<V, H> {
        SyncChainTable::with_hasher(self.slot_count, self.hasher)
    }

    pub fn try_build_sync<V>(self) -> Result<SyncChainTable<V, H>, TableError> {
        SyncChainTable::try_with_hasher(self.slot_count, self.hasher)
    }
}
