//! ChainTable: fixed-size bucket array with separately chained entries.

use crate::cursor::{Cursor, Keys, Position, Values};
use crate::error::TableError;
use crate::hasher::{Djb2, SlotHasher};
use core::fmt;
use core::mem;
use log::{debug, trace};
use slotmap::SlotMap;

/// Slot count used when a table is created with 0 slots.
pub const DEFAULT_SLOT_COUNT: usize = 128;

slotmap::new_key_type! {
    pub(crate) struct EntryKey;
}

#[derive(Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    next: Option<EntryKey>,
}

/// Walks one chain from its head.
struct Chain<'a, V> {
    entries: &'a SlotMap<EntryKey, Entry<V>>,
    cur: Option<EntryKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (EntryKey, &'a Entry<V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        let e = self.entries.get(k)?;
        self.cur = e.next;
        Some((k, e))
    }
}

/// A hash table from string keys to values with a slot count fixed at
/// construction.
///
/// Each slot heads a singly linked chain of entries; new keys are appended
/// at the tail of their chain and updates happen in place. Entries live in
/// a generational arena, and chain links are arena keys. The table owns
/// its key copies. Values are moved in by [`put`](Self::put) and handed
/// back by `put` (on replacement) and [`remove`](Self::remove).
///
/// Not synchronized; see [`SyncChainTable`](crate::SyncChainTable) for the
/// locked variant.
pub struct ChainTable<V, H = Djb2> {
    hasher: H,
    buckets: Box<[Option<EntryKey>]>,
    entries: SlotMap<EntryKey, Entry<V>>,
}

impl<V> ChainTable<V> {
    /// Creates an empty table with `slot_count` slots, or
    /// [`DEFAULT_SLOT_COUNT`] when `slot_count` is 0.
    pub fn new(slot_count: usize) -> Self {
        Self::with_hasher(slot_count, Djb2)
    }

    /// Like [`new`](Self::new), but reports a failure to allocate the bucket
    /// array instead of aborting.
    pub fn try_new(slot_count: usize) -> Result<Self, TableError> {
        Self::try_with_hasher(slot_count, Djb2)
    }
}

impl<V> Default for ChainTable<V> {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT)
    }
}

fn resolve_slot_count(requested: usize) -> usize {
    if requested == 0 {
        debug!(
            "slot count 0 requested, using default of {}",
            DEFAULT_SLOT_COUNT
        );
        DEFAULT_SLOT_COUNT
    } else {
        requested
    }
}

impl<V, H> ChainTable<V, H>
where
    H: SlotHasher,
{
    pub fn with_hasher(slot_count: usize, hasher: H) -> Self {
        let slots = resolve_slot_count(slot_count);
        debug!(
            "creating chain table: slots={} hasher={}",
            slots,
            core::any::type_name::<H>()
        );
        Self {
            hasher,
            buckets: vec![None; slots].into_boxed_slice(),
            entries: SlotMap::with_key(),
        }
    }

    pub fn try_with_hasher(slot_count: usize, hasher: H) -> Result<Self, TableError> {
        let slots = resolve_slot_count(slot_count);
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(slots)
            .map_err(|source| TableError::AllocationFailed { slots, source })?;
        buckets.resize(slots, None);
        debug!(
            "creating chain table: slots={} hasher={}",
            slots,
            core::any::type_name::<H>()
        );
        Ok(Self {
            hasher,
            buckets: buckets.into_boxed_slice(),
            entries: SlotMap::with_key(),
        })
    }

    #[inline]
    fn slot_of(&self, key: &str) -> usize {
        self.hasher.slot_index(key.as_bytes(), self.buckets.len())
    }

    fn find(&self, key: &str) -> Option<EntryKey> {
        self.chain(self.slot_of(key))
            .find(|(_, e)| &*e.key == key)
            .map(|(k, _)| k)
    }

    /// Stores `value` under `key`.
    ///
    /// If `key` is already present its value is replaced in place and the
    /// previous value is returned; the entry keeps its chain position.
    /// Otherwise a new entry is appended to the tail of the key's chain and
    /// `None` is returned.
    pub fn put(&mut self, key: &str, value: V) -> Option<V> {
        let slot = self.slot_of(key);
        let mut tail = None;
        let mut cur = self.buckets[slot];
        while let Some(k) = cur {
            let e = &mut self.entries[k];
            if &*e.key == key {
                trace!("put: updated {:?} in slot {}", key, slot);
                return Some(mem::replace(&mut e.value, value));
            }
            tail = Some(k);
            cur = e.next;
        }

        // Allocate before linking.
        let new = self.entries.insert(Entry {
            key: key.into(),
            value,
            next: None,
        });
        match tail {
            None => self.buckets[slot] = Some(new),
            Some(t) => self.entries[t].next = Some(new),
        }
        trace!("put: inserted {:?} in slot {}", key, slot);
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let k = self.find(key)?;
        self.entries.get(k).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        self.entries.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.slot_of(key);
        let mut prev: Option<EntryKey> = None;
        let mut cur = self.buckets[slot];
        while let Some(k) = cur {
            let e = &self.entries[k];
            if &*e.key == key {
                // Unlink before releasing the slot.
                let next = e.next;
                match prev {
                    None => self.buckets[slot] = next,
                    Some(p) => self.entries[p].next = next,
                }
                let entry = self.entries.remove(k)?;
                trace!("remove: {:?} from slot {}", key, slot);
                return Some(entry.value);
            }
            prev = Some(k);
            cur = e.next;
        }
        None
    }
}

impl<V, H> ChainTable<V, H> {
    #[inline]
    fn chain(&self, slot: usize) -> Chain<'_, V> {
        Chain {
            entries: &self.entries,
            cur: self.buckets[slot],
        }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Number of buckets, fixed for the table's lifetime.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of stored entries, counted by walking every chain.
    pub fn size(&self) -> usize {
        (0..self.buckets.len()).map(|i| self.chain(i).count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Option::is_none)
    }

    /// Drops every entry; the slot count is unchanged.
    pub fn clear(&mut self) {
        trace!("clear: dropping {} entries", self.entries.len());
        self.entries.clear();
        self.buckets.iter_mut().for_each(|b| *b = None);
    }

    /// Length of each chain, indexed by slot.
    pub fn chain_lengths(&self) -> Vec<usize> {
        (0..self.buckets.len())
            .map(|i| self.chain(i).count())
            .collect()
    }

    /// Writes one line per slot: the slot index right-aligned in four
    /// columns and a colon, then each key of the chain, quoted, in chain
    /// order.
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for i in 0..self.buckets.len() {
            write!(out, "{:4}:", i)?;
            for (_, e) in self.chain(i) {
                write!(out, " \"{}\"", e.key)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor<'_, V, H> {
        Cursor::new(self)
    }

    /// Iterates `(key, value)` pairs by ascending slot, then chain order.
    pub fn iter(&self) -> Cursor<'_, V, H> {
        self.cursor()
    }

    pub fn keys(&self) -> Keys<'_, V, H> {
        Keys::new(self.cursor())
    }

    pub fn values(&self) -> Values<'_, V, H> {
        Values::new(self.cursor())
    }

    /// Position of the entry that follows `pos` in scan order.
    ///
    /// A `pos.entry` that no longer resolves (removed since it was
    /// recorded) resumes the scan at the next slot.
    pub(crate) fn successor(&self, pos: Position) -> Option<(usize, EntryKey)> {
        let start = match pos.entry {
            Some(k) => {
                if let Some(next) = self.entries.get(k).and_then(|e| e.next) {
                    return Some((pos.index, next));
                }
                pos.index + 1
            }
            None => pos.index,
        };
        self.buckets
            .get(start..)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .find_map(|(off, head)| head.map(|k| (start + off, k)))
    }

    pub(crate) fn entry_at(&self, k: EntryKey) -> Option<(&str, &V)> {
        self.entries.get(k).map(|e| (&*e.key, &e.value))
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, H> IntoIterator for &'a ChainTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Cursor<'a, V, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, H> Extend<(K, V)> for ChainTable<V, H>
where
    K: AsRef<str>,
    H: SlotHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k.as_ref(), v);
        }
    }
}
