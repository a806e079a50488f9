//! Forward cursors over a [`ChainTable`].
//!
//! Scan order is ascending slot index, and chain order (insertion order)
//! within a slot. A cursor starts before the first entry; `has_next`
//! inspects without moving, `get_next` advances.

use crate::chain_table::{ChainTable, EntryKey};
use core::iter::FusedIterator;

/// Where a cursor stands: the slot being scanned and the entry last
/// returned from it, if any.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Position {
    pub(crate) index: usize,
    pub(crate) entry: Option<EntryKey>,
}

impl Position {
    /// Past every slot; no successor exists.
    pub(crate) fn exhausted(slot_count: usize) -> Self {
        Self {
            index: slot_count,
            entry: None,
        }
    }

    pub(crate) fn at(index: usize, entry: EntryKey) -> Self {
        Self {
            index,
            entry: Some(entry),
        }
    }
}

/// Read-only cursor over the entries of a [`ChainTable`].
///
/// Borrowing the table keeps it from being mutated while the cursor is
/// alive. Also usable as a plain [`Iterator`] of `(key, value)` pairs.
pub struct Cursor<'a, V, H> {
    table: &'a ChainTable<V, H>,
    pos: Position,
}

impl<'a, V, H> Cursor<'a, V, H> {
    pub(crate) fn new(table: &'a ChainTable<V, H>) -> Self {
        Self {
            table,
            pos: Position::default(),
        }
    }

    /// Whether another entry remains. Does not move the cursor.
    pub fn has_next(&self) -> bool {
        self.table.successor(self.pos).is_some()
    }

    /// Advances to the next entry and returns its key and value.
    pub fn next_entry(&mut self) -> Option<(&'a str, &'a V)> {
        let table = self.table;
        match table.successor(self.pos) {
            Some((index, k)) => {
                self.pos = Position::at(index, k);
                table.entry_at(k)
            }
            None => {
                self.pos = Position::exhausted(table.slot_count());
                None
            }
        }
    }

    /// Advances to the next entry and returns its value; `None` once
    /// exhausted, on every later call too.
    pub fn get_next(&mut self) -> Option<&'a V> {
        self.next_entry().map(|(_, v)| v)
    }
}

impl<'a, V, H> Clone for Cursor<'a, V, H> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            pos: self.pos,
        }
    }
}

impl<'a, V, H> Iterator for Cursor<'a, V, H> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}

impl<'a, V, H> FusedIterator for Cursor<'a, V, H> {}

/// Iterator over the keys of a [`ChainTable`], in scan order.
pub struct Keys<'a, V, H> {
    it: Cursor<'a, V, H>,
}

impl<'a, V, H> Keys<'a, V, H> {
    pub(crate) fn new(it: Cursor<'a, V, H>) -> Self {
        Self { it }
    }
}

impl<'a, V, H> Iterator for Keys<'a, V, H> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }
}

/// Iterator over the values of a [`ChainTable`], in scan order.
pub struct Values<'a, V, H> {
    it: Cursor<'a, V, H>,
}

impl<'a, V, H> Values<'a, V, H> {
    pub(crate) fn new(it: Cursor<'a, V, H>) -> Self {
        Self { it }
    }
}

impl<'a, V, H> Iterator for Values<'a, V, H> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.get_next()
    }
}
