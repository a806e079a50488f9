//! chain-hashmap: a fixed-size hash table with string keys and separate
//! chaining, in a sequential and a synchronized flavor.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable associative container whose bucket layout
//!   is a pure function of the key bytes and the slot count.
//! - Layers:
//!   - SlotHasher: maps key bytes to a `u64`; djb2 by default, with sdbm
//!     and a 31-polynomial hash as alternatives.
//!   - ChainTable<V, H>: bucket array of chain heads over an entry arena;
//!     put/get/remove/size plus cursors.
//!   - SyncChainTable<V, H>: a ChainTable behind one coarse lock.
//!   - Table<V>: the operation set both variants implement.
//!
//! Constraints
//! - Slot count is fixed at construction (0 selects 128). There is no
//!   load-factor growth and no rehashing.
//! - Keys are strings; the table owns a copy of each. Values are opaque:
//!   the table never inspects them and hands them back on replacement and
//!   on removal.
//! - Keys are unique. A put of an existing key updates the value in place
//!   and keeps the entry's chain position; new keys go to the chain tail.
//! - `size` walks every chain; it is not cached.
//!
//! Storage
//! - Entries live in a `slotmap::SlotMap`; chain links and bucket heads
//!   are its generational keys. A key whose entry was removed never
//!   resolves again, which is what lets a lock-per-call cursor on the
//!   synchronized table notice a removal instead of reading freed state.
//!
//! Iteration
//! - Scan order is ascending slot, then chain order.
//! - `has_next` never moves a cursor; `get_next` past the end keeps
//!   returning `None`.
//! - A `Cursor` borrows its `ChainTable`, so the table cannot change under
//!   it. A `SyncCursor` locks per call and gives no snapshot guarantee
//!   across calls; `SyncChainTable::snapshot` does.
//!
//! Locking
//! - One `parking_lot::Mutex` per SyncChainTable, held for the full
//!   duration of each operation. Not reentrant: closures passed to
//!   `with_value` must not call back into the same table.
//!
//! Notes and non-goals
//! - No resizing, no deletion-safe iteration, no generic keys, no
//!   persistence.
//! - Construction aborts on allocation failure like any `Vec`; the `try_*`
//!   constructors report `TableError::AllocationFailed` instead.

mod builder;
mod chain_table;
#[cfg(test)]
mod chain_table_proptest;
mod cursor;
mod error;
pub mod hasher;
mod sync_chain_table;
mod table;

// Public surface
pub use builder::TableBuilder;
pub use chain_table::{ChainTable, DEFAULT_SLOT_COUNT};
pub use cursor::{Cursor, Keys, Values};
pub use error::TableError;
pub use hasher::{Djb2, Poly31, Sdbm, SlotHasher};
pub use sync_chain_table::{SyncChainTable, SyncCursor};
pub use table::Table;
