//! Slot hashing strategies.
//!
//! A [`SlotHasher`] maps the bytes of a key to a `u64`; the table reduces
//! that modulo its slot count. The default is [`Djb2`]. All strategies are
//! pure functions of the key bytes, so bucket placement is stable across
//! calls and across processes.

/// Hashes key bytes for bucket selection.
pub trait SlotHasher {
    fn hash(&self, key: &[u8]) -> u64;

    /// Bucket index of `key` in a table with `slot_count` slots.
    #[inline]
    fn slot_index(&self, key: &[u8], slot_count: usize) -> usize {
        debug_assert!(slot_count > 0);
        (self.hash(key) % slot_count as u64) as usize
    }
}

/// Dan Bernstein's multiply-by-33 hash: seed 5381, `h = h * 33 + byte`,
/// with 64-bit wraparound.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Djb2;

impl SlotHasher for Djb2 {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        key.iter().fold(5381u64, |h, &b| {
            (h << 5).wrapping_add(h).wrapping_add(u64::from(b))
        })
    }
}

/// The sdbm hash (gawk's variant): `h = byte + (h << 6) + (h << 16) - h`,
/// seed 0, 64-bit wraparound.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Sdbm;

impl SlotHasher for Sdbm {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        key.iter().fold(0u64, |h, &b| {
            u64::from(b)
                .wrapping_add(h << 6)
                .wrapping_add(h << 16)
                .wrapping_sub(h)
        })
    }
}

/// Polynomial hash `h = 31 * h + byte` over 32-bit unsigned arithmetic.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Poly31;

impl SlotHasher for Poly31 {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        let h = key
            .iter()
            .fold(0u32, |h, &b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        u64::from(h)
    }
}

impl<H: SlotHasher + ?Sized> SlotHasher for &H {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        (**self).hash(key)
    }
}
