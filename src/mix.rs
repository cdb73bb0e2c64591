use core::hash::BuildHasherDefault;
use core::hash::Hasher;

/// Mixes an integer key into a well-distributed 32-bit hash.
///
/// This is a 64-bit shift/xor/multiply avalanche: every multiply is written as
/// shifts and adds, and the result is truncated to the low 32 bits. The
/// function is pure and deterministic, so a key always maps to the same
/// probe start for a given capacity.
///
/// # Examples
///
/// ```rust
/// use shard_set::mix::mix;
///
/// assert_eq!(mix(42), mix(42));
/// assert_ne!(mix(1), mix(2));
/// ```
#[inline(always)]
pub const fn mix(v: u64) -> u32 {
    let mut h = v;
    // (h << 21) - h - 1
    h = (!h).wrapping_add(h << 21);
    h ^= h >> 24;
    // h * 265
    h = h.wrapping_add(h << 3).wrapping_add(h << 8);
    h ^= h >> 14;
    // h * 21
    h = h.wrapping_add(h << 2).wrapping_add(h << 4);
    h ^= h >> 28;
    h as u32
}

/// Maps a 32-bit hash into `[0, capacity)` without a division.
///
/// The hash is treated as a fixed-point fraction of `2^32` and scaled by
/// `capacity`; the high word of the 64-bit product is the index. Hashes that
/// are not uniform over the full 32-bit range bias the result toward low
/// indices, which `mix` makes negligible.
///
/// `capacity` must be non-zero for the result to be a valid index.
///
/// # Examples
///
/// ```rust
/// use shard_set::mix::index_in_range;
///
/// assert_eq!(index_in_range(0, 10), 0);
/// assert_eq!(index_in_range(u32::MAX, 10), 9);
/// assert_eq!(index_in_range(1 << 31, 10), 5);
/// ```
#[inline(always)]
pub const fn index_in_range(h: u32, capacity: u32) -> u32 {
    ((h as u64 * capacity as u64) >> 32) as u32
}

/// A [`Hasher`] that runs integers through [`mix`].
///
/// Lets generic containers such as `std::collections::HashSet` or
/// `hashbrown::HashSet` hash `u32` keys exactly the way the crate's own tables
/// do, so the two can be compared on equal footing.
///
/// The 32-bit mixed value is returned in both halves of [`Hasher::finish`].
/// SwissTable-style containers take their control tags from the top bits of
/// the hash and would otherwise see only zeroes there.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "std")]
/// # {
/// use std::collections::HashSet;
///
/// use shard_set::mix::MixBuildHasher;
///
/// let mut set: HashSet<u32, MixBuildHasher> = HashSet::default();
/// set.insert(7);
/// assert!(set.contains(&7));
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MixHasher {
    hash: u32,
}

impl MixHasher {
    #[inline(always)]
    fn absorb(&mut self, value: u64) {
        self.hash = mix(value ^ u64::from(self.hash));
    }
}

impl Hasher for MixHasher {
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.absorb(u64::from_le_bytes(word));
        }
    }

    #[inline(always)]
    fn write_u8(&mut self, i: u8) {
        self.absorb(u64::from(i));
    }

    #[inline(always)]
    fn write_u16(&mut self, i: u16) {
        self.absorb(u64::from(i));
    }

    #[inline(always)]
    fn write_u32(&mut self, i: u32) {
        self.absorb(u64::from(i));
    }

    #[inline(always)]
    fn write_u64(&mut self, i: u64) {
        self.absorb(i);
    }

    #[inline(always)]
    fn write_usize(&mut self, i: usize) {
        self.absorb(i as u64);
    }

    #[inline(always)]
    fn finish(&self) -> u64 {
        let h = u64::from(self.hash);
        (h << 32) | h
    }
}

/// [`core::hash::BuildHasher`] producing [`MixHasher`]s.
pub type MixBuildHasher = BuildHasherDefault<MixHasher>;
