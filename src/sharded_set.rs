use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::CapacityError;
use crate::key::U24;
use crate::probing_set::ProbingSet;

/// Number of independent tables in a [`ShardedSet`].
pub const SHARDS: usize = 256;

/// Splits a key into its shard (the low byte) and the 24-bit sub-key stored
/// in that shard (the remaining bits).
#[inline(always)]
fn split(value: u32) -> (usize, U24) {
    ((value & 0xFF) as usize, U24::truncate(value >> 8))
}

/// The error for failing to allocate the shard array itself.
fn tables_alloc_error() -> CapacityError {
    CapacityError::out_of_memory::<ProbingSet<U24>>(SHARDS)
}

/// A set of `u32` keys spread over 256 linear-probing tables.
///
/// The low byte of a key selects one of [`SHARDS`] [`ProbingSet`]s, and the
/// upper 24 bits are stored there as a three-byte [`U24`]. Each shard only
/// ever sees about `len / 256` keys, so growth rehashes are small and local,
/// and a shard's working set is a fraction of the whole.
///
/// Shard selection relies on the low byte of the keys being spread out. Keys
/// that share a low byte all land in the same shard, which is the one input
/// pattern this layout handles badly.
///
/// # Examples
///
/// ```rust
/// use shard_set::ShardedSet;
///
/// let mut set = ShardedSet::new();
/// for i in 0..1000u32 {
///     set.insert(2 * i);
/// }
/// assert!(set.contains(1998));
/// assert!(!set.contains(1999));
/// assert_eq!(set.len(), 1000);
/// ```
#[derive(Clone)]
pub struct ShardedSet {
    tables: Box<[ProbingSet<U24>]>,
}

impl Debug for ShardedSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShardedSet")
            .field("len", &self.len())
            .field("shards", &self.tables.len())
            .field(
                "slots",
                &self
                    .tables
                    .iter()
                    .map(|t| t.capacity() as usize)
                    .sum::<usize>(),
            )
            .finish()
    }
}

impl Default for ShardedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardedSet {
    /// Creates an empty set; every shard starts with a single slot.
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|e| e.fail())
    }

    /// Creates an empty set, reporting allocation failure.
    pub fn try_new() -> Result<Self, CapacityError> {
        let mut tables = Vec::new();
        tables
            .try_reserve_exact(SHARDS)
            .map_err(|_| tables_alloc_error())?;
        for _ in 0..SHARDS {
            tables.push(ProbingSet::try_new()?);
        }
        Ok(Self {
            tables: tables.into_boxed_slice(),
        })
    }

    /// Inserts `value`, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Aborts through [`alloc::alloc::handle_alloc_error`] if the shard's new
    /// buffer cannot be allocated.
    #[inline]
    pub fn insert(&mut self, value: u32) -> bool {
        let (shard, key) = split(value);
        self.tables[shard].insert(key)
    }

    /// Inserts `value`, handing back allocation failure instead of aborting.
    pub fn try_insert(&mut self, value: u32) -> Result<bool, CapacityError> {
        let (shard, key) = split(value);
        self.tables[shard].try_insert(key)
    }

    /// Returns `true` if `value` has been inserted.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        let (shard, key) = split(value);
        self.tables[shard].contains(key)
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.tables.iter().map(ProbingSet::len).sum()
    }

    /// Returns `true` if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(ProbingSet::is_empty)
    }

    /// Returns the table holding every key whose low byte is `shard`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shard_set::ShardedSet;
    /// use shard_set::U24;
    ///
    /// let mut set = ShardedSet::new();
    /// set.insert(0x1234_5607);
    /// assert!(set.shard(0x07).contains(U24::truncate(0x12_3456)));
    /// assert!(set.shard(0x08).is_empty());
    /// ```
    pub fn shard(&self, shard: u8) -> &ProbingSet<U24> {
        &self.tables[usize::from(shard)]
    }

    /// Returns the number of keys held by each shard, indexed by shard id.
    #[cfg(any(test, feature = "stats"))]
    pub fn shard_lengths(&self) -> Vec<usize> {
        self.tables.iter().map(ProbingSet::len).collect()
    }

    /// Returns occupancy and probe-length statistics across all shards.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::ShardedStats {
        let shards: Vec<_> = self.tables.iter().map(ProbingSet::debug_stats).collect();
        crate::stats::ShardedStats::aggregate(&shards)
    }
}

impl Extend<u32> for ShardedSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<u32> for ShardedSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
