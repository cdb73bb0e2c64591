use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::CapacityError;
use crate::key::Key;
use crate::mix::index_in_range;
use crate::mix::mix;

/// Whether `populated` keys in `capacity` slots is over the 90% growth
/// trigger.
#[inline(always)]
fn over_max_load(populated: u32, capacity: u32) -> bool {
    u64::from(populated) * 10 > u64::from(capacity) * 9
}

/// Slot count that puts `populated` keys at 80% load, `ceil(populated / 0.8)`.
#[inline(always)]
fn target_capacity(populated: u32) -> u64 {
    (u64::from(populated) * 5).div_ceil(4).max(1)
}

fn try_alloc_slots<K: Key>(capacity: u32) -> Result<Vec<K>, CapacityError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity as usize)
        .map_err(|_| CapacityError::out_of_memory::<K>(capacity as usize))?;
    slots.resize(capacity as usize, K::ZERO);
    Ok(slots)
}

/// An open-addressing set of fixed-width unsigned keys using linear probing.
///
/// Empty slots hold [`Key::ZERO`], so the buffer needs no separate occupancy
/// map; the zero key itself is remembered in a flag next to the buffer. A key
/// starts probing at `index_in_range(mix(key), capacity)` and walks forward,
/// wrapping at the end of the buffer, until it meets itself or an empty slot.
///
/// ## Growth
///
/// A new table has a single slot. Whenever an insertion would take the load
/// above 90%, the buffer is reallocated to `ceil(len / 0.8)` slots and every
/// key is re-probed into it. Since the buffer always keeps at least one empty
/// slot, every probe terminates.
///
/// ## Example
///
/// ```rust
/// use shard_set::ProbingSet;
///
/// let mut set: ProbingSet<u32> = ProbingSet::new();
/// assert!(set.insert(17));
/// assert!(!set.insert(17));
/// assert!(set.insert(0));
///
/// assert!(set.contains(17));
/// assert!(set.contains(0));
/// assert!(!set.contains(18));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone)]
pub struct ProbingSet<K: Key> {
    slots: Vec<K>,
    capacity: u32,
    count: u32,
    contains_zero: bool,
}

/// Rows of sixteen slots shown by `Debug` before the rest is summarized.
const DEBUG_ROWS: usize = 8;

impl<K: Key> Debug for ProbingSet<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;

        let mut rows = self
            .slots
            .chunks(16)
            .take(DEBUG_ROWS)
            .map(|w| {
                w.iter()
                    .map(|k| {
                        if *k == K::ZERO {
                            String::from("..")
                        } else {
                            format!("{:02x}", mix(k.hash_input()) >> 24)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect::<Vec<_>>();
        let hidden = self.slots.len().saturating_sub(DEBUG_ROWS * 16);
        if hidden > 0 {
            rows.push(format!("... {hidden} more slots"));
        }

        f.debug_struct("ProbingSet")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("contains_zero", &self.contains_zero)
            .field("slots", &rows)
            .finish()
    }
}

impl<K: Key> Default for ProbingSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> ProbingSet<K> {
    /// Creates an empty set with a single slot.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates an empty set with a single slot, reporting allocation failure.
    pub fn try_new() -> Result<Self, CapacityError> {
        Self::try_with_capacity(1)
    }

    /// Creates an empty set with `capacity` slots (at least one).
    ///
    /// The set still grows once more than 90% of the slots are in use.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shard_set::ProbingSet;
    ///
    /// let set: ProbingSet<u64> = ProbingSet::with_capacity(100);
    /// assert_eq!(set.capacity(), 100);
    /// ```
    pub fn with_capacity(capacity: u32) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|e| e.fail())
    }

    /// Fallible version of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: u32) -> Result<Self, CapacityError> {
        let capacity = capacity.max(1);
        Ok(Self {
            slots: try_alloc_slots(capacity)?,
            capacity,
            count: 0,
            contains_zero: false,
        })
    }

    /// Returns the number of keys in the set, including the zero key.
    pub fn len(&self) -> usize {
        self.count as usize + usize::from(self.contains_zero)
    }

    /// Returns `true` if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.count == 0 && !self.contains_zero
    }

    /// Returns the number of slots in the backing buffer.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the slot where `key` lives, or the empty slot ending its probe
    /// sequence.
    #[inline(always)]
    fn probe(&self, key: K) -> usize {
        debug_assert!(key != K::ZERO);
        debug_assert!(self.slots.len() == self.capacity as usize);

        let capacity = self.capacity as usize;
        let mut pos = index_in_range(mix(key.hash_input()), self.capacity) as usize;
        loop {
            // SAFETY: `index_in_range` returns a value below `capacity`, and the
            // wrap below keeps `pos` there. `slots.len() == capacity` at all
            // times.
            let slot = unsafe { *self.slots.get_unchecked(pos) };
            if slot == K::ZERO || slot == key {
                return pos;
            }
            pos += 1;
            if pos == capacity {
                pos = 0;
            }
        }
    }

    /// Returns `true` if `key` has been inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shard_set::ProbingSet;
    ///
    /// let mut set: ProbingSet<u16> = ProbingSet::new();
    /// set.insert(3);
    /// assert!(set.contains(3));
    /// assert!(!set.contains(0));
    /// ```
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        if key == K::ZERO {
            return self.contains_zero;
        }
        self.slots[self.probe(key)] == key
    }

    /// Inserts `key`, returning `true` if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if growing would exceed `u32::MAX` slots, and aborts through
    /// [`alloc::alloc::handle_alloc_error`] if the new buffer cannot be
    /// allocated. Use [`try_insert`](Self::try_insert) to handle either case.
    #[inline]
    pub fn insert(&mut self, key: K) -> bool {
        match self.try_insert(key) {
            Ok(inserted) => inserted,
            Err(e) => e.fail(),
        }
    }

    /// Inserts `key`, returning `Ok(true)` if it was not already present.
    ///
    /// If the required growth fails the set is left exactly as it was.
    pub fn try_insert(&mut self, key: K) -> Result<bool, CapacityError> {
        if key == K::ZERO {
            return Ok(!core::mem::replace(&mut self.contains_zero, true));
        }

        let mut pos = self.probe(key);
        if self.slots[pos] == key {
            return Ok(false);
        }

        let populated = self.count + 1;
        if over_max_load(populated, self.capacity) {
            self.try_resize(populated)?;
            pos = self.probe(key);
        }

        self.slots[pos] = key;
        self.count = populated;
        Ok(true)
    }

    /// Reallocates the buffer to `ceil(len / 0.8)` slots and re-probes every
    /// key into it.
    ///
    /// Insertion calls this on its own; calling it directly resizes the buffer
    /// to the 80% load target, which shrinks a sparsely filled set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shard_set::ProbingSet;
    ///
    /// let mut set: ProbingSet<u32> = ProbingSet::with_capacity(1000);
    /// for k in 1..=8 {
    ///     set.insert(k);
    /// }
    /// set.grow();
    /// assert_eq!(set.capacity(), 10);
    /// assert!((1..=8).all(|k| set.contains(k)));
    /// ```
    pub fn grow(&mut self) {
        if let Err(e) = self.try_grow() {
            e.fail()
        }
    }

    /// Fallible version of [`grow`](Self::grow).
    pub fn try_grow(&mut self) -> Result<(), CapacityError> {
        self.try_resize(self.count)
    }

    /// Rehashes into a buffer sized for `populated` keys. On error nothing
    /// changes.
    #[cold]
    fn try_resize(&mut self, populated: u32) -> Result<(), CapacityError> {
        let requested = target_capacity(populated);
        let capacity = u32::try_from(requested)
            .map_err(|_| CapacityError::CapacityExceeded { requested })?;
        debug_assert!(capacity > self.count);

        let slots = try_alloc_slots(capacity)?;
        let old_slots = core::mem::replace(&mut self.slots, slots);
        self.capacity = capacity;

        for key in old_slots.into_iter().filter(|k| *k != K::ZERO) {
            let pos = self.probe(key);
            self.slots[pos] = key;
        }

        Ok(())
    }

    /// Distance from each stored key's home slot to where it was placed,
    /// bucketed by distance.
    ///
    /// Index `i` of the result counts keys that sit `i` slots past their
    /// home. The zero key is not in the buffer and is not counted.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = Vec::new();
        for (pos, key) in self.slots.iter().enumerate() {
            if *key == K::ZERO {
                continue;
            }
            let home = index_in_range(mix(key.hash_input()), self.capacity) as usize;
            let distance = (pos + self.slots.len() - home) % self.slots.len();
            if hist.len() <= distance {
                hist.resize(distance + 1, 0);
            }
            hist[distance] += 1;
        }
        hist
    }

    /// Returns occupancy and probe-length statistics for this set.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        let hist = self.probe_histogram();
        let total_probe: usize = hist.iter().enumerate().map(|(d, &n)| d * n).sum();
        let total_slots = self.capacity as usize;
        let occupied_slots = self.count as usize;

        crate::stats::DebugStats {
            populated: self.len(),
            total_slots,
            occupied_slots,
            contains_zero: self.contains_zero,
            load_factor: occupied_slots as f64 / total_slots as f64,
            max_probe: hist.len().saturating_sub(1),
            mean_probe: if occupied_slots == 0 {
                0.0
            } else {
                total_probe as f64 / occupied_slots as f64
            },
            total_bytes: total_slots * core::mem::size_of::<K>(),
            wasted_bytes: (total_slots - occupied_slots) * core::mem::size_of::<K>(),
        }
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        crate::stats::print_histogram(&self.probe_histogram(), self.count as usize);
    }
}
