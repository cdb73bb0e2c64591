use core::fmt::Debug;

/// A fixed-width unsigned key that can be stored in a
/// [`ProbingSet`](crate::ProbingSet).
///
/// The all-zero value ([`Key::ZERO`]) doubles as the marker for an empty slot,
/// so the table never stores it in its buffer and tracks it with a flag
/// instead.
pub trait Key: Copy + Eq + Debug {
    /// The reserved value marking an empty slot.
    const ZERO: Self;

    /// The integer fed to [`mix`](crate::mix::mix) for this key.
    fn hash_input(self) -> u64;
}

impl Key for u16 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn hash_input(self) -> u64 {
        u64::from(self)
    }
}

impl Key for u32 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn hash_input(self) -> u64 {
        u64::from(self)
    }
}

impl Key for u64 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn hash_input(self) -> u64 {
        self
    }
}

/// A 24-bit unsigned integer packed into three bytes.
///
/// This is the sub-key type of a [`ShardedSet`](crate::ShardedSet) shard: once
/// the low byte of a `u32` has picked the shard, the remaining 24 bits are all
/// the shard needs to store, and three-byte slots keep the buffers a quarter
/// smaller than `u32` slots would be.
///
/// # Examples
///
/// ```rust
/// use shard_set::U24;
///
/// let k = U24::new(0x12_3456).unwrap();
/// assert_eq!(k.get(), 0x12_3456);
/// assert!(U24::new(0x100_0000).is_none());
/// assert_eq!(U24::truncate(0xAB12_3456).get(), 0x12_3456);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U24([u8; 3]);

impl U24 {
    /// The largest representable value, `2^24 - 1`.
    pub const MAX: U24 = U24([0xFF; 3]);

    /// Returns `Some` if `value` fits in 24 bits.
    #[inline(always)]
    pub const fn new(value: u32) -> Option<Self> {
        if value > 0xFF_FFFF {
            None
        } else {
            Some(Self::truncate(value))
        }
    }

    /// Keeps the low 24 bits of `value`.
    #[inline(always)]
    pub const fn truncate(value: u32) -> Self {
        let [a, b, c, _] = value.to_le_bytes();
        U24([a, b, c])
    }

    /// Returns the value as a `u32`.
    #[inline(always)]
    pub const fn get(self) -> u32 {
        let [a, b, c] = self.0;
        u32::from_le_bytes([a, b, c, 0])
    }
}

impl Debug for U24 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "U24({:#08x})", self.get())
    }
}

impl From<U24> for u32 {
    #[inline(always)]
    fn from(value: U24) -> Self {
        value.get()
    }
}

impl Key for U24 {
    const ZERO: Self = U24([0; 3]);

    #[inline(always)]
    fn hash_input(self) -> u64 {
        u64::from(self.get())
    }
}
