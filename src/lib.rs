#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Integer mixing, range reduction, and a matching `Hasher`.
///
/// Every table in the crate hashes keys with [`mix::mix`] and turns the hash
/// into a slot with [`mix::index_in_range`].
pub mod mix;

mod error;
mod key;

/// A linear-probing set over fixed-width unsigned keys.
pub mod probing_set;

/// A `u32` set split across 256 probing sets by the key's low byte.
pub mod sharded_set;

cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "stats"))] {
        /// Occupancy and probe-length statistics.
        pub mod stats;

        pub use stats::DebugStats;
        pub use stats::ShardedStats;
    }
}

#[cfg(all(test, feature = "std"))]
mod proptests;

pub use error::CapacityError;
pub use key::Key;
pub use key::U24;
pub use probing_set::ProbingSet;
pub use sharded_set::SHARDS;
pub use sharded_set::ShardedSet;
