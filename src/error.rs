use core::alloc::Layout;

use alloc::alloc::handle_alloc_error;

/// The error returned when a table cannot be given the memory it needs.
///
/// Both variants are fatal for the infallible API: [`ProbingSet::insert`]
/// and friends abort through [`handle_alloc_error`] on `OutOfMemory` and panic
/// on `CapacityExceeded`, the way `Vec` does. The `try_*` variants hand the
/// error back instead.
///
/// [`ProbingSet::insert`]: crate::ProbingSet::insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    /// Growing would need more slots than the `u32` capacity counter (or the
    /// address space) can hold.
    #[error("capacity overflow: {requested} slots requested, at most 4294967295 supported")]
    CapacityExceeded {
        /// The slot count the growth policy asked for.
        requested: u64,
    },
    /// The allocator could not provide a buffer of the given layout.
    #[error("failed to allocate {} bytes", .layout.size())]
    OutOfMemory {
        /// The layout of the failed allocation.
        layout: Layout,
    },
}

impl CapacityError {
    /// The error for a failed allocation of `len` values of `T`.
    pub(crate) fn out_of_memory<T>(len: usize) -> Self {
        match Layout::array::<T>(len) {
            Ok(layout) => CapacityError::OutOfMemory { layout },
            Err(_) => CapacityError::CapacityExceeded {
                requested: len as u64,
            },
        }
    }

    /// Turns the error into the matching fatal failure.
    #[cold]
    #[inline(never)]
    pub(crate) fn fail(self) -> ! {
        match self {
            CapacityError::OutOfMemory { layout } => handle_alloc_error(layout),
            CapacityError::CapacityExceeded { .. } => panic!("{self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::key::U24;

    #[test]
    fn messages() {
        assert_eq!(
            CapacityError::CapacityExceeded {
                requested: 5_368_709_119
            }
            .to_string(),
            "capacity overflow: 5368709119 slots requested, at most 4294967295 supported"
        );
        assert_eq!(
            CapacityError::out_of_memory::<U24>(12).to_string(),
            "failed to allocate 36 bytes"
        );
    }

    #[test]
    fn out_of_memory_carries_the_failed_layout() {
        assert_eq!(
            CapacityError::out_of_memory::<u64>(10),
            CapacityError::OutOfMemory {
                layout: Layout::array::<u64>(10).unwrap()
            }
        );
        assert_eq!(
            CapacityError::out_of_memory::<u64>(usize::MAX),
            CapacityError::CapacityExceeded {
                requested: usize::MAX as u64
            }
        );
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn capacity_exceeded_panics() {
        CapacityError::CapacityExceeded { requested: u64::MAX }.fail();
    }
}
