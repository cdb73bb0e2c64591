use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use proptest::prelude::*;

use crate::ProbingSet;
use crate::ShardedSet;
use crate::U24;

#[derive(Debug, Clone)]
enum Op {
    Insert(u32),
    Contains(u32),
}

// Keys cluster in a few shards so collisions and growth actually happen.
fn key() -> impl Strategy<Value = u32> {
    prop_oneof![
        any::<u32>(),
        (0u32..4, 0u32..2048).prop_map(|(shard, sub)| (sub << 8) | shard),
        0u32..1024,
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => key().prop_map(Op::Insert),
        2 => key().prop_map(Op::Contains),
    ]
}

proptest! {
    #[test]
    fn sharded_set_matches_model(ops in proptest::collection::vec(op(), 0..2000)) {
        let mut set = ShardedSet::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    prop_assert_eq!(set.insert(k), model.insert(k));
                }
                Op::Contains(k) => {
                    prop_assert_eq!(set.contains(k), model.contains(&k));
                }
            }
        }

        prop_assert_eq!(set.len(), model.len());
        for &k in &model {
            prop_assert!(set.contains(k));
        }
    }

    #[test]
    fn probing_set_keeps_load_bounds(keys in proptest::collection::vec(0u32..0x100_0000, 0..3000)) {
        let mut set: ProbingSet<U24> = ProbingSet::new();
        let mut model = BTreeSet::new();

        for k in keys {
            let before = set.capacity();
            prop_assert_eq!(set.insert(U24::truncate(k)), model.insert(k));

            let occupied = set.len() - usize::from(model.contains(&0));
            prop_assert!(occupied * 10 <= set.capacity() as usize * 9);
            if set.capacity() != before {
                prop_assert!(occupied * 5 <= set.capacity() as usize * 4);
            }
        }

        let missing: Vec<u32> = (0..0x100u32).filter(|k| !model.contains(k)).collect();
        for k in missing {
            prop_assert!(!set.contains(U24::truncate(k)));
        }
        for &k in &model {
            prop_assert!(set.contains(U24::truncate(k)));
        }
    }
}
