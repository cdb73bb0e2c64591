use std::collections::HashSet;
use std::time::Instant;

use clap::Parser;
use shard_set::ShardedSet;
use shard_set::mix::MixBuildHasher;

/// Times the even/odd membership workload against a std `HashSet` hashed with
/// the same mixing function.
#[derive(Parser, Debug)]
struct Args {
    /// Number of even values to insert.
    #[arg(short = 'c', long = "count", default_value_t = 10_000_000)]
    count: u32,
}

fn main() {
    let args = Args::parse();
    let count = args.count.min(u32::MAX / 2);

    let start = Instant::now();
    let mut set = ShardedSet::new();
    for i in 0..count {
        set.insert(2 * i);
    }
    for i in 0..count {
        assert!(!set.contains(2 * i + 1));
        assert!(set.contains(2 * i));
    }
    let ours = start.elapsed();
    println!("Time with ShardedSet (s): {:.6}", ours.as_secs_f64());

    let start = Instant::now();
    let mut reference: HashSet<u32, MixBuildHasher> = HashSet::default();
    for i in 0..count {
        reference.insert(2 * i);
    }
    for i in 0..count {
        assert!(!reference.contains(&(2 * i + 1)));
        assert!(reference.contains(&(2 * i)));
    }
    let theirs = start.elapsed();
    println!("Time with std HashSet (s): {:.6}", theirs.as_secs_f64());

    println!(
        "Speedup: {:.2}x",
        theirs.as_secs_f64() / ours.as_secs_f64().max(f64::EPSILON)
    );
}
