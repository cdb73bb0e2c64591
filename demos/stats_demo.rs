use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use shard_set::ShardedSet;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "count", default_value_t = 1_000_000)]
    count: u32,

    /// Draw keys at random instead of inserting consecutive even numbers.
    #[arg(short = 'r', long = "random")]
    random: bool,

    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    println!("Filling ShardedSet with {} values...", args.count);

    let mut set = ShardedSet::new();
    let mut rng = SmallRng::seed_from_u64(args.seed);
    for i in 0..args.count {
        let value = if args.random {
            rng.random()
        } else {
            i.wrapping_mul(2)
        };
        set.insert(value);
    }

    println!("Inserted {} distinct values", set.len());

    let stats = set.debug_stats();
    stats.print();

    let lengths = set.shard_lengths();
    let (busiest, busiest_len) = lengths
        .iter()
        .copied()
        .enumerate()
        .max_by_key(|&(_, len)| len)
        .unwrap_or((0, 0));
    println!("Busiest shard: {} ({} keys)", busiest, busiest_len);

    let shard = set.shard(busiest as u8);
    shard.print_probe_histogram();
    shard.debug_stats().print();
}
