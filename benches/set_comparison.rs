use core::hash::BuildHasher;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BenchmarkGroup;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::measurement::WallTime;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::Zipf;
use shard_set::ShardedSet;
use shard_set::mix::MixBuildHasher;
use siphasher::sip::SipHasher;

const SIZES: &[usize] = &[(1 << 12), (1 << 14), (1 << 16), (1 << 18), (1 << 20)];

#[derive(Clone, Copy)]
struct SipState {
    k0: u64,
    k1: u64,
}

impl Default for SipState {
    fn default() -> Self {
        let mut rng = SmallRng::seed_from_u64(0x51F);
        Self {
            k0: rng.random(),
            k1: rng.random(),
        }
    }
}

impl BuildHasher for SipState {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> SipHasher {
        SipHasher::new_with_keys(self.k0, self.k1)
    }
}

trait BenchSet {
    const NAME: &'static str;

    fn empty() -> Self;
    fn insert(&mut self, value: u32);
    fn contains(&self, value: u32) -> bool;
}

impl BenchSet for ShardedSet {
    const NAME: &'static str = "shard_set";

    fn empty() -> Self {
        ShardedSet::new()
    }

    fn insert(&mut self, value: u32) {
        ShardedSet::insert(self, value);
    }

    fn contains(&self, value: u32) -> bool {
        ShardedSet::contains(self, value)
    }
}

struct Hashbrown<S>(hashbrown::HashSet<u32, S>);

trait Named {
    const NAME: &'static str;
}

impl Named for MixBuildHasher {
    const NAME: &'static str = "hashbrown_mix";
}

impl Named for foldhash::fast::RandomState {
    const NAME: &'static str = "hashbrown_foldhash";
}

impl Named for SipState {
    const NAME: &'static str = "hashbrown_sip";
}

impl<S: BuildHasher + Default + Named> BenchSet for Hashbrown<S> {
    const NAME: &'static str = S::NAME;

    fn empty() -> Self {
        Hashbrown(hashbrown::HashSet::with_hasher(S::default()))
    }

    fn insert(&mut self, value: u32) {
        self.0.insert(value);
    }

    fn contains(&self, value: u32) -> bool {
        self.0.contains(&value)
    }
}

struct StdMix(std::collections::HashSet<u32, MixBuildHasher>);

impl BenchSet for StdMix {
    const NAME: &'static str = "std_mix";

    fn empty() -> Self {
        StdMix(std::collections::HashSet::default())
    }

    fn insert(&mut self, value: u32) {
        self.0.insert(value);
    }

    fn contains(&self, value: u32) -> bool {
        self.0.contains(&value)
    }
}

fn bench_one<S: BenchSet>(group: &mut BenchmarkGroup<'_, WallTime>, keys: &[u32], misses: &[u32]) {
    group.bench_function(BenchmarkId::new(S::NAME, keys.len()), |b| {
        b.iter(|| {
            let mut set = S::empty();
            for &k in keys {
                set.insert(k);
            }
            for (&hit, &miss) in keys.iter().zip(misses) {
                assert!(set.contains(black_box(hit)));
                assert!(!set.contains(black_box(miss)));
            }
            black_box(set)
        })
    });
}

fn bench_all(c: &mut Criterion, name: &str, workload: impl Fn(usize) -> (Vec<u32>, Vec<u32>)) {
    let mut group = c.benchmark_group(name);
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    group.sample_size(10);

    for &size in SIZES {
        let (keys, misses) = workload(size);
        group.throughput(Throughput::Elements(keys.len() as u64 * 3));

        bench_one::<ShardedSet>(&mut group, &keys, &misses);
        bench_one::<Hashbrown<MixBuildHasher>>(&mut group, &keys, &misses);
        bench_one::<Hashbrown<foldhash::fast::RandomState>>(&mut group, &keys, &misses);
        bench_one::<Hashbrown<SipState>>(&mut group, &keys, &misses);
        bench_one::<StdMix>(&mut group, &keys, &misses);
    }

    group.finish();
}

/// Even numbers in, odd numbers out.
fn even_odd(size: usize) -> (Vec<u32>, Vec<u32>) {
    let keys = (0..size as u32).map(|i| 2 * i).collect();
    let misses = (0..size as u32).map(|i| 2 * i + 1).collect();
    (keys, misses)
}

/// Uniformly random odd keys; misses are the same keys with the low bit
/// cleared.
fn random(size: usize) -> (Vec<u32>, Vec<u32>) {
    let mut rng = SmallRng::seed_from_u64(size as u64);
    let keys: Vec<u32> = (0..size).map(|_| rng.random::<u32>() | 1).collect();
    let misses = keys.iter().map(|k| k & !1).collect();
    (keys, misses)
}

/// Random upper bits with a Zipf-distributed low byte, so a handful of
/// shards take most of the keys.
fn skewed_low_byte(size: usize) -> (Vec<u32>, Vec<u32>) {
    let mut rng = SmallRng::seed_from_u64(!(size as u64));
    let zipf = Zipf::new(256.0, 1.1).unwrap();
    let keys: Vec<u32> = (0..size)
        .map(|_| {
            let low = rng.sample(&zipf) as u32 - 1;
            (rng.random::<u32>() << 8) | 0x100 | low
        })
        .collect();
    let misses = keys.iter().map(|k| k & !0x100).collect();
    (keys, misses)
}

fn bench_even_odd(c: &mut Criterion) {
    bench_all(c, "even_odd", even_odd);
}

fn bench_random(c: &mut Criterion) {
    bench_all(c, "random", random);
}

fn bench_skewed_low_byte(c: &mut Criterion) {
    bench_all(c, "skewed_low_byte", skewed_low_byte);
}

criterion_group!(benches, bench_even_odd, bench_random, bench_skewed_low_byte);
criterion_main!(benches);
