/// Debug statistics for a single [`ProbingSet`](crate::ProbingSet).
///
/// Available with the `stats` feature.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of keys in the set, including the zero key
    pub populated: usize,
    /// Total number of slots allocated
    pub total_slots: usize,
    /// Number of slots currently occupied
    pub occupied_slots: usize,
    /// Whether the zero key is held in the out-of-band flag
    pub contains_zero: bool,
    /// Load factor (occupied_slots / total_slots)
    pub load_factor: f64,
    /// Longest distance from a key's home slot to its actual slot
    pub max_probe: usize,
    /// Mean distance from a key's home slot to its actual slot
    pub mean_probe: f64,
    /// Total memory in bytes used by the slot buffer
    pub total_bytes: usize,
    /// Bytes held by empty slots
    pub wasted_bytes: usize,
}

impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probing Set Debug Statistics ===");
        println!(
            "Population: {} ({} in slots, zero key {})",
            self.populated,
            self.occupied_slots,
            if self.contains_zero { "present" } else { "absent" }
        );
        println!(
            "Slot Usage: {}/{} ({:.2}% load factor)",
            self.occupied_slots,
            self.total_slots,
            self.load_factor * 100.0
        );
        println!(
            "Probe Length: max {}, mean {:.3}",
            self.max_probe, self.mean_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// Debug statistics aggregated over every shard of a
/// [`ShardedSet`](crate::ShardedSet).
///
/// Available with the `stats` feature.
#[derive(Debug, Clone)]
pub struct ShardedStats {
    /// Number of keys in the set
    pub populated: usize,
    /// Slots allocated across all shards
    pub total_slots: usize,
    /// Slots occupied across all shards
    pub occupied_slots: usize,
    /// Fewest keys held by any shard
    pub min_shard_len: usize,
    /// Most keys held by any shard
    pub max_shard_len: usize,
    /// Highest load factor of any shard
    pub max_shard_load: f64,
    /// Longest probe distance in any shard
    pub max_probe: usize,
    /// Mean probe distance over every stored key
    pub mean_probe: f64,
    /// Total memory in bytes used by all slot buffers
    pub total_bytes: usize,
    /// Bytes held by empty slots across all shards
    pub wasted_bytes: usize,
}

impl ShardedStats {
    pub(crate) fn aggregate<'a>(shards: impl IntoIterator<Item = &'a DebugStats>) -> Self {
        let mut stats = ShardedStats {
            populated: 0,
            total_slots: 0,
            occupied_slots: 0,
            min_shard_len: usize::MAX,
            max_shard_len: 0,
            max_shard_load: 0.0,
            max_probe: 0,
            mean_probe: 0.0,
            total_bytes: 0,
            wasted_bytes: 0,
        };

        let mut total_probe = 0.0;
        for shard in shards {
            stats.populated += shard.populated;
            stats.total_slots += shard.total_slots;
            stats.occupied_slots += shard.occupied_slots;
            stats.min_shard_len = stats.min_shard_len.min(shard.populated);
            stats.max_shard_len = stats.max_shard_len.max(shard.populated);
            stats.max_shard_load = stats.max_shard_load.max(shard.load_factor);
            stats.max_probe = stats.max_probe.max(shard.max_probe);
            stats.total_bytes += shard.total_bytes;
            stats.wasted_bytes += shard.wasted_bytes;
            total_probe += shard.mean_probe * shard.occupied_slots as f64;
        }

        if stats.min_shard_len == usize::MAX {
            stats.min_shard_len = 0;
        }
        if stats.occupied_slots != 0 {
            stats.mean_probe = total_probe / stats.occupied_slots as f64;
        }
        stats
    }

    /// Pretty-print the aggregated statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Sharded Set Debug Statistics ===");
        println!("Population: {}", self.populated);
        println!(
            "Shard Population: min {}, max {}",
            self.min_shard_len, self.max_shard_len
        );
        println!(
            "Slot Usage: {}/{} ({:.2}% overall, {:.2}% worst shard)",
            self.occupied_slots,
            self.total_slots,
            if self.total_slots == 0 {
                0.0
            } else {
                self.occupied_slots as f64 / self.total_slots as f64 * 100.0
            },
            self.max_shard_load * 100.0
        );
        println!(
            "Probe Length: max {}, mean {:.3}",
            self.max_probe, self.mean_probe
        );
        println!(
            "Memory: {} bytes allocated, {} bytes wasted",
            self.total_bytes, self.wasted_bytes
        );
    }
}

/// Mean distance from home slot for a successful lookup in a linear-probing
/// table at the 90% growth trigger: `(1 + 1 / (1 - 0.9)) / 2 - 1`.
#[cfg(any(test, feature = "std"))]
pub(crate) const EXPECTED_DISTANCE_AT_MAX_LOAD: f64 = 4.5;

/// Width of the longest bar in a histogram row.
#[cfg(any(test, feature = "std"))]
const BAR_WIDTH: u64 = 50;

/// Renders `hist` (key counts indexed by distance from home slot) as text
/// rows: distance, count, cumulative share of keys, and a `#` bar scaled to
/// the most common distance. Rows past [`EXPECTED_DISTANCE_AT_MAX_LOAD`] are
/// flagged with `!`.
///
/// Returns no rows when `hist` holds no keys.
#[cfg(any(test, feature = "std"))]
pub(crate) fn histogram_rows(hist: &[usize]) -> alloc::vec::Vec<alloc::string::String> {
    use alloc::format;

    let total: usize = hist.iter().sum();
    let max = hist.iter().copied().max().unwrap_or(0) as u64;
    if total == 0 {
        return alloc::vec::Vec::new();
    }

    let mut seen = 0;
    hist.iter()
        .enumerate()
        .map(|(distance, &count)| {
            seen += count;
            let marker = if distance as f64 > EXPECTED_DISTANCE_AT_MAX_LOAD {
                '!'
            } else {
                ' '
            };
            let bar = "#".repeat((count as u64 * BAR_WIDTH).div_ceil(max) as usize);
            format!(
                "{marker}{distance:>3} {count:>8} {:>6.2}% |{bar}",
                seen as f64 / total as f64 * 100.0
            )
        })
        .collect()
}

/// Prints `hist` as produced by [`histogram_rows`].
#[cfg(feature = "std")]
pub(crate) fn print_histogram(hist: &[usize], populated: usize) {
    let rows = histogram_rows(hist);
    if rows.is_empty() {
        println!("probe histogram: empty");
        return;
    }

    println!(
        "probe histogram ({populated} keys, ! = past the {EXPECTED_DISTANCE_AT_MAX_LOAD} mean expected at 90% load):"
    );
    println!("dist    count   cumul");
    for row in rows {
        println!("{row}");
    }
}
