//! Low-level table statistics.
//!
//! Available with the `stats` feature. Printing requires `std`.

use alloc::vec::Vec;

/// Live entries counted by probe distance.
///
/// `counts[d]` is the number of occupied slots sitting `d` slots past their
/// home slot. Tombstoned slots are not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    /// Occupied slot counts, indexed by probe distance.
    pub counts: Vec<usize>,
}

impl ProbeHistogram {
    /// Largest probe distance of any live entry, or 0 for an empty table.
    pub fn max_probe_distance(&self) -> usize {
        self.counts.iter().rposition(|&n| n != 0).unwrap_or(0)
    }

    /// Average probe distance over live entries, or 0.0 for an empty table.
    pub fn mean_probe_distance(&self) -> f64 {
        let entries: usize = self.counts.iter().sum();
        if entries == 0 {
            return 0.0;
        }
        let total: usize = self
            .counts
            .iter()
            .enumerate()
            .map(|(distance, &n)| distance * n)
            .sum();
        total as f64 / entries as f64
    }
}

/// Slot usage snapshot of a [`HashTable`](crate::HashTable).
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries.
    pub populated: usize,
    /// Total number of slots.
    pub capacity: usize,
    /// Live entry count at which the table doubles.
    pub resize_threshold: usize,
    /// Slots holding a live entry.
    pub occupied_slots: usize,
    /// Slots holding a removed entry that still takes part in probing.
    pub tombstoned_slots: usize,
    /// Slots that have never been written since the last growth or clear.
    pub empty_slots: usize,
    /// `populated / capacity`.
    pub load_factor: f64,
    /// Largest probe distance of any live entry.
    pub max_probe_distance: usize,
    /// Average probe distance over live entries.
    pub mean_probe_distance: f64,
    /// Bytes held by the slot array and tombstone flags.
    pub total_bytes: usize,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        impl DebugStats {
            /// Pretty-print the statistics to stdout.
            pub fn print(&self) {
                println!("=== Hash Table Debug Statistics ===");
                println!(
                    "Population: {}/{} slots ({:.2}% load factor, grows at {})",
                    self.populated,
                    self.capacity,
                    self.load_factor * 100.0,
                    self.resize_threshold
                );
                println!(
                    "Slots: {} occupied, {} tombstoned, {} empty",
                    self.occupied_slots, self.tombstoned_slots, self.empty_slots
                );
                println!(
                    "Probe distance: max {}, mean {:.3}",
                    self.max_probe_distance, self.mean_probe_distance
                );
                println!("Total Allocated: {} bytes", self.total_bytes);
            }
        }

        impl ProbeHistogram {
            /// Prints the histogram as a horizontal bar chart, one row per
            /// probe distance.
            pub fn print(&self) {
                let max = self.counts.iter().copied().max().unwrap_or(0);
                if max == 0 {
                    println!("probe histogram: empty");
                    return;
                }

                let max_bar = 60usize;
                let entries: usize = self.counts.iter().sum();
                println!("probe histogram ({} entries):", entries);
                for (distance, &count) in self.counts.iter().enumerate() {
                    let width = (count * max_bar).div_ceil(max);
                    println!("{:>3} | {} ({})", distance, "█".repeat(width), count);
                }
            }
        }
    } else {
        impl DebugStats {
            /// No-op without the `std` feature.
            pub fn print(&self) {}
        }

        impl ProbeHistogram {
            /// No-op without the `std` feature.
            pub fn print(&self) {}
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::HashTable;

    #[test]
    fn empty_histogram() {
        let histogram = ProbeHistogram { counts: vec![0] };
        assert_eq!(histogram.max_probe_distance(), 0);
        assert_eq!(histogram.mean_probe_distance(), 0.0);
    }

    #[test]
    fn histogram_summary() {
        let histogram = ProbeHistogram {
            counts: vec![4, 2, 0, 2],
        };
        assert_eq!(histogram.max_probe_distance(), 3);
        assert_eq!(histogram.mean_probe_distance(), 1.0);
    }

    #[test]
    fn histogram_counts_every_live_entry() {
        let mut table = HashTable::new();
        for k in 0..500u32 {
            table.insert(k, k);
        }
        for k in 0..100u32 {
            table.remove(k);
        }
        let histogram = table.probe_histogram();
        assert_eq!(histogram.counts.iter().sum::<usize>(), 400);
        #[cfg(feature = "std")]
        histogram.print();
    }

    #[test]
    fn stats_add_up() {
        let mut table = HashTable::new();
        for k in 0..40u32 {
            table.insert(k, ());
        }
        for k in 0..10u32 {
            table.remove(k);
        }
        let stats = table.debug_stats();
        assert_eq!(stats.populated, 30);
        assert_eq!(stats.occupied_slots, 30);
        assert_eq!(stats.tombstoned_slots, 10);
        assert_eq!(
            stats.occupied_slots + stats.tombstoned_slots + stats.empty_slots,
            stats.capacity
        );
        assert_eq!(stats.resize_threshold, stats.capacity * 9 / 10);
        assert!(stats.load_factor < 0.9);
        #[cfg(feature = "std")]
        stats.print();
    }
}
