//! Cache Statistics Module
//!
//! Occupancy, memory and access counters reported by the cache.

use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// == Cache Stats ==
/// Point-in-time snapshot of cache occupancy and access counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub items: usize,
    /// Maximum number of entries
    pub max_items: usize,
    /// Sum of the estimated sizes of all entries
    pub memory_bytes: usize,
    /// Byte budget
    pub max_bytes: usize,
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups
    pub misses: u64,
    /// Number of entries evicted to satisfy a capacity limit
    pub evictions: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Current memory use in megabytes, rounded to two decimals.
    pub fn memory_mb(&self) -> f64 {
        round_mb(self.memory_bytes)
    }

    /// Memory budget in megabytes, rounded to two decimals.
    pub fn max_memory_mb(&self) -> f64 {
        round_mb(self.max_bytes)
    }
}

fn round_mb(bytes: usize) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

// == Stats Counters ==
/// Running access counters kept by the store between snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StatsCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl StatsCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = CacheStats::default();
        assert_eq!(stats.items, 0);
        assert_eq!(stats.memory_bytes, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_memory_mb_rounding() {
        let stats = CacheStats {
            memory_bytes: 1024 * 1024 + 1024 * 1024 / 3,
            max_bytes: 50 * 1024 * 1024,
            ..CacheStats::default()
        };
        assert_eq!(stats.memory_mb(), 1.33);
        assert_eq!(stats.max_memory_mb(), 50.0);
    }

    #[test]
    fn test_counters() {
        let mut counters = StatsCounters::default();
        counters.record_hit();
        counters.record_miss();
        counters.record_miss();
        counters.record_eviction();

        assert_eq!(counters.hits, 1);
        assert_eq!(counters.misses, 2);
        assert_eq!(counters.evictions, 1);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            items: 2,
            max_items: 50,
            ..CacheStats::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"items\":2"));
        assert!(json.contains("\"max_items\":50"));
    }
}
