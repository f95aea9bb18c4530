//! Cache Store Module
//!
//! Bounded cache combining a key index with an arena-backed LRU list, limited
//! both by entry count and by estimated memory.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::lru::{LruList, SlotIndex};
use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheKey, CacheStats, SizeEstimate};

// == Bounded Cache ==
/// LRU cache bounded by item count and by total estimated bytes.
///
/// Invariants after every call returns:
/// - `len() <= max_items`
/// - `memory_bytes()` equals the sum of the recorded entry sizes
/// - every key appears exactly once, ordered by recency
///
/// A single value larger than `max_bytes` empties the cache and is then
/// admitted anyway, leaving `memory_bytes() > max_bytes` until the next
/// `put`. With `max_items == 0` nothing is ever stored.
///
/// Not internally synchronized; wrap it in a lock to share it.
#[derive(Debug)]
pub struct BoundedCache<V> {
    /// Key to arena slot
    index: HashMap<CacheKey, SlotIndex>,
    /// Entries in recency order
    order: LruList<CacheEntry<V>>,
    /// Sum of entry sizes
    current_bytes: usize,
    max_items: usize,
    max_bytes: usize,
    counters: StatsCounters,
}

impl<V: SizeEstimate> BoundedCache<V> {
    // == Constructor ==
    /// Creates an empty cache with the given limits.
    ///
    /// # Arguments
    /// * `max_items` - Maximum number of entries
    /// * `max_bytes` - Maximum total estimated size in bytes
    pub fn new(max_items: usize, max_bytes: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: LruList::new(),
            current_bytes: 0,
            max_items,
            max_bytes,
            counters: StatsCounters::default(),
        }
    }

    /// Creates an empty cache with a budget expressed in megabytes.
    pub fn with_memory_mb(max_items: usize, max_memory_mb: usize) -> Self {
        Self::new(max_items, max_memory_mb.saturating_mul(1024 * 1024))
    }

    // == Get ==
    /// Looks up a value and marks it as most recently used.
    ///
    /// A miss leaves entries and recency order untouched; only the hit and
    /// miss counters reported by `stats` change.
    pub fn get(&mut self, key: &CacheKey) -> Option<&V> {
        let Some(&slot) = self.index.get(key) else {
            self.counters.record_miss();
            debug!(key = %key, "cache miss");
            return None;
        };

        self.counters.record_hit();
        self.order.move_to_back(slot);
        debug!(key = %key, "cache hit");
        self.order.get(slot).map(|entry| &entry.value)
    }

    // == Put ==
    /// Stores a value, replacing any previous value for the same key.
    ///
    /// Least recently used entries are evicted until both the count and
    /// the byte limit leave room for the incoming value, or the cache is
    /// empty.
    pub fn put(&mut self, key: CacheKey, value: V) {
        let entry = CacheEntry::new(key, value);

        // An update is a delete followed by an insert.
        if let Some(slot) = self.index.remove(&entry.key) {
            if let Some(old) = self.order.remove(slot) {
                self.current_bytes -= old.size_bytes;
            }
        }

        if self.max_items == 0 {
            debug!(key = %entry.key, "cache disabled, value not stored");
            return;
        }

        while !self.order.is_empty()
            && (self.order.len() >= self.max_items
                || self.current_bytes.saturating_add(entry.size_bytes) > self.max_bytes)
        {
            self.evict_lru();
        }

        if entry.size_bytes > self.max_bytes {
            warn!(
                key = %entry.key,
                size_bytes = entry.size_bytes,
                max_bytes = self.max_bytes,
                "admitting value larger than the memory budget"
            );
        }

        self.current_bytes += entry.size_bytes;
        let key = entry.key.clone();
        let slot = self.order.push_back(entry);
        self.index.insert(key, slot);
    }

    // == Peek ==
    /// Looks up a value without updating its recency or the hit counters.
    pub fn peek(&self, key: &CacheKey) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.order.get(slot).map(|entry| &entry.value)
    }

    // == Contains ==
    /// Checks whether a key is present without updating its recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.index.contains_key(key)
    }

    // == Peek LRU ==
    /// Returns the next eviction candidate without touching it.
    pub fn peek_lru(&self) -> Option<&CacheKey> {
        self.order.front().map(|entry| &entry.key)
    }

    // == Keys ==
    /// Returns the keys from least to most recently used.
    pub fn keys_lru_order(&self) -> Vec<CacheKey> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Stats ==
    /// Returns current occupancy and access statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            items: self.order.len(),
            max_items: self.max_items,
            memory_bytes: self.current_bytes,
            max_bytes: self.max_bytes,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
        }
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the sum of the estimated sizes of all entries.
    pub fn memory_bytes(&self) -> usize {
        self.current_bytes
    }

    // == Evict ==
    fn evict_lru(&mut self) {
        if let Some(evicted) = self.order.pop_front() {
            self.index.remove(&evicted.key);
            self.current_bytes -= evicted.size_bytes;
            self.counters.record_eviction();
            debug!(
                key = %evicted.key,
                size_bytes = evicted.size_bytes,
                "evicted least recently used entry"
            );
        }
    }
}
