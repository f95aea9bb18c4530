//! Cache Module
//!
//! Bounded in-memory cache with LRU eviction under both an item limit and a
//! byte budget.

mod entry;
mod key;
mod lru;
mod size;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{derive_key, CacheKey};
pub use lru::{LruList, SlotIndex};
pub use size::{AudioSamples, SizeEstimate};
pub use stats::CacheStats;
pub use store::BoundedCache;

// == Public Constants ==
/// Default maximum number of cached sample buffers
pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Default memory budget in megabytes
pub const DEFAULT_MAX_MEMORY_MB: usize = 50;
