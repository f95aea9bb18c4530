//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with size accounting.

use crate::cache::{CacheKey, SizeEstimate};

// == Cache Entry ==
/// A stored value together with its key and the size charged for it.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is indexed by
    pub key: CacheKey,
    /// The stored value
    pub value: V,
    /// Estimated size in bytes, fixed at insertion time
    pub size_bytes: usize,
}

impl<V: SizeEstimate> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry, sizing the value once.
    ///
    /// Removal must subtract exactly this recorded size.
    pub fn new(key: CacheKey, value: V) -> Self {
        let size_bytes = value.estimated_size();
        Self {
            key,
            value,
            size_bytes,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::derive_key;

    #[test]
    fn test_entry_records_size() {
        let entry = CacheEntry::new(derive_key("k"), vec![0u8; 128]);

        assert_eq!(entry.key, derive_key("k"));
        assert_eq!(entry.size_bytes, 128);
        assert_eq!(entry.value.len(), 128);
    }

    #[test]
    fn test_entry_size_is_fixed_at_creation() {
        let mut entry = CacheEntry::new(derive_key("k"), String::from("abc"));
        entry.value.push_str("defgh");

        assert_eq!(entry.size_bytes, 3);
    }
}
