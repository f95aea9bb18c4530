//! Cache Key Module
//!
//! Derives fixed-form lookup keys from request text.

use std::fmt;

use sha2::{Digest, Sha256};

// == Cache Key ==
/// Opaque lookup key: the lowercase hex SHA-256 digest of a request.
///
/// Two keys are equal only if they were derived from identical requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the hex digest backing this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Derive Key ==
/// Derives a cache key from the canonical text form of a request.
///
/// Pure and total: any string is accepted, including the empty one.
pub fn derive_key(request: &str) -> CacheKey {
    let mut hasher = Sha256::new();
    hasher.update(request.as_bytes());
    CacheKey(format!("{:x}", hasher.finalize()))
}
