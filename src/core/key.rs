//! Cache key digests
//!
//! A cache key is the lowercase hex SHA-256 digest of a cell's
//! effective source. Any fixed-length deterministic digest would do;
//! the hex encoding matters because the store shards entries on the
//! first two characters of the key.

use sha2::{Digest, Sha256};

/// Compute the cache key for an effective source text
pub fn cache_key(effective_source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(effective_source.as_bytes());
    hex::encode(hasher.finalize())
}
