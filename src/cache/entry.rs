//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use crate::clock::Timestamp;

// == Cache Entry ==
/// Represents a single cache entry with value and timing metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (clock milliseconds), reset on overwrite
    pub created_at: Timestamp,
    /// Timestamp of the last successful read or write
    pub last_accessed_at: Timestamp,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now`.
    pub fn new(value: V, now: Timestamp) -> Self {
        Self {
            value,
            created_at: now,
            last_accessed_at: now,
        }
    }

    // == Age ==
    /// Milliseconds since creation. A clock reading older than the entry
    /// counts as age zero.
    pub fn age_ms(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl_ms`.
    ///
    /// Boundary condition: an entry is still valid when its age equals the
    /// TTL exactly and expires one millisecond later.
    pub fn is_expired(&self, now: Timestamp, ttl_ms: u64) -> bool {
        self.age_ms(now) > ttl_ms
    }

    // == Touch ==
    /// Records a read at `now`.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_accessed_at = now;
    }
}
