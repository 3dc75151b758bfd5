//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with the recency index and
//! TTL expiration. Not synchronized: every method takes `&mut self` or
//! `&self` and the caller supplies the current time, so the whole
//! check-and-act sequence of an operation runs under whatever lock the
//! caller holds.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyIndex};
use crate::clock::Timestamp;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and TTL expiry.
///
/// Invariants held between calls:
/// - `entries.len() <= capacity`
/// - the keys of `entries` and `recency` are the same set
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Access order, oldest first
    recency: RecencyIndex<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Entry lifetime in milliseconds
    ttl_ms: u64,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be at least 1
    /// * `ttl` - Maximum entry age; truncated to whole milliseconds
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            recency: RecencyIndex::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        })
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// An entry older than the TTL is removed and reported as absent. A hit
    /// moves the key to the newest end of the recency order.
    pub fn get(&mut self, key: &K, now: Timestamp) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now, self.ttl_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(now, "expired entry removed on read");
            return None;
        }

        let value = match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch(now);
                entry.value.clone()
            }
            None => return None,
        };
        self.recency.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Put ==
    /// Stores `value` under `key`.
    ///
    /// Overwriting resets the entry's creation and access times. Inserting a
    /// new key beyond capacity evicts the least recently used entry, which is
    /// returned.
    pub fn put(&mut self, key: K, value: V, now: Timestamp) -> Option<K> {
        self.recency.touch(&key);

        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = CacheEntry::new(value, now);
            return None;
        }

        self.entries.insert(key, CacheEntry::new(value, now));

        let evicted = if self.entries.len() > self.capacity {
            self.evict_lru()
        } else {
            None
        };

        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it had not expired.
    ///
    /// An expired entry is still dropped, counted as an expiration and
    /// reported as `None`.
    pub fn remove(&mut self, key: &K, now: Timestamp) -> Option<V> {
        let entry = self.remove_entry(key)?;
        if entry.is_expired(now, self.ttl_ms) {
            self.stats.record_expirations(1);
            return None;
        }
        Some(entry.value)
    }

    // == Evict Expired ==
    /// Removes every entry older than the TTL, wherever it sits in the
    /// recency order.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self, now: Timestamp) -> usize {
        let ttl_ms = self.ttl_ms;
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in &expired_keys {
            self.entries.remove(key);
            self.recency.remove(key);
        }

        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Contains ==
    /// Returns true if `key` is present and not expired. Does not touch
    /// recency or remove anything.
    pub fn contains_key(&self, key: &K, now: Timestamp) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now, self.ttl_ms))
    }

    // == Snapshot ==
    /// Clones every entry that has not expired at `now` into a fresh map.
    pub fn snapshot_valid(&self, now: Timestamp) -> HashMap<K, V> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now, self.ttl_ms))
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    // == Clear ==
    /// Drops every entry. Returns how many were resident.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.recency.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of resident entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Keys from least to most recently used.
    #[cfg(test)]
    pub(crate) fn recency_order(&self) -> Vec<K> {
        self.recency.iter().cloned().collect()
    }

    /// Full scan of the capacity bound and the entries/recency bijection.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.entries.len() <= self.capacity
            && self.entries.len() == self.recency.len()
            && self.recency.iter().count() == self.recency.len()
            && self.recency.iter().all(|key| self.entries.contains_key(key))
    }

    // == Internal Helpers ==
    fn remove_entry(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(entry)
    }

    fn evict_lru(&mut self) -> Option<K> {
        let victim = self.recency.pop_oldest()?;
        self.entries.remove(&victim);
        self.stats.record_eviction();
        debug!(resident = self.entries.len(), "evicted least recently used entry");
        Some(victim)
    }
}
