//! Cache Facade Module
//!
//! The thread-safe public handle over the store.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::locked::LockedStore;
use crate::cache::{CacheStats, CacheStore};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Cache ==
/// Bounded, thread-safe key/value cache with TTL expiry and LRU eviction.
///
/// `Cache` is a handle: clones share the same entries, so it can be handed
/// to worker threads and to the background sweeper directly. Values come
/// back as clones; store `Arc<T>` to share large values cheaply.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_lru_cache::Cache;
///
/// let cache = Cache::new(2, Duration::from_secs(60)).unwrap();
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// // "b" is now least recently used and makes room for "c"
/// cache.put("c", 3);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.size(), 2);
/// ```
pub struct Cache<K, V, C = SystemClock> {
    inner: Arc<LockedStore<K, V, C>>,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache on the monotonic system clock.
    ///
    /// Fails with `InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, ttl, SystemClock::new())
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// Only the cache fields are checked; the sweeper and soak settings are
    /// left to their own consumers.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate_cache()?;
        Self::new(config.capacity, config.ttl())
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: C) -> Result<Self> {
        let store = CacheStore::new(capacity, ttl)?;
        Ok(Self {
            inner: Arc::new(LockedStore::new(store, clock)),
        })
    }

    /// Returns the value for `key`, or `None` if it is missing or expired.
    ///
    /// A hit makes `key` the most recently used; an expired entry is removed.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.with_write(|store, now| store.get(key, now))
    }

    /// Stores `value` under `key`, evicting the least recently used entry if
    /// a new key pushes the cache past capacity.
    pub fn put(&self, key: K, value: V) {
        let evicted = self.inner.with_write(|store, now| store.put(key, value, now));
        if evicted.is_some() {
            debug!(capacity = self.capacity(), "put evicted one entry");
        }
    }

    /// Removes every expired entry. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        self.inner.with_write(|store, now| store.evict_expired(now))
    }

    /// Number of resident entries, including expired ones not yet swept.
    ///
    /// Use [`Cache::snapshot_valid`] for the live view.
    pub fn size(&self) -> usize {
        self.inner.with_read(|store, _| store.len())
    }

    pub fn is_full(&self) -> bool {
        self.inner.with_read(|store, _| store.is_full())
    }

    /// Copies every unexpired entry without mutating the cache.
    pub fn snapshot_valid(&self) -> HashMap<K, V> {
        self.inner.with_read(|store, now| store.snapshot_valid(now))
    }

    /// Removes `key`, returning its value if it was resident and unexpired.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.with_write(|store, now| store.remove(key, now))
    }

    /// True if `key` holds an unexpired value. Does not count as an access.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.with_read(|store, now| store.contains_key(key, now))
    }

    /// Drops every entry. Returns how many were resident.
    pub fn clear(&self) -> usize {
        self.inner.with_write(|store, _| store.clear())
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.with_read(|store, _| store.stats())
    }

    pub fn capacity(&self) -> usize {
        self.inner.with_read(|store, _| store.capacity())
    }

    pub fn ttl(&self) -> Duration {
        self.inner.with_read(|store, _| store.ttl())
    }

    #[cfg(test)]
    pub(crate) fn recency_order(&self) -> Vec<K> {
        self.inner.with_read(|store, _| store.recency_order())
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.inner.with_read(|store, _| store.is_consistent())
    }
}

impl<K, V, C> Clone for Cache<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::CacheError;
    use std::collections::HashSet;

    fn manual_cache(
        capacity: usize,
        ttl_ms: u64,
    ) -> (Cache<String, i32, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache =
            Cache::with_clock(capacity, Duration::from_millis(ttl_ms), clock.clone()).unwrap();
        (cache, clock)
    }

    fn key(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let result = Cache::<String, i32>::new(0, Duration::from_secs(1));
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig {
            capacity: 5,
            ttl_ms: 2500,
            ..CacheConfig::default()
        };
        let cache: Cache<String, i32> = Cache::from_config(&config).unwrap();

        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.ttl(), Duration::from_millis(2500));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = CacheConfig {
            capacity: 0,
            ..CacheConfig::default()
        };
        assert!(Cache::<String, i32>::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_ignores_soak_settings() {
        let config = CacheConfig {
            capacity: 3,
            soak_workers: 0,
            soak_key_space: 0,
            ..CacheConfig::default()
        };
        let cache: Cache<String, i32> = Cache::from_config(&config).unwrap();
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_reference_scenario() {
        let (cache, _clock) = manual_cache(3, 1000);

        cache.put(key("a"), 1);
        cache.put(key("b"), 2);
        cache.put(key("c"), 3);
        assert_eq!(cache.get(&key("a")), Some(1));
        cache.put(key("d"), 4);

        let live: HashSet<String> = cache.snapshot_valid().into_keys().collect();
        let expected: HashSet<String> = ["a", "c", "d"].into_iter().map(key).collect();
        assert_eq!(live, expected);
        assert_eq!(cache.recency_order(), vec!["c", "a", "d"]);
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_ttl_correctness_with_simulated_clock() {
        let (cache, clock) = manual_cache(10, 1000);

        clock.set(5_000);
        cache.put(key("k"), 7);

        clock.set(6_000);
        assert_eq!(cache.get(&key("k")), Some(7));

        clock.set(6_001);
        assert_eq!(cache.get(&key("k")), None);
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_no_resurrection_after_expiry() {
        let (cache, clock) = manual_cache(10, 100);

        cache.put(key("k"), 1);
        clock.advance(Duration::from_millis(101));
        assert_eq!(cache.evict_expired(), 1);

        assert_eq!(cache.get(&key("k")), None);
        assert_eq!(cache.get(&key("k")), None);

        cache.put(key("k"), 2);
        assert_eq!(cache.get(&key("k")), Some(2));
    }

    #[test]
    fn test_no_resurrection_after_capacity_eviction() {
        let (cache, _clock) = manual_cache(1, 1000);

        cache.put(key("a"), 1);
        cache.put(key("b"), 2);

        assert_eq!(cache.get(&key("a")), None);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_size_is_raw_residency() {
        let (cache, clock) = manual_cache(10, 100);

        cache.put(key("a"), 1);
        cache.put(key("b"), 2);
        clock.advance(Duration::from_millis(500));

        assert_eq!(cache.size(), 2);
        assert!(cache.snapshot_valid().is_empty());
        assert_eq!(cache.size(), 2);

        assert_eq!(cache.evict_expired(), 2);
        assert_eq!(cache.evict_expired(), 0);
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_is_full() {
        let (cache, _clock) = manual_cache(2, 1000);

        assert!(!cache.is_full());
        cache.put(key("a"), 1);
        assert!(!cache.is_full());
        cache.put(key("b"), 2);
        assert!(cache.is_full());
        cache.put(key("c"), 3);
        assert!(cache.is_full());
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let (cache, _clock) = manual_cache(4, 1000);

        cache.put(key("a"), 1);
        cache.put(key("b"), 2);
        cache.put(key("c"), 3);

        assert_eq!(cache.remove(&key("b")), Some(2));
        assert_eq!(cache.remove(&key("b")), None);
        assert!(!cache.contains_key(&key("b")));
        assert!(cache.contains_key(&key("a")));

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.size(), 0);
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_remove_expired_returns_none() {
        let (cache, clock) = manual_cache(4, 100);

        cache.put(key("k"), 7);
        clock.advance(Duration::from_millis(500));

        assert_eq!(cache.remove(&key("k")), None);
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.stats().expirations, 1);
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_contains_key_ttl_boundary() {
        let (cache, clock) = manual_cache(4, 1000);

        clock.set(2_000);
        cache.put(key("k"), 1);

        clock.set(3_000);
        assert!(cache.contains_key(&key("k")));

        clock.set(3_001);
        assert!(!cache.contains_key(&key("k")));
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.stats().expirations, 0);
    }

    #[test]
    fn test_clones_share_entries() {
        let (cache, _clock) = manual_cache(4, 1000);
        let other = cache.clone();

        cache.put(key("shared"), 9);
        assert_eq!(other.get(&key("shared")), Some(9));
        assert_eq!(other.stats().hits, 1);
    }

    #[test]
    fn test_returned_values_are_detached() {
        let clock = ManualClock::new();
        let cache: Cache<&str, Vec<u8>, ManualClock> =
            Cache::with_clock(1, Duration::from_secs(1), clock).unwrap();

        cache.put("blob", vec![1, 2, 3]);
        let mut copy = cache.get(&"blob").unwrap();
        copy.push(4);
        cache.put("other", vec![]);

        assert_eq!(copy, vec![1, 2, 3, 4]);
        assert_eq!(cache.get(&"blob"), None);
    }

    #[test]
    fn test_stats_through_facade() {
        let (cache, clock) = manual_cache(2, 100);

        cache.put(key("a"), 1);
        cache.put(key("b"), 2);
        cache.put(key("c"), 3);
        cache.get(&key("c"));
        cache.get(&key("a"));
        clock.advance(Duration::from_millis(200));
        cache.get(&key("b"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
