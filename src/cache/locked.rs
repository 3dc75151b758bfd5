//! Locked Store Module
//!
//! Locking discipline around [`CacheStore`]. One `RwLock` guards the entry
//! map and the recency index as a unit, and every operation runs its whole
//! check-and-act sequence inside a single acquisition.
//!
//! The clock is read after the lock is taken. Timestamps therefore follow
//! lock order, and an operation that completes before another starts never
//! carries a later time than it.

use std::hash::Hash;

use parking_lot::RwLock;

use crate::cache::CacheStore;
use crate::clock::{Clock, Timestamp};

// == Locked Store ==
pub(crate) struct LockedStore<K, V, C> {
    store: RwLock<CacheStore<K, V>>,
    clock: C,
}

impl<K, V, C> LockedStore<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    pub(crate) fn new(store: CacheStore<K, V>, clock: C) -> Self {
        Self {
            store: RwLock::new(store),
            clock,
        }
    }

    /// Runs a non-mutating operation under the shared lock.
    ///
    /// Used for inspections that must not race a concurrent writer but never
    /// change the store: size, fullness, snapshots, stats.
    pub(crate) fn with_read<R>(&self, op: impl FnOnce(&CacheStore<K, V>, Timestamp) -> R) -> R {
        let store = self.store.read();
        let now = self.clock.now();
        op(&*store, now)
    }

    /// Runs an operation under the exclusive lock.
    ///
    /// Reads go through here too: a hit moves the key in the recency index
    /// and a stale entry is dropped, both of which mutate.
    pub(crate) fn with_write<R>(
        &self,
        op: impl FnOnce(&mut CacheStore<K, V>, Timestamp) -> R,
    ) -> R {
        let mut store = self.store.write();
        let now = self.clock.now();
        op(&mut *store, now)
    }
}
