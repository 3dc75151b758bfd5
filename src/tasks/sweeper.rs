//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::clock::Clock;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps. Each sweep holds the cache's exclusive lock for the whole scan,
/// so readers never observe a half-removed entry. The scan is O(resident
/// entries) and runs on the blocking pool, keeping the async workers free.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(1000, Duration::from_secs(300))?;
/// let sweeper = spawn_sweeper_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task<K, V, C>(cache: Cache<K, V, C>, interval: Duration) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting TTL sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let sweep_cache = cache.clone();
            match tokio::task::spawn_blocking(move || sweep_cache.evict_expired()).await {
                Ok(0) => debug!("TTL sweep: no expired entries found"),
                Ok(removed) => {
                    info!(removed, remaining = cache.size(), "TTL sweep removed expired entries")
                }
                Err(err) => warn!(error = %err, "TTL sweep did not complete"),
            }
        }
    })
}
