//! Soak report DTOs
//!
//! Serializable summaries the soak runner emits when it finishes.

use serde::Serialize;

use crate::cache::CacheStats;

/// Cache statistics with the derived hit rate spelled out.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Number of TTL expirations
    pub expirations: u64,
    /// Current number of resident entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsSummary {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Outcome of one soak run.
#[derive(Debug, Clone, Serialize)]
pub struct SoakReport {
    /// Run start in RFC 3339
    pub started_at: String,
    /// Run end in RFC 3339
    pub finished_at: String,
    /// Worker threads that drove the cache
    pub workers: usize,
    /// Total operations issued across all workers
    pub operations: u64,
    /// Entries removed by explicit sweeps from workers
    pub swept_by_workers: u64,
    /// Final cache statistics
    pub stats: StatsSummary,
}

impl SoakReport {
    /// Builds a report stamped with the current time as `finished_at`.
    pub fn finish(
        started_at: chrono::DateTime<chrono::Utc>,
        workers: usize,
        operations: u64,
        swept_by_workers: u64,
        stats: CacheStats,
    ) -> Self {
        Self {
            started_at: started_at.to_rfc3339(),
            finished_at: chrono::Utc::now().to_rfc3339(),
            workers,
            operations,
            swept_by_workers,
            stats: stats.into(),
        }
    }
}
