//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod facade;
mod locked;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use facade::Cache;
pub use recency::RecencyIndex;
pub use stats::CacheStats;
pub use store::CacheStore;
