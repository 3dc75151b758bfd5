//! TTL LRU Cache - A bounded, thread-safe in-memory cache
//!
//! Stores values for a fixed time-to-live and evicts the least recently used
//! entry once capacity is reached. All operations are safe to call from many
//! threads at once.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{Cache, CacheStats};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweeper_task;
