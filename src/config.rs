//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache and soak-runner configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Entry time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
    /// Worker threads driving the soak runner
    pub soak_workers: usize,
    /// Number of distinct keys the soak workers draw from
    pub soak_key_space: usize,
    /// How long the soak runner runs before reporting
    pub soak_duration_secs: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 300000)
    /// - `SWEEP_INTERVAL_MS` - Expiry sweep frequency in milliseconds (default: 1000)
    /// - `SOAK_WORKERS` - Soak worker threads (default: 4)
    /// - `SOAK_KEY_SPACE` - Distinct soak keys (default: 2000)
    /// - `SOAK_DURATION_SECS` - Soak run length in seconds (default: 10)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            ttl_ms: env_or("CACHE_TTL_MS", defaults.ttl_ms),
            sweep_interval_ms: env_or("SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
            soak_workers: env_or("SOAK_WORKERS", defaults.soak_workers),
            soak_key_space: env_or("SOAK_KEY_SPACE", defaults.soak_key_space),
            soak_duration_secs: env_or("SOAK_DURATION_SECS", defaults.soak_duration_secs),
        }
    }

    /// Rejects settings that cannot produce a working cache.
    pub fn validate_cache(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Rejects settings that cannot produce a working cache, sweeper or
    /// soak runner.
    pub fn validate(&self) -> Result<()> {
        self.validate_cache()?;
        if self.sweep_interval_ms == 0 {
            return Err(CacheError::InvalidConfiguration(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        if self.soak_workers == 0 || self.soak_key_space == 0 {
            return Err(CacheError::InvalidConfiguration(
                "soak workers and key space must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    pub fn soak_duration(&self) -> Duration {
        Duration::from_secs(self.soak_duration_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl_ms: 300_000,
            sweep_interval_ms: 1000,
            soak_workers: 4,
            soak_key_space: 2000,
            soak_duration_secs: 10,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
