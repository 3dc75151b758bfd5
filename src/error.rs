//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only construction can fail. Steady-state operations are total and model
/// a missing key as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity, interval or worker settings that cannot produce a working cache
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = CacheError::InvalidConfiguration("capacity must be greater than zero".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be greater than zero"
        );
    }
}
