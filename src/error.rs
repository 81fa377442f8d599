//! Error types for xlate-cache.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache cannot be built from the requested
//!   parameters (zero capacity, more shards than slots).
//! - [`InvariantError`]: Returned by `check_invariants` when the key index and
//!   recency order disagree.
//!
//! A cache miss is not an error: lookups return `Option::None`.
//!
//! ## Example Usage
//!
//! ```
//! use xlate_cache::error::ConfigError;
//! use xlate_cache::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<String, String>, ConfigError> = LruCache::try_new(128);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<String, String>::try_new(0);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { capacity: 0 });
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be at least 1.
    InvalidCapacity { capacity: usize },
    /// A sharded cache needs at least one slot per shard.
    InvalidShardCount { shards: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity { capacity } => {
                write!(f, "invalid capacity {capacity}: capacity must be >= 1")
            }
            ConfigError::InvalidShardCount { shards, capacity } => write!(
                f,
                "invalid shard count {shards}: must be between 1 and capacity ({capacity})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_capacity_mentions_capacity() {
        let err = ConfigError::InvalidCapacity { capacity: 0 };
        let msg = err.to_string();
        assert!(msg.contains("capacity"));
        assert!(msg.contains('0'));
    }

    #[test]
    fn invalid_shard_count_mentions_both_numbers() {
        let err = ConfigError::InvalidShardCount {
            shards: 9,
            capacity: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn invariant_display_and_accessor() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
        assert_eq!(err.message(), "index/list length mismatch");
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn both_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }
}
