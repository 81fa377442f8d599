//! Cache configuration and builder.
//!
//! The engine's only required parameter is `capacity`. [`CacheConfig`] adds the
//! shard layout used by [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache);
//! single-lock caches ignore it.
//!
//! ## Example
//!
//! ```rust
//! use xlate_cache::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>().unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(CacheBuilder::new(0).build::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentLruCache;
use crate::policy::lru::LruCache;
#[cfg(feature = "concurrency")]
use crate::policy::sharded::ShardedLruCache;

/// Default number of cached translations.
pub const DEFAULT_CAPACITY: usize = 512;

/// Construction parameters for every cache type in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum resident entries, summed over all shards. Must be `>= 1`.
    pub capacity: usize,
    /// Number of independently locked shards. Must be in `1..=capacity`.
    pub shards: usize,
    /// Seed mixed into the shard hash.
    pub seed: u64,
}

impl CacheConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        if self.shards == 0 || self.shards > self.capacity {
            return Err(ConfigError::InvalidShardCount {
                shards: self.shards,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            shards: 1,
            seed: 0,
        }
    }
}

/// Fluent front end over [`CacheConfig`].
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig::new(capacity),
        }
    }

    /// Shard count for [`build_sharded`](Self::build_sharded).
    pub fn shards(mut self, shards: usize) -> Self {
        self.config.shards = shards;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Single-owner cache. Only the capacity is checked.
    pub fn build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        LruCache::with_config(&self.config)
    }

    /// Shared cache with strict global LRU order under one lock.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        ConcurrentLruCache::with_config(&self.config)
    }

    /// Shared cache with per-shard LRU order.
    #[cfg(feature = "concurrency")]
    pub fn build_sharded<K, V>(self) -> Result<ShardedLruCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        ShardedLruCache::with_config(&self.config)
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
