//! Sharded LRU cache: N independently locked [`LruCache`] shards.
//!
//! ```text
//!   key ──► ShardSelector ──► shard i
//!
//!   ┌──────────────────┐ ┌──────────────────┐     ┌──────────────────┐
//!   │ RwLock<LruCache> │ │ RwLock<LruCache> │ ... │ RwLock<LruCache> │
//!   │  cap = c0        │ │  cap = c1        │     │  cap = c(n-1)    │
//!   └──────────────────┘ └──────────────────┘     └──────────────────┘
//!            sum(c_i) == total capacity, every c_i >= 1
//! ```
//!
//! ## Weaker recency guarantee
//!
//! Callers touching different shards never contend, but each shard keeps its
//! own recency order. An eviction removes the least recently used entry
//! **of the shard the new key hashes to**, which need not be the globally
//! least recently used entry. Use
//! [`ConcurrentLruCache`](crate::policy::lru::ConcurrentLruCache) when strict
//! global LRU order matters.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::builder::CacheConfig;
use crate::ds::ShardSelector;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::LruMetricsSnapshot;
use crate::policy::lru::LruCache;

/// Hash-partitioned LRU cache. See the [module docs](self) for the recency caveat.
pub struct ShardedLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    shards: Box<[RwLock<LruCache<K, Arc<V>>>]>,
    selector: ShardSelector,
    capacity: usize,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Splits `capacity` across `shards` shards (seed 0).
    pub fn try_new(capacity: usize, shards: usize) -> Result<Self, ConfigError> {
        Self::try_with_seed(capacity, shards, 0)
    }

    /// Like [`try_new`](Self::try_new) with an explicit hash seed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] for a zero capacity and
    /// [`ConfigError::InvalidShardCount`] unless `1 <= shards <= capacity`.
    pub fn try_with_seed(capacity: usize, shards: usize, seed: u64) -> Result<Self, ConfigError> {
        CacheConfig {
            capacity,
            shards,
            seed,
        }
        .validate()?;

        let base = capacity / shards;
        let remainder = capacity % shards;
        let shards = (0..shards)
            .map(|i| {
                let shard_capacity = base + usize::from(i < remainder);
                LruCache::try_new(shard_capacity).map(RwLock::new)
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_boxed_slice();

        let selector = ShardSelector::new(shards.len(), seed);
        tracing::debug!(capacity, shards = shards.len(), "sharded lru cache created");
        Ok(Self {
            shards,
            selector,
            capacity,
        })
    }

    pub fn with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::try_with_seed(config.capacity, config.shards, config.seed)
    }

    fn shard(&self, key: &K) -> &RwLock<LruCache<K, Arc<V>>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Looks up `key` in its shard; a hit is refreshed within that shard.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut shard = self.shard(key).write();
        shard.get(key).map(Arc::clone)
    }

    /// Inserts or updates `key`; may evict the LRU entry of the key's shard.
    pub fn put(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        let mut shard = self.shard(&key).write();
        shard.put(key, value)
    }

    /// Returns the cached value or produces one outside the shard lock.
    pub fn get_or_insert_with<F>(&self, key: K, produce: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let produced = Arc::new(produce());
        let mut shard = self.shard(&key).write();
        if let Some(resident) = shard.get(&key) {
            return Arc::clone(resident);
        }
        shard.put(key, Arc::clone(&produced));
        produced
    }

    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut shard = self.shard(key).write();
        shard.remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        let shard = self.shard(key).read();
        shard.contains(key)
    }

    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let shard = self.shard(key).read();
        shard.peek(key).map(Arc::clone)
    }

    /// Total resident entries. Shards are read one at a time, so the result
    /// is a snapshot only when no writer is active.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Sum of all shard capacities.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Capacity of each shard, in shard order.
    pub fn shard_capacities(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.read().capacity()).collect()
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (i, shard) in self.shards.iter().enumerate() {
            shard
                .read()
                .check_invariants()
                .map_err(|err| InvariantError::new(format!("shard {i}: {err}")))?;
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.shards
            .iter()
            .map(|shard| shard.read().metrics_snapshot())
            .fold(LruMetricsSnapshot::default(), LruMetricsSnapshot::merge)
    }
}

impl<K, V> fmt::Debug for ShardedLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLruCache")
            .field("shards", &self.shards.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
