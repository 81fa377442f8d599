//! Seeded key-to-shard mapping.
//!
//! Used by [`ShardedLruCache`](crate::policy::sharded::ShardedLruCache) to
//! route every key to exactly one independently locked sub-cache.
//!
//! ```text
//!   key ──► hash(seed, key) % shards ──► shard index
//!
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ shard 0 │ shard 1 │ shard 2 │ shard 3 │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The mapping is deterministic for a given `(key, seed, shards)` within one
//! process. It uses `FxHasher`, so it is not stable across crate versions and
//! must not be persisted.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Deterministic shard selector using a seeded hash.
///
/// # Example
///
/// ```
/// use xlate_cache::ds::ShardSelector;
///
/// let selector = ShardSelector::new(8, 42);
/// let shard = selector.shard_for_key(&"en->de:hello");
/// assert!(shard < 8);
/// assert_eq!(selector.shard_for_key(&"en->de:hello"), shard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector over `shards` shards. A count of 0 is clamped to 1.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Maps `key` into `[0, shard_count())`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        if self.shards == 1 {
            return 0;
        }
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() % self.shards as u64) as usize
    }
}

impl Default for ShardSelector {
    /// Single shard, seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}
