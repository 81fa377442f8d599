//! xlate-cache: a bounded LRU cache engine for memoizing expensive
//! translation results.
//!
//! The engine ([`policy::lru::LruCache`]) fuses a hash index with an
//! arena-backed doubly linked recency list so `get`, `put`, `remove`, and
//! eviction are all O(1). Thread-safe front ends live next to it:
//! [`policy::lru::ConcurrentLruCache`] (one lock, strict global LRU) and
//! [`policy::sharded::ShardedLruCache`] (per-shard locks, per-shard LRU).
//!
//! Producing a value on a miss is the caller's job; the engine never calls out.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
pub mod translation;

#[cfg(feature = "metrics")]
pub mod metrics;
