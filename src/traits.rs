//! # Cache Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │                                         │
//!   │  remove(&mut, &K) → Option<V>           │
//!   │  remove_batch(&mut, &[K])               │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → Option<(K, V)>             │
//!   │  peek_lru() → Option<(&K, &V)>          │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → Option<usize>       │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! These traits describe single-owner caches (`&mut self`). Thread-safe
//! wrappers such as [`ConcurrentLruCache`](crate::policy::lru::ConcurrentLruCache)
//! expose the same operations through `&self` and hand out `Arc<V>` instead of
//! borrows, so they do not implement these traits.
//!
//! A miss is `None` everywhere. Callers that need a value on a miss produce it
//! themselves and then [`put`](CoreCache::put) it.

/// Operations every bounded cache supports.
///
/// # Example
///
/// ```
/// use xlate_cache::policy::lru::LruCache;
/// use xlate_cache::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, entries: &[(u64, &str)]) {
///     for (key, value) in entries {
///         cache.put(*key, value.to_string());
///     }
/// }
///
/// let mut cache = LruCache::new(8);
/// warm(&mut cache, &[(1, "eins"), (2, "zwei")]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or replaces `key`, returning the previous value for that key.
    ///
    /// Inserting a new key into a full cache evicts one entry first. The
    /// evicted value is dropped, not returned.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`, counting the lookup as a use on a hit.
    ///
    /// Use [`contains`](Self::contains) to test membership without touching
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Membership test with no effect on eviction order.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured maximum number of resident entries.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that allow removing an arbitrary key.
///
/// # Example
///
/// ```
/// use xlate_cache::policy::lru::LruCache;
/// use xlate_cache::traits::{CoreCache, MutableCache};
///
/// let mut cache = LruCache::new(4);
/// cache.put("hello", "hallo");
/// cache.put("world", "welt");
///
/// assert_eq!(cache.remove(&"hello"), Some("hallo"));
/// assert_eq!(cache.remove(&"hello"), None);
/// assert_eq!(cache.remove_batch(&["world", "missing"]), vec![Some("welt"), None]);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was resident.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order. Results line up with `keys`.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-specific operations of an LRU cache.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// The entry that the next eviction would remove.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used without reading it.
    ///
    /// Returns `false` if `key` is not resident.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most recently used.
    ///
    /// O(n); intended for diagnostics and tests.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
