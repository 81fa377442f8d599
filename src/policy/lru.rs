//! # Least Recently Used (LRU) Cache Engine
//!
//! Bounded map from a request fingerprint (for example a
//! [`TranslationKey`](crate::translation::TranslationKey)) to a previously
//! computed result, evicting the least recently used entry on overflow.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  index: FxHashMap<K, IndexEntry<V>>                          │   │
//!   │   │                                                              │   │
//!   │   │  ┌─────────┬───────────────────────┐                         │   │
//!   │   │  │   Key   │ IndexEntry            │                         │   │
//!   │   │  ├─────────┼───────────────────────┤                         │   │
//!   │   │  │  "C"    │ { value: 3, node ─────┼──────────┐              │   │
//!   │   │  │  "B"    │ { value: 2, node ─────┼─────┐    │              │   │
//!   │   │  │  "A"    │ { value: 1, node ─────┼──┐  │    │              │   │
//!   │   │  └─────────┴───────────────────────┘  │  │    │              │   │
//!   │   └───────────────────────────────────────┼──┼────┼──────────────┘   │
//!   │                                           │  │    │                  │
//!   │   ┌───────────────────────────────────────┼──┼────┼──────────────┐   │
//!   │   │  order: IntrusiveList<K>              ▼  ▼    ▼              │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [ "C" ] ◄──► [ "B" ] ◄──► [ "A" ] ◄── tail         │   │
//!   │   │   (MRU)                                       (LRU)          │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each index entry stores the [`SlotId`] of its own recency node, so a hit is
//! one hash lookup plus a constant number of link rewrites. Nodes live in an
//! arena and link by slot index, so the index's back-reference and the list's
//! `prev`/`next` links never form an ownership cycle and the core has no
//! `unsafe`.
//!
//! ## Operations
//!
//! | Method              | Complexity | Effect on recency                    |
//! |---------------------|------------|--------------------------------------|
//! | `get(&k)`           | O(1)       | hit moves `k` to head; miss: none    |
//! | `put(k, v)`         | O(1)       | `k` moves/inserted at head; may evict|
//! | `remove(&k)`        | O(1)       | unlinks `k`                          |
//! | `contains(&k)`      | O(1)       | none                                 |
//! | `peek(&k)`          | O(1)       | none                                 |
//! | `touch(&k)`         | O(1)       | moves `k` to head                    |
//! | `pop_lru()`         | O(1)       | unlinks tail                         |
//! | `peek_lru()`        | O(1)       | none                                 |
//! | `recency_rank(&k)`  | O(n)       | none                                 |
//! | `clear()`           | O(n)       | empties both structures              |
//!
//! ## Entry lifecycle
//!
//! ```text
//!   absent ──put──► resident ──get hit / put──► resident
//!                      │
//!                      └──evict / remove / pop_lru──► absent
//! ```
//!
//! A miss never counts as a use and never changes the cache.
//!
//! ## Thread Safety
//!
//! - [`LruCache`]: single owner, `&mut self` for anything that touches recency.
//! - [`ConcurrentLruCache`]: one `parking_lot::RwLock` around the whole engine.
//!   `get` takes the write lock because every hit relinks the shared order.
//!
//! ## Example
//!
//! ```
//! use xlate_cache::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.put("A", 1);
//! cache.put("B", 2);
//! cache.put("C", 3);
//!
//! assert_eq!(cache.get(&"A"), Some(&1));   // order: A, C, B
//! cache.put("D", 4);                        // evicts B
//! assert_eq!(cache.get(&"B"), None);
//! assert_eq!(cache.keys_mru().copied().collect::<Vec<_>>(), vec!["D", "A", "C"]);
//! ```

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::CacheConfig;
use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CoreMetricsRecorder, LruMetrics, LruMetricsRecorder, LruMetricsSnapshot,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Key-index slot: the stored value plus the handle of the key's recency node.
#[derive(Debug)]
struct IndexEntry<V> {
    value: V,
    node: SlotId,
}

/// Single-threaded LRU cache engine.
///
/// Keys are stored twice (once in the index, once in the recency node) so an
/// eviction can find the index entry from the tail node; hence `K: Clone`.
/// Cheap-to-clone keys such as hashes or `Arc<str>` work best.
pub struct LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    index: FxHashMap<K, IndexEntry<V>>,
    order: IntrusiveList<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) for
    /// user-supplied values.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidCapacity`] if `capacity` is 0.
    ///
    /// ```
    /// use xlate_cache::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u64, String>::try_new(0).is_err());
    /// assert_eq!(LruCache::<u64, String>::try_new(4).unwrap().capacity(), 4);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { capacity });
        }
        debug!(capacity, "lru cache created");
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// Only `config.capacity` is checked; `shards` and `seed` describe a
    /// sharded layout and are ignored here.
    pub fn with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::try_new(config.capacity)
    }

    /// Looks up `key`. A hit moves the entry to the most recently used
    /// position; a miss returns `None` and changes nothing.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(entry) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(entry.node);
        Some(&entry.value)
    }

    /// Inserts or updates `key` at the most recently used position.
    ///
    /// Returns the previous value when `key` was already resident; the cache
    /// size is unchanged in that case. Inserting a new key into a full cache
    /// first evicts the least recently used entry, so `len() <= capacity()`
    /// holds at every point.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(entry) = self.index.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = std::mem::replace(&mut entry.value, value);
            self.order.move_to_front(entry.node);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity && self.evict_tail().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        let node = self.order.push_front(key.clone());
        self.index.insert(key, IndexEntry { value, node });

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        None
    }

    /// Removes `key`, returning its value if it was resident.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let entry = self.index.remove(key)?;
        self.order.remove(entry.node);

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(entry.value)
    }

    /// Membership test. Does not count as a use.
    ///
    /// Under concurrent access, "contains then get" can race with an
    /// eviction; call `get` and handle `None` instead.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Reads `key` without refreshing its recency.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|entry| &entry.value)
    }

    /// Marks `key` as most recently used. Returns `false` on a miss.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(entry) = self.index.get(key) else {
            return false;
        };
        self.order.move_to_front(entry.node);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.order.pop_back()?;
        let entry = self.index.remove(&popped)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((popped, entry.value))
    }

    /// The entry the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.order.back()?;
        self.index.get(key).map(|entry| (key, &entry.value))
    }

    /// Zero-based position in recency order (`0` = most recently used). O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let node = self.index.get(key)?.node;
        self.order.iter_entries().position(|(id, _)| id == node)
    }

    /// Keys from most to least recently used.
    pub fn keys_mru(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }

    /// Entries from most to least recently used. Does not refresh recency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.index.get(key).map(|entry| (key, &entry.value)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(evicted = self.index.len(), "lru cache cleared");
        self.index.clear();
        self.order.clear();
    }

    /// Verifies that the key index and recency order describe the same set of
    /// keys and that every index entry points at its own node.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.validate()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency order holds {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} resident entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (id, key) in self.order.iter_entries() {
            match self.index.get(key) {
                Some(entry) if entry.node == id => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index entry points at a different recency node",
                    ))
                }
                None => return Err(InvariantError::new("recency node has no index entry")),
            }
        }
        Ok(())
    }

    fn evict_tail(&mut self) -> Option<(K, V)> {
        let victim = self.order.pop_back()?;
        let entry = self.index.remove(&victim)?;
        trace!(len = self.index.len(), capacity = self.capacity, "evicted lru entry");
        Some((victim, entry.value))
    }

    #[cfg(debug_assertions)]
    fn debug_validate_invariants(&self) {
        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert!(self.index.len() <= self.capacity);
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LruCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            clears: self.metrics.clears,
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Thread-safe LRU cache: one [`LruCache`] behind a single `RwLock`.
///
/// Values are stored as `Arc<V>` so a caller can keep a result after the
/// lock is released or the entry is evicted. Cloning the handle shares the
/// same cache, which is how it is meant to be passed to request handlers.
///
/// ```
/// use xlate_cache::policy::lru::ConcurrentLruCache;
///
/// let cache: ConcurrentLruCache<String, String> = ConcurrentLruCache::new(2);
/// let handle = cache.clone();
///
/// handle.put("hello".to_string(), "hallo".to_string());
/// assert_eq!(cache.get(&"hello".to_string()).as_deref().map(String::as_str), Some("hallo"));
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: Arc<RwLock<LruCache<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        Self::from_core(LruCache::new(capacity))
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from_core)
    }

    pub fn with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        LruCache::with_config(config).map(Self::from_core)
    }

    fn from_core(core: LruCache<K, Arc<V>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(core)),
        }
    }

    /// Looks up `key` under the write lock; a hit is refreshed.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Inserts or updates `key`, returning the previous value.
    pub fn put(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        let mut cache = self.inner.write();
        cache.put(key, value)
    }

    /// Inserts an already shared value.
    pub fn put_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.put(key, value)
    }

    /// Returns the cached value or produces, caches, and returns a new one.
    ///
    /// `produce` runs without any lock held, so a slow backend call does not
    /// block other callers. If another caller filled `key` in the meantime,
    /// the resident value wins and the freshly produced one is dropped.
    pub fn get_or_insert_with<F>(&self, key: K, produce: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        match self.try_get_or_insert_with(key, || Ok::<V, std::convert::Infallible>(produce())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for a fallible
    /// producer. A failed production leaves the cache untouched.
    pub fn try_get_or_insert_with<F, E>(&self, key: K, produce: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }

        let produced = Arc::new(produce()?);

        let mut cache = self.inner.write();
        if let Some(resident) = cache.get(&key) {
            return Ok(Arc::clone(resident));
        }
        cache.put(key, Arc::clone(&produced));
        Ok(produced)
    }

    /// Reads `key` under the read lock without refreshing it.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.read();
        cache.peek(key).map(Arc::clone)
    }

    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Membership test for diagnostics; see [`LruCache::contains`].
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let cache = self.inner.read();
        cache.check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mru_keys<K: Clone + Eq + Hash, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.keys_mru().cloned().collect()
    }

    // ==============================================
    // CORRECTNESS
    // ==============================================
    mod correctness {
        use super::*;

        #[test]
        fn zero_capacity_is_rejected() {
            let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
            assert_eq!(err, ConfigError::InvalidCapacity { capacity: 0 });
        }

        #[test]
        #[should_panic(expected = "capacity")]
        fn new_panics_on_zero_capacity() {
            let _ = LruCache::<u32, u32>::new(0);
        }

        #[test]
        fn get_on_empty_cache_misses() {
            let mut cache: LruCache<&str, i32> = LruCache::new(2);
            assert_eq!(cache.get(&"missing"), None);
            assert!(cache.is_empty());
        }

        #[test]
        fn put_returns_previous_value_and_keeps_size() {
            let mut cache = LruCache::new(2);
            assert_eq!(cache.put("k", "v1"), None);
            assert_eq!(cache.put("k", "v2"), Some("v1"));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"k"), Some(&"v2"));
        }

        #[test]
        fn update_in_place_does_not_evict() {
            let mut cache = LruCache::new(2);
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(1, "a2");
            assert_eq!(cache.len(), 2);
            assert!(cache.contains(&1));
            assert!(cache.contains(&2));
            assert_eq!(mru_keys(&cache), vec![1, 2]);
        }

        #[test]
        fn capacity_three_scenario() {
            let mut cache = LruCache::new(3);
            cache.put('A', 1);
            cache.put('B', 2);
            cache.put('C', 3);
            assert_eq!(mru_keys(&cache), vec!['C', 'B', 'A']);

            assert_eq!(cache.get(&'A'), Some(&1));
            assert_eq!(mru_keys(&cache), vec!['A', 'C', 'B']);

            assert_eq!(cache.put('D', 4), None);
            assert_eq!(mru_keys(&cache), vec!['D', 'A', 'C']);
            assert_eq!(cache.get(&'B'), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn capacity_one_scenario() {
            let mut cache = LruCache::new(1);
            cache.put("X", "x");
            cache.put("Y", "y");
            assert_eq!(cache.get(&"X"), None);
            assert_eq!(cache.get(&"Y"), Some(&"y"));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn get_refreshes_recency_before_eviction() {
            let mut cache = LruCache::new(4);
            for k in 1..=4 {
                cache.put(k, k * 10);
            }
            cache.get(&1);
            cache.put(5, 50);
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn miss_does_not_change_order() {
            let mut cache = LruCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            let before = mru_keys(&cache);
            assert_eq!(cache.get(&42), None);
            assert_eq!(mru_keys(&cache), before);
        }

        #[test]
        fn repeated_get_is_idempotent() {
            let mut cache = LruCache::new(3);
            cache.put(1, 'a');
            cache.put(2, 'b');
            for _ in 0..10 {
                assert_eq!(cache.get(&1), Some(&'a'));
            }
            assert_eq!(cache.len(), 2);
            assert_eq!(mru_keys(&cache), vec![1, 2]);
        }

        #[test]
        fn remove_unlinks_from_both_structures() {
            let mut cache = LruCache::new(3);
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(3, "c");
            assert_eq!(cache.remove(&2), Some("b"));
            assert_eq!(cache.remove(&2), None);
            assert_eq!(mru_keys(&cache), vec![3, 1]);
            cache.check_invariants().unwrap();

            // freed slot is reused without disturbing order
            cache.put(4, "d");
            assert_eq!(mru_keys(&cache), vec![4, 3, 1]);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn contains_and_peek_do_not_refresh() {
            let mut cache = LruCache::new(2);
            cache.put(1, "a");
            cache.put(2, "b");
            assert!(cache.contains(&1));
            assert_eq!(cache.peek(&1), Some(&"a"));
            cache.put(3, "c");
            assert!(!cache.contains(&1));
        }
    }

    // ==============================================
    // LRU-SPECIFIC OPERATIONS
    // ==============================================
    mod lru_ops {
        use super::*;

        #[test]
        fn pop_and_peek_lru() {
            let mut cache = LruCache::new(3);
            cache.put(1, "a");
            cache.put(2, "b");
            cache.put(3, "c");
            assert_eq!(cache.peek_lru(), Some((&1, &"a")));
            assert_eq!(cache.pop_lru(), Some((1, "a")));
            assert_eq!(cache.peek_lru(), Some((&2, &"b")));
            assert_eq!(cache.len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn pop_lru_on_empty_is_none() {
            let mut cache: LruCache<u8, u8> = LruCache::new(1);
            assert_eq!(cache.pop_lru(), None);
            assert_eq!(cache.peek_lru(), None);
        }

        #[test]
        fn touch_moves_without_reading() {
            let mut cache = LruCache::new(3);
            cache.put(1, ());
            cache.put(2, ());
            cache.put(3, ());
            assert!(cache.touch(&1));
            assert!(!cache.touch(&9));
            assert_eq!(cache.recency_rank(&1), Some(0));
            assert_eq!(cache.recency_rank(&2), Some(2));
            assert_eq!(cache.recency_rank(&9), None);
        }

        #[test]
        fn iter_yields_mru_to_lru_pairs() {
            let mut cache = LruCache::new(3);
            cache.extend([("a", 1), ("b", 2), ("c", 3)]);
            cache.get(&"a");
            let pairs: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            assert_eq!(pairs, vec![("a", 1), ("c", 3), ("b", 2)]);
        }

        #[test]
        fn clear_empties_everything() {
            let mut cache = LruCache::new(4);
            cache.extend((0..4).map(|i| (i, i)));
            cache.clear();
            assert!(cache.is_empty());
            assert_eq!(cache.peek_lru(), None);
            cache.put(7, 7);
            assert_eq!(mru_keys(&cache), vec![7]);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn debug_hides_contents() {
            let mut cache = LruCache::new(2);
            cache.put("secret", "value");
            let dbg = format!("{cache:?}");
            assert!(dbg.contains("len: 1"));
            assert!(!dbg.contains("secret"));
        }
    }

    // ==============================================
    // CAPACITY / CHURN
    // ==============================================
    mod capacity {
        use super::*;

        #[test]
        fn len_never_exceeds_capacity() {
            let mut cache = LruCache::new(8);
            for i in 0..1_000u32 {
                cache.put(i % 37, i);
                assert!(cache.len() <= 8);
            }
            cache.check_invariants().unwrap();
        }

        #[test]
        fn eviction_follows_insertion_without_reads() {
            let mut cache = LruCache::new(3);
            for i in 0..6 {
                cache.put(i, i);
            }
            assert_eq!(mru_keys(&cache), vec![5, 4, 3]);
        }

        #[test]
        fn with_config_uses_capacity() {
            let config = CacheConfig {
                capacity: 5,
                ..CacheConfig::default()
            };
            let cache: LruCache<u8, u8> = LruCache::with_config(&config).unwrap();
            assert_eq!(cache.capacity(), 5);
        }

        #[test]
        fn with_config_ignores_shard_layout() {
            let config = CacheConfig {
                capacity: 4,
                shards: 0,
                seed: 0,
            };
            let cache: LruCache<u32, u32> = LruCache::with_config(&config).unwrap();
            assert_eq!(cache.capacity(), 4);

            let config = CacheConfig {
                capacity: 0,
                shards: 8,
                seed: 0,
            };
            assert_eq!(
                LruCache::<u32, u32>::with_config(&config).unwrap_err(),
                ConfigError::InvalidCapacity { capacity: 0 }
            );
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counters_track_hits_misses_and_evictions() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(1, 10);
            cache.put(3, 3);
            cache.get(&1);
            cache.get(&2);
            cache.remove(&3);
            cache.touch(&99);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.remove_found, 1);
            assert_eq!(snap.touch_calls, 1);
            assert_eq!(snap.touch_found, 0);
            assert_eq!(snap.cache_len, 1);
            assert_eq!(snap.capacity, 2);
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrent {
        use super::*;

        #[test]
        fn clone_shares_state() {
            let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(2);
            let other = cache.clone();
            other.put(1, "one".to_string());
            assert_eq!(cache.get(&1).as_deref(), Some(&"one".to_string()));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn get_or_insert_with_only_produces_on_miss() {
            let cache: ConcurrentLruCache<&str, String> = ConcurrentLruCache::new(4);
            let mut calls = 0;
            let first = cache.get_or_insert_with("hello", || {
                calls += 1;
                "hallo".to_string()
            });
            let second = cache.get_or_insert_with("hello", || {
                calls += 1;
                "unused".to_string()
            });
            assert_eq!(calls, 1);
            assert!(Arc::ptr_eq(&first, &second));
        }

        #[test]
        fn failed_production_leaves_cache_untouched() {
            let cache: ConcurrentLruCache<&str, String> = ConcurrentLruCache::new(4);
            let result: Result<_, &str> =
                cache.try_get_or_insert_with("hello", || Err("backend down"));
            assert_eq!(result.unwrap_err(), "backend down");
            assert!(cache.is_empty());
        }

        #[test]
        fn peek_and_put_arc() {
            let cache: ConcurrentLruCache<u8, String> = ConcurrentLruCache::new(2);
            let shared = Arc::new("x".to_string());
            cache.put_arc(1, Arc::clone(&shared));
            assert!(Arc::ptr_eq(&cache.peek(&1).unwrap(), &shared));
            assert!(cache.touch(&1));
            assert_eq!(cache.pop_lru().map(|(k, _)| k), Some(1));
            assert!(cache.is_empty());
        }

        #[test]
        fn resident_value_wins_over_produced_one() {
            let cache: ConcurrentLruCache<&str, String> = ConcurrentLruCache::new(4);
            let resident = Arc::new("from another caller".to_string());
            let returned = cache
                .try_get_or_insert_with("hello", || {
                    cache.put_arc("hello", Arc::clone(&resident));
                    Ok::<_, ()>("produced".to_string())
                })
                .unwrap();
            assert!(Arc::ptr_eq(&returned, &resident));
            assert!(Arc::ptr_eq(&cache.peek(&"hello").unwrap(), &resident));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn with_config_ignores_shard_count() {
            let config = CacheConfig {
                capacity: 1,
                shards: 2,
                seed: 0,
            };
            let cache = ConcurrentLruCache::<u8, u8>::with_config(&config).unwrap();
            assert_eq!(cache.capacity(), 1);
        }

        #[test]
        fn try_new_rejects_zero() {
            assert!(ConcurrentLruCache::<u8, String>::try_new(0).is_err());
        }
    }
}
