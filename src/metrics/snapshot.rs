/// Counters plus gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clears: u64,

    // gauges
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Merges shard snapshots into one view. Gauges are summed.
    pub fn merge(self, other: Self) -> Self {
        Self {
            get_calls: self.get_calls + other.get_calls,
            get_hits: self.get_hits + other.get_hits,
            get_misses: self.get_misses + other.get_misses,
            insert_calls: self.insert_calls + other.insert_calls,
            insert_updates: self.insert_updates + other.insert_updates,
            insert_new: self.insert_new + other.insert_new,
            evicted_entries: self.evicted_entries + other.evicted_entries,
            remove_calls: self.remove_calls + other.remove_calls,
            remove_found: self.remove_found + other.remove_found,
            pop_lru_calls: self.pop_lru_calls + other.pop_lru_calls,
            pop_lru_found: self.pop_lru_found + other.pop_lru_found,
            touch_calls: self.touch_calls + other.touch_calls,
            touch_found: self.touch_found + other.touch_found,
            clears: self.clears + other.clears,
            cache_len: self.cache_len + other.cache_len,
            capacity: self.capacity + other.capacity,
        }
    }
}
