//! # Metrics Traits
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │
//!   │  get_hit/get_miss/insert    │
//!   │  evict/clear                │
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │
//!   │  remove/pop_lru/touch       │
//!   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (tests, diagnostics)         │    │ (monitoring)                 │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by any bounded cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Recency-specific counters.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Point-in-time copy of a recorder's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to some monitoring sink.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
