//! # Metrics Trait Hierarchy
//!
//! Recording is split into small traits so each structure only exposes the
//! events it can actually produce.
//!
//! ```text
//!        ┌─────────────────────┐         ┌─────────────────────┐
//!        │ CoreMetricsRecorder │         │ MemoMetricsRecorder │
//!        │ get/insert/evict    │         │ find/insert         │
//!        └──────────┬──────────┘         └──────────┬──────────┘
//!                   ▼                               ▼
//!        ┌─────────────────────┐         ┌─────────────────────┐
//!        │ LruMetricsRecorder  │         │ SplayMetricsRecorder│
//!        │ remove/invalidation │         │ splay/rotation      │
//!        └─────────────────────┘         └─────────────────────┘
//!
//!        ┌─────────────────────────┐     ┌─────────────────────────┐
//!        │ LruMetricsReadRecorder  │     │ RangeSumMetricsRecorder │
//!        │ peek/recency_rank (&)   │     │ query/update            │
//!        └─────────────────────────┘     └─────────────────────────┘
//! ```
//!
//! Snapshots are produced through [`MetricsSnapshotProvider`].

/// Events shared by every bounded cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LRU-specific events.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_invalidation_scan(&mut self, keys_scanned: usize);
}

/// LRU events raised from `&self` methods (uses interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Events of a memo table.
pub trait MemoMetricsRecorder {
    fn record_find_hit(&mut self);
    fn record_find_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
}

/// Splay-tree restructuring events.
pub trait SplayMetricsRecorder: MemoMetricsRecorder {
    fn record_splay(&mut self);
    fn record_rotation(&mut self);
}

/// Range-sum service events.
pub trait RangeSumMetricsRecorder {
    fn record_query_hit(&mut self);
    fn record_query_miss(&mut self, elements_summed: usize);
    fn record_update(&mut self, invalidated: usize);
    fn record_rejected(&mut self);
}

/// Produces a point-in-time copy of a structure's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
