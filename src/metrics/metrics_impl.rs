use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MemoMetricsRecorder,
    RangeSumMetricsRecorder, SplayMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
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
    pub invalidation_scans: u64,
    pub invalidation_scan_steps: u64,
    pub clears: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }

    fn record_invalidation_scan(&mut self, keys_scanned: usize) {
        self.invalidation_scans += 1;
        self.invalidation_scan_steps += keys_scanned as u64;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

#[derive(Debug, Default)]
pub struct MemoMetrics {
    pub find_calls: u64,
    pub find_hits: u64,
    pub find_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
}

impl MemoMetricsRecorder for MemoMetrics {
    fn record_find_hit(&mut self) {
        self.find_calls += 1;
        self.find_hits += 1;
    }

    fn record_find_miss(&mut self) {
        self.find_calls += 1;
        self.find_misses += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
}

#[derive(Debug, Default)]
pub struct SplayMetrics {
    pub memo: MemoMetrics,
    pub splays: u64,
    pub rotations: u64,
}

impl MemoMetricsRecorder for SplayMetrics {
    fn record_find_hit(&mut self) {
        self.memo.record_find_hit();
    }

    fn record_find_miss(&mut self) {
        self.memo.record_find_miss();
    }

    fn record_insert_new(&mut self) {
        self.memo.record_insert_new();
    }

    fn record_insert_update(&mut self) {
        self.memo.record_insert_update();
    }
}

impl SplayMetricsRecorder for SplayMetrics {
    fn record_splay(&mut self) {
        self.splays += 1;
    }

    fn record_rotation(&mut self) {
        self.rotations += 1;
    }
}

#[derive(Debug, Default)]
pub struct RangeSumMetrics {
    pub query_calls: u64,
    pub query_hits: u64,
    pub query_misses: u64,
    pub elements_summed: u64,
    pub update_calls: u64,
    pub invalidated_entries: u64,
    pub rejected_calls: u64,
}

impl RangeSumMetricsRecorder for RangeSumMetrics {
    fn record_query_hit(&mut self) {
        self.query_calls += 1;
        self.query_hits += 1;
    }

    fn record_query_miss(&mut self, elements_summed: usize) {
        self.query_calls += 1;
        self.query_misses += 1;
        self.elements_summed += elements_summed as u64;
    }

    fn record_update(&mut self, invalidated: usize) {
        self.update_calls += 1;
        self.invalidated_entries += invalidated as u64;
    }

    fn record_rejected(&mut self) {
        self.rejected_calls += 1;
    }
}
