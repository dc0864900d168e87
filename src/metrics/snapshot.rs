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
    pub peek_calls: u64,
    pub peek_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    pub invalidation_scans: u64,
    pub invalidation_scan_steps: u64, // keys inspected across all scans
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoMetricsSnapshot {
    pub find_calls: u64,
    pub find_hits: u64,
    pub find_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,

    pub len: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplayMetricsSnapshot {
    pub find_calls: u64,
    pub find_hits: u64,
    pub find_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub splays: u64,
    pub rotations: u64,

    pub len: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RangeSumMetricsSnapshot {
    pub query_calls: u64,
    pub query_hits: u64,
    pub query_misses: u64,
    pub elements_summed: u64,
    pub update_calls: u64,
    pub invalidated_entries: u64,
    pub rejected_calls: u64, // out-of-range queries and updates

    pub values_len: usize,
    pub cache: LruMetricsSnapshot,
}
