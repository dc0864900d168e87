//! Unbounded hash-map memo table.
//!
//! The baseline store for memoized recursion: O(1) expected lookups, no
//! eviction, no reordering on access.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::MemoMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MemoMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MemoMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::MemoStore;

/// Append-only `FxHashMap` memo table.
pub struct HashMemo<K, V>
where
    K: Eq + Hash,
{
    map: FxHashMap<K, V>,
    #[cfg(feature = "metrics")]
    metrics: MemoMetrics,
}

impl<K, V> HashMemo<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            #[cfg(feature = "metrics")]
            metrics: MemoMetrics::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            #[cfg(feature = "metrics")]
            metrics: MemoMetrics::default(),
        }
    }

    /// Looks up a memoized value. Takes `&mut self` only to count the access.
    #[inline]
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let value = self.map.get(key);

        #[cfg(feature = "metrics")]
        match value {
            Some(_) => self.metrics.record_find_hit(),
            None => self.metrics.record_find_miss(),
        }

        value
    }

    /// Stores `value` under `key`, overwriting any earlier value.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        let _previous = self.map.insert(key, value);

        #[cfg(feature = "metrics")]
        if _previous.is_some() {
            self.metrics.record_insert_update();
        } else {
            self.metrics.record_insert_new();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> HashMemo<K, V>
where
    K: Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> MemoMetricsSnapshot {
        MemoMetricsSnapshot {
            find_calls: self.metrics.find_calls,
            find_hits: self.metrics.find_hits,
            find_misses: self.metrics.find_misses,
            insert_new: self.metrics.insert_new,
            insert_updates: self.metrics.insert_updates,
            len: self.map.len(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<MemoMetricsSnapshot> for HashMemo<K, V>
where
    K: Eq + Hash,
{
    fn snapshot(&self) -> MemoMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> MemoStore<K, V> for HashMemo<K, V>
where
    K: Eq + Hash,
{
    #[inline]
    fn find(&mut self, key: &K) -> Option<&V> {
        HashMemo::find(self, key)
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) {
        HashMemo::insert(self, key, value)
    }
}

impl<K, V> Default for HashMemo<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for HashMemo<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMemo")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
