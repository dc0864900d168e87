//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key→value store with O(1) `get`/`put`/`remove_key` and an
//! O(n) predicate-driven bulk invalidation used by dependency-aware callers
//! such as [`RangeSumService`](crate::workload::range_sum::RangeSumService).
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index, non-owning)                   │   │
//!   │   │    key_a ─────────────┐                                      │   │
//!   │   │    key_b ───────────┐ │                                      │   │
//!   │   │    key_c ─────────┐ │ │                                      │   │
//!   │   └───────────────────┼─┼─┼──────────────────────────────────────┘   │
//!   │                       ▼ ▼ ▼                                          │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  IntrusiveList<Entry<K, V>>  (owns entries, recency order)   │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [a] ◄──► [b] ◄──► [c] ◄── tail                     │   │
//!   │   │          (MRU)              (LRU)                            │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns every `Entry`; the index only holds `SlotId` handles.
//! Every key in the index names a live list node and every list node is
//! indexed under its own key.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) on a full cache (capacity = 3)
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. pop tail [C], drop C from index
//!     2. push [D] at head, index D
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//!
//!   remove_where(|k| k == A || k == D)
//!     scan all keys, unlink each match
//!     head ──► [B] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method             | Complexity | Description                               |
//! |--------------------|------------|-------------------------------------------|
//! | `new(capacity)`    | O(1)       | Create cache; panics on zero capacity     |
//! | `try_new(capacity)`| O(1)       | Create cache; `ConfigError` on zero       |
//! | `put(k, v)`        | O(1)       | Insert or update, may evict LRU           |
//! | `get(&k)`          | O(1)       | Get value, moves to MRU position          |
//! | `peek(&k)`         | O(1)       | Get value without reordering              |
//! | `remove_key(&k)`   | O(1)       | Remove entry by key                       |
//! | `remove_where(f)`  | O(n)       | Remove every entry whose key matches `f`  |
//! | `keys()`           | O(n)       | Current key set, unspecified order        |
//! | `pop_lru()`        | O(1)       | Remove and return least recently used     |
//! | `recency_rank(&k)` | O(n)       | Position in recency order (0 = MRU)       |
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded. `get` reorders the list and therefore takes
//! `&mut self`; list and index are always updated together under that
//! exclusive borrow.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // "b" is now least recently used.
//! cache.put("c", 3);
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.get(&"c"), Some(&3));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MemoStore, MutableCache};

/// A cached key/value pair, owned by the recency list.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Exact LRU cache built from an [`IntrusiveList`] and an `FxHashMap` index.
pub struct LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) for
    /// user-supplied capacities.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LruCache capacity must be greater than zero");
        Self::with_capacity_unchecked(capacity)
    }

    /// Creates a cache holding at most `capacity` entries, rejecting zero.
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(16).is_ok());
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self::with_capacity_unchecked(capacity))
    }

    fn with_capacity_unchecked(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without affecting recency order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = *self.index.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        self.list.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// An update overwrites the value in place and promotes the entry. A new
    /// key on a full cache first evicts exactly one entry: the current tail.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.list.move_to_front(id);
            debug_assert!(previous.is_some(), "indexed key has no list entry");
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity && self.evict_tail().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        let id = self.list.push_front(Entry { key, value });
        self.index.insert(key, id);

        debug_assert_eq!(self.index.len(), self.list.len());
        debug_assert!(self.index.len() <= self.capacity);
        None
    }

    /// Removes `key` from both the list and the index.
    ///
    /// Absent keys are a no-op. Relative order of the remaining entries is
    /// unchanged.
    pub fn remove_key(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let value = self.take(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }

    /// Removes every entry whose key satisfies `pred` and returns the count.
    ///
    /// Scans the full key set once, so the cost is O(len) regardless of how
    /// many entries match.
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_invalidation_scan(self.index.len());

        let stale: Vec<K> = self.index.keys().filter(|key| pred(*key)).copied().collect();
        for key in &stale {
            self.take(key);
        }

        if !stale.is_empty() {
            tracing::debug!(
                "[lru]: invalidated {} entries, {} remain",
                stale.len(),
                self.index.len()
            );
        }
        stale.len()
    }

    /// Returns the current key set in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.index.keys()
    }

    /// Returns `(key, value)` pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
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

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.evict_tail()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(popped)
    }

    /// Returns the least recently used entry without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Marks `key` as most recently used; returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.list.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Position of `key` in recency order, `0` being the most recent.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = *self.index.get(key)?;
        for (rank, id) in self.list.iter_ids().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.list.clear();
        self.index.clear();
    }

    /// Verifies that list and index mirror each other and capacity holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }

        let mut walked = 0usize;
        for id in self.list.iter_ids() {
            walked += 1;
            let entry = self
                .list
                .get(id)
                .ok_or_else(|| InvariantError::new("list links to a freed slot"))?;
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list entry at slot {} is not indexed under its key",
                    id.index()
                )));
            }
        }
        if walked != self.index.len() {
            return Err(InvariantError::new(format!(
                "walked {} list entries, expected {}",
                walked,
                self.index.len()
            )));
        }
        Ok(())
    }

    /// Unlinks the tail and drops it from the index.
    fn evict_tail(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        let unindexed = self.index.remove(&entry.key);
        debug_assert!(unindexed.is_some(), "list tail was not indexed");

        tracing::trace!("[lru]: evicted tail entry, len {}", self.index.len());
        Some((entry.key, entry.value))
    }

    fn take(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.list.remove(id);
        debug_assert!(entry.is_some(), "indexed key has no list entry");
        entry.map(|entry| entry.value)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Copy + Eq + Hash,
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
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            invalidation_scans: self.metrics.invalidation_scans,
            invalidation_scan_steps: self.metrics.invalidation_scan_steps,
            clears: self.metrics.clears,
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
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
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_key(key)
    }

    fn remove_where<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        LruCache::remove_where(self, pred)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
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

/// A bounded memo table: old results are evicted and recomputed on demand.
impl<K, V> MemoStore<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn find(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn insert(&mut self, key: K, value: V) {
        self.put(key, value);
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
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
    K: Copy + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<K: Copy + Eq + Hash, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn put_then_get_returns_value() {
                let mut cache = LruCache::new(4);
                assert_eq!(cache.put(1, "one"), None);
                assert_eq!(cache.get(&1), Some(&"one"));
                assert_eq!(cache.len(), 1);
                assert!(!cache.is_empty());
            }

            #[test]
            fn get_missing_key_is_none() {
                let mut cache: LruCache<u32, u32> = LruCache::new(4);
                assert_eq!(cache.get(&9), None);
            }

            #[test]
            fn zero_value_is_a_hit_not_a_miss() {
                let mut cache = LruCache::new(2);
                cache.put((0usize, 0usize), 0i64);
                assert_eq!(cache.get(&(0, 0)), Some(&0));
            }

            #[test]
            fn put_existing_key_updates_in_place() {
                let mut cache = LruCache::new(3);
                cache.put("a", 1);
                cache.put("b", 2);
                assert_eq!(cache.put("a", 10), Some(1));
                assert_eq!(cache.len(), 2);
                assert_eq!(order(&cache), vec!["a", "b"]);
                assert_eq!(cache.peek(&"a"), Some(&10));
            }

            #[test]
            fn get_promotes_to_front() {
                let mut cache = LruCache::new(3);
                cache.put(1, ());
                cache.put(2, ());
                cache.put(3, ());
                assert_eq!(order(&cache), vec![3, 2, 1]);

                cache.get(&1);
                assert_eq!(order(&cache), vec![1, 3, 2]);
                assert_eq!(cache.recency_rank(&1), Some(0));
                assert_eq!(cache.recency_rank(&2), Some(2));
            }

            #[test]
            fn peek_does_not_promote() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                assert_eq!(cache.peek(&1), Some(&1));
                cache.put(3, 3);
                assert!(!cache.contains(&1));
            }

            #[test]
            fn touch_promotes_without_reading() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                assert!(cache.touch(&1));
                assert!(!cache.touch(&7));
                cache.put(3, 3);
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn try_new_rejects_zero_capacity() {
                let err = LruCache::<u8, u8>::try_new(0).unwrap_err();
                assert!(err.message().contains("capacity"));
                assert_eq!(LruCache::<u8, u8>::try_new(3).unwrap().capacity(), 3);
            }

            #[test]
            #[should_panic(expected = "capacity must be greater than zero")]
            fn new_panics_on_zero_capacity() {
                let _ = LruCache::<u8, u8>::new(0);
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn recency_decides_the_victim() {
                let mut cache = LruCache::new(2);
                cache.put('a', 1);
                cache.put('b', 2);
                cache.get(&'a');
                cache.put('c', 3);

                assert!(!cache.contains(&'b'));
                assert_eq!(cache.get(&'a'), Some(&1));
                assert_eq!(cache.get(&'c'), Some(&3));
            }

            #[test]
            fn exactly_one_entry_evicted_per_overflow() {
                let mut cache = LruCache::new(3);
                cache.extend([(1, 1), (2, 2), (3, 3)]);
                cache.put(4, 4);
                assert_eq!(cache.len(), 3);
                assert_eq!(order(&cache), vec![4, 3, 2]);
            }

            #[test]
            fn update_at_capacity_does_not_evict() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                cache.put(1, 11);
                assert_eq!(cache.len(), 2);
                assert!(cache.contains(&2));
            }

            #[test]
            fn capacity_one_keeps_latest() {
                let mut cache = LruCache::new(1);
                cache.put(1, 1);
                cache.put(2, 2);
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.get(&2), Some(&2));
                assert_eq!(cache.get(&1), None);
            }

            #[test]
            fn pop_lru_and_peek_lru_follow_tail() {
                let mut cache = LruCache::new(3);
                cache.put(1, 'x');
                cache.put(2, 'y');
                assert_eq!(cache.peek_lru(), Some((&1, &'x')));
                assert_eq!(cache.pop_lru(), Some((1, 'x')));
                assert_eq!(cache.pop_lru(), Some((2, 'y')));
                assert_eq!(cache.pop_lru(), None);
                assert!(cache.is_empty());
            }
        }

        mod invalidation {
            use super::*;

            #[test]
            fn remove_key_keeps_order_of_others() {
                let mut cache = LruCache::new(4);
                cache.extend([(1, ()), (2, ()), (3, ()), (4, ())]);
                assert_eq!(cache.remove_key(&3), Some(()));
                assert_eq!(order(&cache), vec![4, 2, 1]);
                assert_eq!(cache.remove_key(&3), None);
                cache.check_invariants().unwrap();
            }

            #[test]
            fn remove_where_drops_all_matches() {
                let mut cache = LruCache::new(8);
                for i in 0..8u32 {
                    cache.put(i, i);
                }
                assert_eq!(cache.remove_where(|k| k % 3 == 0), 3);
                let mut keys: Vec<_> = cache.keys().copied().collect();
                keys.sort_unstable();
                assert_eq!(keys, vec![1, 2, 4, 5, 7]);
                assert_eq!(order(&cache), vec![7, 5, 4, 2, 1]);
                cache.check_invariants().unwrap();
            }

            #[test]
            fn remove_where_without_matches_is_noop() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                assert_eq!(cache.remove_where(|_| false), 0);
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn freed_slots_are_reused_after_invalidation() {
                let mut cache = LruCache::new(3);
                cache.extend([(1, 1), (2, 2), (3, 3)]);
                cache.remove_where(|k| *k != 2);
                cache.put(4, 4);
                cache.put(5, 5);
                assert_eq!(order(&cache), vec![5, 4, 2]);
                cache.check_invariants().unwrap();
            }
        }

        mod edge_cases {
            use super::*;

            #[test]
            fn clear_resets_everything() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.peek_lru(), None);
                cache.put(3, 3);
                assert_eq!(cache.get(&3), Some(&3));
                cache.check_invariants().unwrap();
            }

            #[test]
            fn pair_keys_are_distinct_by_order() {
                let mut cache = LruCache::new(4);
                cache.put((1usize, 2usize), 10);
                cache.put((2, 1), 20);
                assert_eq!(cache.get(&(1, 2)), Some(&10));
                assert_eq!(cache.get(&(2, 1)), Some(&20));
            }

            #[test]
            fn trait_objects_agree_with_inherent_api() {
                fn fill<C: CoreCache<u64, u64>>(cache: &mut C) {
                    for i in 0..10 {
                        cache.insert(i, i);
                    }
                }
                let mut cache = LruCache::new(4);
                fill(&mut cache);
                assert_eq!(CoreCache::len(&cache), 4);
                assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&6, &6)));
                assert_eq!(MutableCache::remove(&mut cache, &9), Some(9));
            }

            #[test]
            fn debug_omits_contents() {
                let mut cache = LruCache::new(2);
                cache.put(1, "secret");
                let dbg = format!("{:?}", cache);
                assert!(dbg.contains("LruCache"));
                assert!(!dbg.contains("secret"));
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_hits_misses_and_evictions() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(3, 3);
            cache.get(&3);
            cache.get(&1);
            cache.put(3, 30);

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.capacity, 2);
        }

        #[test]
        fn invalidation_scan_counts_every_key() {
            let mut cache = LruCache::new(5);
            cache.extend((0..5u8).map(|i| (i, i)));
            cache.remove_where(|k| *k < 2);
            cache.remove_where(|_| false);

            let snap = MetricsSnapshotProvider::snapshot(&cache);
            assert_eq!(snap.invalidation_scans, 2);
            assert_eq!(snap.invalidation_scan_steps, 5 + 3);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u8, u16),
            Get(u8),
            Remove(u8),
            Invalidate(u8),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Put(k % 32, v)),
                any::<u8>().prop_map(|k| Op::Get(k % 32)),
                any::<u8>().prop_map(|k| Op::Remove(k % 32)),
                any::<u8>().prop_map(|k| Op::Invalidate(k % 32)),
            ]
        }

        proptest! {
            /// Property: len never exceeds capacity and list/index stay in sync.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_capacity_and_structure_hold(
                capacity in 1usize..12,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache = LruCache::new(capacity);
                for op in ops {
                    match op {
                        Op::Put(k, v) => { cache.put(k, v); },
                        Op::Get(k) => { cache.get(&k); },
                        Op::Remove(k) => { cache.remove_key(&k); },
                        Op::Invalidate(k) => { cache.remove_where(|key| *key >= k); },
                    }
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            /// Property: behaves like a recency-ordered reference model.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                capacity in 1usize..8,
                ops in prop::collection::vec(op_strategy(), 0..150)
            ) {
                let mut cache = LruCache::new(capacity);
                // front = most recently used
                let mut model: Vec<(u8, u16)> = Vec::new();

                for op in ops {
                    match op {
                        Op::Put(k, v) => {
                            cache.put(k, v);
                            if let Some(pos) = model.iter().position(|(mk, _)| *mk == k) {
                                model.remove(pos);
                            } else if model.len() == capacity {
                                model.pop();
                            }
                            model.insert(0, (k, v));
                        },
                        Op::Get(k) => {
                            let got = cache.get(&k).copied();
                            let pos = model.iter().position(|(mk, _)| *mk == k);
                            let expected = pos.map(|pos| {
                                let entry = model.remove(pos);
                                model.insert(0, entry);
                                entry.1
                            });
                            prop_assert_eq!(got, expected);
                        },
                        Op::Remove(k) => {
                            cache.remove_key(&k);
                            model.retain(|(mk, _)| *mk != k);
                        },
                        Op::Invalidate(k) => {
                            cache.remove_where(|key| *key >= k);
                            model.retain(|(mk, _)| *mk < k);
                        },
                    }
                    let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(actual, model.clone());
                }
            }
        }
    }
}
