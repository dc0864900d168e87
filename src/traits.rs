//! # Cache Trait Hierarchy
//!
//! Two families of traits live here:
//!
//! - The **bounded cache** traits ([`CoreCache`] → [`MutableCache`] →
//!   [`LruCacheTrait`]) describe capacity-limited stores with eviction.
//! - [`MemoStore`] describes the "find, else compute and insert" contract
//!   shared by every memoization backend, bounded or not.
//!
//! ```text
//!   ┌─────────────────────────────┐        ┌──────────────────────────────┐
//!   │       CoreCache<K, V>       │        │       MemoStore<K, V>        │
//!   │  insert / get / contains    │        │  find(&mut, &K) → Option<&V> │
//!   │  len / capacity / clear     │        │  insert(&mut, K, V)          │
//!   └──────────────┬──────────────┘        └──────────────────────────────┘
//!                  ▼                          ▲          ▲          ▲
//!   ┌─────────────────────────────┐           │          │          │
//!   │     MutableCache<K, V>      │       SplayMemo    HashMemo    LruCache
//!   │  remove / remove_where      │
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │     LruCacheTrait<K, V>     │
//!   │  pop_lru / peek_lru / touch │
//!   │  recency_rank               │
//!   └─────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use memokit::policy::lru::LruCache;
//! use memokit::traits::{CoreCache, MutableCache};
//!
//! fn invalidate_even<C: MutableCache<u64, u64>>(cache: &mut C) -> usize {
//!     cache.remove_where(|k| k % 2 == 0)
//! }
//!
//! let mut cache = LruCache::new(8);
//! for i in 0..6u64 {
//!     CoreCache::insert(&mut cache, i, i * 10);
//! }
//! assert_eq!(invalidate_even(&mut cache), 3);
//! assert_eq!(CoreCache::len(&cache), 3);
//! ```

/// Operations every bounded cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value if one existed.
    ///
    /// May evict another entry to stay within capacity.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`. Takes `&mut self` because a hit may reorder the
    /// eviction queue.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is cached. Never affects eviction order.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that allow removal of arbitrary keys.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value. Other entries keep their order.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every entry whose key satisfies `pred`; returns how many were removed.
    fn remove_where<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&K) -> bool;
}

/// Recency-ordered caches.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without touching it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being the most recent.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Storage backend for memoized computations.
///
/// `find` takes `&mut self` so that self-adjusting stores (splay trees, LRU
/// lists) can restructure on access.
pub trait MemoStore<K, V> {
    fn find(&mut self, key: &K) -> Option<&V>;

    fn insert(&mut self, key: K, value: V);
}
