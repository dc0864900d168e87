//! # Cached Range Sums over a Mutable Array
//!
//! [`RangeSumService`] answers inclusive interval sums and memoizes them in an
//! [`LruCache`] keyed by `(left, right)`. Every update drops exactly the
//! cached intervals that contain the written index, so a cache hit always
//! agrees with the array's current contents.
//!
//! ```text
//!   values: [ 1 | 2 | 3 | 4 | 5 ]          cache (MRU → LRU)
//!             0   1   2   3   4            (0,4)=15  (3,4)=9  (0,1)=3
//!
//!   update(2, 100)
//!     values[2] = 100
//!     scan keys: (0,4) covers 2 → drop
//!                (3,4) misses 2 → keep
//!                (0,1) misses 2 → keep
//!
//!   query(0, 4) → miss → Σ = 112 → cached
//! ```
//!
//! The uncached baseline, [`range_sum`] and [`update`], operates on a plain
//! slice and is what cached results are compared against.
//!
//! ## Example
//!
//! ```
//! use memokit::policy::lru::LruCache;
//! use memokit::workload::range_sum::RangeSumService;
//!
//! let mut service = RangeSumService::new(vec![1, 2, 3, 4, 5], LruCache::new(16));
//! assert_eq!(service.query(0, 4), Ok(15));
//!
//! service.update(2, 100).unwrap();
//! assert_eq!(service.query(0, 4), Ok(112));
//! ```

use std::fmt;

use crate::error::{ConfigError, RangeError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::RangeSumMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::RangeSumMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsSnapshotProvider, RangeSumMetricsRecorder};
use crate::policy::lru::LruCache;

/// Cache key: inclusive `(left, right)` interval with `left <= right`.
pub type RangeKey = (usize, usize);

/// Sums `values[left..=right]` without any caching.
pub fn range_sum(values: &[i64], left: usize, right: usize) -> Result<i64, RangeError> {
    RangeError::check_interval(left, right, values.len())?;
    sum_interval(values, left, right)
}

/// Writes `values[index] = value` without any caching.
pub fn update(values: &mut [i64], index: usize, value: i64) -> Result<(), RangeError> {
    RangeError::check_index(index, values.len())?;
    values[index] = value;
    Ok(())
}

/// Checked sum; bounds must already be validated.
#[inline]
fn sum_interval(values: &[i64], left: usize, right: usize) -> Result<i64, RangeError> {
    values[left..=right]
        .iter()
        .try_fold(0i64, |acc, &value| acc.checked_add(value))
        .ok_or(RangeError::Overflow { left, right })
}

/// Range-sum queries over an owned array, memoized in an LRU cache.
pub struct RangeSumService {
    values: Vec<i64>,
    cache: LruCache<RangeKey, i64>,
    #[cfg(feature = "metrics")]
    metrics: RangeSumMetrics,
}

impl RangeSumService {
    /// Takes ownership of `values` and serves sums through `cache`.
    ///
    /// The cache is used as given; entries already in it are trusted.
    pub fn new(values: Vec<i64>, cache: LruCache<RangeKey, i64>) -> Self {
        Self {
            values,
            cache,
            #[cfg(feature = "metrics")]
            metrics: RangeSumMetrics::default(),
        }
    }

    /// Builds a service with a fresh cache of `capacity` intervals.
    pub fn with_capacity(values: Vec<i64>, capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(values, LruCache::try_new(capacity)?))
    }

    /// Returns `Σ values[left..=right]`.
    ///
    /// A cached interval is returned without touching the array; otherwise the
    /// sum is computed in O(right − left + 1) and cached under `(left, right)`.
    /// A sum that overflows `i64` returns [`RangeError::Overflow`] and is not
    /// cached.
    pub fn query(&mut self, left: usize, right: usize) -> Result<i64, RangeError> {
        let checked = RangeError::check_interval(left, right, self.values.len());
        #[cfg(feature = "metrics")]
        if checked.is_err() {
            self.metrics.record_rejected();
        }
        checked?;

        let key = (left, right);
        if let Some(&sum) = self.cache.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_query_hit();
            return Ok(sum);
        }

        let summed = sum_interval(&self.values, left, right);
        #[cfg(feature = "metrics")]
        match summed {
            Ok(_) => self.metrics.record_query_miss(right - left + 1),
            Err(_) => self.metrics.record_rejected(),
        }
        let sum = summed?;

        self.cache.put(key, sum);
        Ok(sum)
    }

    /// Writes `values[index] = value` and invalidates every cached interval
    /// containing `index`.
    ///
    /// Intervals that do not contain `index` survive untouched. The scan
    /// visits every cached key once.
    pub fn update(&mut self, index: usize, value: i64) -> Result<(), RangeError> {
        let checked = RangeError::check_index(index, self.values.len());
        #[cfg(feature = "metrics")]
        if checked.is_err() {
            self.metrics.record_rejected();
        }
        checked?;

        self.values[index] = value;
        let invalidated = self
            .cache
            .remove_where(|&(left, right)| left <= index && index <= right);

        #[cfg(feature = "metrics")]
        self.metrics.record_update(invalidated);

        tracing::trace!(
            "[range_sum]: update at {} invalidated {} cached intervals",
            index,
            invalidated
        );
        Ok(())
    }

    /// Length of the backing array.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current array contents.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Read access to the interval cache.
    pub fn cache(&self) -> &LruCache<RangeKey, i64> {
        &self.cache
    }

    /// Returns the backing array, dropping the cache.
    pub fn into_inner(self) -> Vec<i64> {
        self.values
    }
}

#[cfg(feature = "metrics")]
impl RangeSumService {
    pub fn metrics_snapshot(&self) -> RangeSumMetricsSnapshot {
        RangeSumMetricsSnapshot {
            query_calls: self.metrics.query_calls,
            query_hits: self.metrics.query_hits,
            query_misses: self.metrics.query_misses,
            elements_summed: self.metrics.elements_summed,
            update_calls: self.metrics.update_calls,
            invalidated_entries: self.metrics.invalidated_entries,
            rejected_calls: self.metrics.rejected_calls,
            values_len: self.values.len(),
            cache: self.cache.metrics_snapshot(),
        }
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<RangeSumMetricsSnapshot> for RangeSumService {
    fn snapshot(&self) -> RangeSumMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl fmt::Debug for RangeSumService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSumService")
            .field("len", &self.values.len())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
