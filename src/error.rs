//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`RangeError`]: Returned by range-sum queries and updates whose index or
//!   interval falls outside the backing array, or whose sum does not fit `i64`.
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. zero capacity).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   structure (list, index or tree links) is inconsistent.
//!
//! A cache miss is never an error: lookups return `Option`.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::{ConfigError, RangeError};
//! use memokit::policy::lru::LruCache;
//! use memokit::workload::range_sum::RangeSumService;
//!
//! let bad: Result<LruCache<u64, u64>, ConfigError> = LruCache::try_new(0);
//! assert!(bad.is_err());
//!
//! let mut service = RangeSumService::new(vec![1, 2, 3], LruCache::new(4));
//! assert_eq!(
//!     service.query(1, 3),
//!     Err(RangeError::OutOfRange { left: 1, right: 3, len: 3 })
//! );
//! ```

// ---------------------------------------------------------------------------
// RangeError
// ---------------------------------------------------------------------------

/// Error returned when an index or interval lies outside the backing array,
/// or when an interval's sum overflows `i64`.
///
/// Also covers inverted intervals (`left > right`). Bounds are checked before
/// any mutation, and an overflowing sum is never cached, so a failed call
/// leaves the array and the cache untouched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// `left..=right` is not a valid interval of an array of length `len`.
    #[error("range [{left}, {right}] is out of bounds for length {len}")]
    OutOfRange {
        left: usize,
        right: usize,
        len: usize,
    },

    /// `Σ values[left..=right]` does not fit in an `i64`.
    #[error("sum of range [{left}, {right}] overflows i64")]
    Overflow { left: usize, right: usize },
}

impl RangeError {
    /// Validates `left..=right` against an array of length `len`.
    #[inline]
    pub fn check_interval(left: usize, right: usize, len: usize) -> Result<(), Self> {
        if left <= right && right < len {
            Ok(())
        } else {
            Err(Self::OutOfRange { left, right, len })
        }
    }

    /// Validates a single index against an array of length `len`.
    #[inline]
    pub fn check_index(index: usize, len: usize) -> Result<(), Self> {
        Self::check_interval(index, index, len)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new).
///
/// ```
/// use memokit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by `check_invariants` on
/// [`LruCache`](crate::policy::lru::LruCache::check_invariants) and
/// [`SplayMemo`](crate::memo::splay::SplayMemo::check_invariants).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
