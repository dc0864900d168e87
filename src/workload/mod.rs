//! Workloads that exercise the caches.
//!
//! - [`range_sum`]: interval sums over a mutable array, memoized in an
//!   [`LruCache`](crate::policy::lru::LruCache) with update invalidation.
//! - [`fibonacci`](mod@fibonacci): recursive Fibonacci generic over any
//!   [`MemoStore`](crate::traits::MemoStore).

pub mod fibonacci;
pub mod range_sum;

pub use fibonacci::{fibonacci, fibonacci_uncached};
pub use range_sum::{RangeKey, RangeSumService};
