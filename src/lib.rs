//! memokit: an LRU cache with predicate invalidation, a splay-tree memo table,
//! and the workloads that exercise them.
//!
//! - [`policy::lru::LruCache`]: fixed-capacity LRU over an arena-backed
//!   intrusive list, with `remove_where` for targeted invalidation.
//! - [`memo::SplayMemo`] / [`memo::HashMemo`]: unbounded memo tables behind
//!   the [`traits::MemoStore`] trait.
//! - [`workload::range_sum::RangeSumService`]: cached interval sums that stay
//!   exact across array updates.
//! - [`workload::fibonacci`](mod@workload::fibonacci): memoized Fibonacci over any `MemoStore`.

pub mod ds;
pub mod error;
pub mod memo;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
pub mod workload;
