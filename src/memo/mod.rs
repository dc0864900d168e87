//! Memoization stores.
//!
//! Both stores implement [`MemoStore`](crate::traits::MemoStore) and never
//! evict; [`LruCache`](crate::policy::lru::LruCache) implements the same
//! trait as a bounded alternative.

pub mod hash;
pub mod splay;

pub use hash::HashMemo;
pub use splay::SplayMemo;
