//! Bounded cache policies.

pub mod lru;

pub use lru::LruCache;
