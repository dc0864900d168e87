//! Operation counters for the caches and memo stores.
//!
//! Compiled only with the `metrics` feature. Each structure owns a counter
//! struct from [`metrics_impl`] and exposes a `Copy` snapshot from
//! [`snapshot`] through `metrics_snapshot()`.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
