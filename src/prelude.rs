pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError, RangeError};
pub use crate::memo::{HashMemo, SplayMemo};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{
    LruMetricsSnapshot, MemoMetricsSnapshot, RangeSumMetricsSnapshot, SplayMetricsSnapshot,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MemoStore, MutableCache};
pub use crate::workload::fibonacci::{fibonacci, fibonacci_uncached};
pub use crate::workload::range_sum::{RangeKey, RangeSumService};
