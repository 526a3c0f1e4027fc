//! Convenience re-exports of the crate's primary types.

pub use crate::ds::splay::SplayTree;
pub use crate::error::{BoundsError, ConfigError};
pub use crate::memo::{HashMemo, MAX_FIB_N, fib};
pub use crate::policy::lru::LruCache;
pub use crate::range_sum::{RangeKey, RangeSumCache, RangeSumStats, range_sum};
pub use crate::traits::MemoTable;
pub use crate::workload::{QueryOp, WorkloadGenerator, WorkloadSpec};
