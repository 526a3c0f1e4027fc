//! memokit: bounded LRU caching and splay-tree memoization primitives.
//!
//! Pairs two self-tuning lookup structures, a fixed-capacity LRU cache and a
//! splay tree, with the drivers used to compare them: a cached range-sum
//! table with point-update invalidation, memoized Fibonacci over a pluggable
//! table, and a deterministic query generator.

pub mod ds;
pub mod error;
pub mod memo;
pub mod policy;
pub mod prelude;
pub mod range_sum;
pub mod traits;
pub mod workload;
