//! # Workload Generation
//!
//! Deterministic query streams for exercising a [`RangeSumCache`]: a light
//! trickle of point updates mixed into range queries that concentrate on a
//! small pool of hot intervals.
//!
//! The defaults model a read-heavy aggregation service: ~3% updates, and
//! ~95% of the range queries drawn from 30 recurring intervals. Every hot
//! interval straddles the array midpoint (left endpoint in the lower half,
//! right endpoint in the upper half), so hot queries are wide and an update
//! anywhere near the middle invalidates many of them at once. That is the
//! stress case for scan-based invalidation.
//!
//! Generation is seeded and self-contained; the same [`WorkloadSpec`]
//! reproduces the same hot pool, initial array and operation stream on
//! every run.

use crate::error::BoundsError;
use crate::range_sum::RangeSumCache;

/// Number of hot intervals kept in the pool.
pub const DEFAULT_HOT_POOL: usize = 30;
/// Probability that a range query comes from the hot pool.
pub const DEFAULT_HOT_PROB: f64 = 0.95;
/// Probability that an operation is a point update.
pub const DEFAULT_UPDATE_PROB: f64 = 0.03;
/// Values are drawn uniformly from `1..=DEFAULT_VALUE_MAX`.
pub const DEFAULT_VALUE_MAX: u64 = 100;

/// One operation against a [`RangeSumCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOp {
    /// Write `value` at `index`.
    Update { index: usize, value: u64 },
    /// Sum the inclusive interval `[left, right]`.
    Range { left: usize, right: usize },
}

impl QueryOp {
    /// Runs the operation against `cache`, discarding any sum produced.
    pub fn apply(&self, cache: &mut RangeSumCache) -> Result<(), BoundsError> {
        match *self {
            QueryOp::Update { index, value } => cache.update(index, value),
            QueryOp::Range { left, right } => cache.sum(left, right).map(|_| ()),
        }
    }
}

/// Parameters for a workload; see the module docs for the defaults' shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadSpec {
    /// Length of the backing array.
    pub array_len: usize,
    /// Size of the hot interval pool.
    pub hot_pool: usize,
    /// Probability a range query reuses a hot interval.
    pub hot_prob: f64,
    /// Probability an operation is an update.
    pub update_prob: f64,
    /// Values (initial and updated) are drawn from `1..=value_max`.
    pub value_max: u64,
    /// RNG seed; equal specs generate equal streams.
    pub seed: u64,
}

impl WorkloadSpec {
    /// A spec with the default mix over an array of `array_len` elements.
    pub fn new(array_len: usize, seed: u64) -> Self {
        Self {
            array_len,
            hot_pool: DEFAULT_HOT_POOL,
            hot_prob: DEFAULT_HOT_PROB,
            update_prob: DEFAULT_UPDATE_PROB,
            value_max: DEFAULT_VALUE_MAX,
            seed,
        }
    }

    /// Builds the generator for this spec.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`WorkloadGenerator::new`].
    pub fn generator(&self) -> WorkloadGenerator {
        WorkloadGenerator::new(*self)
    }
}

// Dependency-free xorshift; must stay bit-for-bit stable so that seeds
// keep meaning the same workload across crate versions.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // xorshift has a zero fixed point
        Self {
            state: seed.max(1),
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    #[inline]
    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        self.next_u64() as f64 * SCALE
    }

    /// Uniform draw from `lo..=hi`.
    #[inline]
    fn next_range(&mut self, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi);
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as usize
    }
}

/// Seeded operation stream over a fixed hot pool.
///
/// Construction draws the hot pool; afterwards [`initial_values`] and the
/// operation stream consume the RNG in call order, so drivers that need
/// matching array contents and queries should pull both from one
/// generator.
///
/// # Example
///
/// ```
/// use memokit::workload::{QueryOp, WorkloadSpec};
///
/// let mut workload = WorkloadSpec::new(1_000, 42).generator();
/// let values = workload.initial_values();
/// let ops = workload.ops(100);
///
/// assert_eq!(values.len(), 1_000);
/// assert_eq!(ops.len(), 100);
/// assert!(ops.iter().any(|op| matches!(op, QueryOp::Range { .. })));
/// ```
///
/// [`initial_values`]: WorkloadGenerator::initial_values
pub struct WorkloadGenerator {
    spec: WorkloadSpec,
    rng: XorShift64,
    hot: Vec<(usize, usize)>,
}

impl WorkloadGenerator {
    /// Draws the hot pool and readies the stream.
    ///
    /// Hot intervals take their left endpoint from `0..=n/2` and their
    /// right endpoint from `n/2..=n-1`.
    ///
    /// # Panics
    ///
    /// Panics if `array_len` or `hot_pool` is zero, or `value_max` is zero.
    pub fn new(spec: WorkloadSpec) -> Self {
        assert!(spec.array_len > 0, "workload needs a non-empty array");
        assert!(spec.hot_pool > 0, "workload needs at least one hot interval");
        assert!(spec.value_max > 0, "workload values start at 1");

        let mut rng = XorShift64::new(spec.seed);
        let n = spec.array_len;
        let hot = (0..spec.hot_pool)
            .map(|_| (rng.next_range(0, n / 2), rng.next_range(n / 2, n - 1)))
            .collect();

        Self { spec, rng, hot }
    }

    /// Returns the [`WorkloadSpec`] this generator was built from.
    pub fn spec(&self) -> &WorkloadSpec {
        &self.spec
    }

    /// Returns the hot interval pool.
    pub fn hot_ranges(&self) -> &[(usize, usize)] {
        &self.hot
    }

    /// Draws a starting array: `array_len` values in `1..=value_max`.
    pub fn initial_values(&mut self) -> Vec<u64> {
        (0..self.spec.array_len)
            .map(|_| 1 + self.rng.next_u64() % self.spec.value_max)
            .collect()
    }

    /// Draws the next operation.
    pub fn next_op(&mut self) -> QueryOp {
        let n = self.spec.array_len;
        if self.rng.next_f64() < self.spec.update_prob {
            QueryOp::Update {
                index: self.rng.next_range(0, n - 1),
                value: 1 + self.rng.next_u64() % self.spec.value_max,
            }
        } else if self.rng.next_f64() < self.spec.hot_prob {
            let pick = (self.rng.next_u64() as usize) % self.hot.len();
            let (left, right) = self.hot[pick];
            QueryOp::Range { left, right }
        } else {
            let left = self.rng.next_range(0, n - 1);
            let right = self.rng.next_range(left, n - 1);
            QueryOp::Range { left, right }
        }
    }

    /// Draws `count` operations.
    pub fn ops(&mut self, count: usize) -> Vec<QueryOp> {
        (0..count).map(|_| self.next_op()).collect()
    }
}

impl Iterator for WorkloadGenerator {
    type Item = QueryOp;

    fn next(&mut self) -> Option<QueryOp> {
        Some(self.next_op())
    }
}
