//! # Range-Sum Cache
//!
//! Range-sum queries over a mutable array, with results cached in an LRU
//! keyed by the queried interval. Point updates invalidate exactly the
//! cached intervals they touch.
//!
//! ## Protocol
//!
//! ```text
//!    sum(l, r)                             update(i, v)
//!    ─────────                             ────────────
//!    key = (l, r)                          values[i] = v
//!    cached? ──yes──► return hit           for key in cache.keys():
//!       │ no                                   key covers i ──► remove
//!       ▼                                  (one pass over every cached
//!    fold values[l..=r]                     key, whether or not any
//!    cache the result (may evict)           interval actually covers i)
//! ```
//!
//! The write path deliberately scans the whole cached key set instead of
//! maintaining an interval index over it. Cost per update is O(cached
//! entries), bounded by the cache capacity, and the cache stays a plain
//! LRU. Workloads here are read-heavy (a few percent updates), so the
//! scan is paid rarely while every read keeps O(1) cache handling.
//!
//! Correctness rule: after `update(i, _)`, no cached interval containing
//! `i` survives. Stale reads are impossible; a later query on an
//! invalidated interval recomputes from the current array.
//!
//! ## Example
//!
//! ```
//! use memokit::range_sum::RangeSumCache;
//!
//! let mut cache = RangeSumCache::try_new(vec![1, 2, 3, 4, 5], 128)?;
//!
//! assert_eq!(cache.sum(0, 4)?, 15);
//! assert_eq!(cache.sum(0, 4)?, 15); // served from cache
//!
//! cache.update(2, 100)?;            // drops every interval covering 2
//! assert_eq!(cache.sum(0, 4)?, 112);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{BoundsError, ConfigError};
use crate::policy::lru::LruCache;

/// An inclusive interval `[left, right]` used as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    pub left: usize,
    pub right: usize,
}

impl RangeKey {
    /// Builds a key; `left <= right` is the caller's contract.
    #[inline]
    pub fn new(left: usize, right: usize) -> Self {
        debug_assert!(left <= right, "inverted range ({}, {})", left, right);
        Self { left, right }
    }

    /// Returns `true` if `index` falls inside the interval, endpoints
    /// included.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }
}

/// Counters accumulated by a [`RangeSumCache`] over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSumStats {
    /// Range queries served, hit or miss.
    pub queries: u64,
    /// Queries answered from the cache.
    pub hits: u64,
    /// Queries that had to fold the array.
    pub misses: u64,
    /// Point updates applied.
    pub updates: u64,
    /// Cached intervals dropped by updates.
    pub invalidated: u64,
}

impl RangeSumStats {
    /// Fraction of queries served from the cache; `0.0` before any query.
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            0.0
        } else {
            self.hits as f64 / self.queries as f64
        }
    }
}

/// Array + LRU-cached range sums + invalidation on update.
///
/// Single-threaded by design; wrap it yourself if you need sharing.
pub struct RangeSumCache {
    values: Vec<u64>,
    cache: LruCache<RangeKey, u64>,
    stats: RangeSumStats,
}

impl RangeSumCache {
    /// Wraps `values` with a result cache of at most `capacity` intervals.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(values: Vec<u64>, capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            values,
            cache: LruCache::try_new(capacity)?,
            stats: RangeSumStats::default(),
        })
    }

    /// Returns the array length.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the array is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the current array contents.
    #[inline]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Returns the number of intervals currently cached.
    #[inline]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Returns the cache capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Returns a copy of the lifetime counters.
    #[inline]
    pub fn stats(&self) -> RangeSumStats {
        self.stats
    }

    /// Sums `values[left..=right]`, serving repeats from the cache.
    ///
    /// A miss folds the array, caches the result under `(left, right)` and
    /// may evict the least recently used interval.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the range is inverted or extends past the
    /// array.
    pub fn sum(&mut self, left: usize, right: usize) -> Result<u64, BoundsError> {
        self.check_range(left, right)?;
        self.stats.queries += 1;

        let key = RangeKey::new(left, right);
        if let Some(&cached) = self.cache.get(&key) {
            self.stats.hits += 1;
            return Ok(cached);
        }

        self.stats.misses += 1;
        let computed = range_sum(&self.values, left, right);
        self.cache.insert(key, computed);
        Ok(computed)
    }

    /// Writes `values[index] = value` and drops every cached interval
    /// covering `index`.
    ///
    /// The new value is not compared against the old one; an overwrite with
    /// the same value still invalidates.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if `index` is out of range.
    pub fn update(&mut self, index: usize, value: u64) -> Result<(), BoundsError> {
        if index >= self.values.len() {
            return Err(BoundsError::new(format!(
                "index {} out of range for array of length {}",
                index,
                self.values.len()
            )));
        }

        self.values[index] = value;
        self.stats.updates += 1;

        // Collect first: removing while walking the key set would skip keys.
        let stale: Vec<RangeKey> = self
            .cache
            .keys()
            .into_iter()
            .filter(|key| key.contains(index))
            .collect();
        self.stats.invalidated += stale.len() as u64;
        for key in &stale {
            self.cache.remove(key);
        }
        Ok(())
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), BoundsError> {
        if left > right {
            return Err(BoundsError::new(format!(
                "range ({}, {}) is inverted",
                left, right
            )));
        }
        if right >= self.values.len() {
            return Err(BoundsError::new(format!(
                "range ({}, {}) extends past array of length {}",
                left,
                right,
                self.values.len()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RangeSumCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSumCache")
            .field("len", &self.values.len())
            .field("cached_entries", &self.cache.len())
            .field("capacity", &self.cache.capacity())
            .finish()
    }
}

/// Folds `values[left..=right]` directly, no caching.
///
/// The uncached baseline the cache is measured against.
///
/// # Panics
///
/// Panics if `left > right` or `right >= values.len()`; callers validate.
#[inline]
pub fn range_sum(values: &[u64], left: usize, right: usize) -> u64 {
    values[left..=right].iter().sum()
}
