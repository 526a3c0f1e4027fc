//! Core trait for pluggable memo tables.
//!
//! ## Design
//!
//! The memoized computations in this crate (see [`crate::memo`]) do not care
//! how their lookup table is organized, only that previously stored results
//! can be found again. [`MemoTable`] is that seam:
//!
//! ```text
//!                    ┌──────────────────────┐
//!                    │   MemoTable<K, V>    │
//!                    │  lookup / store      │
//!                    └──────────┬───────────┘
//!                               │
//!              ┌────────────────┴────────────────┐
//!              │                                 │
//!     ┌────────▼─────────┐            ┌──────────▼─────────┐
//!     │  HashMemo<K, V>  │            │  SplayTree<K, V>   │
//!     │  FxHashMap, O(1) │            │  ordered, splaying │
//!     └──────────────────┘            └────────────────────┘
//! ```
//!
//! `lookup` takes `&mut self` deliberately: a splay tree restructures itself
//! on every probe, so even a read is a write. Hash-backed tables simply
//! ignore the extra permission.
//!
//! ## Contract
//!
//! | Operation | Behavior                                                  |
//! |-----------|-----------------------------------------------------------|
//! | `lookup`  | Returns the stored value for `key`, or `None`. May        |
//! |           | reorganize internal state; must not change the mapping.   |
//! | `store`   | Inserts `key -> value`, replacing any previous value.     |
//! | `len`     | Number of distinct keys currently stored.                 |
//!
//! ## Example
//!
//! ```
//! use memokit::memo::HashMemo;
//! use memokit::traits::MemoTable;
//!
//! fn double_or_insert<M: MemoTable<u32, u64>>(table: &mut M, key: u32) -> u64 {
//!     if let Some(&hit) = table.lookup(&key) {
//!         return hit * 2;
//!     }
//!     table.store(key, u64::from(key));
//!     u64::from(key)
//! }
//!
//! let mut memo = HashMemo::new();
//! assert_eq!(double_or_insert(&mut memo, 7), 7);
//! assert_eq!(double_or_insert(&mut memo, 7), 14);
//! ```

/// A mutable key-value table used to memoize computed results.
///
/// Implemented by [`HashMemo`](crate::memo::HashMemo) (unbounded hash map)
/// and [`SplayTree`](crate::ds::splay::SplayTree) (ordered, self-adjusting).
/// Callers that memoize through this trait get identical results from every
/// implementation; only the access-time profile differs.
pub trait MemoTable<K, V> {
    /// Looks up `key`, returning a reference to the stored value if present.
    ///
    /// Takes `&mut self` because implementations are allowed to reorganize
    /// themselves on access (the splay tree moves the probed key to its
    /// root). The key-to-value mapping itself must not change.
    fn lookup(&mut self, key: &K) -> Option<&V>;

    /// Stores `key -> value`, replacing any previous value for `key`.
    fn store(&mut self, key: K, value: V);

    /// Returns the number of distinct keys stored.
    fn len(&self) -> usize;

    /// Returns `true` if no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
