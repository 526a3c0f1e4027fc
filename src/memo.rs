//! # Fibonacci Memoization
//!
//! Recursive Fibonacci with an explicit, pluggable memo table. The point is
//! not the arithmetic: [`fib`] issues the same lookup/store sequence against
//! whichever [`MemoTable`] backend it is handed, which makes the backends
//! directly comparable under an identical access pattern.
//!
//! Two backends ship with the crate:
//!
//! * [`HashMemo`]: flat hash table, O(1) expected per operation.
//! * [`SplayTree`](crate::ds::splay::SplayTree): ordered tree that splays
//!   every touched key to the root. The fib recursion probes `n - 1` and
//!   `n - 2` right after finishing `n - 1`, so the splayed key is almost
//!   always within a rotation or two of the root.
//!
//! Memo tables grow without bound; sizing is the caller's concern (a table
//! filled by `fib(n)` holds `n - 1` entries).
//!
//! Values are `u128`, which holds Fibonacci numbers up to [`MAX_FIB_N`].

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::MemoTable;

/// Largest `n` for which `fib(n)` fits in a `u128`.
///
/// `fib(187)` is roughly `5.4 * 10^38`, past `u128::MAX`.
pub const MAX_FIB_N: u32 = 186;

/// Unbounded hash-backed memo table.
///
/// A thin shell over [`FxHashMap`] so the hash strategy can sit on the same
/// seam as the tree-backed tables.
///
/// # Example
///
/// ```
/// use memokit::memo::HashMemo;
/// use memokit::traits::MemoTable;
///
/// let mut memo: HashMemo<u32, u128> = HashMemo::new();
/// memo.store(7, 13);
/// assert_eq!(memo.lookup(&7), Some(&13));
/// assert_eq!(memo.len(), 1);
/// ```
pub struct HashMemo<K, V> {
    table: FxHashMap<K, V>,
}

impl<K, V> HashMemo<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    /// Returns the number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

impl<K, V> Default for HashMemo<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoTable<K, V> for HashMemo<K, V>
where
    K: Eq + Hash,
{
    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    fn store(&mut self, key: K, value: V) {
        self.table.insert(key, value);
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}

/// Computes the `n`-th Fibonacci number through `memo`.
///
/// `fib(0) = 0`, `fib(1) = 1`; both are answered without touching the
/// table. Larger `n` check the table first and recurse only on a miss, so a
/// warm table answers in a single lookup. Any two backends produce
/// identical values for every `n`.
///
/// # Panics
///
/// Panics if `n` exceeds [`MAX_FIB_N`]; the result would overflow `u128`.
///
/// # Example
///
/// ```
/// use memokit::ds::splay::SplayTree;
/// use memokit::memo::{fib, HashMemo};
///
/// let mut hashed = HashMemo::new();
/// assert_eq!(fib(10, &mut hashed), 55);
/// assert_eq!(fib(92, &mut hashed), 7_540_113_804_746_346_429);
///
/// let mut splayed = SplayTree::new();
/// assert_eq!(fib(10, &mut splayed), 55);
/// assert_eq!(splayed.root_key(), Some(&10)); // last key stored is at the root
/// ```
pub fn fib<M>(n: u32, memo: &mut M) -> u128
where
    M: MemoTable<u32, u128>,
{
    assert!(
        n <= MAX_FIB_N,
        "fib({}) overflows u128; the largest supported n is {}",
        n,
        MAX_FIB_N
    );
    fib_memoized(n, memo)
}

fn fib_memoized<M>(n: u32, memo: &mut M) -> u128
where
    M: MemoTable<u32, u128>,
{
    if n <= 1 {
        return u128::from(n);
    }
    if let Some(&hit) = memo.lookup(&n) {
        return hit;
    }
    let value = fib_memoized(n - 1, memo) + fib_memoized(n - 2, memo);
    memo.store(n, value);
    value
}
