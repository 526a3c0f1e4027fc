//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key-value cache with strict least-recently-used eviction,
//! used as the caching layer for the range-sum driver and as the bounded half
//! of the structure comparison benchmarks.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                            │
//!   │                                                                    │
//!   │   ┌──────────────────────────────────────────────────────────┐    │
//!   │   │  FxHashMap<K, usize> (key -> arena index)                │    │
//!   │   │                                                          │    │
//!   │   │  ┌─────────┬──────────────────────────────────────┐      │    │
//!   │   │  │   Key   │  index                               │      │    │
//!   │   │  ├─────────┼──────────────────────────────────────┤      │    │
//!   │   │  │ (0, 41) │  ────────────────────────────────┐   │      │    │
//!   │   │  │ (7, 12) │  ──────────────────────────┐     │   │      │    │
//!   │   │  └─────────┴────────────────────────────┼─────┼───┘      │    │
//!   │   └─────────────────────────────────────────┼─────┼──────────┘    │
//!   │                                             │     │               │
//!   │   ┌─────────────────────────────────────────┼─────┼──────────┐    │
//!   │   │  Vec<Option<Node>> arena + free list    ▼     ▼          │    │
//!   │   │                                                          │    │
//!   │   │  head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail  │    │
//!   │   │    (MRU)  │ slot │      │ slot │      │ slot │   (LRU)   │    │
//!   │   │           └──────┘      └──────┘      └──────┘           │    │
//!   │   │                                                          │    │
//!   │   │  prev/next are arena indices; nodes own key + value      │    │
//!   │   └──────────────────────────────────────────────────────────┘    │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! | Component            | Description                                      |
//! |----------------------|--------------------------------------------------|
//! | `LruCache<K, V>`     | Single-threaded cache; all operations O(1)       |
//! | `Node<K, V>`         | Arena slot: key, value, prev/next indices        |
//! | `map`                | `FxHashMap<K, usize>` locating the slot per key  |
//! | `free`               | Recycled slot indices from removals/evictions    |
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key (cache full)
//!   ════════════════════════════════════════════════════════════
//!
//!   Before:  head ──► [A] ◄──► [B] ◄──► [C] ◄── tail   (capacity = 3)
//!
//!   insert(D, _):
//!     1. Evict [C] from tail (pop_lru), slot recycled
//!     2. Attach [D] at head
//!
//!   After:   head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   ════════════════════════════════════════════════════════════
//!
//!   GET existing key
//!   ════════════════════════════════════════════════════════════
//!
//!   get(B):  locate slot via map, detach, attach at head
//!
//!   After:   head ──► [B] ◄──► [A] ◄──► [C] ◄── tail
//!
//!   peek(C) reads without detaching; order unchanged.
//! ```
//!
//! Capacity is validated at construction: [`LruCache::try_new`] rejects zero
//! so a configured cache always has room for at least one entry.

use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;

/// Arena slot in the recency list.
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A fixed-capacity cache evicting the least recently used entry.
///
/// Values are stored directly in an index arena; the hash map resolves keys
/// to arena slots and a doubly-linked list over the same slots tracks
/// recency. All operations are O(1) expected, including eviction.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
///
/// let mut cache = LruCache::try_new(2).unwrap();
///
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// assert_eq!(cache.get(&1), Some(&"one"));
///
/// // Inserting a third key evicts the LRU (key 2, since 1 was just accessed)
/// cache.insert(3, "three");
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V> {
    map: FxHashMap<K, usize>,
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates a cache bounded at `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero. A cache that can hold
    /// nothing is a configuration mistake, not a degenerate mode.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::try_new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    ///
    /// assert!(LruCache::<u64, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("lru capacity must be greater than zero"));
        }

        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        })
    }

    /// Returns the number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the key is cached.
    ///
    /// Does not update recency order.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Gets a reference to a value, marking the key most recently used.
    ///
    /// Returns `None` on a miss; a miss leaves the cache untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(10).unwrap();
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&2), None);
    /// ```
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;

        self.detach(idx);
        self.attach_front(idx);

        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Peeks at a value without updating recency order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already cached.
    ///
    /// An existing key is updated in place and marked most recently used;
    /// updates never evict. A new key arriving with the cache full evicts
    /// the least recently used entry first.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(2).unwrap();
    ///
    /// assert_eq!(cache.insert(1, "a"), None);
    /// assert_eq!(cache.insert(2, "b"), None);
    /// assert_eq!(cache.insert(1, "A"), Some("a")); // update returns old value
    ///
    /// cache.insert(3, "c"); // evicts key 2 (LRU)
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.map.get(&key) {
            let old = mem::replace(&mut self.node_mut(idx).value, value);

            self.detach(idx);
            self.attach_front(idx);

            #[cfg(debug_assertions)]
            self.validate_invariants();

            return Some(old);
        }

        if self.map.len() >= self.capacity {
            self.pop_lru();
        }

        let idx = self.alloc(key, value);
        self.map.insert(key, idx);
        self.attach_front(idx);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        None
    }

    /// Removes a key from the cache, returning its value.
    ///
    /// Removing an absent key is a no-op. This is the point-invalidation
    /// hook the range-sum driver uses to drop stale sums.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(10).unwrap();
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.remove(&1), Some("value"));
    /// assert_eq!(cache.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;

        self.detach(idx);
        let node = self.nodes[idx].take()?;
        self.free.push(idx);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(node.value)
    }

    /// Removes and returns the least recently used entry.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::try_new(10).unwrap();
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    ///
    /// cache.get(&1); // 1 becomes MRU
    ///
    /// assert_eq!(cache.pop_lru(), Some((2, "two")));
    /// ```
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;

        self.detach(idx);
        let node = self.nodes[idx].take()?;
        self.map.remove(&node.key);
        self.free.push(idx);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some((node.key, node.value))
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let idx = self.tail?;
        let node = self.node(idx);
        Some((&node.key, &node.value))
    }

    /// Moves an existing key to most-recently-used without reading its value.
    ///
    /// Returns `true` if the key was present.
    #[inline]
    pub fn touch(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(&idx) => {
                self.detach(idx);
                self.attach_front(idx);
                true
            }
            None => false,
        }
    }

    /// Returns a snapshot of every cached key.
    ///
    /// Order is hash order and carries no meaning. The range-sum driver
    /// scans this snapshot on every point update to find stale entries, so
    /// the snapshot must be independent of concurrent removals: callers
    /// collect first, then remove.
    pub fn keys(&self) -> Vec<K> {
        self.map.keys().copied().collect()
    }

    /// Returns all keys ordered most to least recently used.
    ///
    /// Walks the recency list; O(len). Intended for tests and diagnostics.
    pub fn recency_snapshot(&self) -> Vec<K> {
        let mut ordered = Vec::with_capacity(self.map.len());
        let mut current = self.head;
        while let Some(idx) = current {
            let node = self.node(idx);
            ordered.push(node.key);
            current = node.next;
        }
        ordered
    }

    /// Clears all entries, keeping the configured capacity.
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    // =======================================================================
    // Internal arena and list operations
    // =======================================================================

    #[inline]
    fn node(&self, idx: usize) -> &Node<K, V> {
        self.nodes[idx].as_ref().expect("mapped index names a live slot")
    }

    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.nodes[idx].as_mut().expect("mapped index names a live slot")
    }

    /// Places a new node in a recycled slot if one exists, else grows the
    /// arena.
    #[inline]
    fn alloc(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Unlinks a slot from the recency list.
    #[inline]
    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            let links = (node.prev, node.next);
            node.prev = None;
            node.next = None;
            links
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }

        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links a detached slot at the head (MRU position).
    #[inline]
    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    /// Validates internal invariants.
    ///
    /// Only runs when debug assertions are enabled.
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        debug_assert!(self.map.len() <= self.capacity);

        if self.map.is_empty() {
            debug_assert!(self.head.is_none());
            debug_assert!(self.tail.is_none());
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev: Option<usize> = None;
        while let Some(idx) = current {
            count += 1;
            if count > self.map.len() {
                panic!("cycle detected in recency list");
            }

            let node = self.node(idx);
            debug_assert_eq!(self.map.get(&node.key), Some(&idx));
            debug_assert_eq!(node.prev, prev);

            prev = Some(idx);
            current = node.next;
        }

        debug_assert_eq!(count, self.map.len());
        debug_assert_eq!(self.tail, prev);
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
