//! # Splay Tree
//!
//! An ordered map that restructures itself on every access, moving the
//! probed key to the root so repeated lookups of recent keys stay cheap.
//! Used as the ordered backend for memo tables (see [`crate::memo`]).
//!
//! ## Ownership
//!
//! Every node exclusively owns its children (`Box`), and the tree owns the
//! root. Rotations transfer ownership of subtrees between links; keys and
//! values never move between nodes.
//!
//! ## Splay steps
//!
//! Splaying recurses along the search path, then rewires two levels per
//! step on the way back up (`x` is the node being lifted):
//!
//! ```text
//!   Zig-zig (left-left)                    Zig-zag (left-right)
//!
//!         g                x                     g                 x
//!        / \              / \                   / \               / \
//!       p   D            A   p                 p   D             p   g
//!      / \        ──►       / \               / \       ──►     /|   |\
//!     x   C                B   g             A   x             A B₁ B₂ D
//!    / \                      / \               / \
//!   A   B                    C   D             B₁  B₂
//! ```
//!
//! A lone zig (target is a direct child) is a single rotation. When the key
//! is absent the last node on the search path (its in-order predecessor or
//! successor) is splayed instead, so misses still improve locality.
//!
//! ## Insert
//!
//! [`SplayTree::insert`] splays first. If the key surfaces it is updated in
//! place; otherwise the old root is split and a fresh node takes the root:
//!
//! ```text
//!   insert(x), x < k:          k                  x
//!                             / \                / \
//!                            L   R     ──►      L   k
//!                                                    \
//!                                                     R
//! ```
//!
//! There is no delete; memo tables only grow until cleared.

use std::cmp::Ordering;
use std::fmt;

use crate::traits::MemoTable;

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// A self-adjusting binary search tree.
///
/// Lookups and inserts splay the touched key to the root, biasing the tree
/// toward recently used keys. In-order traversal always yields keys in
/// sorted order.
///
/// # Example
///
/// ```
/// use memokit::ds::splay::SplayTree;
///
/// let mut tree = SplayTree::new();
/// tree.insert(3, "three");
/// tree.insert(1, "one");
/// tree.insert(2, "two");
///
/// assert_eq!(tree.get(&1), Some(&"one"));
/// assert_eq!(tree.root_key(), Some(&1)); // the access moved 1 to the root
///
/// let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, vec![1, 2, 3]);
/// ```
pub struct SplayTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> SplayTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the key currently at the root.
    ///
    /// After a successful `get` or any `insert`, this is the key that was
    /// accessed; after a miss it is the probe's in-order neighbor.
    #[inline]
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_deref().map(|node| &node.key)
    }

    /// Visits entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            stack: Vec::new(),
            current: self.root.as_deref(),
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        // Worklist teardown; a spine-shaped tree would otherwise drop
        // recursively, one stack frame per node.
        let mut pending = Vec::new();
        pending.extend(self.root.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl<K, V> SplayTree<K, V>
where
    K: Ord,
{
    /// Looks up `key`, splaying it to the root on a hit.
    ///
    /// On a miss the last node of the search path becomes the root and
    /// `None` is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::ds::splay::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(10, "ten");
    /// tree.insert(20, "twenty");
    ///
    /// assert_eq!(tree.get(&10), Some(&"ten"));
    /// assert_eq!(tree.get(&15), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.root = splay(self.root.take(), key);
        match self.root.as_deref() {
            Some(node) if node.key == *key => Some(&node.value),
            _ => None,
        }
    }

    /// Returns `true` if `key` is present, without restructuring.
    ///
    /// A plain descending probe: useful when splaying is undesirable, e.g.
    /// asserting on tree state mid-test.
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        false
    }

    /// Inserts `key -> value`, leaving `key` at the root.
    ///
    /// Splays first: an existing key is updated in place; a new key becomes
    /// the root, splitting the old root's subtrees around it.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::ds::splay::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// tree.insert(5, 50);
    /// tree.insert(5, 55); // update, not a second entry
    ///
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&5), Some(&55));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let root = splay(self.root.take(), &key);
        let mut root = match root {
            Some(root) => root,
            None => {
                self.root = Some(Box::new(Node::new(key, value)));
                self.len += 1;
                return;
            }
        };

        match key.cmp(&root.key) {
            Ordering::Equal => {
                root.value = value;
                self.root = Some(root);
            }
            Ordering::Less => {
                let mut node = Box::new(Node::new(key, value));
                node.left = root.left.take();
                node.right = Some(root);
                self.root = Some(node);
                self.len += 1;
            }
            Ordering::Greater => {
                let mut node = Box::new(Node::new(key, value));
                node.right = root.right.take();
                node.left = Some(root);
                self.root = Some(node);
                self.len += 1;
            }
        }
    }
}

/// Splays `key` toward the root of `link`.
///
/// Recursion depth is bounded by the height of the search path. Each level
/// performs at most two rotations; the trailing rotation is a no-op when
/// the relevant child is already gone.
fn splay<K: Ord, V>(link: Link<K, V>, key: &K) -> Link<K, V> {
    let mut root = link?;

    match key.cmp(&root.key) {
        Ordering::Equal => Some(root),
        Ordering::Less => {
            let mut left = match root.left.take() {
                Some(left) => left,
                None => return Some(root),
            };

            match key.cmp(&left.key) {
                Ordering::Less => {
                    // zig-zig: lift out of the grandchild, rotate the
                    // grandparent before the trailing parent rotation
                    left.left = splay(left.left.take(), key);
                    root.left = Some(left);
                    root = rotate_right(root);
                }
                Ordering::Greater => {
                    // zig-zag: rotate the child up only if the target
                    // surfaced from the inner grandchild
                    left.right = splay(left.right.take(), key);
                    if left.right.is_some() {
                        left = rotate_left(left);
                    }
                    root.left = Some(left);
                }
                Ordering::Equal => {
                    root.left = Some(left);
                }
            }

            Some(rotate_right(root))
        }
        Ordering::Greater => {
            let mut right = match root.right.take() {
                Some(right) => right,
                None => return Some(root),
            };

            match key.cmp(&right.key) {
                Ordering::Greater => {
                    right.right = splay(right.right.take(), key);
                    root.right = Some(right);
                    root = rotate_left(root);
                }
                Ordering::Less => {
                    right.left = splay(right.left.take(), key);
                    if right.left.is_some() {
                        right = rotate_right(right);
                    }
                    root.right = Some(right);
                }
                Ordering::Equal => {
                    root.right = Some(right);
                }
            }

            Some(rotate_left(root))
        }
    }
}

/// Rotates the left child above `root`; no-op without a left child.
fn rotate_right<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match root.left.take() {
        Some(mut pivot) => {
            root.left = pivot.right.take();
            pivot.right = Some(root);
            pivot
        }
        None => root,
    }
}

/// Rotates the right child above `root`; no-op without a right child.
fn rotate_left<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match root.right.take() {
        Some(mut pivot) => {
            root.right = pivot.left.take();
            pivot.left = Some(root);
            pivot
        }
        None => root,
    }
}

/// In-order iterator over a [`SplayTree`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    current: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }
        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        Some((&node.key, &node.value))
    }
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for SplayTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayTree").field("len", &self.len).finish()
    }
}

impl<K, V> Drop for SplayTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> MemoTable<K, V> for SplayTree<K, V>
where
    K: Ord,
{
    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn store(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn len(&self) -> usize {
        self.len
    }
}
