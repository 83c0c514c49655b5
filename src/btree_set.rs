use core::borrow::Borrow;
use core::fmt;

use alloc::vec::Vec;

use crate::raw::{Handle, RawMinDegBTreeSet};

/// An ordered set based on a B-tree with minimum degree `T`.
///
/// Every node holds between `T` and `2 * T` keys; the root is exempt from the
/// lower bound. Small degrees give narrow, tall trees (`T = 1` is a 2-3
/// tree), large degrees give wide, shallow ones. `T` must be at least 1;
/// a zero degree is rejected at compile time.
///
/// Keys must form a total order via [`Ord`]. It is a logic error for a key to
/// be modified in such a way that its ordering relative to any other key
/// changes while it is in the set. No key is ever silently duplicated:
/// cloning only happens in the explicitly copying entry points
/// ([`insert_copy`](Self::insert_copy) and [`Clone`]).
///
/// This type offers no interior synchronisation; share it between threads the
/// way you would share any `&mut`-mutated value (for example behind a mutex).
///
/// # Examples
///
/// ```
/// use mindeg_tree::MinDegBTreeSet;
///
/// let mut books: MinDegBTreeSet<&str, 2> = MinDegBTreeSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
///
/// assert!(books.contains(&"The Odyssey"));
/// assert!(!books.insert("The Odyssey"));
///
/// books.remove(&"The Odyssey");
/// assert_eq!(books.len(), 2);
/// ```
pub struct MinDegBTreeSet<K, const T: usize> {
    raw: RawMinDegBTreeSet<K, T>,
}

/// A read-only view of one tree node, handed out by
/// [`MinDegBTreeSet::find`] and [`MinDegBTreeSet::root`].
///
/// Only inspection is possible through this view; the tree cannot be mutated
/// while one is live.
pub struct NodeRef<'a, K, const T: usize> {
    raw: &'a RawMinDegBTreeSet<K, T>,
    handle: Handle,
}

impl<K, const T: usize> MinDegBTreeSet<K, T> {
    /// The minimum degree `T`.
    pub const MIN_DEGREE: usize = T;
    /// Most keys a node may hold: `2 * T`.
    pub const MAX_KEYS: usize = 2 * T;
    /// Most children a node may hold: `2 * T + 1`.
    pub const MAX_CHILDREN: usize = 2 * T + 1;
    /// Fewest keys a non-root node may hold: `T`.
    pub const MIN_KEYS: usize = T;

    /// Creates a new, empty set.
    ///
    /// Usable in `const` and `static` contexts; no allocation happens until
    /// the first insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindeg_tree::MinDegBTreeSet;
    ///
    /// static EMPTY: MinDegBTreeSet<i32, 4> = MinDegBTreeSet::new();
    /// assert!(EMPTY.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawMinDegBTreeSet::new(),
        }
    }

    /// Returns the number of keys in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the set contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes all keys from the set.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a read-only view of the root node, or `None` if the set is
    /// empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, T>> {
        self.raw.root().map(|handle| NodeRef {
            raw: &self.raw,
            handle,
        })
    }
}

impl<K: Ord, const T: usize> MinDegBTreeSet<K, T> {
    /// Returns true if the set contains a key equal to the query.
    ///
    /// The query may be any borrowed form of the key type, as long as the
    /// orderings agree.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindeg_tree::MinDegBTreeSet;
    ///
    /// let set: MinDegBTreeSet<i32, 2> = [1, 2, 3].into_iter().collect();
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Returns a reference to the stored key equal to the query, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Locates a key, returning a read-only view of the node holding it and
    /// the key's slot within that node.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindeg_tree::MinDegBTreeSet;
    ///
    /// let set: MinDegBTreeSet<i32, 2> = [10, 20, 30].into_iter().collect();
    ///
    /// let (node, slot) = set.find(&20).unwrap();
    /// assert_eq!(node.key(slot), &20);
    /// assert!(set.find(&99).is_none());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<(NodeRef<'_, K, T>, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (handle, slot) = self.raw.search(key)?;
        Some((
            NodeRef {
                raw: &self.raw,
                handle,
            },
            slot,
        ))
    }

    /// Adds a key to the set, taking ownership of it.
    ///
    /// Returns `true` if the key was inserted, `false` if an equal key was
    /// already present (the set is left unchanged and the rejected duplicate
    /// is dropped). Use [`try_insert`](Self::try_insert) to get a rejected
    /// key handed back instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindeg_tree::MinDegBTreeSet;
    ///
    /// let mut set: MinDegBTreeSet<i32, 2> = MinDegBTreeSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert(key).is_ok()
    }

    /// Adds a key to the set, handing it back if an equal key was already
    /// present.
    ///
    /// The duplicate is detected before the key is stored anywhere, so the
    /// key returned in the `Err` case is exactly the caller's value,
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindeg_tree::MinDegBTreeSet;
    ///
    /// let mut set: MinDegBTreeSet<String, 4> = MinDegBTreeSet::new();
    ///
    /// assert!(set.try_insert("first".to_owned()).is_ok());
    /// let rejected = set.try_insert("first".to_owned()).unwrap_err();
    /// assert_eq!(rejected, "first");
    /// ```
    pub fn try_insert(&mut self, key: K) -> Result<(), K> {
        self.raw.insert(key)
    }

    /// Adds a copy of a borrowed key to the set, leaving the caller's key
    /// intact. Behaves like `insert` of a clone of `key`.
    pub fn insert_copy(&mut self, key: &K) -> bool
    where
        K: Clone,
    {
        self.raw.insert(key.clone()).is_ok()
    }

    /// Removes a key from the set. Returns `true` if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindeg_tree::MinDegBTreeSet;
    ///
    /// let mut set: MinDegBTreeSet<i32, 2> = [1, 2].into_iter().collect();
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).is_some()
    }

    /// Removes a key from the set, returning the stored key by move.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }
}

impl<K, const T: usize> Default for MinDegBTreeSet<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, const T: usize> Clone for MinDegBTreeSet<K, T> {
    /// Deep clone. Every node is duplicated and no ownership is shared with
    /// the original; this is an expensive operation, proportional to the size
    /// of the set.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: fmt::Debug, const T: usize> fmt::Debug for MinDegBTreeSet<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::with_capacity(self.len());
        self.raw.in_order(&mut |key: &K| keys.push(key));
        f.debug_set().entries(keys).finish()
    }
}

impl<K: PartialEq, const T: usize> PartialEq for MinDegBTreeSet<K, T> {
    /// Two sets are equal iff their ascending key sequences are equal.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut left = Vec::with_capacity(self.len());
        self.raw.in_order(&mut |key: &K| left.push(key));
        let mut right = Vec::with_capacity(other.len());
        other.raw.in_order(&mut |key: &K| right.push(key));
        left == right
    }
}

impl<K: Eq, const T: usize> Eq for MinDegBTreeSet<K, T> {}

impl<K: Ord, const T: usize> Extend<K> for MinDegBTreeSet<K, T> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, const T: usize> FromIterator<K> for MinDegBTreeSet<K, T> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, K, const T: usize> NodeRef<'a, K, T> {
    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.raw.node(self.handle).is_leaf()
    }

    /// Returns the number of keys in this node.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.raw.node(self.handle).key_count()
    }

    /// Returns the number of children of this node (zero for a leaf).
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.raw.node(self.handle).child_count()
    }

    /// Returns the key at the given slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.key_count()`.
    #[must_use]
    pub fn key(&self, index: usize) -> &'a K {
        self.raw.node(self.handle).key(index)
    }

    /// Returns this node's keys, in ascending order.
    #[must_use]
    pub fn keys(&self) -> &'a [K] {
        self.raw.node(self.handle).keys()
    }

    /// Returns a view of the child at the given slot, or `None` if out of
    /// range. Children interleave with keys: child `i` holds the subtree
    /// strictly below key `i`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeRef<'a, K, T>> {
        let node = self.raw.node(self.handle);
        if index < node.child_count() {
            Some(NodeRef {
                raw: self.raw,
                handle: node.child(index),
            })
        } else {
            None
        }
    }
}

impl<K, const T: usize> Clone for NodeRef<'_, K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, const T: usize> Copy for NodeRef<'_, K, T> {}

impl<K: fmt::Debug, const T: usize> fmt::Debug for NodeRef<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("keys", &self.raw.node(self.handle).keys())
            .field("children", &self.raw.node(self.handle).child_count())
            .finish()
    }
}
