use core::borrow::Borrow;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, SearchResult};

/// The core B-tree engine backing `MinDegBTreeSet`.
///
/// All structural mutation happens here. Mutating operations descend from the
/// root recording a [`Path`] of `(node, child slot)` frames; splits and
/// rebalances walk that recorded path back up instead of chasing parent
/// pointers, so a child's position is only ever known to the descent that
/// computed it.
pub(crate) struct RawMinDegBTreeSet<K, const T: usize> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, T>>,
    /// Handle to the root node, if the set is non-empty.
    root: Option<Handle>,
    /// Total number of keys in the set.
    len: usize,
}

/// One frame of a descent: the node we passed through and the child slot we
/// took out of it.
struct PathFrame {
    node: Handle,
    child_index: usize,
}

/// A root-to-node descent record (stack of frames, deepest last).
type Path = SmallVec<[PathFrame; 16]>;

impl<K, const T: usize> RawMinDegBTreeSet<K, T> {
    /// Creates a new, empty set.
    pub(crate) const fn new() -> Self {
        // Instantiating the tree forces the compile-time degree bounds check.
        let _ = Node::<K, T>::DEGREE_OK;
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of keys in the set.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set contains no keys.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all keys from the set.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the root handle, if the set is non-empty.
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, T> {
        self.nodes.get(handle)
    }

    /// Visits every key in ascending order.
    pub(crate) fn in_order<'a, F: FnMut(&'a K)>(&'a self, f: &mut F) {
        fn visit<'a, K, const T: usize, F: FnMut(&'a K)>(nodes: &'a Arena<Node<K, T>>, handle: Handle, f: &mut F) {
            let node = nodes.get(handle);
            if node.is_leaf() {
                for key in node.keys() {
                    f(key);
                }
                return;
            }
            for index in 0..node.key_count() {
                visit(nodes, node.child(index), f);
                f(node.key(index));
            }
            visit(nodes, node.child(node.key_count()), f);
        }

        if let Some(root) = self.root {
            visit(&self.nodes, root, f);
        }
    }
}

impl<K: Ord, const T: usize> RawMinDegBTreeSet<K, T> {
    /// Searches for a key, returning the holding node and key slot if found.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;

        loop {
            let node = self.nodes.get(current);
            match node.search(key) {
                SearchResult::Found(index) => return Some((current, index)),
                SearchResult::NotFound(child_index) => {
                    if node.is_leaf() {
                        return None;
                    }
                    current = node.child(child_index);
                }
            }
        }
    }

    /// Returns a reference to the stored key equal to the query, if any.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (handle, index) = self.search(key)?;
        Some(self.nodes.get(handle).key(index))
    }

    /// Inserts a key. On a duplicate the key is handed back untouched; the
    /// duplicate is detected during descent, before the key is stored
    /// anywhere, so the rejection path never clones or drops it.
    pub(crate) fn insert(&mut self, key: K) -> Result<(), K> {
        let Some(root) = self.root else {
            let mut leaf = Node::new();
            leaf.push_key(key);
            self.root = Some(self.nodes.alloc(leaf));
            self.len = 1;
            return Ok(());
        };

        // Descend to the leaf that would hold the key, recording the path.
        let mut path = Path::new();
        let mut current = root;
        let index = loop {
            let node = self.nodes.get(current);
            match node.search(&key) {
                SearchResult::Found(_) => return Err(key),
                SearchResult::NotFound(index) => {
                    if node.is_leaf() {
                        break index;
                    }
                    path.push(PathFrame {
                        node: current,
                        child_index: index,
                    });
                    current = node.child(index);
                }
            }
        };

        self.nodes.get_mut(current).insert_key(index, key);
        self.len += 1;

        if self.nodes.get(current).is_overfull() {
            self.split_upward(current, &mut path);
        }
        Ok(())
    }

    /// Splits an overfull node and installs the median in its parent,
    /// continuing upward while parents overflow. Exhausting the path means
    /// the root itself split, which grows the tree by one level.
    fn split_upward(&mut self, mut node: Handle, path: &mut Path) {
        loop {
            let (median, right) = self.nodes.get_mut(node).split();
            let right_handle = self.nodes.alloc(right);

            match path.pop() {
                Some(frame) => {
                    let parent = self.nodes.get_mut(frame.node);
                    parent.insert_key(frame.child_index, median);
                    parent.insert_child(frame.child_index + 1, right_handle);
                    if !parent.is_overfull() {
                        return;
                    }
                    node = frame.node;
                }
                None => {
                    let mut new_root = Node::new();
                    new_root.push_key(median);
                    new_root.push_child(node);
                    new_root.push_child(right_handle);
                    self.root = Some(self.nodes.alloc(new_root));
                    return;
                }
            }
        }
    }

    /// Removes a key, returning it by move, or `None` if absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root?;

        let mut path = Path::new();
        let mut current = root;
        loop {
            let node = self.nodes.get(current);
            match node.search(key) {
                SearchResult::Found(index) => {
                    let removed = if node.is_leaf() {
                        self.remove_from_leaf(current, index, &mut path)
                    } else {
                        self.remove_from_internal(current, index, &mut path)
                    };
                    return Some(removed);
                }
                SearchResult::NotFound(child_index) => {
                    if node.is_leaf() {
                        return None;
                    }
                    path.push(PathFrame {
                        node: current,
                        child_index,
                    });
                    current = node.child(child_index);
                }
            }
        }
    }

    fn remove_from_leaf(&mut self, leaf: Handle, index: usize, path: &mut Path) -> K {
        let removed = self.nodes.get_mut(leaf).remove_key(index);
        self.len -= 1;

        if self.len == 0 {
            // The root leaf emptied out.
            self.clear();
        } else if !path.is_empty() && self.nodes.get(leaf).is_deficient() {
            self.rebalance(leaf, path);
        }
        removed
    }

    /// Removes the key at `index` of an internal node by successor
    /// replacement: the smallest key of the right subtree is pulled out of
    /// its leaf and swapped into the vacated slot.
    fn remove_from_internal(&mut self, node: Handle, index: usize, path: &mut Path) -> K {
        path.push(PathFrame {
            node,
            child_index: index + 1,
        });
        let mut leaf = self.nodes.get(node).child(index + 1);
        loop {
            let current = self.nodes.get(leaf);
            if current.is_leaf() {
                break;
            }
            let next = current.child(0);
            path.push(PathFrame {
                node: leaf,
                child_index: 0,
            });
            leaf = next;
        }

        let successor = self.nodes.get_mut(leaf).remove_key(0);
        let removed = self.nodes.get_mut(node).replace_key(index, successor);
        self.len -= 1;

        if self.nodes.get(leaf).is_deficient() {
            self.rebalance(leaf, path);
        }
        removed
    }

    /// Restores the minimum-key invariant on a deficient non-root node: try
    /// borrowing from the left sibling, then the right, else merge two
    /// siblings around one parent separator. Only a merge can make the parent
    /// deficient in turn, so only merges walk the path upward.
    fn rebalance(&mut self, mut node: Handle, path: &mut Path) {
        loop {
            let frame = path.pop().expect("`rebalance()` - deficient node has no parent frame!");
            let parent = frame.node;
            let child_index = frame.child_index;

            let (left, right) = {
                let parent = self.nodes.get(parent);
                let left = (child_index > 0).then(|| parent.child(child_index - 1));
                let right = (child_index + 1 < parent.child_count()).then(|| parent.child(child_index + 1));
                (left, right)
            };

            if let Some(left) = left {
                if self.nodes.get(left).can_lend() {
                    self.borrow_from_left(node, left, parent, child_index);
                    return;
                }
            }
            if let Some(right) = right {
                if self.nodes.get(right).can_lend() {
                    self.borrow_from_right(node, right, parent, child_index);
                    return;
                }
            }

            // Merge around one separator: the left sibling absorbs this node
            // when one exists, otherwise this node absorbs its right sibling.
            let (merged, separator_index) = match left {
                Some(left) => (left, child_index - 1),
                None => (node, child_index),
            };
            self.merge_with_right_sibling(merged, parent, separator_index);

            if path.is_empty() {
                // The parent is the root; if the merge drained its last key,
                // the merged node becomes the new root and the tree shrinks
                // by one level.
                if self.nodes.get(parent).key_count() == 0 {
                    self.nodes.free(parent);
                    self.root = Some(merged);
                }
                return;
            }
            if !self.nodes.get(parent).is_deficient() {
                return;
            }
            node = parent;
        }
    }

    /// Moves the greatest key of the left sibling up into the parent and the
    /// old separator down to the front of this node; an internal left sibling
    /// also hands over its last child.
    fn borrow_from_left(&mut self, node: Handle, left: Handle, parent: Handle, child_index: usize) {
        let left = self.nodes.get_mut(left);
        let lent_key = left.pop_key();
        let lent_child = if left.is_leaf() { None } else { Some(left.pop_child()) };

        let separator = self.nodes.get_mut(parent).replace_key(child_index - 1, lent_key);

        let node = self.nodes.get_mut(node);
        node.insert_key(0, separator);
        if let Some(child) = lent_child {
            node.insert_child(0, child);
        }
    }

    /// Mirror image of [`Self::borrow_from_left`]: the smallest key of the
    /// right sibling replaces the separator, which is appended to this node.
    fn borrow_from_right(&mut self, node: Handle, right: Handle, parent: Handle, child_index: usize) {
        let right = self.nodes.get_mut(right);
        let lent_key = right.remove_key(0);
        let lent_child = if right.is_leaf() { None } else { Some(right.remove_child(0)) };

        let separator = self.nodes.get_mut(parent).replace_key(child_index, lent_key);

        let node = self.nodes.get_mut(node);
        node.push_key(separator);
        if let Some(child) = lent_child {
            node.push_child(child);
        }
    }

    /// Pulls the separator at `separator_index` out of the parent and merges
    /// the two children around it into the left one, freeing the right.
    fn merge_with_right_sibling(&mut self, merged: Handle, parent: Handle, separator_index: usize) {
        let parent = self.nodes.get_mut(parent);
        let separator = parent.remove_key(separator_index);
        let right_handle = parent.remove_child(separator_index + 1);

        let right = self.nodes.take(right_handle);
        self.nodes.get_mut(merged).merge_with_right(separator, right);
    }
}

impl<K: Clone, const T: usize> Clone for RawMinDegBTreeSet<K, T> {
    /// Deep clone: every node is duplicated into a fresh arena; nothing is
    /// shared with the original.
    fn clone(&self) -> Self {
        fn clone_subtree<K: Clone, const T: usize>(
            src: &Arena<Node<K, T>>,
            dst: &mut Arena<Node<K, T>>,
            handle: Handle,
        ) -> Handle {
            let node = src.get(handle);
            let mut copy = node.clone_keys();
            for index in 0..node.child_count() {
                let child = clone_subtree(src, dst, node.child(index));
                copy.push_child(child);
            }
            dst.alloc(copy)
        }

        let mut nodes = Arena::new();
        let root = self.root.map(|root| clone_subtree(&self.nodes, &mut nodes, root));
        Self {
            nodes,
            root,
            len: self.len,
        }
    }
}
