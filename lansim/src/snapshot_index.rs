// LanSim: Simulating a LAN with a Router-Style Command Line
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing the configuration snapshot index, implemented as a B-Tree with a fixed
//! minimum degree `t`.
//!
//! Every node stores between `t - 1` and `2t - 1` keys (the root may store fewer), keys within
//! a node are strictly increasing, and all leaves sit at the same depth. Insertion splits full
//! nodes on the way down; removal pre-emptively refills deficient children by borrowing from a
//! sibling or merging with one, so that the recursion never descends into a node at minimum
//! occupancy. The index counts splits and merges for diagnostics.

use std::fmt;
use std::mem;

/// A node of the B-Tree. A node is a leaf if and only if it has no children; internal nodes
/// always hold exactly one child more than keys.
#[derive(Debug, Clone)]
pub(crate) struct IndexNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) children: Vec<Box<IndexNode<K, V>>>,
}

impl<K, V> IndexNode<K, V> {
    pub(crate) fn new() -> Self {
        Self { keys: Vec::new(), values: Vec::new(), children: Vec::new() }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Statistics of a [`SnapshotIndex`], as returned by [`SnapshotIndex::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// The minimum degree of the tree.
    pub t: usize,
    /// Height of the tree. A tree consisting of only the (possibly empty) root has height 1.
    pub height: usize,
    /// Number of nodes, including the root.
    pub nodes: usize,
    /// Number of node splits performed since construction.
    pub splits: u64,
    /// Number of node merges performed since construction.
    pub merges: u64,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order={} height={} nodes={} splits={} merges={}",
            self.t, self.height, self.nodes, self.splits, self.merges
        )
    }
}

/// # Snapshot Index
///
/// B-Tree of fixed minimum degree `t >= 2`, mapping arbitrary ordered keys to values. Used by
/// the network to associate snapshot names with the configuration blobs they point to. Inserting
/// an existing key replaces the stored value in place, without any structural change.
#[derive(Debug, Clone)]
pub struct SnapshotIndex<K, V> {
    pub(crate) root: Box<IndexNode<K, V>>,
    pub(crate) t: usize,
    pub(crate) height: usize,
    pub(crate) nodes: usize,
    pub(crate) splits: u64,
    pub(crate) merges: u64,
}

impl<K: Ord, V> SnapshotIndex<K, V> {
    /// Create a new, empty index with the given minimum degree.
    ///
    /// # Panics
    /// Panics if `t < 2`; a B-Tree with a smaller degree is degenerate.
    pub fn new(t: usize) -> Self {
        assert!(t >= 2, "B-Tree minimum degree must be at least 2");
        Self { root: Box::new(IndexNode::new()), t, height: 1, nodes: 1, splits: 0, merges: 0 }
    }

    /// Returns true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.keys.is_empty() && self.root.children.is_empty()
    }

    /// Insert a key-value association. If the key is already present, the value is replaced in
    /// place and the old value returned; otherwise the key is inserted, splitting any full node
    /// on the way down.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = Self::get_mut_at(&mut self.root, &key) {
            return Some(mem::replace(slot, value));
        }
        let t = self.t;
        if self.root.keys.len() == 2 * t - 1 {
            // the root is full: grow the tree by one level and split the old root
            let old_root = mem::replace(&mut self.root, Box::new(IndexNode::new()));
            self.root.children.push(old_root);
            self.nodes += 1;
            self.height += 1;
            split_child(&mut self.root, 0, t, &mut self.splits, &mut self.nodes);
        }
        insert_nonfull(&mut self.root, t, key, value, &mut self.splits, &mut self.nodes);
        None
    }

    /// Look up the value associated with a key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut node = &*self.root;
        loop {
            match node.keys.binary_search(key) {
                Ok(i) => return Some(&node.values[i]),
                Err(_) if node.is_leaf() => return None,
                Err(i) => node = &node.children[i],
            }
        }
    }

    fn get_mut_at<'a>(node: &'a mut IndexNode<K, V>, key: &K) -> Option<&'a mut V> {
        match node.keys.binary_search(key) {
            Ok(i) => Some(&mut node.values[i]),
            Err(_) if node.is_leaf() => None,
            Err(i) => Self::get_mut_at(&mut node.children[i], key),
        }
    }

    /// Remove a key and return its value, or `None` if the key is absent. Children at minimum
    /// occupancy are refilled before the recursion descends into them, so the occupancy
    /// invariant holds after every call. If the root ends up empty with a single child, that
    /// child becomes the new root and the tree height decreases.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let t = self.t;
        let removed = remove_from(&mut self.root, key, t, &mut self.merges, &mut self.nodes);
        if self.root.keys.is_empty() && !self.root.children.is_empty() {
            // the root lost its last separator during a merge of its children
            self.root = self.root.children.remove(0);
            self.nodes -= 1;
            self.height -= 1;
        }
        removed
    }

    /// Current statistics of the index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            t: self.t,
            height: self.height,
            nodes: self.nodes,
            splits: self.splits,
            merges: self.merges,
        }
    }

    /// Iterate over all `(key, value)` pairs in ascending key order. The iterator is lazy and
    /// can be restarted by calling `iter` again.
    pub fn iter(&self) -> SnapshotIndexIter<'_, K, V> {
        let mut iter = SnapshotIndexIter { stack: Vec::new() };
        iter.push_left(&self.root);
        iter
    }
}

/// Split the full child `parent.children[i]`, promoting its median key to the parent and
/// distributing the remaining keys evenly between the two halves.
fn split_child<K: Ord, V>(
    parent: &mut IndexNode<K, V>,
    i: usize,
    t: usize,
    splits: &mut u64,
    nodes: &mut usize,
) {
    *splits += 1;
    *nodes += 1;
    let child = &mut parent.children[i];
    debug_assert_eq!(child.keys.len(), 2 * t - 1);
    let mut right = Box::new(IndexNode::new());
    right.keys = child.keys.split_off(t);
    right.values = child.values.split_off(t);
    if !child.is_leaf() {
        right.children = child.children.split_off(t);
    }
    let median_key = child.keys.pop().expect("full node without a median key");
    let median_value = child.values.pop().expect("full node without a median value");
    parent.keys.insert(i, median_key);
    parent.values.insert(i, median_value);
    parent.children.insert(i + 1, right);
}

/// Insert into a subtree whose root is known not to be full. The key is known to be absent.
fn insert_nonfull<K: Ord, V>(
    node: &mut IndexNode<K, V>,
    t: usize,
    key: K,
    value: V,
    splits: &mut u64,
    nodes: &mut usize,
) {
    match node.keys.binary_search(&key) {
        Ok(i) => {
            // the caller replaces existing keys before descending; keep this arm total anyway
            node.values[i] = value;
        }
        Err(i) if node.is_leaf() => {
            node.keys.insert(i, key);
            node.values.insert(i, value);
        }
        Err(mut i) => {
            if node.children[i].keys.len() == 2 * t - 1 {
                split_child(node, i, t, splits, nodes);
                if key > node.keys[i] {
                    i += 1;
                }
            }
            insert_nonfull(&mut node.children[i], t, key, value, splits, nodes);
        }
    }
}

/// Remove `key` from the subtree rooted at `node`. Precondition: `node` is the root, or has at
/// least `t` keys.
fn remove_from<K: Ord, V>(
    node: &mut IndexNode<K, V>,
    key: &K,
    t: usize,
    merges: &mut u64,
    nodes: &mut usize,
) -> Option<V> {
    match node.keys.binary_search(key) {
        Ok(i) if node.is_leaf() => {
            node.keys.remove(i);
            Some(node.values.remove(i))
        }
        Ok(i) => {
            // the key sits in an internal node: replace it with its predecessor or successor
            // from a non-deficient child, or merge both children around it
            if node.children[i].keys.len() >= t {
                let (pk, pv) = take_max(&mut node.children[i], t, merges, nodes);
                node.keys[i] = pk;
                Some(mem::replace(&mut node.values[i], pv))
            } else if node.children[i + 1].keys.len() >= t {
                let (sk, sv) = take_min(&mut node.children[i + 1], t, merges, nodes);
                node.keys[i] = sk;
                Some(mem::replace(&mut node.values[i], sv))
            } else {
                merge_children(node, i, merges, nodes);
                remove_from(&mut node.children[i], key, t, merges, nodes)
            }
        }
        Err(_) if node.is_leaf() => None,
        Err(i) => {
            let i = fill_child(node, i, t, merges, nodes);
            remove_from(&mut node.children[i], key, t, merges, nodes)
        }
    }
}

/// Remove and return the largest key of the subtree.
fn take_max<K: Ord, V>(
    node: &mut IndexNode<K, V>,
    t: usize,
    merges: &mut u64,
    nodes: &mut usize,
) -> (K, V) {
    if node.is_leaf() {
        let k = node.keys.pop().expect("take_max on an empty leaf");
        let v = node.values.pop().expect("take_max on an empty leaf");
        (k, v)
    } else {
        let last = node.children.len() - 1;
        let i = fill_child(node, last, t, merges, nodes);
        take_max(&mut node.children[i], t, merges, nodes)
    }
}

/// Remove and return the smallest key of the subtree.
fn take_min<K: Ord, V>(
    node: &mut IndexNode<K, V>,
    t: usize,
    merges: &mut u64,
    nodes: &mut usize,
) -> (K, V) {
    if node.is_leaf() {
        let v = node.values.remove(0);
        let k = node.keys.remove(0);
        (k, v)
    } else {
        let i = fill_child(node, 0, t, merges, nodes);
        take_min(&mut node.children[i], t, merges, nodes)
    }
}

/// Make sure `node.children[i]` has at least `t` keys before descending into it, by borrowing
/// a key through the separator from a sibling, or by merging with a sibling. Returns the index
/// of the (possibly relocated) child to descend into.
fn fill_child<K: Ord, V>(
    node: &mut IndexNode<K, V>,
    i: usize,
    t: usize,
    merges: &mut u64,
    nodes: &mut usize,
) -> usize {
    if node.children[i].keys.len() >= t {
        return i;
    }
    if i > 0 && node.children[i - 1].keys.len() >= t {
        // rotate the separator down and the left sibling's largest key up
        let k = node.children[i - 1].keys.pop().expect("non-deficient sibling without keys");
        let v = node.children[i - 1].values.pop().expect("non-deficient sibling without values");
        let sep_k = mem::replace(&mut node.keys[i - 1], k);
        let sep_v = mem::replace(&mut node.values[i - 1], v);
        node.children[i].keys.insert(0, sep_k);
        node.children[i].values.insert(0, sep_v);
        if !node.children[i - 1].is_leaf() {
            let c = node.children[i - 1].children.pop().expect("internal sibling without children");
            node.children[i].children.insert(0, c);
        }
        i
    } else if i + 1 < node.children.len() && node.children[i + 1].keys.len() >= t {
        // rotate the separator down and the right sibling's smallest key up
        let k = node.children[i + 1].keys.remove(0);
        let v = node.children[i + 1].values.remove(0);
        let sep_k = mem::replace(&mut node.keys[i], k);
        let sep_v = mem::replace(&mut node.values[i], v);
        node.children[i].keys.push(sep_k);
        node.children[i].values.push(sep_v);
        if !node.children[i + 1].is_leaf() {
            let c = node.children[i + 1].children.remove(0);
            node.children[i].children.push(c);
        }
        i
    } else if i > 0 {
        merge_children(node, i - 1, merges, nodes);
        i - 1
    } else {
        merge_children(node, i, merges, nodes);
        i
    }
}

/// Merge `node.children[i]`, the separator key `i`, and `node.children[i + 1]` into a single
/// node at position `i`.
fn merge_children<K: Ord, V>(
    node: &mut IndexNode<K, V>,
    i: usize,
    merges: &mut u64,
    nodes: &mut usize,
) {
    *merges += 1;
    *nodes -= 1;
    let mut right = node.children.remove(i + 1);
    let sep_k = node.keys.remove(i);
    let sep_v = node.values.remove(i);
    let left = &mut node.children[i];
    left.keys.push(sep_k);
    left.values.push(sep_v);
    left.keys.append(&mut right.keys);
    left.values.append(&mut right.values);
    left.children.append(&mut right.children);
}

/// Lazy inorder iterator over a [`SnapshotIndex`], yielding `(key, value)` pairs in ascending
/// key order.
#[derive(Debug)]
pub struct SnapshotIndexIter<'a, K, V> {
    stack: Vec<(&'a IndexNode<K, V>, usize)>,
}

impl<'a, K, V> SnapshotIndexIter<'a, K, V> {
    fn push_left(&mut self, mut node: &'a IndexNode<K, V>) {
        loop {
            self.stack.push((node, 0));
            if node.is_leaf() {
                break;
            }
            node = &node.children[0];
        }
    }
}

impl<'a, K, V> Iterator for SnapshotIndexIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, i) = {
                let top = self.stack.last_mut()?;
                if top.1 >= top.0.keys.len() {
                    self.stack.pop();
                    continue;
                }
                top.1 += 1;
                (top.0, top.1 - 1)
            };
            if !node.is_leaf() {
                self.push_left(&node.children[i + 1]);
            }
            return Some((&node.keys[i], &node.values[i]));
        }
    }
}
