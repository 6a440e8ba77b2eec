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

//! Module containing the routing table of a router, implemented as a height-balanced (AVL)
//! binary search tree.
//!
//! Entries are keyed by `(prefix, metric)`, where the prefix is compared lexicographically as a
//! string. Two entries with the same prefix but different metrics are distinct nodes. The tree
//! rebalances itself after every insertion and removal using the four rotation cases (LL, LR,
//! RL and RR), and keeps a cumulative counter for each case.
//!
//! The lexicographic key ordering is independent of the numeric route lookup:
//! [`RouteTable::lookup_best_route`] performs a true longest-prefix match by numeric
//! containment over all stored entries.

use crate::addr::{parse_addr, AddrError, Prefix};

use std::cmp::Ordering;
use std::fmt;

/// A single entry of the routing table. The identity of an entry is the pair
/// `(prefix, metric)`; the mask length and next hop are payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    prefix: String,
    mask_len: u8,
    next_hop: String,
    metric: u32,
    /// Numeric form of `(prefix, mask_len)`, cached for containment tests.
    network: Prefix,
}

impl RouteEntry {
    /// Create a new route entry. The prefix and the next hop must be valid dotted-quad
    /// addresses, and the mask length must be in `0..=32`.
    pub fn new(prefix: &str, mask_len: u8, next_hop: &str, metric: u32) -> Result<Self, AddrError> {
        if mask_len > 32 {
            return Err(AddrError::InvalidPrefixLength(mask_len as u32));
        }
        let addr = parse_addr(prefix)?;
        parse_addr(next_hop)?;
        Ok(Self {
            prefix: prefix.to_string(),
            mask_len,
            next_hop: next_hop.to_string(),
            metric,
            network: Prefix::from_parts(addr, mask_len),
        })
    }

    /// The destination prefix, as entered.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The prefix length in bits.
    pub fn mask_len(&self) -> u8 {
        self.mask_len
    }

    /// The next-hop address.
    pub fn next_hop(&self) -> &str {
        &self.next_hop
    }

    /// The route metric. Lower is preferred.
    pub fn metric(&self) -> u32 {
        self.metric
    }

    /// The network described by this entry, in numeric form.
    pub fn network(&self) -> Prefix {
        self.network
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        (self.prefix.as_str(), self.metric).cmp(&(other.prefix.as_str(), other.metric))
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} via {} metric {}", self.prefix, self.mask_len, self.next_hop, self.metric)
    }
}

/// A node of the AVL tree, owning its two subtrees.
#[derive(Debug, Clone)]
pub(crate) struct RouteNode {
    pub(crate) entry: RouteEntry,
    pub(crate) left: Option<Box<RouteNode>>,
    pub(crate) right: Option<Box<RouteNode>>,
    pub(crate) height: u32,
    pub(crate) balance: i32,
}

impl RouteNode {
    pub(crate) fn new(entry: RouteEntry) -> Self {
        Self { entry, left: None, right: None, height: 1, balance: 0 }
    }

    /// Recompute the cached height and balance factor from the children.
    fn update(&mut self) {
        let hl = height(&self.left);
        let hr = height(&self.right);
        self.height = 1 + hl.max(hr);
        self.balance = hl as i32 - hr as i32;
    }

    /// Single right rotation. The left child becomes the new subtree root.
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut pivot = self.left.take().expect("right rotation without a left child");
        self.left = pivot.right.take();
        self.update();
        pivot.right = Some(self);
        pivot.update();
        pivot
    }

    /// Single left rotation. The right child becomes the new subtree root.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut pivot = self.right.take().expect("left rotation without a right child");
        self.right = pivot.left.take();
        self.update();
        pivot.left = Some(self);
        pivot.update();
        pivot
    }
}

fn height(node: &Option<Box<RouteNode>>) -> u32 {
    node.as_ref().map(|n| n.height).unwrap_or(0)
}

/// Statistics of a [`RouteTable`], as returned by [`RouteTable::stats`]. The rotation counters
/// are cumulative since construction and are never reset automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteTableStats {
    /// Number of entries stored in the tree.
    pub nodes: usize,
    /// Height of the tree (0 for an empty tree).
    pub height: u32,
    /// Number of Left-Left rotations performed.
    pub ll: u64,
    /// Number of Left-Right rotations performed.
    pub lr: u64,
    /// Number of Right-Left rotations performed.
    pub rl: u64,
    /// Number of Right-Right rotations performed.
    pub rr: u64,
}

impl fmt::Display for RouteTableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} height={} rotations: LL={} LR={} RL={} RR={}",
            self.nodes, self.height, self.ll, self.lr, self.rl, self.rr
        )
    }
}

/// # Routing Table
///
/// Height-balanced binary search tree over [`RouteEntry`], keyed by `(prefix, metric)`.
/// Ownership of the nodes is strictly hierarchical: every mutating operation takes the affected
/// subtree by value and returns the (possibly new) subtree root, and the call site replaces its
/// child slot with the returned node.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    pub(crate) root: Option<Box<RouteNode>>,
    pub(crate) nodes: usize,
    pub(crate) rot_ll: u64,
    pub(crate) rot_lr: u64,
    pub(crate) rot_rl: u64,
    pub(crate) rot_rr: u64,
}

impl RouteTable {
    /// Create a new, empty routing table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.nodes
    }

    /// Returns true if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }

    /// Insert a route entry. If an entry with the same `(prefix, metric)` already exists, the
    /// call is a no-op. Every ancestor of the new leaf is rebalanced bottom-up.
    pub fn insert(&mut self, entry: RouteEntry) {
        let root = self.root.take();
        self.root = Some(self.insert_at(root, entry));
    }

    fn insert_at(&mut self, node: Option<Box<RouteNode>>, entry: RouteEntry) -> Box<RouteNode> {
        let mut node = match node {
            Some(node) => node,
            None => {
                self.nodes += 1;
                return Box::new(RouteNode::new(entry));
            }
        };
        match entry.cmp_key(&node.entry) {
            Ordering::Less => {
                let left = node.left.take();
                node.left = Some(self.insert_at(left, entry));
            }
            Ordering::Greater => {
                let right = node.right.take();
                node.right = Some(self.insert_at(right, entry));
            }
            // exact (prefix, metric) duplicate: idempotent no-op
            Ordering::Equal => return node,
        }
        self.rebalance(node)
    }

    /// Remove the entry with the given prefix. The search descends by prefix only; if the first
    /// node found with this prefix stores a different mask length, nothing is removed. Returns
    /// true if an entry was removed.
    pub fn remove(&mut self, prefix: &str, mask_len: u8) -> bool {
        let before = self.nodes;
        let root = self.root.take();
        self.root = self.remove_at(root, prefix, mask_len);
        self.nodes < before
    }

    fn remove_at(
        &mut self,
        node: Option<Box<RouteNode>>,
        prefix: &str,
        mask_len: u8,
    ) -> Option<Box<RouteNode>> {
        let mut node = node?;
        match prefix.cmp(node.entry.prefix.as_str()) {
            Ordering::Less => {
                let left = node.left.take();
                node.left = self.remove_at(left, prefix, mask_len);
            }
            Ordering::Greater => {
                let right = node.right.take();
                node.right = self.remove_at(right, prefix, mask_len);
            }
            Ordering::Equal => {
                if node.entry.mask_len != mask_len {
                    // same prefix but a different mask: not the entry we were asked to remove
                    return Some(node);
                }
                match (node.left.take(), node.right.take()) {
                    (None, child) | (child, None) => {
                        self.nodes -= 1;
                        return child;
                    }
                    (Some(left), Some(right)) => {
                        // two children: detach the inorder successor node from the right
                        // subtree and take over its entry. Detaching by position (leftmost
                        // node) is unambiguous even when several entries share a prefix.
                        self.nodes -= 1;
                        let (right, successor) = self.take_min(right);
                        node.left = Some(left);
                        node.right = right;
                        node.entry = successor;
                    }
                }
            }
        }
        Some(self.rebalance(node))
    }

    /// Detach the leftmost node of a subtree. Returns the rebalanced remainder of the subtree
    /// and the detached entry.
    fn take_min(&mut self, mut node: Box<RouteNode>) -> (Option<Box<RouteNode>>, RouteEntry) {
        match node.left.take() {
            Some(left) => {
                let (left, entry) = self.take_min(left);
                node.left = left;
                (Some(self.rebalance(node)), entry)
            }
            None => (node.right.take(), node.entry),
        }
    }

    /// Rebalance a subtree root after a structural change. Applies one of the four rotation
    /// cases if the balance factor left the interval `{-1, 0, 1}`, and updates the
    /// corresponding counter.
    fn rebalance(&mut self, mut node: Box<RouteNode>) -> Box<RouteNode> {
        node.update();
        if node.balance > 1 {
            let left_balance =
                node.left.as_ref().map(|n| n.balance).expect("left-heavy node without left child");
            if left_balance >= 0 {
                self.rot_ll += 1;
                return node.rotate_right();
            } else {
                self.rot_lr += 1;
                let left = node.left.take().expect("left-heavy node without left child");
                node.left = Some(left.rotate_left());
                return node.rotate_right();
            }
        }
        if node.balance < -1 {
            let right_balance = node
                .right
                .as_ref()
                .map(|n| n.balance)
                .expect("right-heavy node without right child");
            if right_balance <= 0 {
                self.rot_rr += 1;
                return node.rotate_left();
            } else {
                self.rot_rl += 1;
                let right = node.right.take().expect("right-heavy node without right child");
                node.right = Some(right.rotate_right());
                return node.rotate_left();
            }
        }
        node
    }

    /// Find the best route for the given destination address using longest-prefix match: among
    /// all entries whose network contains the destination, the one with the longest mask wins,
    /// with the lowest metric as tie-break. Returns `Ok(None)` if no entry matches.
    pub fn lookup_best_route(&self, destination: &str) -> Result<Option<&RouteEntry>, AddrError> {
        let addr = parse_addr(destination)?;
        let mut best: Option<&RouteEntry> = None;
        for entry in self.iter() {
            if !entry.network.contains(addr) {
                continue;
            }
            best = match best {
                None => Some(entry),
                Some(current) => {
                    if entry.mask_len > current.mask_len
                        || (entry.mask_len == current.mask_len && entry.metric < current.metric)
                    {
                        Some(entry)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        Ok(best)
    }

    /// Current statistics of the table.
    pub fn stats(&self) -> RouteTableStats {
        RouteTableStats {
            nodes: self.nodes,
            height: height(&self.root),
            ll: self.rot_ll,
            lr: self.rot_lr,
            rl: self.rot_rl,
            rr: self.rot_rr,
        }
    }

    /// Iterate over all entries in ascending `(prefix, metric)` order. The iterator is lazy and
    /// can be restarted by calling `iter` again.
    pub fn iter(&self) -> RouteTableIter<'_> {
        let mut iter = RouteTableIter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Render the tree structure as indented ASCII art, one node per line.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        if self.root.is_none() {
            out.push_str("(empty route tree)\n");
        } else {
            render_node(&self.root, "", "---", &mut out);
        }
        out
    }
}

fn render_node(node: &Option<Box<RouteNode>>, indent: &str, marker: &str, out: &mut String) {
    if let Some(node) = node {
        out.push_str(indent);
        out.push_str(marker);
        out.push_str(&format!("[{}/{}]\n", node.entry.prefix, node.entry.mask_len));
        let child_indent = format!("{}   ", indent);
        render_node(&node.left, &child_indent, "/--", out);
        render_node(&node.right, &child_indent, "\\--", out);
    }
}

/// Lazy inorder iterator over a [`RouteTable`], yielding entries in ascending
/// `(prefix, metric)` order.
#[derive(Debug)]
pub struct RouteTableIter<'a> {
    stack: Vec<&'a RouteNode>,
}

impl<'a> RouteTableIter<'a> {
    fn push_left(&mut self, mut node: Option<&'a RouteNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for RouteTableIter<'a> {
    type Item = &'a RouteEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = RouteTableIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
