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

//! Module containing the forwarding policy store of a router, implemented as a binary trie over
//! address bits.
//!
//! Each registered prefix marks a node as a prefix boundary and attaches a set of named policy
//! values to it. Looking up an address walks the trie bit by bit and overlays the policy sets of
//! every boundary passed, so that a longer (more specific) prefix overrides the keys set by a
//! shorter one, key by key. Intermediate nodes carry no policies of their own.

use crate::addr::{addr_bits, Prefix};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The value of a single named policy: either a flag (e.g. `block`) or a number
/// (e.g. `ttl-min`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    /// A boolean flag.
    Flag(bool),
    /// A numeric parameter.
    Number(i64),
}

impl fmt::Display for PolicyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A set of named policies attached to a prefix, or accumulated during a lookup.
pub type PolicySet = BTreeMap<String, PolicyValue>;

/// A trie node, owning at most two children (one per address bit).
#[derive(Debug, Clone, Default)]
pub(crate) struct TrieNode {
    /// Children, indexed by the next address bit (0 or 1).
    pub(crate) children: [Option<Box<TrieNode>>; 2],
    /// True if a prefix ends exactly at this node.
    pub(crate) prefix_end: bool,
    /// Policies of the prefix ending here. Empty for intermediate nodes.
    pub(crate) policies: PolicySet,
}

impl TrieNode {
    fn is_childless(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }
}

/// # Policy Trie
///
/// Binary trie over IPv4 address bits, storing hierarchical forwarding policies per prefix with
/// longest-prefix-match retrieval and per-key overlay semantics.
#[derive(Debug, Clone, Default)]
pub struct PolicyTrie {
    pub(crate) root: TrieNode,
}

impl PolicyTrie {
    /// Create a new, empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no prefix is registered.
    pub fn is_empty(&self) -> bool {
        !self.root.prefix_end && self.root.is_childless()
    }

    /// Register a prefix and merge the given policies into it. If the prefix is already
    /// registered, existing keys are overwritten by the new values (last write wins).
    pub fn insert_prefix(&mut self, prefix: &Prefix, policies: PolicySet) {
        let mut node = &mut self.root;
        for bit in prefix.bits() {
            node = node.children[bit as usize].get_or_insert_with(Default::default);
        }
        node.prefix_end = true;
        node.policies.extend(policies);
    }

    /// Accumulate the policies applying to the given address. The walk follows the address bits
    /// from the root and overlays the policy set of every prefix boundary passed, so keys set by
    /// longer prefixes override those set by shorter ones. Returns an empty set if no registered
    /// prefix contains the address.
    pub fn lookup_policy(&self, addr: u32) -> PolicySet {
        let mut accumulated = PolicySet::new();
        let mut node = &self.root;
        if node.prefix_end {
            accumulated.extend(node.policies.clone());
        }
        for bit in addr_bits(addr) {
            match &node.children[bit as usize] {
                Some(child) => {
                    node = child;
                    if node.prefix_end {
                        accumulated.extend(node.policies.clone());
                    }
                }
                None => break,
            }
        }
        accumulated
    }

    /// Unregister a prefix: clear its boundary marker and policies, and prune every ancestor
    /// that has become childless and is not itself a prefix boundary (the root always stays).
    /// Returns false if the prefix was not registered.
    pub fn remove_prefix(&mut self, prefix: &Prefix) -> bool {
        let (removed, _) = remove_at(&mut self.root, prefix, 0);
        removed
    }

    /// Collect every registered prefix together with its policy set, depth first, in ascending
    /// bit order (`0` before `1`).
    pub fn registered(&self) -> Vec<(Prefix, PolicySet)> {
        let mut out = Vec::new();
        collect(&self.root, 0, 0, &mut out);
        out
    }

    /// Render every registered prefix and its policies as human-readable text, one prefix per
    /// line, indented by depth.
    pub fn render(&self) -> String {
        let prefixes = self.registered();
        if prefixes.is_empty() {
            return "(no prefixes registered)\n".to_string();
        }
        let mut out = String::new();
        for (prefix, policies) in prefixes {
            let rendered =
                policies.iter().map(|(name, value)| format!("{}: {}", name, value)).join(", ");
            out.push_str(&format!("{} {{{}}}\n", prefix, rendered));
        }
        out
    }
}

/// Recursive removal helper. Returns `(removed, prune_child)`, where `prune_child` tells the
/// caller to drop its child slot because the subtree below carries no information anymore.
fn remove_at(node: &mut TrieNode, prefix: &Prefix, depth: u8) -> (bool, bool) {
    if depth == prefix.len() {
        if !node.prefix_end {
            return (false, false);
        }
        node.prefix_end = false;
        node.policies.clear();
        return (true, node.is_childless());
    }
    let bit = prefix.bit(depth) as usize;
    let child = match node.children[bit].as_mut() {
        Some(child) => child,
        None => return (false, false),
    };
    let (removed, prune) = remove_at(child, prefix, depth + 1);
    if prune {
        node.children[bit] = None;
        return (removed, !node.prefix_end && node.is_childless());
    }
    (removed, false)
}

fn collect(node: &TrieNode, addr: u32, depth: u8, out: &mut Vec<(Prefix, PolicySet)>) {
    if node.prefix_end {
        out.push((Prefix::from_parts(addr, depth), node.policies.clone()));
    }
    for (bit, child) in node.children.iter().enumerate() {
        if let Some(child) = child {
            let child_addr = addr | ((bit as u32) << (31 - depth as u32));
            collect(child, child_addr, depth + 1, out);
        }
    }
}
