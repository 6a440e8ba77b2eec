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

use crate::snapshot_index::{IndexNode, SnapshotIndex};

use rand::prelude::*;
use std::collections::BTreeMap;

fn key(i: usize) -> String {
    format!("k{:03}", i)
}

/// Walk the whole tree and check the B-Tree invariants: keys are strictly increasing within
/// each node, occupancy stays within `[t - 1, 2t - 1]` (root excepted), internal nodes have one
/// child more than keys, and all leaves sit at the same depth. Returns nothing, asserts.
fn check_invariants(index: &SnapshotIndex<String, String>) {
    fn walk(
        node: &IndexNode<String, String>,
        t: usize,
        is_root: bool,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        nodes: &mut usize,
    ) {
        *nodes += 1;
        assert_eq!(node.keys.len(), node.values.len());
        assert!(node.keys.len() <= 2 * t - 1, "node overflow");
        if !is_root {
            assert!(node.keys.len() >= t - 1, "node underflow");
        }
        for pair in node.keys.windows(2) {
            assert!(pair[0] < pair[1], "keys not strictly increasing");
        }
        if node.is_leaf() {
            match leaf_depth {
                Some(d) => assert_eq!(*d, depth, "leaves at different depths"),
                None => *leaf_depth = Some(depth),
            }
        } else {
            assert_eq!(node.children.len(), node.keys.len() + 1);
            for (i, child) in node.children.iter().enumerate() {
                // separators bound the key ranges of the children
                if i > 0 {
                    assert!(child.keys.first().unwrap() > &node.keys[i - 1]);
                }
                if i < node.keys.len() {
                    assert!(child.keys.last().unwrap() < &node.keys[i]);
                }
                walk(child, t, false, depth + 1, leaf_depth, nodes);
            }
        }
    }
    let stats = index.stats();
    let mut leaf_depth = None;
    let mut nodes = 0;
    walk(&index.root, stats.t, true, 1, &mut leaf_depth, &mut nodes);
    assert_eq!(nodes, stats.nodes, "node counter out of sync");
    assert_eq!(leaf_depth.unwrap(), stats.height, "height counter out of sync");
}

#[test]
#[should_panic]
fn degenerate_degree_is_rejected() {
    let _ = SnapshotIndex::<String, String>::new(1);
}

#[test]
fn insert_splits_and_grows() {
    let mut index = SnapshotIndex::new(2);
    for i in 1..=10 {
        index.insert(key(i), format!("snap_{:05}.cfg", i));
        check_invariants(&index);
    }
    let stats = index.stats();
    assert!(stats.height > 1);
    assert!(stats.splits > 0);
    for i in 1..=10 {
        assert_eq!(index.get(&key(i)), Some(&format!("snap_{:05}.cfg", i)));
    }
    assert_eq!(index.get(&key(11)), None);
}

#[test]
fn delete_shrinks_back_to_the_root() {
    let mut index = SnapshotIndex::new(2);
    for i in 1..=10 {
        index.insert(key(i), i.to_string());
    }
    for i in (2..=10).rev() {
        assert_eq!(index.remove(&key(i)), Some(i.to_string()));
        check_invariants(&index);
    }
    let stats = index.stats();
    assert_eq!(stats.nodes, 1);
    assert_eq!(stats.height, 1);
    assert!(stats.merges > 0);
    assert_eq!(index.get(&key(1)), Some(&"1".to_string()));
    assert_eq!(index.remove(&key(1)), Some("1".to_string()));
    assert!(index.is_empty());
    assert_eq!(index.remove(&key(1)), None);
}

#[test]
fn duplicate_insert_replaces_in_place() {
    let mut index = SnapshotIndex::new(2);
    for i in 1..=7 {
        index.insert(key(i), "old".to_string());
    }
    let before = index.stats();
    assert_eq!(index.insert(key(4), "new".to_string()), Some("old".to_string()));
    let after = index.stats();
    // map semantics: no structural change on replacement
    assert_eq!(before, after);
    assert_eq!(index.get(&key(4)), Some(&"new".to_string()));
    check_invariants(&index);
}

#[test]
fn iteration_is_sorted() {
    let mut index = SnapshotIndex::new(3);
    let mut order: Vec<usize> = (0..50).collect();
    let mut rng = StdRng::seed_from_u64(7);
    order.shuffle(&mut rng);
    for i in order {
        index.insert(key(i), i.to_string());
    }
    let keys: Vec<&String> = index.iter().map(|(k, _)| k).collect();
    let expected: Vec<String> = (0..50).map(key).collect();
    assert_eq!(keys, expected.iter().collect::<Vec<_>>());
    assert_eq!(index.iter().count(), 50);
}

#[test]
fn empty_iteration() {
    let index: SnapshotIndex<String, String> = SnapshotIndex::new(4);
    assert!(index.is_empty());
    assert_eq!(index.iter().count(), 0);
    assert_eq!(index.stats().nodes, 1);
    assert_eq!(index.stats().height, 1);
}

#[test]
fn random_sweep_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut index = SnapshotIndex::new(3);
    let mut model: BTreeMap<String, String> = BTreeMap::new();

    for step in 0..1000 {
        let k = key(rng.gen_range(0, 120));
        if rng.gen_bool(0.6) {
            let v = step.to_string();
            assert_eq!(index.insert(k.clone(), v.clone()), model.insert(k, v));
        } else {
            assert_eq!(index.remove(&k), model.remove(&k));
        }
        if step % 20 == 0 {
            check_invariants(&index);
        }
    }
    check_invariants(&index);
    let got: Vec<(&String, &String)> = index.iter().collect();
    let expected: Vec<(&String, &String)> = model.iter().collect();
    assert_eq!(got, expected);
}
