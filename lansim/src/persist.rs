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

//! Module for saving and restoring a network as JSON.
//!
//! The dump is structural: every tree (routing table, snapshot index, policy trie) is stored
//! node for node, together with its cached statistics, so that loading reconstructs exactly the
//! shape that was saved instead of re-running insertions. Only the AVL balance factors are
//! recomputed, from the stored subtree heights.

use crate::addr::{parse_addr, AddrError};
use crate::device::{Device, DeviceKind, RouterData};
use crate::network::Network;
use crate::policy_trie::{PolicySet, PolicyTrie, TrieNode};
use crate::route_table::{RouteEntry, RouteNode, RouteTable};
use crate::snapshot_index::{IndexNode, SnapshotIndex};

use log::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error while saving or loading a network dump.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON, or does not match the dump schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The dump contains an invalid address.
    #[error("Address error in dump: {0}")]
    Addr(#[from] AddrError),
    /// The dump is structurally inconsistent.
    #[error("Invalid dump: {0}")]
    InvalidDump(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct NetworkDump {
    devices: Vec<DeviceDump>,
    links: Vec<LinkDump>,
    snapshots: IndexDump,
    packets_sent: u64,
    packets_delivered: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct DeviceDump {
    name: String,
    kind: String,
    powered: bool,
    interfaces: Vec<InterfaceDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routes: Option<RouteTableDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    policies: Option<TrieNodeDump>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InterfaceDump {
    name: String,
    address: Option<String>,
    enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinkDump {
    dev_a: String,
    if_a: String,
    dev_b: String,
    if_b: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RouteTableDump {
    root: Option<Box<RouteNodeDump>>,
    nodes: usize,
    rot_ll: u64,
    rot_lr: u64,
    rot_rl: u64,
    rot_rr: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RouteNodeDump {
    prefix: String,
    mask_len: u8,
    next_hop: String,
    metric: u32,
    height: u32,
    left: Option<Box<RouteNodeDump>>,
    right: Option<Box<RouteNodeDump>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexDump {
    t: usize,
    height: usize,
    nodes: usize,
    splits: u64,
    merges: u64,
    root: IndexNodeDump,
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexNodeDump {
    keys: Vec<String>,
    values: Vec<String>,
    children: Vec<IndexNodeDump>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TrieNodeDump {
    prefix_end: bool,
    policies: PolicySet,
    zero: Option<Box<TrieNodeDump>>,
    one: Option<Box<TrieNodeDump>>,
}

/// Save the network as a JSON dump at the given path.
pub fn save_network(net: &Network, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    info!("Saving network to {:?}", path);
    let dump = dump_network(net);
    fs::write(path, serde_json::to_string_pretty(&dump)?)?;
    Ok(())
}

/// Load a network from a JSON dump at the given path. The trees are rebuilt node for node in
/// the dumped shape, including their statistics counters.
pub fn load_network(path: impl AsRef<Path>) -> Result<Network, PersistError> {
    let path = path.as_ref();
    info!("Loading network from {:?}", path);
    let dump: NetworkDump = serde_json::from_str(&fs::read_to_string(path)?)?;
    restore_network(dump)
}

fn dump_network(net: &Network) -> NetworkDump {
    let devices = net
        .device_names()
        .into_iter()
        .filter_map(|name| net.device_by_name(&name))
        .map(dump_device)
        .collect();
    let links = net
        .links()
        .into_iter()
        .map(|(dev_a, if_a, dev_b, if_b)| LinkDump { dev_a, if_a, dev_b, if_b })
        .collect();
    NetworkDump {
        devices,
        links,
        snapshots: dump_index(net.snapshots()),
        packets_sent: net.packets_sent(),
        packets_delivered: net.packets_delivered(),
    }
}

fn dump_device(device: &Device) -> DeviceDump {
    let interfaces = device
        .interfaces()
        .map(|iface| InterfaceDump {
            name: iface.name().to_string(),
            address: iface.address_str(),
            enabled: iface.enabled(),
        })
        .collect();
    let (routes, policies) = match device.router_data() {
        Some(data) => (
            Some(RouteTableDump {
                root: data.routes.root.as_deref().map(dump_route_node).map(Box::new),
                nodes: data.routes.nodes,
                rot_ll: data.routes.rot_ll,
                rot_lr: data.routes.rot_lr,
                rot_rl: data.routes.rot_rl,
                rot_rr: data.routes.rot_rr,
            }),
            Some(dump_trie_node(&data.policies.root)),
        ),
        None => (None, None),
    };
    DeviceDump {
        name: device.name().to_string(),
        kind: device.kind().as_str().to_string(),
        powered: device.powered(),
        interfaces,
        routes,
        policies,
    }
}

fn dump_route_node(node: &RouteNode) -> RouteNodeDump {
    RouteNodeDump {
        prefix: node.entry.prefix().to_string(),
        mask_len: node.entry.mask_len(),
        next_hop: node.entry.next_hop().to_string(),
        metric: node.entry.metric(),
        height: node.height,
        left: node.left.as_deref().map(dump_route_node).map(Box::new),
        right: node.right.as_deref().map(dump_route_node).map(Box::new),
    }
}

fn dump_index(index: &SnapshotIndex<String, String>) -> IndexDump {
    let stats = index.stats();
    IndexDump {
        t: stats.t,
        height: stats.height,
        nodes: stats.nodes,
        splits: stats.splits,
        merges: stats.merges,
        root: dump_index_node(&index.root),
    }
}

fn dump_index_node(node: &IndexNode<String, String>) -> IndexNodeDump {
    IndexNodeDump {
        keys: node.keys.clone(),
        values: node.values.clone(),
        children: node.children.iter().map(|c| dump_index_node(c)).collect(),
    }
}

fn dump_trie_node(node: &TrieNode) -> TrieNodeDump {
    TrieNodeDump {
        prefix_end: node.prefix_end,
        policies: node.policies.clone(),
        zero: node.children[0].as_deref().map(dump_trie_node).map(Box::new),
        one: node.children[1].as_deref().map(dump_trie_node).map(Box::new),
    }
}

fn restore_network(dump: NetworkDump) -> Result<Network, PersistError> {
    let mut net = Network::new();
    for device in dump.devices {
        let restored = restore_device(device)?;
        net.add_device(restored)
            .map_err(|e| PersistError::InvalidDump(e.to_string()))?;
    }
    for link in dump.links {
        net.connect(&link.dev_a, &link.if_a, &link.dev_b, &link.if_b)
            .map_err(|e| PersistError::InvalidDump(e.to_string()))?;
    }
    net.replace_snapshots(restore_index(dump.snapshots)?);
    net.set_packet_counters(dump.packets_sent, dump.packets_delivered);
    Ok(net)
}

fn restore_device(dump: DeviceDump) -> Result<Device, PersistError> {
    let kind = match dump.kind.as_str() {
        "router" => {
            let routes = match dump.routes {
                Some(routes) => restore_route_table(routes)?,
                None => RouteTable::new(),
            };
            let policies = match dump.policies {
                Some(root) => PolicyTrie { root: restore_trie_node(root) },
                None => PolicyTrie::new(),
            };
            DeviceKind::Router(RouterData { routes, policies })
        }
        "switch" => DeviceKind::Switch,
        "host" => DeviceKind::Host,
        other => {
            return Err(PersistError::InvalidDump(format!("unknown device kind '{}'", other)))
        }
    };
    let mut device = Device::new(dump.name, kind);
    device.set_powered(dump.powered);
    for iface in dump.interfaces {
        device.add_interface(&iface.name);
        // add_interface cannot fail for a fresh device, the dump lists each name once
        if let Some(slot) = device.interface_mut(&iface.name) {
            if let Some(addr) = &iface.address {
                slot.set_address(parse_addr(addr)?);
            }
            slot.set_enabled(iface.enabled);
        }
    }
    Ok(device)
}

fn restore_route_table(dump: RouteTableDump) -> Result<RouteTable, PersistError> {
    Ok(RouteTable {
        root: dump.root.map(|n| restore_route_node(*n)).transpose()?,
        nodes: dump.nodes,
        rot_ll: dump.rot_ll,
        rot_lr: dump.rot_lr,
        rot_rl: dump.rot_rl,
        rot_rr: dump.rot_rr,
    })
}

fn restore_route_node(dump: RouteNodeDump) -> Result<Box<RouteNode>, PersistError> {
    let entry = RouteEntry::new(&dump.prefix, dump.mask_len, &dump.next_hop, dump.metric)?;
    let left = dump.left.map(|n| restore_route_node(*n)).transpose()?;
    let right = dump.right.map(|n| restore_route_node(*n)).transpose()?;
    let child_height = |c: &Option<Box<RouteNode>>| c.as_ref().map(|n| n.height).unwrap_or(0);
    // balance factors are not dumped, recompute them from the stored heights
    let balance = child_height(&left) as i32 - child_height(&right) as i32;
    Ok(Box::new(RouteNode { entry, left, right, height: dump.height, balance }))
}

fn restore_index(dump: IndexDump) -> Result<SnapshotIndex<String, String>, PersistError> {
    if dump.t < 2 {
        return Err(PersistError::InvalidDump(format!("B-Tree minimum degree {} < 2", dump.t)));
    }
    Ok(SnapshotIndex {
        root: Box::new(restore_index_node(dump.root)),
        t: dump.t,
        height: dump.height,
        nodes: dump.nodes,
        splits: dump.splits,
        merges: dump.merges,
    })
}

fn restore_index_node(dump: IndexNodeDump) -> IndexNode<String, String> {
    IndexNode {
        keys: dump.keys,
        values: dump.values,
        children: dump.children.into_iter().map(|c| Box::new(restore_index_node(c))).collect(),
    }
}

fn restore_trie_node(dump: TrieNodeDump) -> TrieNode {
    TrieNode {
        children: [
            dump.zero.map(|n| Box::new(restore_trie_node(*n))),
            dump.one.map(|n| Box::new(restore_trie_node(*n))),
        ],
        prefix_end: dump.prefix_end,
        policies: dump.policies,
    }
}
