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

//! # Top-level Network module
//!
//! This module represents the simulated LAN: it owns all devices, the physical topology graph
//! connecting their interfaces, the shared snapshot index, and the packet counters. The packet
//! send simulation lives here as well: it chains the policy lookup (trie) and the route lookup
//! (routing table) of the source device into a forwarding decision, purely sequentially.

use crate::addr::parse_addr;
use crate::device::Device;
use crate::policy_trie::PolicyValue;
use crate::snapshot_index::SnapshotIndex;
use crate::types::{DeviceId, IndexType, LanTopology, Link, NetworkError};

use log::*;
use petgraph::prelude::EdgeIndex;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::HashMap;

/// Minimum degree of the shared snapshot index.
static SNAPSHOT_MIN_DEGREE: usize = 4;

/// The outcome of a simulated packet send, rendered to text by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketOutcome {
    /// A `block` policy on the source router matched the destination.
    Blocked,
    /// The source router has no route containing the destination.
    NoRoute,
    /// The source router forwarded the packet to the next hop of the best matching route.
    Forwarded {
        /// Next hop of the selected route.
        next_hop: String,
        /// The `ttl-min` policy value applying to the destination, if any.
        ttl_min: Option<i64>,
    },
    /// The source device is not a router; the destination is assumed to be adjacent.
    Direct,
}

impl PacketOutcome {
    /// True if the packet counts as delivered.
    pub fn delivered(&self) -> bool {
        matches!(self, Self::Forwarded { .. } | Self::Direct)
    }
}

/// # Network struct
///
/// The struct contains all devices of the simulated LAN, the physical topology connecting
/// their interfaces, the shared configuration snapshot index, and the packet counters. Device
/// ids are indices into the topology graph; the graph is never reused for routing decisions,
/// which are taken per device from its routing table and policy trie.
#[derive(Debug)]
pub struct Network {
    devices: HashMap<DeviceId, Device>,
    names: HashMap<String, DeviceId>,
    topology: LanTopology,
    snapshots: SnapshotIndex<String, String>,
    packets_sent: u64,
    packets_delivered: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Create a new, empty network.
    pub fn new() -> Self {
        Self {
            devices: HashMap::new(),
            names: HashMap::new(),
            topology: LanTopology::default(),
            snapshots: SnapshotIndex::new(SNAPSHOT_MIN_DEGREE),
            packets_sent: 0,
            packets_delivered: 0,
        }
    }

    /// Add a new router to the network.
    pub fn add_router(&mut self, name: &str) -> Result<DeviceId, NetworkError> {
        self.add_device(Device::router(name))
    }

    /// Add a new switch to the network.
    pub fn add_switch(&mut self, name: &str) -> Result<DeviceId, NetworkError> {
        self.add_device(Device::switch(name))
    }

    /// Add a new host to the network.
    pub fn add_host(&mut self, name: &str) -> Result<DeviceId, NetworkError> {
        self.add_device(Device::host(name))
    }

    /// Add a device to the network. Duplicate names are rejected.
    pub fn add_device(&mut self, device: Device) -> Result<DeviceId, NetworkError> {
        if self.names.contains_key(device.name()) {
            return Err(NetworkError::DeviceNameTaken(device.name().to_string()));
        }
        let id = self.topology.add_node(());
        info!("Adding {} {}", device.kind().as_str(), device.name());
        self.names.insert(device.name().to_string(), id);
        self.devices.insert(id, device);
        Ok(id)
    }

    /// Resolve a device name to its id.
    pub fn device_id(&self, name: &str) -> Option<DeviceId> {
        self.names.get(name).copied()
    }

    /// Get a device by id.
    pub fn get_device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Get a device by id, mutably.
    pub fn get_device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.get_mut(&id)
    }

    /// Get a device by name.
    pub fn device_by_name(&self, name: &str) -> Option<&Device> {
        self.device_id(name).and_then(move |id| self.devices.get(&id))
    }

    /// Get a device by name, mutably.
    pub fn device_by_name_mut(&mut self, name: &str) -> Option<&mut Device> {
        match self.names.get(name) {
            Some(id) => self.devices.get_mut(id),
            None => None,
        }
    }

    /// Rename a device, keeping its id, interfaces and links. The new name must be free.
    pub fn rename_device(&mut self, old: &str, new: &str) -> Result<(), NetworkError> {
        if self.names.contains_key(new) {
            return Err(NetworkError::DeviceNameTaken(new.to_string()));
        }
        let id = match self.names.remove(old) {
            Some(id) => id,
            None => return Err(NetworkError::DeviceNotFound(old.to_string())),
        };
        self.names.insert(new.to_string(), id);
        if let Some(device) = self.devices.get_mut(&id) {
            device.set_name(new);
        }
        info!("Renamed device {} to {}", old, new);
        Ok(())
    }

    /// All device names, in ascending order.
    pub fn device_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of devices in the network.
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Number of links in the network.
    pub fn num_links(&self) -> usize {
        self.topology.edge_count()
    }

    /// Add an interface to a named device. Returns true if the interface was created, false if
    /// it already existed.
    pub fn add_interface(&mut self, device: &str, iface: &str) -> Result<bool, NetworkError> {
        let device = self
            .device_by_name_mut(device)
            .ok_or_else(|| NetworkError::DeviceNotFound(device.to_string()))?;
        Ok(device.add_interface(iface))
    }

    /// Connect two named interfaces with a bidirectional link. Both devices and both interfaces
    /// must exist, and the link must not exist yet.
    pub fn connect(
        &mut self,
        dev_a: &str,
        if_a: &str,
        dev_b: &str,
        if_b: &str,
    ) -> Result<(), NetworkError> {
        let (id_a, id_b) = (self.resolve_interface(dev_a, if_a)?, self.resolve_interface(dev_b, if_b)?);
        if self.find_link(id_a, if_a, id_b, if_b).is_some() {
            return Err(NetworkError::LinkExists(
                dev_a.to_string(),
                if_a.to_string(),
                dev_b.to_string(),
                if_b.to_string(),
            ));
        }
        info!("Connecting {}:{} <-> {}:{}", dev_a, if_a, dev_b, if_b);
        self.topology.add_edge(id_a, id_b, Link { if_a: if_a.to_string(), if_b: if_b.to_string() });
        Ok(())
    }

    /// Remove the link between two named interfaces. Both devices and both interfaces must
    /// exist; an absent link is a negative result (`Ok(false)`), not an error.
    pub fn disconnect(
        &mut self,
        dev_a: &str,
        if_a: &str,
        dev_b: &str,
        if_b: &str,
    ) -> Result<bool, NetworkError> {
        let (id_a, id_b) = (self.resolve_interface(dev_a, if_a)?, self.resolve_interface(dev_b, if_b)?);
        match self.find_link(id_a, if_a, id_b, if_b) {
            Some(edge) => {
                info!("Disconnecting {}:{} <-> {}:{}", dev_a, if_a, dev_b, if_b);
                let _ = self.topology.remove_edge(edge);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// All connections of the given interface, as `(peer device, peer interface)` pairs.
    pub fn connections_of(
        &self,
        device: &str,
        iface: &str,
    ) -> Result<Vec<(String, String)>, NetworkError> {
        let id = self.resolve_interface(device, iface)?;
        let mut peers = Vec::new();
        for edge in self.topology.edge_references() {
            let link = edge.weight();
            let (peer_id, peer_if) = if edge.source() == id && link.if_a == iface {
                (edge.target(), link.if_b.clone())
            } else if edge.target() == id && link.if_b == iface {
                (edge.source(), link.if_a.clone())
            } else {
                continue;
            };
            if let Some(peer) = self.devices.get(&peer_id) {
                peers.push((peer.name().to_string(), peer_if));
            }
        }
        peers.sort();
        Ok(peers)
    }

    /// All links of the network, as `(device, interface, device, interface)` tuples.
    pub fn links(&self) -> Vec<(String, String, String, String)> {
        let mut links = Vec::new();
        for edge in self.topology.edge_references() {
            let (a, b) = (edge.source(), edge.target());
            if let (Some(dev_a), Some(dev_b)) = (self.devices.get(&a), self.devices.get(&b)) {
                links.push((
                    dev_a.name().to_string(),
                    edge.weight().if_a.clone(),
                    dev_b.name().to_string(),
                    edge.weight().if_b.clone(),
                ));
            }
        }
        links.sort();
        links
    }

    /// The shared snapshot index.
    pub fn snapshots(&self) -> &SnapshotIndex<String, String> {
        &self.snapshots
    }

    /// The shared snapshot index, mutably.
    pub fn snapshots_mut(&mut self) -> &mut SnapshotIndex<String, String> {
        &mut self.snapshots
    }

    /// Total number of packets handed to `send_packet`, including failed ones.
    pub fn packets_sent(&self) -> u64 {
        self.packets_sent
    }

    /// Total number of packets that reached a forwarding decision counting as delivered.
    pub fn packets_delivered(&self) -> u64 {
        self.packets_delivered
    }

    pub(crate) fn set_packet_counters(&mut self, sent: u64, delivered: u64) {
        self.packets_sent = sent;
        self.packets_delivered = delivered;
    }

    pub(crate) fn replace_snapshots(&mut self, snapshots: SnapshotIndex<String, String>) {
        self.snapshots = snapshots;
    }

    /// Simulate sending a packet from the named source device towards a destination address.
    ///
    /// The send counter is incremented unconditionally. For routers, the policy trie is
    /// consulted first (a matching `block` policy discards the packet), then the routing table
    /// performs a longest-prefix-match lookup. Non-router devices deliver directly, assuming
    /// the destination is adjacent. Delivered outcomes increment the delivery counter.
    pub fn send_packet(
        &mut self,
        source: &str,
        destination: &str,
        message: &str,
    ) -> Result<PacketOutcome, NetworkError> {
        self.packets_sent += 1;
        let device = self
            .device_by_name(source)
            .ok_or_else(|| NetworkError::DeviceNotFound(source.to_string()))?;
        let addr = parse_addr(destination)?;
        info!("{}: sending packet towards {}", source, destination);
        debug!("{}: payload: {}", source, message);

        let outcome = match device.router_data() {
            Some(data) => {
                debug!("{}: consulting policy trie for {}", source, destination);
                let policies = data.policies.lookup_policy(addr);
                let ttl_min = match policies.get("ttl-min") {
                    Some(PolicyValue::Number(n)) => Some(*n),
                    _ => None,
                };
                if matches!(policies.get("block"), Some(PolicyValue::Flag(true))) {
                    warn!("{}: packet towards {} blocked by policy", source, destination);
                    PacketOutcome::Blocked
                } else {
                    if let Some(ttl) = ttl_min {
                        info!("{}: applying ttl-min {} policy", source, ttl);
                    }
                    debug!("{}: consulting routing table for {}", source, destination);
                    match data.routes.lookup_best_route(destination)? {
                        Some(route) => {
                            info!("{}: route found, next hop {}", source, route.next_hop());
                            PacketOutcome::Forwarded {
                                next_hop: route.next_hop().to_string(),
                                ttl_min,
                            }
                        }
                        None => {
                            warn!("{}: no route towards {}, packet discarded", source, destination);
                            PacketOutcome::NoRoute
                        }
                    }
                }
            }
            None => {
                debug!("{}: not a router, assuming the destination is adjacent", source);
                PacketOutcome::Direct
            }
        };
        if outcome.delivered() {
            self.packets_delivered += 1;
        }
        Ok(outcome)
    }

    /// Check that the device and interface exist, returning the device id.
    fn resolve_interface(&self, device: &str, iface: &str) -> Result<DeviceId, NetworkError> {
        let id = self
            .device_id(device)
            .ok_or_else(|| NetworkError::DeviceNotFound(device.to_string()))?;
        match self.devices.get(&id).and_then(|d| d.interface(iface)) {
            Some(_) => Ok(id),
            None => Err(NetworkError::InterfaceNotFound(device.to_string(), iface.to_string())),
        }
    }

    /// Find the edge connecting two interfaces, in either orientation.
    fn find_link(
        &self,
        id_a: DeviceId,
        if_a: &str,
        id_b: DeviceId,
        if_b: &str,
    ) -> Option<EdgeIndex<IndexType>> {
        self.topology.edge_references().find_map(|edge| {
            let link = edge.weight();
            let forward =
                edge.source() == id_a && link.if_a == if_a && edge.target() == id_b && link.if_b == if_b;
            let backward =
                edge.source() == id_b && link.if_a == if_b && edge.target() == id_a && link.if_b == if_a;
            if forward || backward {
                Some(edge.id())
            } else {
                None
            }
        })
    }
}
