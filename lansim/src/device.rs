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

//! Module defining the simulated devices. A device is a name, a power state, a set of named
//! interfaces, and a kind. Only routers carry a routing table and a policy trie; the kind is a
//! tagged variant dispatched by pattern matching.

use crate::addr::fmt_addr;
use crate::policy_trie::PolicyTrie;
use crate::route_table::RouteTable;

use std::collections::BTreeMap;

/// A network interface of a device.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    address: Option<u32>,
    enabled: bool,
}

impl Interface {
    /// Create a new interface. Interfaces start without an address and disabled (shutdown).
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), address: None, enabled: false }
    }

    /// Name of the interface.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The assigned address, if any.
    pub fn address(&self) -> Option<u32> {
        self.address
    }

    /// The assigned address, formatted as a dotted quad.
    pub fn address_str(&self) -> Option<String> {
        self.address.map(fmt_addr)
    }

    /// True if the interface is up.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Assign an address. Assigning an address brings the interface up.
    pub fn set_address(&mut self, addr: u32) {
        self.address = Some(addr);
        self.enabled = true;
    }

    /// Bring the interface up (`no shutdown`) or down (`shutdown`).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// The data carried only by routers: the routing table and the policy trie.
#[derive(Debug, Clone, Default)]
pub struct RouterData {
    /// The routing table of the router.
    pub routes: RouteTable,
    /// The forwarding policies of the router.
    pub policies: PolicyTrie,
}

/// The kind of a device, carrying kind-specific data.
#[derive(Debug, Clone)]
pub enum DeviceKind {
    /// A router, forwarding packets according to its routing table and policies.
    Router(RouterData),
    /// A switch. Forwards within its broadcast domain; carries no routing state.
    Switch,
    /// An end host.
    Host,
}

impl DeviceKind {
    /// The kind as a lowercase word, for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Router(_) => "router",
            Self::Switch => "switch",
            Self::Host => "host",
        }
    }
}

/// A simulated network device.
#[derive(Debug, Clone)]
pub struct Device {
    name: String,
    powered: bool,
    interfaces: BTreeMap<String, Interface>,
    kind: DeviceKind,
}

impl Device {
    /// Create a new device of the given kind. Devices start powered on, without interfaces.
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self { name: name.into(), powered: true, interfaces: BTreeMap::new(), kind }
    }

    /// Create a new router with an empty routing table and policy trie.
    pub fn router(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Router(RouterData::default()))
    }

    /// Create a new switch.
    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Switch)
    }

    /// Create a new host.
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Host)
    }

    /// Name of the device.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// True if the device is powered on.
    pub fn powered(&self) -> bool {
        self.powered
    }

    /// Power the device on or off.
    pub fn set_powered(&mut self, powered: bool) {
        self.powered = powered;
    }

    /// The kind of the device.
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    /// True if the device is a router.
    pub fn is_router(&self) -> bool {
        matches!(self.kind, DeviceKind::Router(_))
    }

    /// The router-specific data, or `None` if the device is not a router.
    pub fn router_data(&self) -> Option<&RouterData> {
        match &self.kind {
            DeviceKind::Router(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable access to the router-specific data, or `None` if the device is not a router.
    pub fn router_data_mut(&mut self) -> Option<&mut RouterData> {
        match &mut self.kind {
            DeviceKind::Router(data) => Some(data),
            _ => None,
        }
    }

    /// Add an interface with the given name, if it does not yet exist. Returns true if the
    /// interface was created, false if it already existed (idempotent).
    pub fn add_interface(&mut self, name: &str) -> bool {
        if self.interfaces.contains_key(name) {
            return false;
        }
        self.interfaces.insert(name.to_string(), Interface::new(name));
        true
    }

    /// Look up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    /// Look up an interface by name, mutably.
    pub fn interface_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.get_mut(name)
    }

    /// Iterate over all interfaces, ordered by name.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    /// Number of interfaces on this device.
    pub fn num_interfaces(&self) -> usize {
        self.interfaces.len()
    }
}
