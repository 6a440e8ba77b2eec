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

//! Module containing pre-built networks.

use crate::addr::{parse_addr, Prefix};
use crate::network::Network;
use crate::policy_trie::PolicyValue;
use crate::route_table::RouteEntry;

use maplit::btreemap;

/// Build the seeded lab network: two routers behind a switch, with routes, policies and two
/// configuration snapshots already in place.
///
/// ```text
/// Router1:Gi0/0 ---- Fa0/1:Switch1:Fa0/2 ---- Gi0/0:Router2
/// ```
pub fn lab_network() -> Network {
    let mut net = Network::new();
    net.add_router("Router1").unwrap();
    net.add_router("Router2").unwrap();
    net.add_switch("Switch1").unwrap();

    net.add_interface("Router1", "Gi0/0").unwrap();
    net.add_interface("Router1", "Gi0/1").unwrap();
    net.add_interface("Router2", "Gi0/0").unwrap();
    net.add_interface("Switch1", "Fa0/1").unwrap();
    net.add_interface("Switch1", "Fa0/2").unwrap();

    let r1 = net.device_by_name_mut("Router1").unwrap();
    r1.interface_mut("Gi0/0").unwrap().set_address(parse_addr("192.168.1.1").unwrap());
    r1.interface_mut("Gi0/1").unwrap().set_address(parse_addr("10.0.0.1").unwrap());
    let r2 = net.device_by_name_mut("Router2").unwrap();
    r2.interface_mut("Gi0/0").unwrap().set_address(parse_addr("192.168.2.1").unwrap());

    net.connect("Router1", "Gi0/0", "Switch1", "Fa0/1").unwrap();
    net.connect("Router2", "Gi0/0", "Switch1", "Fa0/2").unwrap();

    let r1 = net.device_by_name_mut("Router1").unwrap().router_data_mut().unwrap();
    r1.routes.insert(RouteEntry::new("0.0.0.0", 0, "10.0.0.254", 10).unwrap());
    r1.routes.insert(RouteEntry::new("192.168.2.0", 24, "192.168.1.254", 1).unwrap());
    r1.policies.insert_prefix(
        &Prefix::new("10.0.0.0", 8).unwrap(),
        btreemap! {"ttl-min".to_string() => PolicyValue::Number(5)},
    );
    r1.policies.insert_prefix(
        &Prefix::new("192.168.0.0", 16).unwrap(),
        btreemap! {"block".to_string() => PolicyValue::Flag(true)},
    );

    let r2 = net.device_by_name_mut("Router2").unwrap().router_data_mut().unwrap();
    r2.routes.insert(RouteEntry::new("0.0.0.0", 0, "192.168.2.254", 10).unwrap());
    r2.routes.insert(RouteEntry::new("10.0.0.0", 8, "192.168.2.1", 1).unwrap());
    r2.policies.insert_prefix(
        &Prefix::new("192.168.2.0", 24).unwrap(),
        btreemap! {"ttl-min".to_string() => PolicyValue::Number(3)},
    );

    net.snapshots_mut().insert("initial_config".to_string(), "snap_00001.cfg".to_string());
    net.snapshots_mut().insert("updated_config".to_string(), "snap_00002.cfg".to_string());
    net
}
