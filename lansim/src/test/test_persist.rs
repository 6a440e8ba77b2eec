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

use crate::persist::{load_network, save_network};
use crate::presets;
use crate::route_table::RouteEntry;

use std::path::PathBuf;

fn temp_file(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("lansim_test_{}_{}.json", std::process::id(), name));
    path
}

#[test]
fn save_and_load_roundtrip() {
    let mut net = presets::lab_network();
    // grow the route tree enough to force rotations, so the counters are non-trivial
    {
        let data = net.device_by_name_mut("Router1").unwrap().router_data_mut().unwrap();
        for i in 1..=10 {
            data.routes
                .insert(RouteEntry::new(&format!("{}.0.0.0", i), 8, "10.0.0.254", 1).unwrap());
        }
    }
    net.send_packet("Router2", "10.1.2.3", "hello").unwrap();
    net.send_packet("Router1", "192.168.2.5", "blocked").unwrap();

    let path = temp_file("roundtrip");
    save_network(&net, &path).unwrap();
    let loaded = load_network(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.device_names(), net.device_names());
    assert_eq!(loaded.num_links(), net.num_links());
    assert_eq!(loaded.links(), net.links());
    assert_eq!(loaded.packets_sent(), 2);
    assert_eq!(loaded.packets_delivered(), 1);

    // interfaces survive with address and state
    let iface = loaded.device_by_name("Router1").unwrap().interface("Gi0/0").unwrap();
    assert_eq!(iface.address_str().unwrap(), "192.168.1.1");
    assert!(iface.enabled());

    // the route tree is rebuilt in shape, including the rotation counters
    let old = net.device_by_name("Router1").unwrap().router_data().unwrap();
    let new = loaded.device_by_name("Router1").unwrap().router_data().unwrap();
    assert_eq!(new.routes.stats(), old.routes.stats());
    let old_routes: Vec<String> = old.routes.iter().map(|e| e.to_string()).collect();
    let new_routes: Vec<String> = new.routes.iter().map(|e| e.to_string()).collect();
    assert_eq!(new_routes, old_routes);
    assert_eq!(new.routes.render_tree(), old.routes.render_tree());

    // policies survive with their values
    assert_eq!(new.policies.registered(), old.policies.registered());

    // the snapshot index is rebuilt in shape, including the statistics
    assert_eq!(loaded.snapshots().stats(), net.snapshots().stats());
    let old_snaps: Vec<(String, String)> =
        net.snapshots().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    let new_snaps: Vec<(String, String)> =
        loaded.snapshots().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    assert_eq!(new_snaps, old_snaps);
}

#[test]
fn loaded_network_is_operational() {
    let net = presets::lab_network();
    let path = temp_file("operational");
    save_network(&net, &path).unwrap();
    let mut loaded = load_network(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    // the restored network forwards exactly like the original
    let outcome = loaded.send_packet("Router1", "10.9.9.9", "hello").unwrap();
    assert_eq!(
        outcome,
        crate::network::PacketOutcome::Forwarded {
            next_hop: "10.0.0.254".to_string(),
            ttl_min: Some(5),
        }
    );
}

#[test]
fn load_missing_file_is_an_io_error() {
    let path = temp_file("does_not_exist");
    assert!(load_network(&path).is_err());
}

#[test]
fn load_rejects_garbage() {
    let path = temp_file("garbage");
    std::fs::write(&path, "not json at all").unwrap();
    assert!(load_network(&path).is_err());
    std::fs::remove_file(&path).unwrap();
}
