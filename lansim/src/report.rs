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

//! Module rendering the plain-text statistics report shown by `show statistics`.

use crate::journal::ErrorJournal;
use crate::network::Network;

use chrono::Utc;
use std::fmt::Write;

/// Render the full statistics report: network totals, per-device detail, snapshot index stats
/// and a summary of the error journal.
pub fn network_report(net: &Network, journal: &ErrorJournal) -> String {
    let mut out = String::new();
    let ruler = "=".repeat(60);
    writeln!(out, "{}", ruler).unwrap();
    writeln!(out, "Network Statistics Report").unwrap();
    writeln!(out, "Generated: {}", Utc::now().to_rfc3339()).unwrap();
    writeln!(out, "{}", ruler).unwrap();

    writeln!(out, "\n1. Network totals").unwrap();
    writeln!(out, "   Devices:           {}", net.num_devices()).unwrap();
    writeln!(out, "   Links:             {}", net.num_links()).unwrap();
    writeln!(out, "   Packets sent:      {}", net.packets_sent()).unwrap();
    writeln!(out, "   Packets delivered: {}", net.packets_delivered()).unwrap();

    writeln!(out, "\n2. Devices").unwrap();
    for name in net.device_names() {
        // device_names only returns registered names
        let device = net.device_by_name(&name).unwrap();
        writeln!(
            out,
            "   {} ({}, {})",
            device.name(),
            device.kind().as_str(),
            if device.powered() { "on" } else { "off" },
        )
        .unwrap();
        for iface in device.interfaces() {
            let peers = net.connections_of(&name, iface.name()).unwrap_or_default();
            writeln!(
                out,
                "      {}: {} [{}] peers: {}",
                iface.name(),
                iface.address_str().unwrap_or_else(|| "unassigned".to_string()),
                if iface.enabled() { "up" } else { "down" },
                peers.len(),
            )
            .unwrap();
        }
        if let Some(data) = device.router_data() {
            writeln!(out, "      routes: {}", data.routes.stats()).unwrap();
        }
    }

    writeln!(out, "\n3. Snapshot index").unwrap();
    writeln!(out, "   {}", net.snapshots().stats()).unwrap();
    writeln!(out, "   Snapshots stored: {}", net.snapshots().iter().count()).unwrap();

    writeln!(out, "\n4. Error journal").unwrap();
    writeln!(out, "   Errors recorded: {}", journal.len()).unwrap();
    if !journal.is_empty() {
        writeln!(out, "   Most recent:").unwrap();
        for record in journal.recent(Some(5)) {
            writeln!(out, "      #{} {}", record.seq, record).unwrap();
        }
    }
    writeln!(out, "{}", ruler).unwrap();
    out
}
