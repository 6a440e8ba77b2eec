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

#![deny(missing_docs)]

//! # LanSim: Simulating a LAN with a Router-Style Command Line
//!
//! This is a library for simulating a small local area network and operating it through a
//! modal, router-style command shell. Devices (routers, switches and hosts) are connected by
//! physical links, and every router carries its own routing table and forwarding policies.
//! Packet delivery is simulated purely sequentially: a send walks the source router's policy
//! trie, then its routing table, and reports the forwarding decision.
//!
//! ## Structure
//!
//! This library is structured in the following way:
//!
//! - **[`Network`](network::Network)**: The simulated LAN, owning all devices, the physical
//!   topology, the shared snapshot index and the packet counters. See
//!   [`send_packet`](network::Network::send_packet) for the forwarding simulation.
//!
//! - **[`RouteTable`](route_table::RouteTable)**: The routing table of a router, a
//!   height-balanced binary search tree keyed by `(prefix, metric)` with per-rotation-case
//!   counters, and a longest-prefix-match lookup independent of the key ordering.
//!
//! - **[`SnapshotIndex`](snapshot_index::SnapshotIndex)**: The configuration snapshot index, a
//!   B-Tree of fixed minimum degree with split and merge counters. Shared by all devices of a
//!   network.
//!
//! - **[`PolicyTrie`](policy_trie::PolicyTrie)**: The forwarding policies of a router, a binary
//!   trie over address bits with longest-prefix-match retrieval and per-key overlay semantics.
//!
//! - **[`Shell`](shell::Shell)**: The modal command shell, a pure function from (state, line)
//!   to a textual [`Reply`](shell::Reply). The REPL binary owns the input loop.
//!
//! - **[`ErrorJournal`](journal::ErrorJournal)**: Sequenced, timestamped session log of every
//!   error surfaced to the operator.
//!
//! - **[`persist`]**: Saving and restoring a network as a structural JSON dump, rebuilding every
//!   tree node for node.
//!
//! - **[`presets`]**: Pre-built networks, most notably the seeded lab network the simulator
//!   starts with.

pub mod addr;
pub mod device;
pub mod error;
pub mod journal;
pub mod network;
pub mod persist;
pub mod policy_trie;
pub mod presets;
pub mod report;
pub mod route_table;
pub mod shell;
pub mod snapshot_index;
pub mod types;

mod test;

pub use error::Error;
pub use network::Network;
pub use shell::{Reply, Shell};
