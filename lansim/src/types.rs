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

//! Module containing all type definitions shared across the simulator.

use crate::addr::AddrError;
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use thiserror::Error;

pub(crate) type IndexType = u32;

/// Device identification (and index into the topology graph)
pub type DeviceId = NodeIndex<IndexType>;

/// A physical link between two device interfaces, stored as the edge weight of the topology
/// graph. The interface names refer to the edge endpoints in the order they were passed to
/// `Network::connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Interface name on the first endpoint of the edge.
    pub if_a: String,
    /// Interface name on the second endpoint of the edge.
    pub if_b: String,
}

/// Physical topology graph: devices are nodes, links are edges annotated with the two
/// interface names.
pub type LanTopology = StableGraph<(), Link, Undirected, IndexType>;

/// Network Error
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    /// No device with the given name exists.
    #[error("Device '{0}' not found")]
    DeviceNotFound(String),
    /// A device with the given name already exists.
    #[error("Device '{0}' already exists")]
    DeviceNameTaken(String),
    /// The device exists, but has no interface with the given name.
    #[error("Interface '{1}' not found on device '{0}'")]
    InterfaceNotFound(String, String),
    /// The two interfaces are already linked.
    #[error("Link {0}:{1} <-> {2}:{3} already exists")]
    LinkExists(String, String, String, String),
    /// The operation requires a router, but the device is of a different kind.
    #[error("Device '{0}' is not a router")]
    NotARouter(String),
    /// An address argument could not be parsed.
    #[error("Address Error: {0}")]
    Addr(#[from] AddrError),
}
