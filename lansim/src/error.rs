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

//! Module containing the top-level error enumeration.

use crate::addr::AddrError;
use crate::persist::PersistError;
use crate::types::NetworkError;

use thiserror::Error;

/// Top-level error, aggregating all errors of the simulator.
#[derive(Debug, Error)]
pub enum Error {
    /// Error while parsing an address, mask or prefix.
    #[error("Address Error: {0}")]
    Addr(#[from] AddrError),
    /// Error while manipulating the network.
    #[error("Network Error: {0}")]
    Network(#[from] NetworkError),
    /// Error while saving or loading a network dump.
    #[error("Persistence Error: {0}")]
    Persist(#[from] PersistError),
}
