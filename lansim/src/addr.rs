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

//! Module for parsing and formatting IPv4 addresses, subnet masks and prefixes. Every address
//! entering the simulator passes through this module before it reaches any tree structure.

use std::fmt;
use thiserror::Error;

/// Error while parsing an IPv4 address, subnet mask or prefix.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AddrError {
    /// The address is not made of four dot-separated decimal octets.
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),
    /// One of the octets is not in the range 0..=255.
    #[error("Octet out of range in address: {0}")]
    OctetOutOfRange(String),
    /// The prefix length exceeds 32 bits.
    #[error("Invalid prefix length: {0}")]
    InvalidPrefixLength(u32),
    /// The subnet mask is not a contiguous run of ones followed by zeros.
    #[error("Non-contiguous subnet mask: {0}")]
    NonContiguousMask(String),
}

/// Parse a dotted-quad IPv4 address into its 32 bit representation.
pub fn parse_addr(s: &str) -> Result<u32, AddrError> {
    let octets: Vec<&str> = s.split('.').collect();
    if octets.len() != 4 {
        return Err(AddrError::InvalidAddress(s.to_string()));
    }
    let mut addr: u32 = 0;
    for octet in octets {
        // reject empty fields, signs and hex notation before parsing
        if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddrError::InvalidAddress(s.to_string()));
        }
        let value: u32 = octet.parse().map_err(|_| AddrError::InvalidAddress(s.to_string()))?;
        if value > 255 {
            return Err(AddrError::OctetOutOfRange(s.to_string()));
        }
        addr = (addr << 8) | value;
    }
    Ok(addr)
}

/// Format a 32 bit address as a dotted quad.
pub fn fmt_addr(addr: u32) -> String {
    format!("{}.{}.{}.{}", addr >> 24, (addr >> 16) & 0xff, (addr >> 8) & 0xff, addr & 0xff)
}

/// Convert a dotted-quad subnet mask (e.g. `255.255.255.0`) into its prefix length (e.g. `24`).
/// Masks whose binary form is not a contiguous run of ones followed by zeros are rejected.
pub fn mask_to_prefix_len(mask: &str) -> Result<u8, AddrError> {
    let bits = parse_addr(mask)?;
    let len = bits.count_ones();
    // a contiguous mask of length n is exactly the top n bits set
    let expected = if len == 0 { 0 } else { u32::max_value() << (32 - len) };
    if bits != expected {
        return Err(AddrError::NonContiguousMask(mask.to_string()));
    }
    Ok(len as u8)
}

/// A validated IPv4 prefix: a network address together with a prefix length. The address is
/// stored with all bits outside the prefix cleared, so two prefixes compare equal whenever they
/// describe the same network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix {
    addr: u32,
    len: u8,
}

impl Prefix {
    /// Create a new prefix from a dotted-quad network address and a prefix length in `0..=32`.
    pub fn new(addr: &str, len: u8) -> Result<Self, AddrError> {
        if len > 32 {
            return Err(AddrError::InvalidPrefixLength(len as u32));
        }
        let addr = parse_addr(addr)?;
        Ok(Self::from_parts(addr, len))
    }

    /// Create a prefix from an already parsed address, masking away the host bits.
    pub fn from_parts(addr: u32, len: u8) -> Self {
        let mask = if len == 0 { 0 } else { u32::max_value() << (32 - len as u32) };
        Self { addr: addr & mask, len }
    }

    /// The network address, with host bits cleared.
    pub fn addr(&self) -> u32 {
        self.addr
    }

    /// The prefix length in bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Returns true only for the zero-length prefix `0.0.0.0/0`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether the given address lies inside this prefix.
    pub fn contains(&self, addr: u32) -> bool {
        let mask = if self.len == 0 { 0 } else { u32::max_value() << (32 - self.len as u32) };
        (addr & mask) == self.addr
    }

    /// The `i`-th bit of the network address, counted from the most significant bit.
    pub fn bit(&self, i: u8) -> bool {
        debug_assert!(i < 32);
        (self.addr >> (31 - i as u32)) & 1 == 1
    }

    /// Iterate over the first `len` bits of the network address, most significant bit first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        let addr = self.addr;
        (0..self.len as u32).map(move |i| (addr >> (31 - i)) & 1 == 1)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", fmt_addr(self.addr), self.len)
    }
}

/// Iterate over all 32 bits of an address, most significant bit first.
pub fn addr_bits(addr: u32) -> impl Iterator<Item = bool> {
    (0..32u32).map(move |i| (addr >> (31 - i)) & 1 == 1)
}
