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

use crate::addr::*;

#[test]
fn parse_and_format() {
    assert_eq!(parse_addr("0.0.0.0"), Ok(0));
    assert_eq!(parse_addr("255.255.255.255"), Ok(u32::max_value()));
    assert_eq!(parse_addr("10.0.0.1"), Ok(0x0a000001));
    assert_eq!(parse_addr("192.168.1.1"), Ok(0xc0a80101));
    assert_eq!(fmt_addr(0x0a000001), "10.0.0.1");
    assert_eq!(fmt_addr(parse_addr("172.16.254.3").unwrap()), "172.16.254.3");
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(parse_addr("10.0.0"), Err(AddrError::InvalidAddress("10.0.0".to_string())));
    assert_eq!(parse_addr("10.0.0.0.1"), Err(AddrError::InvalidAddress("10.0.0.0.1".to_string())));
    assert_eq!(parse_addr("10.0.0.x"), Err(AddrError::InvalidAddress("10.0.0.x".to_string())));
    assert_eq!(parse_addr("10..0.1"), Err(AddrError::InvalidAddress("10..0.1".to_string())));
    assert_eq!(parse_addr("10.0.0.-1"), Err(AddrError::InvalidAddress("10.0.0.-1".to_string())));
    assert_eq!(parse_addr("10.0.0.256"), Err(AddrError::OctetOutOfRange("10.0.0.256".to_string())));
    assert_eq!(parse_addr(""), Err(AddrError::InvalidAddress("".to_string())));
}

#[test]
fn mask_conversion() {
    assert_eq!(mask_to_prefix_len("0.0.0.0"), Ok(0));
    assert_eq!(mask_to_prefix_len("255.0.0.0"), Ok(8));
    assert_eq!(mask_to_prefix_len("255.255.0.0"), Ok(16));
    assert_eq!(mask_to_prefix_len("255.255.255.0"), Ok(24));
    assert_eq!(mask_to_prefix_len("255.255.255.252"), Ok(30));
    assert_eq!(mask_to_prefix_len("255.255.255.255"), Ok(32));
    assert_eq!(
        mask_to_prefix_len("255.0.255.0"),
        Err(AddrError::NonContiguousMask("255.0.255.0".to_string()))
    );
    assert_eq!(
        mask_to_prefix_len("0.255.0.0"),
        Err(AddrError::NonContiguousMask("0.255.0.0".to_string()))
    );
}

#[test]
fn prefix_masks_host_bits() {
    let p = Prefix::new("192.168.1.77", 24).unwrap();
    assert_eq!(p.to_string(), "192.168.1.0/24");
    assert_eq!(p, Prefix::new("192.168.1.0", 24).unwrap());
    assert!(p.contains(parse_addr("192.168.1.1").unwrap()));
    assert!(!p.contains(parse_addr("192.168.2.1").unwrap()));
    assert_eq!(Prefix::new("10.0.0.0", 33), Err(AddrError::InvalidPrefixLength(33)));
}

#[test]
fn prefix_zero_contains_everything() {
    let p = Prefix::new("0.0.0.0", 0).unwrap();
    assert!(p.is_empty());
    assert!(p.contains(0));
    assert!(p.contains(u32::max_value()));
    assert_eq!(p.bits().count(), 0);
}

#[test]
fn prefix_bits_walk() {
    // 10.0.0.0 = 00001010...
    let p = Prefix::new("10.0.0.0", 8).unwrap();
    let bits: Vec<bool> = p.bits().collect();
    assert_eq!(bits, vec![false, false, false, false, true, false, true, false]);
    assert!(!p.bit(0));
    assert!(p.bit(4));
    let all: Vec<bool> = addr_bits(parse_addr("128.0.0.1").unwrap()).collect();
    assert_eq!(all.len(), 32);
    assert!(all[0]);
    assert!(all[31]);
    assert!(!all[1]);
}
