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

//! Module containing the modal, router-style command shell.
//!
//! The shell is a pure function from (shell state, network, command line) to a textual
//! [`Reply`] plus state updates; the REPL binary owns the input loop and termination. Four
//! modes mirror the classic router CLI hierarchy: User, Privileged, Configure and Interface.
//! Every rejected command is appended to the error journal together with the offending line.

use crate::addr::{mask_to_prefix_len, parse_addr, Prefix};
use crate::device::RouterData;
use crate::journal::{ErrorJournal, ErrorKind};
use crate::network::{Network, PacketOutcome};
use crate::persist;
use crate::policy_trie::PolicyValue;
use crate::report;
use crate::route_table::RouteEntry;

use log::*;
use maplit::btreemap;

/// The file used by `write` and `restore` when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lan_config.json";

/// The mode the shell is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Initial mode: connect to a device, list devices.
    User,
    /// Inspection mode on a selected device (`enable`).
    Privileged,
    /// Global configuration mode (`configure terminal`).
    Configure,
    /// Per-interface configuration mode (`interface <name>`).
    Interface,
}

/// The reply of the shell to one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text to show to the operator. May be empty.
    pub output: String,
    /// True if the session is over and the REPL should terminate.
    pub done: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self { output: output.into(), done: false }
    }
}

/// # Command Shell
///
/// Holds the CLI context (mode, selected device and interface) and the error journal of the
/// session. All network state lives in the [`Network`] passed to [`Shell::process`].
#[derive(Debug, Default)]
pub struct Shell {
    mode: Mode,
    device: Option<String>,
    interface: Option<String>,
    journal: ErrorJournal,
}

impl Default for Mode {
    fn default() -> Self {
        Self::User
    }
}

impl Shell {
    /// Create a new shell in User mode, with nothing selected.
    pub fn new() -> Self {
        Self { mode: Mode::User, device: None, interface: None, journal: ErrorJournal::new() }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The currently selected device, if any.
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// The error journal of this session.
    pub fn journal(&self) -> &ErrorJournal {
        &self.journal
    }

    /// The prompt matching the current mode and selection.
    pub fn prompt(&self) -> String {
        let name = self.device.as_deref().unwrap_or("");
        match self.mode {
            Mode::User => format!("{}> ", name),
            Mode::Privileged => format!("{}# ", name),
            Mode::Configure => format!("{}(config)# ", name),
            Mode::Interface => format!("{}(config-if)# ", name),
        }
    }

    /// Process one command line against the network. Empty lines produce an empty reply.
    pub fn process(&mut self, net: &mut Network, line: &str) -> Reply {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Reply::text("");
        }
        let cmd = tokens[0].to_lowercase();
        debug!("processing command: {}", line);

        // exit and end are global
        if cmd == "exit" {
            return self.leave_mode();
        }
        if cmd == "end" {
            return match self.mode {
                Mode::Configure | Mode::Interface => {
                    self.mode = Mode::Privileged;
                    self.interface = None;
                    Reply::text("\nBack to privileged mode\n")
                }
                _ => self.reject(
                    ErrorKind::Syntax,
                    "'end' is only valid in configure or interface mode",
                    line,
                ),
            };
        }
        if cmd == "help" {
            return Reply::text(self.help());
        }

        match self.mode {
            Mode::User => self.process_user(net, &cmd, &tokens, line),
            Mode::Privileged => self.process_privileged(net, &cmd, &tokens, line),
            Mode::Configure => self.process_configure(net, &cmd, &tokens, line),
            Mode::Interface => self.process_interface(net, &cmd, &tokens, line),
        }
    }

    fn leave_mode(&mut self) -> Reply {
        match self.mode {
            Mode::User => Reply { output: format!("{}\n", banner("SESSION TERMINATED")), done: true },
            Mode::Interface => {
                self.mode = Mode::Configure;
                self.interface = None;
                Reply::text("\nBack to configure mode\n")
            }
            Mode::Configure => {
                self.mode = Mode::Privileged;
                Reply::text("\nBack to privileged mode\n")
            }
            Mode::Privileged => {
                self.mode = Mode::User;
                self.device = None;
                Reply::text("\nBack to user mode\n")
            }
        }
    }

    fn process_user(&mut self, net: &mut Network, cmd: &str, tokens: &[&str], line: &str) -> Reply {
        match cmd {
            "console" if tokens.len() == 2 => {
                let name = tokens[1];
                if net.device_by_name(name).is_some() {
                    self.device = Some(name.to_string());
                    Reply::text(format!("\nConnected to {}\n", name))
                } else {
                    self.reject(
                        ErrorKind::Connection,
                        format!("Device '{}' not found", name),
                        line,
                    )
                }
            }
            "enable" => {
                if self.device.is_some() {
                    self.mode = Mode::Privileged;
                    Reply::text(format!(
                        "{}\nWarning: configuration commands are now available. Type 'help' for a list.\n",
                        banner("PRIVILEGED MODE"),
                    ))
                } else {
                    self.reject(
                        ErrorKind::Command,
                        "Connect to a device first (console <device>)",
                        line,
                    )
                }
            }
            "list" => {
                let devices = net
                    .device_names()
                    .into_iter()
                    .filter_map(|name| {
                        net.device_by_name(&name)
                            .map(|d| format!("  {} ({})", d.name(), d.kind().as_str()))
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Reply::text(format!("{}\n{}\n", banner("AVAILABLE DEVICES"), devices))
            }
            _ => self.reject(ErrorKind::Syntax, "Invalid command in user mode", line),
        }
    }

    fn process_privileged(
        &mut self,
        net: &mut Network,
        cmd: &str,
        tokens: &[&str],
        line: &str,
    ) -> Reply {
        let name = match &self.device {
            Some(name) => name.clone(),
            None => return self.reject(ErrorKind::State, "No device selected", line),
        };

        match (cmd, tokens.get(1).copied(), tokens.get(2).copied()) {
            ("configure", Some("terminal"), _) => {
                self.mode = Mode::Configure;
                Reply::text(format!("{}\n", banner("GLOBAL CONFIGURATION MODE")))
            }
            ("disable", _, _) => {
                self.mode = Mode::User;
                Reply::text("\nBack to user mode\n")
            }
            ("show", Some("interfaces"), _) => self.show_interfaces(net, &name),
            ("show", Some("ip"), Some("route")) => self.with_router(net, &name, line, |data| {
                let routes = data
                    .routes
                    .iter()
                    .map(|entry| entry.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}\n{}\n", banner(&format!("ROUTING TABLE OF {}", name)), routes)
            }),
            ("show", Some("route"), Some("avl-stats")) => {
                self.with_router(net, &name, line, |data| format!("{}\n", data.routes.stats()))
            }
            ("show", Some("ip"), Some("route-tree")) => self.with_router(net, &name, line, |data| {
                format!("{}\n{}", banner(&format!("ROUTE TREE OF {}", name)), data.routes.render_tree())
            }),
            ("show", Some("snapshots"), _) => {
                if net.snapshots().is_empty() {
                    Reply::text("No snapshots stored.\n")
                } else {
                    let listing = net
                        .snapshots()
                        .iter()
                        .map(|(k, v)| format!("{} -> {}", k, v))
                        .collect::<Vec<_>>()
                        .join("\n");
                    Reply::text(format!("{}\n{}\n", banner("CONFIGURATION SNAPSHOTS"), listing))
                }
            }
            ("btree", Some("stats"), _) => Reply::text(format!("{}\n", net.snapshots().stats())),
            ("show", Some("ip"), Some("prefix-tree")) => self.with_router(net, &name, line, |data| {
                format!("{}\n{}", banner(&format!("PREFIX TREE OF {}", name)), data.policies.render())
            }),
            ("show", Some("error-log"), count) => {
                let count = match count {
                    Some(n) => match n.parse::<usize>() {
                        Ok(n) => Some(n),
                        Err(_) => {
                            return self.reject(
                                ErrorKind::Syntax,
                                "The count must be an integer",
                                line,
                            )
                        }
                    },
                    None => None,
                };
                if self.journal.is_empty() {
                    Reply::text("No errors recorded.\n")
                } else {
                    let listing = self
                        .journal
                        .recent(count)
                        .iter()
                        .map(|record| record.to_string())
                        .collect::<Vec<_>>()
                        .join("\n");
                    Reply::text(format!("{}\n{}\n", banner("ERROR LOG"), listing))
                }
            }
            ("show", Some("statistics"), _) => {
                Reply::text(report::network_report(net, &self.journal))
            }
            ("send", _, _) => {
                if tokens.len() < 4 {
                    return self.reject(
                        ErrorKind::Syntax,
                        "Usage: send <source> <destination-ip> <message>",
                        line,
                    );
                }
                let (source, destination) = (tokens[1], tokens[2]);
                let message = tokens[3..].join(" ");
                self.send(net, source, destination, &message, line)
            }
            ("write", file, _) => {
                let file = file.unwrap_or(DEFAULT_CONFIG_FILE);
                match persist::save_network(net, file) {
                    Ok(()) => Reply::text(format!("[OK] configuration written to {}\n", file)),
                    Err(e) => self.reject(ErrorKind::Config, e.to_string(), line),
                }
            }
            ("restore", file, _) => {
                let file = file.unwrap_or(DEFAULT_CONFIG_FILE);
                match persist::load_network(file) {
                    Ok(loaded) => {
                        *net = loaded;
                        // the selected device may not exist in the restored network
                        if net.device_by_name(&name).is_none() {
                            self.mode = Mode::User;
                            self.device = None;
                        }
                        Reply::text(format!("[OK] configuration restored from {}\n", file))
                    }
                    Err(e) => self.reject(ErrorKind::Config, e.to_string(), line),
                }
            }
            _ => self.reject(ErrorKind::Syntax, "Invalid command in privileged mode", line),
        }
    }

    fn show_interfaces(&mut self, net: &Network, name: &str) -> Reply {
        // name is a selected device, it exists
        let device = match net.device_by_name(name) {
            Some(device) => device,
            None => return Reply::text(format!("Error: Device '{}' not found", name)),
        };
        let mut blocks = Vec::new();
        for iface in device.interfaces() {
            let peers = net.connections_of(name, iface.name()).unwrap_or_default();
            let peers = if peers.is_empty() {
                " none".to_string()
            } else {
                peers
                    .iter()
                    .map(|(d, i)| format!("\n    {}/{}", d, i))
                    .collect::<String>()
            };
            blocks.push(format!(
                "Interface: {}\nState: {}\nIP: {}\nConnections:{}",
                iface.name(),
                if iface.enabled() { "UP" } else { "DOWN" },
                iface.address_str().unwrap_or_else(|| "no IP address".to_string()),
                peers,
            ));
        }
        Reply::text(format!(
            "{}\n\n{}\n{}\n",
            banner(&format!("INTERFACES OF {}", name)),
            blocks.join("\n\n"),
            "=".repeat(60),
        ))
    }

    fn send(
        &mut self,
        net: &mut Network,
        source: &str,
        destination: &str,
        message: &str,
        line: &str,
    ) -> Reply {
        match net.send_packet(source, destination, message) {
            Ok(PacketOutcome::Blocked) => {
                self.journal.record(
                    ErrorKind::PacketBlocked,
                    format!("Packet towards {} blocked by policy on {}", destination, source),
                    Some(line),
                );
                Reply::text(format!("[BLOCKED] packet towards {} discarded by policy\n", destination))
            }
            Ok(PacketOutcome::NoRoute) => {
                self.journal.record(
                    ErrorKind::PacketDiscarded,
                    format!("No route towards {} on {}", destination, source),
                    Some(line),
                );
                Reply::text(format!("[DISCARDED] no route towards {}\n", destination))
            }
            Ok(PacketOutcome::Forwarded { next_hop, ttl_min }) => {
                let ttl = ttl_min.map(|t| format!(" (ttl-min {})", t)).unwrap_or_default();
                Reply::text(format!("[OK] packet forwarded via {}{}\n", next_hop, ttl))
            }
            Ok(PacketOutcome::Direct) => {
                Reply::text("[OK] packet delivered directly\n".to_string())
            }
            Err(e) => self.reject(ErrorKind::Packet, e.to_string(), line),
        }
    }

    fn process_configure(
        &mut self,
        net: &mut Network,
        cmd: &str,
        tokens: &[&str],
        line: &str,
    ) -> Reply {
        let name = match &self.device {
            Some(name) => name.clone(),
            None => return self.reject(ErrorKind::State, "No device selected", line),
        };

        match cmd {
            "interface" if tokens.len() == 2 => {
                let iface = tokens[1];
                match net.add_interface(&name, iface) {
                    Ok(created) => {
                        if created {
                            info!("{}: created interface {}", name, iface);
                        }
                        self.mode = Mode::Interface;
                        self.interface = Some(iface.to_string());
                        Reply::text(format!("{}\n", banner(&format!("CONFIGURING INTERFACE {}", iface))))
                    }
                    Err(e) => self.reject(ErrorKind::Config, e.to_string(), line),
                }
            }
            "hostname" if tokens.len() == 2 => {
                let new = tokens[1];
                match net.rename_device(&name, new) {
                    Ok(()) => {
                        self.device = Some(new.to_string());
                        Reply::text(format!("Device name changed to {}\n", new))
                    }
                    Err(e) => self.reject(ErrorKind::Config, e.to_string(), line),
                }
            }
            "ip" if tokens.get(1) == Some(&"route") => {
                self.configure_route(net, &name, tokens, line)
            }
            "policy" => self.configure_policy(net, &name, tokens, line),
            "save" if tokens.get(1) == Some(&"snapshot") && tokens.len() == 3 => {
                let key = tokens[2].to_string();
                let file_name = format!("snap_{:05}.cfg", net.snapshots().iter().count() + 1);
                net.snapshots_mut().insert(key.clone(), file_name.clone());
                Reply::text(format!("[OK] snapshot {} -> file: {} (indexed)\n", key, file_name))
            }
            "load" if tokens.get(1) == Some(&"config") && tokens.len() == 3 => {
                let key = tokens[2].to_string();
                match net.snapshots().get(&key) {
                    Some(file_name) => Reply::text(format!(
                        "[OK] configuration loaded from {} (key: {})\n",
                        file_name, key
                    )),
                    None => self.reject(
                        ErrorKind::Config,
                        format!("Snapshot with key '{}' not found", key),
                        line,
                    ),
                }
            }
            _ => self.reject(ErrorKind::Syntax, "Invalid command in configure mode", line),
        }
    }

    /// `ip route add <prefix> <mask> via <next-hop> [metric N]` and
    /// `ip route del <prefix> <mask>`.
    fn configure_route(
        &mut self,
        net: &mut Network,
        name: &str,
        tokens: &[&str],
        line: &str,
    ) -> Reply {
        match tokens.get(2).copied() {
            Some("add") => {
                if tokens.len() < 7 || tokens[5] != "via" {
                    return self.reject(
                        ErrorKind::Syntax,
                        "Usage: ip route add <prefix> <mask> via <next-hop> [metric N]",
                        line,
                    );
                }
                let (prefix, mask, next_hop) = (tokens[3], tokens[4], tokens[6]);
                let mask_len = match mask_to_prefix_len(mask) {
                    Ok(len) => len,
                    Err(e) => return self.reject(ErrorKind::Syntax, e.to_string(), line),
                };
                let metric = if tokens.len() >= 9 && tokens[7] == "metric" {
                    match tokens[8].parse::<u32>() {
                        Ok(metric) => metric,
                        Err(_) => {
                            return self.reject(
                                ErrorKind::Syntax,
                                "The metric must be an integer",
                                line,
                            )
                        }
                    }
                } else {
                    1
                };
                let entry = match RouteEntry::new(prefix, mask_len, next_hop, metric) {
                    Ok(entry) => entry,
                    Err(e) => return self.reject(ErrorKind::Syntax, e.to_string(), line),
                };
                let reply = format!("Route {} added.\n", entry);
                self.with_router_mut(net, name, line, move |data| {
                    data.routes.insert(entry);
                    reply
                })
            }
            Some("del") => {
                if tokens.len() != 5 {
                    return self.reject(
                        ErrorKind::Syntax,
                        "Usage: ip route del <prefix> <mask>",
                        line,
                    );
                }
                let (prefix, mask) = (tokens[3], tokens[4]);
                let mask_len = match mask_to_prefix_len(mask) {
                    Ok(len) => len,
                    Err(e) => return self.reject(ErrorKind::Syntax, e.to_string(), line),
                };
                if let Err(e) = parse_addr(prefix) {
                    return self.reject(ErrorKind::Syntax, e.to_string(), line);
                }
                let prefix = prefix.to_string();
                self.with_router_mut(net, name, line, move |data| {
                    if data.routes.remove(&prefix, mask_len) {
                        format!("Route {}/{} removed.\n", prefix, mask_len)
                    } else {
                        format!("No route {}/{} found.\n", prefix, mask_len)
                    }
                })
            }
            _ => self.reject(ErrorKind::Syntax, "Invalid 'ip route' command", line),
        }
    }

    /// `policy set <prefix> <mask> ttl-min <N>`, `policy set <prefix> <mask> block` and
    /// `policy unset <prefix> <mask>`.
    fn configure_policy(
        &mut self,
        net: &mut Network,
        name: &str,
        tokens: &[&str],
        line: &str,
    ) -> Reply {
        let parse_prefix = |prefix: &str, mask: &str| -> Result<Prefix, String> {
            let mask_len = mask_to_prefix_len(mask).map_err(|e| e.to_string())?;
            Prefix::new(prefix, mask_len).map_err(|e| e.to_string())
        };
        match tokens.get(1).copied() {
            Some("set") if tokens.len() >= 5 => {
                let prefix = match parse_prefix(tokens[2], tokens[3]) {
                    Ok(prefix) => prefix,
                    Err(e) => return self.reject(ErrorKind::Syntax, e, line),
                };
                let (policies, reply) = match tokens[4] {
                    "ttl-min" if tokens.len() == 6 => match tokens[5].parse::<i64>() {
                        Ok(ttl) => (
                            btreemap! {"ttl-min".to_string() => PolicyValue::Number(ttl)},
                            format!("Minimum TTL policy {} set for {}.\n", ttl, prefix),
                        ),
                        Err(_) => {
                            return self.reject(
                                ErrorKind::Syntax,
                                "The minimum TTL must be an integer",
                                line,
                            )
                        }
                    },
                    "block" if tokens.len() == 5 => (
                        btreemap! {"block".to_string() => PolicyValue::Flag(true)},
                        format!("Blocking policy set for {}.\n", prefix),
                    ),
                    _ => {
                        return self.reject(
                            ErrorKind::Syntax,
                            "Usage: policy set <prefix> <mask> ttl-min <N> | block",
                            line,
                        )
                    }
                };
                self.with_router_mut(net, name, line, move |data| {
                    data.policies.insert_prefix(&prefix, policies);
                    reply
                })
            }
            Some("unset") if tokens.len() == 4 => {
                let prefix = match parse_prefix(tokens[2], tokens[3]) {
                    Ok(prefix) => prefix,
                    Err(e) => return self.reject(ErrorKind::Syntax, e, line),
                };
                self.with_router_mut(net, name, line, move |data| {
                    if data.policies.remove_prefix(&prefix) {
                        format!("Policy for {} removed.\n", prefix)
                    } else {
                        format!("No policy registered for {}.\n", prefix)
                    }
                })
            }
            _ => self.reject(ErrorKind::Syntax, "Invalid 'policy' command", line),
        }
    }

    fn process_interface(
        &mut self,
        net: &mut Network,
        cmd: &str,
        tokens: &[&str],
        line: &str,
    ) -> Reply {
        let (device, iface) = match (&self.device, &self.interface) {
            (Some(device), Some(iface)) => (device.clone(), iface.clone()),
            _ => return self.reject(ErrorKind::State, "No interface selected", line),
        };
        let slot = match net.device_by_name_mut(&device).and_then(|d| d.interface_mut(&iface)) {
            Some(slot) => slot,
            None => return self.reject(ErrorKind::State, "No interface selected", line),
        };

        match cmd {
            "ip" if tokens.get(1) == Some(&"address") && tokens.len() == 3 => {
                match parse_addr(tokens[2]) {
                    Ok(addr) => {
                        slot.set_address(addr);
                        Reply::text(format!("\nIP address {} assigned to {}\n", tokens[2], iface))
                    }
                    Err(e) => self.reject(ErrorKind::Syntax, e.to_string(), line),
                }
            }
            "shutdown" => {
                slot.set_enabled(false);
                Reply::text(format!("\nInterface {} DISABLED (shutdown)\n", iface))
            }
            "no" if tokens.get(1) == Some(&"shutdown") => {
                slot.set_enabled(true);
                Reply::text(format!("\nInterface {} ENABLED (no shutdown)\n", iface))
            }
            _ => self.reject(ErrorKind::Syntax, "Invalid command in interface mode", line),
        }
    }

    /// Run a read-only action on the selected device's router data, or reject if the device is
    /// not a router.
    fn with_router<F>(&mut self, net: &Network, name: &str, line: &str, action: F) -> Reply
    where
        F: FnOnce(&RouterData) -> String,
    {
        match net.device_by_name(name).and_then(|d| d.router_data()) {
            Some(data) => Reply::text(action(data)),
            None => self.reject(
                ErrorKind::DeviceType,
                format!("Device '{}' is not a router", name),
                line,
            ),
        }
    }

    /// Run a mutating action on the selected device's router data, or reject if the device is
    /// not a router.
    fn with_router_mut<F>(&mut self, net: &mut Network, name: &str, line: &str, action: F) -> Reply
    where
        F: FnOnce(&mut RouterData) -> String,
    {
        match net.device_by_name_mut(name).and_then(|d| d.router_data_mut()) {
            Some(data) => Reply::text(action(data)),
            None => self.reject(
                ErrorKind::DeviceType,
                format!("Device '{}' is not a router", name),
                line,
            ),
        }
    }

    /// Journal the error and render it as the reply.
    fn reject(&mut self, kind: ErrorKind, message: impl Into<String>, line: &str) -> Reply {
        let message = message.into();
        warn!("rejected command '{}': {}", line, message);
        self.journal.record(kind, message.clone(), Some(line));
        Reply::text(format!("Error: {}", message))
    }

    fn help(&self) -> String {
        let commands = match self.mode {
            Mode::User => {
                "
Available commands:
  console <device>   - Connect to a device
  enable             - Enter privileged mode
  list               - List available devices
  help               - Show this help
  exit               - Leave the simulator"
            }
            Mode::Privileged => {
                "
Available commands:
  configure terminal - Enter configuration mode
  show interfaces    - Show the interfaces of the device
  show ip route      - Show the routing table
  show route avl-stats - Show routing table statistics
  show ip route-tree - Show the route tree
  show snapshots     - Show the configuration snapshots
  btree stats        - Show snapshot index statistics
  show ip prefix-tree - Show the policy prefix tree
  show error-log [n] - Show the error log
  show statistics    - Show the network statistics report
  send <source> <destination-ip> <message> - Send a simulated packet
  write [file]       - Write the network to a file
  restore [file]     - Restore the network from a file
  disable            - Back to user mode
  help               - Show this help
  exit               - Back to user mode"
            }
            Mode::Configure => {
                "
Available commands:
  interface <name>   - Configure an interface
  hostname <name>    - Rename the device
  ip route add <prefix> <mask> via <next-hop> [metric N] - Add a route
  ip route del <prefix> <mask> - Remove a route
  policy set <prefix> <mask> ttl-min <N> - Set a minimum TTL policy
  policy set <prefix> <mask> block - Set a blocking policy
  policy unset <prefix> <mask> - Remove a policy
  save snapshot <key> - Index the configuration as a snapshot
  load config <key>  - Look up a configuration snapshot
  exit               - Back to privileged mode
  end                - Back to privileged mode"
            }
            Mode::Interface => {
                "
Available commands:
  ip address <addr>  - Assign an IP address
  shutdown           - Disable the interface
  no shutdown        - Enable the interface
  exit               - Back to configure mode
  end                - Back to privileged mode"
            }
        };
        format!("{}{}\n{}\n", banner("SYSTEM HELP"), commands, "=".repeat(60))
    }
}

/// A 60 column wide, ruled banner with a centered title.
fn banner(title: &str) -> String {
    let ruler = "=".repeat(60);
    format!("\n{}\n{:^60}\n{}", ruler, title, ruler)
}
