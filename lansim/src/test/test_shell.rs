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

use crate::journal::ErrorKind;
use crate::network::Network;
use crate::presets;
use crate::shell::{Mode, Shell};

/// Drive the shell through a sequence of commands, returning the last output.
fn run(shell: &mut Shell, net: &mut Network, commands: &[&str]) -> String {
    let mut output = String::new();
    for command in commands {
        let reply = shell.process(net, command);
        assert!(!reply.done, "session terminated early on '{}'", command);
        output = reply.output;
    }
    output
}

#[test]
fn mode_transitions_and_prompts() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    assert_eq!(shell.prompt(), "> ");

    run(&mut shell, &mut net, &["console Router1"]);
    assert_eq!(shell.prompt(), "Router1> ");
    assert_eq!(shell.mode(), Mode::User);

    run(&mut shell, &mut net, &["enable"]);
    assert_eq!(shell.prompt(), "Router1# ");
    assert_eq!(shell.mode(), Mode::Privileged);

    run(&mut shell, &mut net, &["configure terminal"]);
    assert_eq!(shell.prompt(), "Router1(config)# ");

    run(&mut shell, &mut net, &["interface Gi0/0"]);
    assert_eq!(shell.prompt(), "Router1(config-if)# ");

    // exit walks back one mode at a time
    run(&mut shell, &mut net, &["exit"]);
    assert_eq!(shell.mode(), Mode::Configure);
    run(&mut shell, &mut net, &["exit"]);
    assert_eq!(shell.mode(), Mode::Privileged);
    run(&mut shell, &mut net, &["exit"]);
    assert_eq!(shell.mode(), Mode::User);
    assert_eq!(shell.prompt(), "> ");

    // exit in user mode terminates the session
    let reply = shell.process(&mut net, "exit");
    assert!(reply.done);
}

#[test]
fn end_returns_to_privileged() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable", "configure terminal", "interface Gi0/0"]);
    run(&mut shell, &mut net, &["end"]);
    assert_eq!(shell.mode(), Mode::Privileged);

    // end outside configure or interface mode is an error
    let output = run(&mut shell, &mut net, &["disable", "end"]);
    assert!(output.starts_with("Error:"));
    assert_eq!(shell.journal().records().last().unwrap().kind, ErrorKind::Syntax);
}

#[test]
fn enable_requires_a_device() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    let output = run(&mut shell, &mut net, &["enable"]);
    assert!(output.starts_with("Error:"));
    assert_eq!(shell.mode(), Mode::User);
    assert_eq!(shell.journal().len(), 1);
    assert_eq!(shell.journal().records()[0].kind, ErrorKind::Command);
    assert_eq!(shell.journal().records()[0].command.as_deref(), Some("enable"));
}

#[test]
fn console_to_unknown_device() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    let output = run(&mut shell, &mut net, &["console Router9"]);
    assert!(output.contains("Router9"));
    assert_eq!(shell.journal().records()[0].kind, ErrorKind::Connection);
    assert_eq!(shell.device(), None);
}

#[test]
fn list_shows_devices_and_kinds() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    let output = run(&mut shell, &mut net, &["list"]);
    assert!(output.contains("Router1 (router)"));
    assert!(output.contains("Switch1 (switch)"));
}

#[test]
fn route_commands_modify_the_table() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable", "configure terminal"]);

    let output = run(
        &mut shell,
        &mut net,
        &["ip route add 172.16.0.0 255.255.0.0 via 10.0.0.254 metric 7"],
    );
    assert!(output.contains("172.16.0.0/16 via 10.0.0.254 metric 7"));
    let routes = &net.device_by_name("Router1").unwrap().router_data().unwrap().routes;
    assert_eq!(routes.len(), 3);

    let output = run(&mut shell, &mut net, &["ip route del 172.16.0.0 255.255.0.0"]);
    assert!(output.contains("removed"));
    let routes = &net.device_by_name("Router1").unwrap().router_data().unwrap().routes;
    assert_eq!(routes.len(), 2);

    // non-contiguous masks are rejected and journaled
    let output = run(&mut shell, &mut net, &["ip route add 172.16.0.0 255.0.255.0 via 10.0.0.254"]);
    assert!(output.starts_with("Error:"));
    assert_eq!(shell.journal().records().last().unwrap().kind, ErrorKind::Syntax);
}

#[test]
fn route_commands_require_a_router() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Switch1", "enable", "configure terminal"]);
    let output =
        run(&mut shell, &mut net, &["ip route add 10.0.0.0 255.0.0.0 via 10.0.0.254"]);
    assert!(output.contains("not a router"));
    assert_eq!(shell.journal().records().last().unwrap().kind, ErrorKind::DeviceType);
}

#[test]
fn policy_commands_modify_the_trie() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router2", "enable", "configure terminal"]);

    run(&mut shell, &mut net, &["policy set 172.16.0.0 255.255.0.0 block"]);
    let trie = &net.device_by_name("Router2").unwrap().router_data().unwrap().policies;
    assert_eq!(trie.registered().len(), 2);

    let output = run(&mut shell, &mut net, &["policy unset 172.16.0.0 255.255.0.0"]);
    assert!(output.contains("removed"));
    let output = run(&mut shell, &mut net, &["policy unset 172.16.0.0 255.255.0.0"]);
    assert!(output.contains("No policy"));
}

#[test]
fn snapshot_commands_use_the_index() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable", "configure terminal"]);

    // the preset already stores two snapshots, the new file name continues the sequence
    let output = run(&mut shell, &mut net, &["save snapshot test_config"]);
    assert!(output.contains("test_config -> file: snap_00003.cfg"));

    let output = run(&mut shell, &mut net, &["load config test_config"]);
    assert!(output.contains("snap_00003.cfg"));

    let output = run(&mut shell, &mut net, &["load config missing_config"]);
    assert!(output.starts_with("Error:"));
    assert_eq!(shell.journal().records().last().unwrap().kind, ErrorKind::Config);
}

#[test]
fn interface_mode_configures_the_interface() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(
        &mut shell,
        &mut net,
        &["console Router1", "enable", "configure terminal", "interface Gi0/2"],
    );

    run(&mut shell, &mut net, &["ip address 10.0.1.1"]);
    let iface = net.device_by_name("Router1").unwrap().interface("Gi0/2").unwrap();
    assert_eq!(iface.address_str().unwrap(), "10.0.1.1");
    assert!(iface.enabled());

    run(&mut shell, &mut net, &["shutdown"]);
    assert!(!net.device_by_name("Router1").unwrap().interface("Gi0/2").unwrap().enabled());
    run(&mut shell, &mut net, &["no shutdown"]);
    assert!(net.device_by_name("Router1").unwrap().interface("Gi0/2").unwrap().enabled());

    let output = run(&mut shell, &mut net, &["ip address nonsense"]);
    assert!(output.starts_with("Error:"));
}

#[test]
fn hostname_renames_device_and_prompt() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable", "configure terminal"]);
    run(&mut shell, &mut net, &["hostname Core1"]);
    assert_eq!(shell.prompt(), "Core1(config)# ");
    assert!(net.device_by_name("Core1").is_some());
    assert!(net.device_by_name("Router1").is_none());
}

#[test]
fn send_records_blocked_packets() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable"]);

    let output = run(&mut shell, &mut net, &["send Router1 192.168.2.5 hello"]);
    assert!(output.contains("[BLOCKED]"));
    assert_eq!(shell.journal().records().last().unwrap().kind, ErrorKind::PacketBlocked);

    let output = run(&mut shell, &mut net, &["send Router2 10.1.2.3 hello there"]);
    assert!(output.contains("[OK]"));
    assert!(output.contains("192.168.2.1"));
    assert_eq!(net.packets_sent(), 2);
    assert_eq!(net.packets_delivered(), 1);
}

#[test]
fn show_commands_render() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable"]);

    let output = run(&mut shell, &mut net, &["show ip route"]);
    assert!(output.contains("0.0.0.0/0 via 10.0.0.254 metric 10"));
    assert!(output.contains("192.168.2.0/24 via 192.168.1.254 metric 1"));

    let output = run(&mut shell, &mut net, &["show route avl-stats"]);
    assert!(output.contains("nodes=2"));
    assert!(output.contains("rotations:"));

    let output = run(&mut shell, &mut net, &["show snapshots"]);
    assert!(output.contains("initial_config -> snap_00001.cfg"));

    let output = run(&mut shell, &mut net, &["btree stats"]);
    assert!(output.contains("order=4"));

    let output = run(&mut shell, &mut net, &["show ip prefix-tree"]);
    assert!(output.contains("10.0.0.0/8"));
    assert!(output.contains("block: true"));

    let output = run(&mut shell, &mut net, &["show interfaces"]);
    assert!(output.contains("Interface: Gi0/0"));
    assert!(output.contains("192.168.1.1"));
    assert!(output.contains("Switch1/Fa0/1"));

    let output = run(&mut shell, &mut net, &["show statistics"]);
    assert!(output.contains("Network Statistics Report"));
    assert!(output.contains("Devices:"));
    assert!(output.contains("Snapshot index"));
}

#[test]
fn error_log_shows_recent_errors() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    run(&mut shell, &mut net, &["console Router1", "enable"]);

    let output = run(&mut shell, &mut net, &["show error-log"]);
    assert!(output.contains("No errors recorded."));

    run(&mut shell, &mut net, &["bogus command", "another bogus one"]);
    let output = run(&mut shell, &mut net, &["show error-log 1"]);
    assert!(output.contains("SyntaxError"));
    assert!(output.contains("another bogus one"));
    assert!(!output.contains("bogus command\n"));

    let output = run(&mut shell, &mut net, &["show error-log x"]);
    assert!(output.starts_with("Error:"));
}

#[test]
fn privileged_commands_require_selection() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    // force privileged mode without a device by driving the state machine backwards is not
    // possible through commands; a fresh shell in user mode rejects privileged commands instead
    let output = run(&mut shell, &mut net, &["show ip route"]);
    assert!(output.starts_with("Error:"));
    assert_eq!(shell.journal().records()[0].kind, ErrorKind::Syntax);
}

#[test]
fn help_is_mode_specific() {
    let mut net = presets::lab_network();
    let mut shell = Shell::new();
    let output = run(&mut shell, &mut net, &["help"]);
    assert!(output.contains("console <device>"));
    run(&mut shell, &mut net, &["console Router1", "enable"]);
    let output = run(&mut shell, &mut net, &["help"]);
    assert!(output.contains("configure terminal"));
    assert!(output.contains("show ip prefix-tree"));
}
