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

use lansim::network::Network;
use lansim::persist;
use lansim::presets;
use lansim::shell::Shell;

use clap::Clap;
use log::*;
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Clap, Debug)]
#[clap(name = "LanSim (Binary)", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Start with an empty network instead of the seeded lab network
    #[clap(short = 'e', long)]
    empty: bool,
    /// Load the network from a JSON dump instead of the seeded lab network
    #[clap(short = 'l', long)]
    load: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CommandLineArguments::parse();

    // initialize the env logger
    pretty_env_logger::init();

    let mut net = if let Some(file) = args.load {
        info!("Starting from the network stored in {}", file);
        persist::load_network(&file)?
    } else if args.empty {
        info!("Starting from an empty network");
        Network::new()
    } else {
        info!("Starting from the seeded lab network");
        presets::lab_network()
    };

    let mut shell = Shell::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        {
            let mut out = stdout.lock();
            write!(out, "{}", shell.prompt())?;
            out.flush()?;
        }
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let reply = shell.process(&mut net, &line);
        if !reply.output.is_empty() {
            println!("{}", reply.output);
        }
        if reply.done {
            break;
        }
    }

    Ok(())
}
