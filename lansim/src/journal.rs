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

//! Module containing the error journal. Every error surfaced to the operator is appended here
//! as a sequenced, timestamped record, so that `show error-log` and the statistics report can
//! replay the session history. The journal is an in-memory session log and is never persisted.

use chrono::{DateTime, Utc};
use log::debug;
use std::fmt;

/// Classification of a journaled error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument could not be parsed (bad address, bad number, wrong argument count).
    Syntax,
    /// The command does not exist in the current mode.
    Command,
    /// The command exists, but the simulator state does not allow it.
    State,
    /// A configuration action failed (duplicate name, unknown snapshot, bad policy).
    Config,
    /// A connect or disconnect action failed.
    Connection,
    /// The command requires a different device kind.
    DeviceType,
    /// A packet could not be sent.
    Packet,
    /// A packet was discarded by a `block` policy.
    PacketBlocked,
    /// A packet was discarded because no route matched.
    PacketDiscarded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "SyntaxError",
            Self::Command => "CommandError",
            Self::State => "StateError",
            Self::Config => "ConfigError",
            Self::Connection => "ConnectionError",
            Self::DeviceType => "TypeError",
            Self::Packet => "PacketError",
            Self::PacketBlocked => "PacketBlocked",
            Self::PacketDiscarded => "PacketDiscarded",
        };
        write!(f, "{}", name)
    }
}

/// A single journaled error.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    /// Sequence number, starting at 1 and strictly increasing within a session.
    pub seq: u64,
    /// Time the error was recorded.
    pub timestamp: DateTime<Utc>,
    /// Classification of the error.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// The command line that triggered the error, if any.
    pub command: Option<String>,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (command: {})",
            self.timestamp.to_rfc3339(),
            self.kind,
            self.message,
            self.command.as_deref().unwrap_or("n/a"),
        )
    }
}

/// # Error Journal
///
/// Append-only session log of operator-facing errors, with sequence numbers and timestamps.
#[derive(Debug, Default)]
pub struct ErrorJournal {
    records: Vec<ErrorRecord>,
    next_seq: u64,
}

impl ErrorJournal {
    /// Create a new, empty journal.
    pub fn new() -> Self {
        Self { records: Vec::new(), next_seq: 1 }
    }

    /// Append a new record and return its sequence number.
    pub fn record(
        &mut self,
        kind: ErrorKind,
        message: impl Into<String>,
        command: Option<&str>,
    ) -> u64 {
        // Default gives next_seq = 0, keep the sequence 1-based either way
        if self.next_seq == 0 {
            self.next_seq = 1;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let message = message.into();
        debug!("journal #{}: {}: {}", seq, kind, message);
        self.records.push(ErrorRecord {
            seq,
            timestamp: Utc::now(),
            kind,
            message,
            command: command.map(str::to_string),
        });
        seq
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// The `n` most recent records, oldest of them first. All records if `n` is `None`.
    pub fn recent(&self, n: Option<usize>) -> &[ErrorRecord] {
        let n = n.unwrap_or(self.records.len());
        let skip = self.records.len().saturating_sub(n);
        &self.records[skip..]
    }

    /// Number of journaled errors.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no error was journaled yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clear the journal. Sequence numbers keep increasing across a clear.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
