//! Rendering of probe results.
//!
//! Reachable peers are sorted by latency with a stable sort, so peers with
//! equal latency keep their input order.

use std::io::{self, Write};

use chrono::{DateTime, Local};

use crate::peer::ProbedPeer;

mod json;
mod table;

pub use json::{JsonReport, PeerEntry};
use table::Table;

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 +0100`
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Probe results split into alive and dead peers
#[derive(Debug)]
pub struct Report<'a> {
    generated_at: DateTime<Local>,
    source: &'a [ProbedPeer],
    alive: Vec<&'a ProbedPeer>,
    dead: Vec<&'a ProbedPeer>,
}

impl<'a> Report<'a> {
    /// Build a report timestamped now
    pub fn new(peers: &'a [ProbedPeer]) -> Self {
        Self::generated_at(peers, Local::now())
    }

    pub fn generated_at(peers: &'a [ProbedPeer], generated_at: DateTime<Local>) -> Self {
        let (mut alive, dead): (Vec<_>, Vec<_>) =
            peers.iter().partition(|p| p.result.is_reachable());
        alive.sort_by_key(|p| p.result.latency());

        Self { generated_at, source: peers, alive, dead }
    }

    /// Reachable peers, fastest first
    pub fn alive(&self) -> &[&'a ProbedPeer] {
        &self.alive
    }

    /// Unreachable peers in input order
    pub fn dead(&self) -> &[&'a ProbedPeer] {
        &self.dead
    }

    /// Every probed peer in input order
    pub fn source(&self) -> &'a [ProbedPeer] {
        self.source
    }

    /// Write the human readable report
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "Report date: {}", self.generated_at.format(DATE_FORMAT))?;

        writeln!(out, "Dead peers:")?;
        let mut dead = Table::new(["URI", "Location"]);
        for probed in &self.dead {
            dead.row([probed.peer.uri.clone(), probed.peer.location()]);
        }
        dead.write(&mut out)?;

        writeln!(out, "\n\nAlive peers (sorted by latency):")?;
        let mut alive = Table::new(["URI", "Latency (ms)", "Location"]);
        for probed in &self.alive {
            let latency = probed.result.latency_ms().unwrap_or_default();
            alive.row([probed.peer.uri.clone(), format!("{latency:.3}"), probed.peer.location()]);
        }
        alive.write(&mut out)
    }

    /// Structured form of the report
    pub fn to_json(&self) -> JsonReport {
        JsonReport {
            alive: self.alive.iter().map(|p| PeerEntry::from(*p)).collect(),
            source: self.source.iter().map(PeerEntry::from).collect(),
        }
    }

    /// Write the report as pretty printed JSON followed by a newline
    pub fn write_json<W: Write>(&self, mut out: W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut out, &self.to_json())?;
        writeln!(out)
    }
}
