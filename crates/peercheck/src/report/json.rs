use serde::{Deserialize, Serialize};

use crate::peer::ProbedPeer;

/// JSON document produced by `--json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    /// Reachable peers, fastest first
    pub alive: Vec<PeerEntry>,

    /// Every peer in input order, reachable or not
    pub source: Vec<PeerEntry>,
}

/// One peer as exposed in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerEntry {
    pub uri: String,
    pub region: String,
    pub country: String,
    pub up: bool,

    /// Milliseconds, `0.0` for unreachable peers
    pub latency: f64,
}

impl From<&ProbedPeer> for PeerEntry {
    fn from(probed: &ProbedPeer) -> Self {
        Self {
            uri: probed.peer.uri.clone(),
            region: probed.peer.region.clone(),
            country: probed.peer.country.clone(),
            up: probed.result.is_reachable(),
            latency: probed.result.latency_ms().unwrap_or_default(),
        }
    }
}
