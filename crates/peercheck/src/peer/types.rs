use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::UnsupportedProtocol;

/// Transport a peer is advertised on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Tls,
    Quic,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Tls => write!(f, "tls"),
            Protocol::Quic => write!(f, "quic"),
        }
    }
}

impl FromStr for Protocol {
    type Err = UnsupportedProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "tls" => Ok(Protocol::Tls),
            "quic" => Ok(Protocol::Quic),
            other => Err(UnsupportedProtocol(other.to_string())),
        }
    }
}

/// A peer found in a peer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerDescriptor {
    /// The URI exactly as it appeared in the source file
    pub uri: String,

    pub protocol: Protocol,

    /// DNS name, IPv4 literal or bracketed IPv6 literal
    pub host: String,

    pub port: u16,

    /// Directory the peer was listed under
    pub region: String,

    /// File the peer was listed in
    pub country: String,
}

impl PeerDescriptor {
    pub fn new(
        uri: impl Into<String>,
        protocol: Protocol,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            uri: uri.into(),
            protocol,
            host: host.into(),
            port,
            region: String::new(),
            country: String::new(),
        }
    }

    /// Attach the region/country the peer was listed under
    pub fn located(mut self, region: impl Into<String>, country: impl Into<String>) -> Self {
        self.region = region.into();
        self.country = country.into();
        self
    }

    /// `region/country`, as shown in reports
    pub fn location(&self) -> String {
        format!("{}/{}", self.region, self.country)
    }
}

/// Outcome of probing one peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeResult {
    latency: Option<Duration>,
}

impl ProbeResult {
    /// The peer accepted a connection after `latency`
    pub fn reachable(latency: Duration) -> Self {
        Self { latency: Some(latency) }
    }

    /// The peer could not be resolved or connected to
    pub fn unreachable() -> Self {
        Self { latency: None }
    }

    pub fn is_reachable(&self) -> bool {
        self.latency.is_some()
    }

    /// Time to connection establishment, only set for reachable peers
    pub fn latency(&self) -> Option<Duration> {
        self.latency
    }

    /// Latency in fractional milliseconds at microsecond resolution
    pub fn latency_ms(&self) -> Option<f64> {
        self.latency.map(|latency| latency.as_micros() as f64 / 1000.0)
    }
}

/// A descriptor paired with the result of its probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedPeer {
    pub peer: PeerDescriptor,
    pub result: ProbeResult,
}

impl ProbedPeer {
    pub fn new(peer: PeerDescriptor, result: ProbeResult) -> Self {
        Self { peer, result }
    }
}
