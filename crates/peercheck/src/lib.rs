//! peercheck - reachability and latency prober for public peer lists
//!
//! Peers are advertised as `tcp://`, `tls://` and `quic://` URIs inside a
//! tree of markdown files. This library extracts them, probes every peer
//! concurrently and renders the outcome sorted by latency.

use std::time::Duration;

pub mod coordinator;
pub mod error;
pub mod extract;
pub mod peer;
pub mod probe;
pub mod report;
pub mod resolver;

// Re-export main types
pub use coordinator::{CoordinatorConfig, probe_all};
pub use error::{ExtractError, ProbeError, ResolutionError};
pub use extract::{PeerFilter, extract_peers, parse_peers};
pub use peer::{PeerDescriptor, ProbeResult, ProbedPeer, Protocol};
pub use probe::{Probe, Prober, ProberConfig};
pub use report::{JsonReport, PeerEntry, Report};
pub use resolver::resolve;

/// Time allowed for each phase of a single probe
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
