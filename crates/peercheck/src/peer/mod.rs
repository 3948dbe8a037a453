/// Peer model - descriptors extracted from peer lists and their probe outcome
pub mod types;

pub use types::{PeerDescriptor, ProbeResult, ProbedPeer, Protocol};
