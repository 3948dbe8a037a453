//! Probing engine - measures whether a peer accepts connections and how fast
//!
//! This module is responsible for:
//! - Resolving the peer host
//! - Dialing the transport the peer is advertised on
//! - Turning every failure into an unreachable result

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::DEFAULT_TIMEOUT;
use crate::error::ProbeError;
use crate::peer::{PeerDescriptor, ProbeResult, Protocol};
use crate::resolver::resolve;

pub mod quic;
pub mod tcp;

/// Probe settings
#[derive(Debug, Clone)]
pub struct ProberConfig {
    /// Bound on host resolution and, separately, on connection establishment
    pub timeout: Duration,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT }
    }
}

/// Something that can probe a single peer
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Probe the peer. Never fails: errors are reported as unreachable.
    async fn probe(&self, peer: &PeerDescriptor) -> ProbeResult;
}

/// Prober dialing peers over TCP or QUIC
pub struct Prober {
    timeout: Duration,
    quic_config: quinn::ClientConfig,
}

impl Prober {
    /// Create a new prober
    pub fn new(config: ProberConfig) -> Result<Self, ProbeError> {
        Ok(Self { timeout: config.timeout, quic_config: quic::insecure_client_config()? })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn dial(&self, peer: &PeerDescriptor) -> Result<Duration, ProbeError> {
        let address = timeout(self.timeout, resolve(&peer.host))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        let ip: IpAddr = address
            .parse()
            .map_err(|source| ProbeError::InvalidAddress { address: address.clone(), source })?;
        let addr = SocketAddr::new(ip, peer.port);

        // tls peers only get a transport check, the handshake is not attempted
        match peer.protocol {
            Protocol::Tcp | Protocol::Tls => tcp::connect(addr, self.timeout).await,
            Protocol::Quic => {
                quic::connect(addr, server_name(&peer.host), &self.quic_config, self.timeout).await
            }
        }
    }
}

#[async_trait::async_trait]
impl Probe for Prober {
    async fn probe(&self, peer: &PeerDescriptor) -> ProbeResult {
        match self.dial(peer).await {
            Ok(latency) => {
                debug!(uri = %peer.uri, latency_us = latency.as_micros() as u64, "Peer is up");
                ProbeResult::reachable(latency)
            }
            Err(error) => {
                debug!(uri = %peer.uri, %error, "Peer is down");
                ProbeResult::unreachable()
            }
        }
    }
}

/// Name presented in the QUIC handshake
fn server_name(host: &str) -> &str {
    host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host)
}
