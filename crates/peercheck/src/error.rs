//! Error types for peer extraction and probing.
//!
//! Probe and resolution errors never leave the prober: they are logged and
//! turned into an unreachable result. Extraction errors are fatal to a run.

use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to turn a peer host into a connectable address
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("lookup of {host} failed: {source}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("lookup of {0} returned no addresses")]
    NoRecords(String),
}

/// Failure of a single probe attempt
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("resolved address {address} is not an IP address: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },

    #[error("connection to {addr} failed: {source}")]
    Dial {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to bind QUIC endpoint: {0}")]
    Endpoint(#[source] io::Error),

    #[error("QUIC connect failed: {0}")]
    QuicConnect(#[from] quinn::ConnectError),

    #[error("QUIC handshake failed: {0}")]
    QuicConnection(#[from] quinn::ConnectionError),

    #[error("invalid TLS configuration: {0}")]
    Tls(#[from] rustls::Error),

    #[error("TLS configuration unusable for QUIC: {0}")]
    QuicCrypto(#[from] quinn::crypto::rustls::NoInitialCipherSuite),
}

/// Failure to read the peer list directory
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// A protocol tag outside of `tcp`, `tls` and `quic`
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported protocol: {0}")]
pub struct UnsupportedProtocol(pub String);
