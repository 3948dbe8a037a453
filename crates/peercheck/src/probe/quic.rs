//! QUIC dialing.
//!
//! Certificates are not verified: a probe only asks whether something speaks
//! QUIC at the address, not who it is.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use quinn::crypto::rustls::QuicClientConfig;
use quinn::{ClientConfig, Endpoint, VarInt};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, SignatureScheme};
use tokio::time::timeout;

use crate::error::ProbeError;

/// Build a QUIC client configuration accepting any server certificate
pub fn insecure_client_config() -> Result<ClientConfig, ProbeError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let crypto = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(&[&rustls::version::TLS13])?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(SkipServerVerification(provider)))
        .with_no_client_auth();

    Ok(ClientConfig::new(Arc::new(QuicClientConfig::try_from(crypto)?)))
}

/// Complete a QUIC handshake with `addr` and close the connection right away.
///
/// Every call binds its own client endpoint. Returns the handshake duration.
pub async fn connect(
    addr: SocketAddr,
    server_name: &str,
    config: &ClientConfig,
    limit: Duration,
) -> Result<Duration, ProbeError> {
    let bind_addr: SocketAddr = if addr.is_ipv6() {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    };
    let endpoint = Endpoint::client(bind_addr).map_err(ProbeError::Endpoint)?;

    let start = Instant::now();
    let outcome = match endpoint.connect_with(config.clone(), addr, server_name) {
        Ok(connecting) => match timeout(limit, connecting).await {
            Ok(Ok(connection)) => {
                let latency = start.elapsed();
                connection.close(VarInt::from_u32(0), b"probe complete");
                Ok(latency)
            }
            Ok(Err(error)) => Err(error.into()),
            Err(_) => Err(ProbeError::Timeout(limit)),
        },
        Err(error) => Err(error.into()),
    };

    endpoint.close(VarInt::from_u32(0), b"");
    outcome
}

#[derive(Debug)]
struct SkipServerVerification(Arc<CryptoProvider>);

impl ServerCertVerifier for SkipServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    // handshake signatures are still verified
    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
