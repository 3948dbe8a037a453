//! QUIC peers behind certificates no client would trust

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use peercheck::probe::quic;
use peercheck::{PeerDescriptor, Probe, Prober, ProberConfig, Protocol, resolve};
use quinn::{ClientConfig, Endpoint, ServerConfig};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Start a QUIC server on `ip` with a freshly generated self-signed certificate
fn self_signed_server(ip: IpAddr) -> Endpoint {
    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));
    let config = ServerConfig::with_single_cert(vec![certified.cert.der().clone()], key).unwrap();
    let endpoint = Endpoint::server(config, SocketAddr::new(ip, 0)).unwrap();

    let acceptor = endpoint.clone();
    tokio::spawn(async move {
        while let Some(incoming) = acceptor.accept().await {
            tokio::spawn(async move {
                if let Ok(connection) = incoming.await {
                    connection.closed().await;
                }
            });
        }
    });

    endpoint
}

async fn dial(host: &str, port: u16) -> peercheck::ProbeResult {
    let prober = Prober::new(ProberConfig { timeout: TIMEOUT }).unwrap();
    let peer = PeerDescriptor::new(format!("quic://{host}:{port}"), Protocol::Quic, host, port);
    prober.probe(&peer).await
}

#[tokio::test]
async fn test_self_signed_quic_peer_by_address_is_reachable() {
    let _ = tracing_subscriber::fmt::try_init();

    let server = self_signed_server("127.0.0.1".parse().unwrap());
    let port = server.local_addr().unwrap().port();

    let result = dial("127.0.0.1", port).await;

    assert!(result.is_reachable());
    assert!(result.latency().unwrap() < TIMEOUT);
}

#[tokio::test]
async fn test_self_signed_quic_peer_by_name_is_reachable() {
    // serve on whichever address the resolver hands out for the name
    let ip: IpAddr = resolve("localhost").await.unwrap().parse().unwrap();
    let server = self_signed_server(ip);
    let port = server.local_addr().unwrap().port();

    let result = dial("localhost", port).await;

    assert!(result.is_reachable());
    assert!(result.latency().unwrap() < TIMEOUT);
}

#[tokio::test]
async fn test_self_signed_certificate_fails_normal_verification() {
    let server = self_signed_server("127.0.0.1".parse().unwrap());
    let addr = server.local_addr().unwrap();

    let verifying = ClientConfig::with_root_certificates(Arc::new(rustls::RootCertStore::empty())).unwrap();

    assert!(quic::connect(addr, "localhost", &verifying, TIMEOUT).await.is_err());
    assert!(quic::connect(addr, "localhost", &quic::insecure_client_config().unwrap(), TIMEOUT).await.is_ok());
}
