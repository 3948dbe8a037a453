//! Extract, probe and report a small peer list against local sockets

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use peercheck::{
    CoordinatorConfig, JsonReport, PeerDescriptor, PeerFilter, Prober, ProberConfig, Protocol,
    Report, extract_peers, probe_all,
};
use tokio::net::TcpListener;

fn prober(timeout: Duration) -> Arc<Prober> {
    Arc::new(Prober::new(ProberConfig { timeout }).unwrap())
}

#[tokio::test]
async fn test_local_peer_list_end_to_end() {
    let _ = tracing_subscriber::fmt::try_init();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("local")).unwrap();
    fs::write(
        dir.path().join("local/loopback.md"),
        format!("* tcp://127.0.0.1:1\n* tls://127.0.0.1:{port}\n"),
    )
    .unwrap();

    let peers = extract_peers(dir.path(), &PeerFilter::default()).unwrap();
    assert_eq!(peers.len(), 2);

    let probed = probe_all(peers, prober(Duration::from_secs(5)), CoordinatorConfig::default()).await;
    let report = Report::new(&probed);

    let alive: Vec<_> = report.alive().iter().map(|p| p.peer.uri.clone()).collect();
    let dead: Vec<_> = report.dead().iter().map(|p| p.peer.uri.clone()).collect();
    assert_eq!(alive, [format!("tls://127.0.0.1:{port}")]);
    assert_eq!(dead, ["tcp://127.0.0.1:1"]);

    let mut out = Vec::new();
    report.write_json(&mut out).unwrap();
    let json: JsonReport = serde_json::from_slice(&out).unwrap();

    assert_eq!(json.alive.len(), 1);
    assert!(json.alive[0].up);
    assert!(json.alive[0].latency >= 0.0);
    assert_eq!(json.source.len(), 2);
    assert_eq!(json.source[0].uri, "tcp://127.0.0.1:1");
    assert!(!json.source[0].up);
    assert_eq!(json.source[0].latency, 0.0);
    assert_eq!(json.source[0].region, "local");
    assert_eq!(json.source[0].country, "loopback.md");
}

#[tokio::test]
async fn test_many_peers_finish_together() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let peers: Vec<PeerDescriptor> = (0..50)
        .map(|i| {
            let (uri_port, protocol) = if i % 2 == 0 { (port, Protocol::Tcp) } else { (1, Protocol::Tls) };
            PeerDescriptor::new(
                format!("tcp://127.0.0.1:{uri_port}#{i}"),
                protocol,
                "127.0.0.1",
                uri_port,
            )
        })
        .collect();

    let start = Instant::now();
    let probed = probe_all(peers.clone(), prober(Duration::from_secs(5)), CoordinatorConfig::default()).await;

    assert!(start.elapsed() < Duration::from_secs(6));
    assert_eq!(probed.len(), 50);
    for (i, probed) in probed.iter().enumerate() {
        assert_eq!(probed.peer, peers[i]);
        assert_eq!(probed.result.is_reachable(), i % 2 == 0);
    }
}

#[tokio::test]
async fn test_unresolvable_host_is_reported_dead() {
    let peers = vec![PeerDescriptor::new(
        "tcp://does-not-exist.invalid:80",
        Protocol::Tcp,
        "does-not-exist.invalid",
        80,
    )];

    let probed = probe_all(peers, prober(Duration::from_secs(5)), CoordinatorConfig::default()).await;

    assert!(!probed[0].result.is_reachable());
    assert!(Report::new(&probed).alive().is_empty());
}
