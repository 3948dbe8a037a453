//! Directory walking tests

use std::fs;
use std::path::Path;

use peercheck::{ExtractError, PeerFilter, Protocol, extract_peers};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn peer_list() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "README.md", "tcp://readme.example:1");
    write(root, "europe/germany.md", "* `tls://de1.example:443`\n* `tcp://[2001:db8::2]:8080`\n");
    write(root, "europe/france.md", "quic://fr.example:9001 and http://fr.example:80\n");
    write(root, "europe/notes.txt", "tcp://notes.example:1");
    write(root, "asia/japan.md", "tcp://203.0.113.7:7000?key=abc\n");
    write(root, "other/misc.md", "tcp://other.example:1");
    write(root, ".git/HEAD.md", "tcp://git.example:1");

    dir
}

fn uris(root: &Path, filter: &PeerFilter) -> Vec<String> {
    extract_peers(root, filter).unwrap().into_iter().map(|p| p.uri).collect()
}

#[test]
fn test_extract_visits_regions_and_files_in_name_order() {
    let dir = peer_list();

    assert_eq!(
        uris(dir.path(), &PeerFilter::default()),
        [
            "tcp://203.0.113.7:7000",
            "quic://fr.example:9001",
            "tls://de1.example:443",
            "tcp://[2001:db8::2]:8080",
        ]
    );
}

#[test]
fn test_extract_records_location() {
    let dir = peer_list();

    let peers = extract_peers(dir.path(), &PeerFilter::default()).unwrap();
    let germany = peers.iter().find(|p| p.uri == "tls://de1.example:443").unwrap();

    assert_eq!(germany.region, "europe");
    assert_eq!(germany.country, "germany.md");
    assert_eq!(germany.protocol, Protocol::Tls);
    assert_eq!(germany.host, "de1.example");
    assert_eq!(germany.port, 443);
}

#[test]
fn test_extract_is_repeatable() {
    let dir = peer_list();

    let first = extract_peers(dir.path(), &PeerFilter::default()).unwrap();
    let second = extract_peers(dir.path(), &PeerFilter::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_extract_skips_unsupported_schemes() {
    let dir = peer_list();

    let all = uris(dir.path(), &PeerFilter::default());

    assert!(all.iter().all(|uri| !uri.starts_with("http://")));
}

#[test]
fn test_region_filter() {
    let dir = peer_list();
    let filter = PeerFilter::new(vec!["asia".into()], Vec::new());

    assert_eq!(uris(dir.path(), &filter), ["tcp://203.0.113.7:7000"]);
}

#[test]
fn test_country_filter() {
    let dir = peer_list();
    let filter = PeerFilter::new(Vec::new(), vec!["germany".into()]);

    assert_eq!(
        uris(dir.path(), &filter),
        ["tls://de1.example:443", "tcp://[2001:db8::2]:8080"]
    );
}

#[test]
fn test_empty_tree_yields_no_peers() {
    let dir = tempfile::tempdir().unwrap();

    assert!(extract_peers(dir.path(), &PeerFilter::default()).unwrap().is_empty());
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = extract_peers(&dir.path().join("missing"), &PeerFilter::default());

    assert!(matches!(result, Err(ExtractError::Io { .. })));
}

#[test]
fn test_file_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "peers.md", "tcp://a.example:1");

    let result = extract_peers(&dir.path().join("peers.md"), &PeerFilter::default());

    assert!(matches!(result, Err(ExtractError::NotADirectory(_))));
}
