//! Peer extraction from a public peer list checkout.
//!
//! The list is laid out as `<root>/<region>/<country>.md`; peer URIs are
//! matched anywhere in the markdown text.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::ExtractError;
use crate::peer::{PeerDescriptor, Protocol};

mod filter;

pub use filter::PeerFilter;

static PEER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(tcp|tls|quic)://([a-z0-9\.\-\:\[\]]+):([0-9]+)").expect("peer pattern is valid")
});

/// Region directories that never hold peer lists
const SKIPPED_REGIONS: &[&str] = &["other"];

/// Collect every peer listed under `root`.
///
/// Regions and files are visited in name order, peers in textual order, so
/// the same tree always yields the same list.
pub fn extract_peers(root: &Path, filter: &PeerFilter) -> Result<Vec<PeerDescriptor>, ExtractError> {
    let metadata =
        fs::metadata(root).map_err(|source| ExtractError::Io { path: root.to_path_buf(), source })?;
    if !metadata.is_dir() {
        return Err(ExtractError::NotADirectory(root.to_path_buf()));
    }

    let mut peers = Vec::new();
    let mut files = 0usize;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() != 1 || is_region(entry, filter));

    for entry in walker {
        let entry = entry?;
        if entry.depth() != 2 || !entry.file_type().is_file() {
            continue;
        }

        let country = entry.file_name().to_string_lossy();
        if !country.ends_with(".md") || !filter.matches_country(&country) {
            continue;
        }
        let region = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = fs::read(entry.path())
            .map_err(|source| ExtractError::Io { path: entry.path().to_path_buf(), source })?;
        let found = parse_peers(&String::from_utf8_lossy(&content), &region, &country);
        debug!(%region, %country, peers = found.len(), "Read peer list");

        files += 1;
        peers.extend(found);
    }

    info!(files, peers = peers.len(), root = %root.display(), "Extracted peers");
    Ok(peers)
}

/// Extract every well-formed peer URI from `content`.
///
/// Matches whose port is not in 1..=65535 are dropped.
pub fn parse_peers(content: &str, region: &str, country: &str) -> Vec<PeerDescriptor> {
    PEER_PATTERN
        .captures_iter(content)
        .filter_map(|captures| {
            let uri = &captures[0];
            let Ok(protocol) = captures[1].parse::<Protocol>() else {
                return None;
            };
            let port = match captures[3].parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => {
                    debug!(uri, "Skipping peer with invalid port");
                    return None;
                }
            };

            Some(PeerDescriptor::new(uri, protocol, &captures[2], port).located(region, country))
        })
        .collect()
}

fn is_region(entry: &DirEntry, filter: &PeerFilter) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir()
        && !name.starts_with('.')
        && !SKIPPED_REGIONS.iter().any(|skipped| name == *skipped)
        && filter.matches_region(&name)
}
