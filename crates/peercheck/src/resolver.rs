//! Host resolution for probes.
//!
//! Bracketed IPv6 literals are unwrapped locally; everything else goes
//! through a lookup and the first returned address is used as-is.

use std::future::Future;
use std::io;
use std::net::IpAddr;

use tokio::net::lookup_host;

use crate::error::ResolutionError;

/// Resolve a peer host with the system resolver
pub async fn resolve(host: &str) -> Result<String, ResolutionError> {
    resolve_with(host, system_lookup).await
}

/// Resolve a peer host with a caller supplied lookup.
///
/// The lookup is never invoked for bracketed literals. No address family is
/// preferred: whatever the lookup returns first wins.
pub async fn resolve_with<F, Fut>(host: &str, lookup: F) -> Result<String, ResolutionError>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = io::Result<Vec<IpAddr>>>,
{
    if let Some(literal) = bracketed_literal(host) {
        return Ok(literal.to_string());
    }

    let addresses = lookup(host.to_string())
        .await
        .map_err(|source| ResolutionError::Lookup { host: host.to_string(), source })?;

    addresses
        .first()
        .map(IpAddr::to_string)
        .ok_or_else(|| ResolutionError::NoRecords(host.to_string()))
}

fn bracketed_literal(host: &str) -> Option<&str> {
    host.strip_prefix('[')?.strip_suffix(']')
}

async fn system_lookup(host: String) -> io::Result<Vec<IpAddr>> {
    let addrs = lookup_host((host.as_str(), 0)).await?;
    Ok(addrs.map(|addr| addr.ip()).collect())
}
