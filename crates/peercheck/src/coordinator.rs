//! Fan-out of probes over a peer list.
//!
//! Every peer gets its own task. Tasks share nothing mutable: each one owns a
//! copy of its descriptor and hands its result back through its join handle,
//! so results are paired with descriptors by position once all tasks finish.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::peer::{PeerDescriptor, ProbeResult, ProbedPeer};
use crate::probe::Probe;

/// Fan-out settings
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinatorConfig {
    /// Maximum number of probes in flight, unbounded when `None`
    pub max_concurrency: Option<usize>,
}

/// Probe every peer concurrently and wait for all of them.
///
/// The returned list has the same length and order as `peers`. One peer
/// failing or timing out never affects the others, and every peer is probed
/// exactly once.
pub async fn probe_all<P>(
    peers: Vec<PeerDescriptor>,
    prober: Arc<P>,
    config: CoordinatorConfig,
) -> Vec<ProbedPeer>
where
    P: Probe + 'static,
{
    let limiter = config.max_concurrency.map(|limit| Arc::new(Semaphore::new(limit.max(1))));

    let handles: Vec<_> = peers
        .iter()
        .cloned()
        .map(|peer| {
            let prober = prober.clone();
            let limiter = limiter.clone();

            tokio::spawn(async move {
                let _permit = match limiter.as_deref() {
                    Some(semaphore) => semaphore.acquire().await.ok(),
                    None => None,
                };
                prober.probe(&peer).await
            })
        })
        .collect();

    let outcomes = join_all(handles).await;

    let probed: Vec<ProbedPeer> = peers
        .into_iter()
        .zip(outcomes)
        .map(|(peer, outcome)| {
            let result = outcome.unwrap_or_else(|error| {
                warn!(uri = %peer.uri, %error, "Probe task failed");
                ProbeResult::unreachable()
            });
            ProbedPeer::new(peer, result)
        })
        .collect();

    let alive = probed.iter().filter(|p| p.result.is_reachable()).count();
    info!(total = probed.len(), alive, dead = probed.len() - alive, "Probing finished");

    probed
}
