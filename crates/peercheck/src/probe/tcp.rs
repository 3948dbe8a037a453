use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::ProbeError;

/// Open a TCP connection to `addr` and close it right away.
///
/// Returns the time taken to establish the connection.
pub async fn connect(addr: SocketAddr, limit: Duration) -> Result<Duration, ProbeError> {
    let start = Instant::now();

    let stream = timeout(limit, TcpStream::connect(addr))
        .await
        .map_err(|_| ProbeError::Timeout(limit))?
        .map_err(|source| ProbeError::Dial { addr, source })?;

    let latency = start.elapsed();
    drop(stream);

    Ok(latency)
}
