//! UDP receiver for ForeFlight-style GPS datagrams.
//!
//! Accepts `XGPS` and `XGPS2` messages:
//!
//! ```text
//! XGPS<name>,<lon>,<lat>,<alt_m>,<track>,<speed_m/s>
//! ```
//!
//! Only longitude and latitude are used. Other message types on the same
//! port (attitude `XATT`, traffic `XTRAFFIC`) are ignored.

use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::source::{PositionEvent, PositionSource, TrackingError};
use crate::coord::Coordinate;

/// Default ForeFlight broadcast port.
pub const DEFAULT_UDP_PORT: u16 = 49002;

/// Maximum packet size we expect.
const MAX_PACKET_SIZE: usize = 1024;

/// Parses an `XGPS`/`XGPS2` datagram into a coordinate.
///
/// Returns `None` for other message types and for malformed or out of range
/// positions.
pub fn parse_xgps(data: &[u8]) -> Option<Coordinate> {
    if !data.starts_with(b"XGPS") {
        return None;
    }
    let text = std::str::from_utf8(data).ok()?;

    let mut parts = text.trim_end().split(',');
    let _name = parts.next()?;
    let longitude: f64 = parts.next()?.trim().parse().ok()?;
    let latitude: f64 = parts.next()?.trim().parse().ok()?;

    Coordinate::new(latitude, longitude).ok()
}

/// Position source listening for XGPS datagrams on a UDP port.
#[derive(Debug, Clone)]
pub struct UdpPositionSource {
    port: u16,
    min_update_interval: Duration,
}

impl UdpPositionSource {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            min_update_interval: Duration::from_millis(500),
        }
    }

    /// Sets the minimum spacing between forwarded fixes.
    ///
    /// Simulators broadcast several times a second; fixes arriving faster
    /// than this are dropped.
    pub fn with_min_update_interval(mut self, interval: Duration) -> Self {
        self.min_update_interval = interval;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for UdpPositionSource {
    fn default() -> Self {
        Self::new(DEFAULT_UDP_PORT)
    }
}

impl PositionSource for UdpPositionSource {
    fn name(&self) -> &str {
        "udp"
    }

    async fn watch(
        &self,
        events: mpsc::Sender<PositionEvent>,
        cancel: CancellationToken,
    ) -> Result<(), TrackingError> {
        let socket = UdpSocket::bind(("0.0.0.0", self.port))
            .await
            .map_err(|source| TrackingError::SocketBind {
                port: self.port,
                source,
            })?;

        info!(
            port = self.port,
            local_addr = ?socket.local_addr().ok(),
            "UDP position receiver started"
        );

        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let mut last_sent: Option<Instant> = None;
        let mut packets_received: u64 = 0;
        let mut fixes_sent: u64 = 0;

        loop {
            let len = tokio::select! {
                _ = cancel.cancelled() => break,
                received = socket.recv(&mut buffer) => match received {
                    Ok(len) => len,
                    Err(e) => {
                        debug!(error = %e, "UDP receive error");
                        if events.send(PositionEvent::Error(e.to_string())).await.is_err() {
                            return Err(TrackingError::ChannelClosed);
                        }
                        continue;
                    }
                },
            };

            packets_received += 1;
            if packets_received == 1 {
                debug!(bytes = len, "First datagram received");
            }

            let Some(coordinate) = parse_xgps(&buffer[..len]) else {
                trace!(bytes = len, "Ignoring non-XGPS datagram");
                continue;
            };

            if last_sent.is_some_and(|t| t.elapsed() < self.min_update_interval) {
                continue;
            }

            if events.send(PositionEvent::Fix(coordinate)).await.is_err() {
                return Err(TrackingError::ChannelClosed);
            }
            last_sent = Some(Instant::now());
            fixes_sent += 1;
        }

        info!(packets_received, fixes_sent, "UDP position receiver stopped");
        Ok(())
    }
}
