//! Position source abstraction.

use std::future::Future;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::coord::Coordinate;

/// An update from a position source.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionEvent {
    /// A new position fix.
    Fix(Coordinate),
    /// A recoverable error; the source keeps running.
    Error(String),
    /// The source stopped and will produce nothing further.
    Unavailable(String),
}

/// Errors that end a position source.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    /// Failed to bind the UDP socket.
    #[error("Failed to bind UDP socket on port {port}: {source}")]
    SocketBind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read the replay file.
    #[error("Failed to read replay file {path}: {source}")]
    ReplayFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The event channel was closed by the consumer.
    #[error("Position channel closed")]
    ChannelClosed,
}

/// Trait for continuous position-watch capabilities.
///
/// `watch` runs until `cancel` fires, the event channel closes, or the source
/// fails. Recoverable problems are reported as [`PositionEvent::Error`];
/// returning `Err` ends the subscription.
pub trait PositionSource: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn watch(
        &self,
        events: mpsc::Sender<PositionEvent>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<(), TrackingError>> + Send;
}
