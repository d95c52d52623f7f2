//! Tracker lifecycle around a [`PositionSource`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::source::{PositionEvent, PositionSource, TrackingError};

/// Runs a position source as a cancellable background producer.
pub struct GeolocationTracker<P: PositionSource> {
    source: Arc<P>,
}

impl<P: PositionSource> Clone for GeolocationTracker<P> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<P: PositionSource> GeolocationTracker<P> {
    pub fn new(source: P) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Starts watching, forwarding events to `events`.
    ///
    /// When the source ends on its own (error, or a replay running out) a
    /// final [`PositionEvent::Unavailable`] is sent. Nothing is sent after
    /// the returned handle is stopped or dropped.
    pub fn start(&self, events: mpsc::Sender<PositionEvent>) -> TrackerHandle {
        let cancel = CancellationToken::new();
        let source = Arc::clone(&self.source);
        let token = cancel.clone();

        info!(source = source.name(), "Position tracking started");

        let task = tokio::spawn(async move {
            let result = source.watch(events.clone(), token.clone()).await;
            if token.is_cancelled() {
                debug!(source = source.name(), "Position tracking stopped");
                return;
            }

            let reason = match result {
                Ok(()) => format!("Position source '{}' ended", source.name()),
                Err(TrackingError::ChannelClosed) => return,
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Position source failed");
                    e.to_string()
                }
            };
            let _ = events.send(PositionEvent::Unavailable(reason)).await;
        });

        TrackerHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Handle to a running tracker. Dropping it stops tracking.
pub struct TrackerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    /// Stops the producer. Returns once the request is issued.
    pub fn stop(mut self) {
        self.cancel.cancel();
        self.task.take();
    }

    /// Stops the producer and waits for its task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
