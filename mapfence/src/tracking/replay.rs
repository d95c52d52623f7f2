//! File replay position source.
//!
//! Plays back a recorded track, one `lat,lon` pair per line. Blank lines and
//! lines starting with `#` are skipped; a line that does not parse produces a
//! [`PositionEvent::Error`] and playback continues.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::source::{PositionEvent, PositionSource, TrackingError};
use crate::coord::Coordinate;

/// Default spacing between replayed fixes.
pub const DEFAULT_REPLAY_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest spacing a replay accepts; tokio intervals cannot tick at zero.
pub const MIN_REPLAY_INTERVAL: Duration = Duration::from_millis(1);

/// Position source that replays a track file.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    path: PathBuf,
    interval: Duration,
}

impl ReplaySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            interval: DEFAULT_REPLAY_INTERVAL,
        }
    }

    /// Sets the spacing between fixes, raised to [`MIN_REPLAY_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_REPLAY_INTERVAL);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Turns one track line into an event, or `None` for skipped lines.
fn line_event(line_no: usize, line: &str) -> Option<PositionEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(match line.parse::<Coordinate>() {
        Ok(coordinate) => PositionEvent::Fix(coordinate),
        Err(e) => PositionEvent::Error(format!("line {}: {}", line_no, e)),
    })
}

impl PositionSource for ReplaySource {
    fn name(&self) -> &str {
        "replay"
    }

    async fn watch(
        &self,
        events: mpsc::Sender<PositionEvent>,
        cancel: CancellationToken,
    ) -> Result<(), TrackingError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| TrackingError::ReplayFile {
                path: self.path.display().to_string(),
                source,
            })?;

        info!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis() as u64,
            "Replaying position track"
        );

        let mut ticker = tokio::time::interval(self.interval);
        let mut replayed: usize = 0;

        for (index, line) in content.lines().enumerate() {
            let Some(event) = line_event(index + 1, line) else {
                continue;
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(replayed, "Replay cancelled");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            if events.send(event).await.is_err() {
                return Err(TrackingError::ChannelClosed);
            }
            replayed += 1;
        }

        info!(replayed, "Replay finished");
        Ok(())
    }
}
