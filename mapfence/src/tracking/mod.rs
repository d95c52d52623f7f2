//! Geolocation tracking
//!
//! A [`PositionSource`] is a continuous position-watch capability. The
//! [`GeolocationTracker`] runs one as a cancellable producer task and
//! forwards its [`PositionEvent`]s to a channel:
//!
//! ```text
//! PositionSource ──► mpsc<PositionEvent> ──► coordinator inbox
//!        ▲
//!        └── CancellationToken (stop / handle dropped)
//! ```
//!
//! Two sources are provided:
//!
//! - [`UdpPositionSource`] listens for ForeFlight-style `XGPS` datagrams, as
//!   broadcast by flight simulators and GPS bridge apps.
//! - [`ReplaySource`] plays back `lat,lon` lines from a file at a fixed pace.
//!
//! # Example
//!
//! ```ignore
//! let (tx, mut rx) = mpsc::channel(16);
//! let tracker = GeolocationTracker::new(UdpPositionSource::new(49002));
//! let handle = tracker.start(tx);
//!
//! while let Some(event) = rx.recv().await {
//!     println!("{:?}", event);
//! }
//! handle.stop();
//! ```

mod replay;
mod source;
mod tracker;
mod udp;

pub use replay::{ReplaySource, DEFAULT_REPLAY_INTERVAL, MIN_REPLAY_INTERVAL};
pub use source::{PositionEvent, PositionSource, TrackingError};
pub use tracker::{GeolocationTracker, TrackerHandle};
pub use udp::{parse_xgps, UdpPositionSource, DEFAULT_UDP_PORT};
