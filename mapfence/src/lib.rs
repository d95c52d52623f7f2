//! mapfence - live map tracking with geofence alerts
//!
//! This library provides the core of an interactive map application: it
//! tracks a live position, searches addresses and nearby points of interest,
//! plans driving routes, and raises alerts when the tracked position crosses
//! a circular geofence.
//!
//! # Architecture
//!
//! - [`geofence`]: pure enter/exit evaluation
//! - [`provider`]: adapters for the geocoder, POI index, router and weather
//! - [`tracking`]: cancellable position sources (UDP XGPS, track replay)
//! - [`app`]: the state reducer and the coordinator runtime that owns state
//! - [`map`]: the renderable map snapshot and tile URLs
//! - [`config`]: INI configuration file
//!
//! ```ignore
//! use mapfence::app::{Coordinator, HttpServices, Intent};
//! use mapfence::config::ConfigFile;
//! use mapfence::tracking::GeolocationTracker;
//!
//! let config = ConfigFile::load()?;
//! let services = HttpServices::from_endpoints(config.http_client()?, &config.service_endpoints());
//! let tracker = GeolocationTracker::new(config.udp_source());
//!
//! let handle = Coordinator::new(services, tracker, config.coordinator_config())
//!     .with_initial_state(config.initial_state())
//!     .start();
//! handle.dispatch(Intent::StartTracking).await?;
//! ```

pub mod app;
pub mod config;
pub mod coord;
pub mod geofence;
pub mod logging;
pub mod map;
pub mod provider;
pub mod tracking;

/// Version of the mapfence library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
