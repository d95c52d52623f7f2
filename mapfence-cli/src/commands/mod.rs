//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, init, show)
//! - [`geocode`] - Address lookup
//! - [`poi`] - Nearby points of interest
//! - [`route`] - Driving route between two points
//! - [`session`] - Interactive map session with tracking and geofence alerts
//! - [`tile`] - Basemap tile URL for a location
//! - [`weather`] - Current conditions at a location

pub mod config;
pub mod geocode;
pub mod poi;
pub mod route;
pub mod session;
pub mod tile;
pub mod weather;

use mapfence::coord::Coordinate;

use crate::error::CliError;

/// Validates a `--lat`/`--lon` pair.
pub fn coordinate(lat: f64, lon: f64) -> Result<Coordinate, CliError> {
    Coordinate::new(lat, lon).map_err(|e| CliError::Config(e.to_string()))
}
