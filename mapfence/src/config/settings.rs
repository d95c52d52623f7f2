//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::coord::Coordinate;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Initial map view
    pub map: MapSettings,
    /// Remote service endpoints
    pub services: ServiceSettings,
    /// HTTP client settings shared by all adapters
    pub http: HttpSettings,
    /// Address search behavior
    pub search: SearchSettings,
    /// Nearby POI search defaults
    pub poi: PoiSettings,
    /// Geofence defaults
    pub geofence: GeofenceSettings,
    /// Position source selection
    pub tracking: TrackingSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: Coordinate,
    /// Zoom level (0-19)
    pub zoom: u8,
}

/// Remote service endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    /// Nominatim base URL (without `/search`)
    pub geocoder_url: String,
    /// Overpass interpreter URL
    pub poi_url: String,
    /// OSRM base URL
    pub router_url: String,
    /// Open-Meteo forecast URL
    pub weather_url: String,
    /// XYZ tile template with `{z}`, `{x}`, `{y}` and optional `{s}`
    pub tile_url: String,
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    /// Timeout in seconds for HTTP requests.
    pub timeout: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

/// Address search configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Delay in milliseconds before a typed query is sent
    pub debounce_ms: u64,
    /// Number of candidates kept
    pub max_results: usize,
}

/// Nearby POI search configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiSettings {
    pub keyword: String,
    /// Search radius in meters
    pub radius: u32,
    pub max_results: usize,
}

/// Geofence configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceSettings {
    /// Radius in meters for fences placed without an explicit radius
    pub radius: f64,
}

/// Which position source the tracker uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingSourceKind {
    /// ForeFlight-style XGPS datagrams
    #[default]
    Udp,
    /// Recorded `lat,lon` track file
    Replay,
}

impl fmt::Display for TrackingSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingSourceKind::Udp => write!(f, "udp"),
            TrackingSourceKind::Replay => write!(f, "replay"),
        }
    }
}

impl FromStr for TrackingSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "udp" => Ok(TrackingSourceKind::Udp),
            "replay" => Ok(TrackingSourceKind::Replay),
            other => Err(format!("unknown tracking source '{}'", other)),
        }
    }
}

/// Position tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    pub source: TrackingSourceKind,
    /// UDP port for XGPS datagrams
    pub port: u16,
    /// Track file for the replay source
    pub replay_file: Option<PathBuf>,
    /// Spacing between replayed fixes in milliseconds
    pub replay_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
