//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::app::{DEFAULT_FENCE_RADIUS_M, DEFAULT_ZOOM};
use crate::coord::DEFAULT_CENTER;
use crate::map::DEFAULT_TILE_URL;
use crate::provider::{
    DEFAULT_GEOCODER_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_PLACES, DEFAULT_MAX_POIS,
    DEFAULT_POI_KEYWORD, DEFAULT_POI_RADIUS_M, DEFAULT_POI_URL, DEFAULT_ROUTER_URL,
    DEFAULT_USER_AGENT, DEFAULT_WEATHER_URL,
};
use crate::tracking::DEFAULT_UDP_PORT;

/// Default search debounce in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;

/// Default replay pacing in milliseconds.
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 1000;

/// Name of the config and log directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".mapfence";

/// Default log file name.
pub const DEFAULT_LOG_FILE_NAME: &str = "mapfence.log";

/// Default log file path (~/.mapfence/mapfence.log).
pub fn default_log_file() -> PathBuf {
    super::file::config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            map: MapSettings {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
            services: ServiceSettings {
                geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
                poi_url: DEFAULT_POI_URL.to_string(),
                router_url: DEFAULT_ROUTER_URL.to_string(),
                weather_url: DEFAULT_WEATHER_URL.to_string(),
                tile_url: DEFAULT_TILE_URL.to_string(),
            },
            http: HttpSettings {
                timeout: DEFAULT_HTTP_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            search: SearchSettings {
                debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
                max_results: DEFAULT_MAX_PLACES,
            },
            poi: PoiSettings {
                keyword: DEFAULT_POI_KEYWORD.to_string(),
                radius: DEFAULT_POI_RADIUS_M,
                max_results: DEFAULT_MAX_POIS,
            },
            geofence: GeofenceSettings {
                radius: DEFAULT_FENCE_RADIUS_M,
            },
            tracking: TrackingSettings {
                source: TrackingSourceKind::Udp,
                port: DEFAULT_UDP_PORT,
                replay_file: None,
                replay_interval_ms: DEFAULT_REPLAY_INTERVAL_MS,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
