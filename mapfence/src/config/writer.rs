//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let replay_file = config
        .tracking
        .replay_file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[map]
; Initial map center in decimal degrees (default: New Delhi)
center_lat = {}
center_lon = {}
; Initial zoom level, 0 (world) to 19 (street) (default: 13)
zoom = {}

[services]
; Nominatim-compatible geocoder base URL (the /search path is appended)
geocoder_url = {}
; Overpass API interpreter URL for nearby POI search
poi_url = {}
; OSRM routing server base URL
router_url = {}
; Open-Meteo forecast endpoint for the weather panel
weather_url = {}
; XYZ raster tile template. {{s}} rotates over subdomains a, b, c
tile_url = {}

[http]
; Timeout in seconds for HTTP requests (default: 10)
timeout = {}
; User-Agent header. Public OpenStreetMap services require an identifying agent
user_agent = {}

[search]
; Delay in milliseconds after typing stops before a search is sent (default: 400)
debounce_ms = {}
; Number of address candidates shown (default: 6)
max_results = {}

[poi]
; Default keyword for nearby search, matched against tag keys (default: cafe)
keyword = {}
; Default search radius in meters (default: 1000)
radius = {}
; Maximum number of features returned (default: 25)
max_results = {}

[geofence]
; Radius in meters for "fence here" (default: 400)
radius = {}

[tracking]
; Position source:
;   udp    - ForeFlight-style XGPS datagrams (flight simulators, GPS bridge apps)
;   replay - Recorded track file, one "lat,lon" line per fix
source = {}
; UDP port to listen on (default: 49002)
port = {}
; Track file for the replay source
replay_file = {}
; Delay between replayed fixes in milliseconds (default: 1000)
replay_interval_ms = {}

[logging]
; Log file path (default: ~/.mapfence/mapfence.log)
file = {}
"#,
        config.map.center.latitude,
        config.map.center.longitude,
        config.map.zoom,
        config.services.geocoder_url,
        config.services.poi_url,
        config.services.router_url,
        config.services.weather_url,
        config.services.tile_url,
        config.http.timeout,
        config.http.user_agent,
        config.search.debounce_ms,
        config.search.max_results,
        config.poi.keyword,
        config.poi.radius,
        config.poi.max_results,
        config.geofence.radius,
        config.tracking.source,
        config.tracking.port,
        replay_file,
        config.tracking.replay_interval_ms,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
