//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::{ConfigFile, TrackingSourceKind};
use crate::coord::{Coordinate, MAX_ZOOM};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        let mut lat = config.map.center.latitude;
        let mut lon = config.map.center.longitude;
        if let Some(v) = section.get("center_lat") {
            lat = parse_number("map", "center_lat", v, "must be a latitude in degrees")?;
        }
        if let Some(v) = section.get("center_lon") {
            lon = parse_number("map", "center_lon", v, "must be a longitude in degrees")?;
        }
        config.map.center = Coordinate::new(lat, lon).map_err(|e| ConfigFileError::InvalidValue {
            section: "map".to_string(),
            key: "center".to_string(),
            value: format!("{},{}", lat, lon),
            reason: e.to_string(),
        })?;

        if let Some(v) = section.get("zoom") {
            let zoom: u8 = parse_number("map", "zoom", v, "must be an integer from 0 to 19")?;
            if zoom > MAX_ZOOM {
                return Err(invalid("map", "zoom", v, "must be an integer from 0 to 19"));
            }
            config.map.zoom = zoom;
        }
    }

    // [services] section
    if let Some(section) = ini.section(Some("services")) {
        if let Some(v) = non_empty(section.get("geocoder_url")) {
            config.services.geocoder_url = v;
        }
        if let Some(v) = non_empty(section.get("poi_url")) {
            config.services.poi_url = v;
        }
        if let Some(v) = non_empty(section.get("router_url")) {
            config.services.router_url = v;
        }
        if let Some(v) = non_empty(section.get("weather_url")) {
            config.services.weather_url = v;
        }
        if let Some(v) = non_empty(section.get("tile_url")) {
            if !["{z}", "{x}", "{y}"].iter().all(|p| v.contains(p)) {
                return Err(invalid(
                    "services",
                    "tile_url",
                    &v,
                    "must contain {z}, {x} and {y} placeholders",
                ));
            }
            config.services.tile_url = v;
        }
    }

    // [http] section
    if let Some(section) = ini.section(Some("http")) {
        if let Some(v) = section.get("timeout") {
            config.http.timeout = parse_positive("http", "timeout", v, "(seconds)")?;
        }
        if let Some(v) = non_empty(section.get("user_agent")) {
            config.http.user_agent = v;
        }
    }

    // [search] section
    if let Some(section) = ini.section(Some("search")) {
        if let Some(v) = section.get("debounce_ms") {
            config.search.debounce_ms = parse_number(
                "search",
                "debounce_ms",
                v,
                "must be a non-negative integer (milliseconds)",
            )?;
        }
        if let Some(v) = section.get("max_results") {
            config.search.max_results = parse_positive("search", "max_results", v, "")?;
        }
    }

    // [poi] section
    if let Some(section) = ini.section(Some("poi")) {
        if let Some(v) = non_empty(section.get("keyword")) {
            config.poi.keyword = v;
        }
        if let Some(v) = section.get("radius") {
            config.poi.radius = parse_positive("poi", "radius", v, "(meters)")?;
        }
        if let Some(v) = section.get("max_results") {
            config.poi.max_results = parse_positive("poi", "max_results", v, "")?;
        }
    }

    // [geofence] section
    if let Some(section) = ini.section(Some("geofence")) {
        if let Some(v) = section.get("radius") {
            let radius: f64 = parse_number("geofence", "radius", v, "must be a number (meters)")?;
            if !radius.is_finite() || radius <= 0.0 {
                return Err(invalid(
                    "geofence",
                    "radius",
                    v,
                    "must be a positive number (meters)",
                ));
            }
            config.geofence.radius = radius;
        }
    }

    // [tracking] section
    if let Some(section) = ini.section(Some("tracking")) {
        if let Some(v) = section.get("source") {
            config.tracking.source = TrackingSourceKind::from_str(v)
                .map_err(|_| invalid("tracking", "source", v, "must be 'udp' or 'replay'"))?;
        }
        if let Some(v) = section.get("port") {
            config.tracking.port = parse_number(
                "tracking",
                "port",
                v,
                "must be a port number (0-65535)",
            )?;
        }
        if let Some(v) = section.get("replay_file") {
            let v = v.trim();
            if !v.is_empty() {
                config.tracking.replay_file = Some(expand_tilde(v));
            }
        }
        if let Some(v) = section.get("replay_interval_ms") {
            config.tracking.replay_interval_ms =
                parse_positive("tracking", "replay_interval_ms", v, "(milliseconds)")?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

/// Parses an integer that must be greater than zero.
fn parse_positive<T>(section: &str, key: &str, value: &str, unit: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialOrd + Default,
{
    let reason = format!("must be a positive integer {}", unit);
    let parsed: T = parse_number(section, key, value, reason.trim_end())?;
    if parsed <= T::default() {
        return Err(invalid(section, key, value, reason.trim_end()));
    }
    Ok(parsed)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
