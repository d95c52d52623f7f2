//! Geographic coordinates and distance math
//!
//! Provides the [`Coordinate`] value used everywhere in the crate, great-circle
//! distance in meters, and conversion to Web Mercator tile coordinates for the
//! basemap tile server.

mod types;

pub use types::{
    Coordinate, CoordError, TileCoord, MAX_LAT, MAX_LON, MAX_MERCATOR_LAT, MAX_ZOOM, MIN_LAT,
    MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Default map center (New Delhi).
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 28.6139,
    longitude: 77.2090,
};

/// Calculates the great-circle distance between two coordinates.
///
/// Uses the haversine formula, which stays accurate at the short distances
/// geofences work with.
///
/// # Returns
///
/// Distance in meters.
#[inline]
pub fn distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1.0 for antipodal points
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Returns the coordinate reached by travelling `distance_m` meters from
/// `origin` along the initial `bearing_deg` (0 = north, 90 = east).
pub fn destination(origin: &Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    let angular = distance_m / EARTH_RADIUS_M;
    let bearing = bearing_deg * DEG_TO_RAD;
    let lat1 = origin.latitude * DEG_TO_RAD;
    let lon1 = origin.longitude * DEG_TO_RAD;

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    // Normalize longitude to -180..180
    let lon_deg = ((lon2 / DEG_TO_RAD + 540.0) % 360.0) - 180.0;

    Coordinate {
        latitude: lat2 / DEG_TO_RAD,
        longitude: lon_deg,
    }
}

/// Converts a coordinate to the XYZ tile containing it.
///
/// # Arguments
///
/// * `coordinate` - Position; latitude must lie in the Web Mercator range
/// * `zoom` - Zoom level (0 to 19)
#[inline]
pub fn to_tile_coords(coordinate: &Coordinate, zoom: u8) -> Result<TileCoord, CoordError> {
    let (lat, lon) = (coordinate.latitude, coordinate.longitude);
    if !(-MAX_MERCATOR_LAT..=MAX_MERCATOR_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = (n as u32).saturating_sub(1);

    let x = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    let lat_rad = lat * DEG_TO_RAD;
    let y = (((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32).min(max_index);

    Ok(TileCoord { x, y, zoom })
}

/// Converts tile coordinates back to the tile's northwest corner.
#[inline]
pub fn tile_to_coordinate(tile: &TileCoord) -> Coordinate {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let longitude = tile.x as f64 / n * 360.0 - 180.0;

    let y = tile.y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();

    Coordinate {
        latitude: lat_rad / DEG_TO_RAD,
        longitude,
    }
}

#[cfg(test)]
mod tests;
