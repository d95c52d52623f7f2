//! Coordinate type definitions

use std::fmt;
use std::str::FromStr;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Web Mercator latitude limit used by slippy-map tile servers
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;

/// Zoom levels served by standard OSM-style tile servers
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 19;

/// A geographic position in decimal degrees.
///
/// No unit conversion is ever applied; both fields are always degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside the valid degree ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the great-circle distance to `other` in meters.
    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        super::distance_meters(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"` (whitespace around either part is ignored).
impl FromStr for Coordinate {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordError::Unparseable(s.to_string()))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordError::Unparseable(s.to_string()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoordError::Unparseable(s.to_string()))?;
        Coordinate::new(latitude, longitude)
    }
}

/// Tile coordinates in the XYZ / slippy map system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// X coordinate (east-west), 0 at west
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
    /// Zoom level (0-19)
    pub zoom: u8,
}

/// Errors that can occur while building or converting coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside the valid range
    InvalidLatitude(f64),
    /// Longitude is outside the valid range
    InvalidLongitude(f64),
    /// Zoom level is outside the range served by tile servers
    InvalidZoom(u8),
    /// Text could not be read as `lat,lon`
    Unparseable(String),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::Unparseable(text) => {
                write!(f, "Cannot parse '{}' as 'lat,lon'", text)
            }
        }
    }
}

impl std::error::Error for CoordError {}
