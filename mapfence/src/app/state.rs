//! Application state owned by the coordinator.

use std::fmt;
use std::str::FromStr;

use crate::coord::{Coordinate, DEFAULT_CENTER};
use crate::geofence::{FenceStatus, Geofence};
use crate::provider::{Place, Poi, RoutePlan, Weather, DEFAULT_POI_KEYWORD, DEFAULT_POI_RADIUS_M};

/// Initial zoom level of the map.
pub const DEFAULT_ZOOM: u8 = 13;

/// Radius used when a fence is placed without an explicit radius.
pub const DEFAULT_FENCE_RADIUS_M: f64 = 400.0;

/// Process-unique marker identifier, issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

impl MarkerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a marker came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSource {
    /// Picked from address search results
    Address,
    /// Picked from POI results, with the upstream element id
    Poi(u64),
}

/// A pin on the map. Never mutated once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub coordinate: Coordinate,
    pub label: Option<String>,
    pub source: MarkerSource,
}

/// Which end of a route an endpoint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRole {
    From,
    To,
}

impl fmt::Display for RouteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteRole::From => write!(f, "from"),
            RouteRole::To => write!(f, "to"),
        }
    }
}

impl FromStr for RouteRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "from" => Ok(RouteRole::From),
            "to" => Ok(RouteRole::To),
            other => Err(format!("unknown route role '{}' (expected 'from' or 'to')", other)),
        }
    }
}

/// Latest output of the position tracker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedPosition {
    pub coordinate: Option<Coordinate>,
    /// Persists until the next successful fix
    pub last_error: Option<String>,
    pub is_tracking: bool,
}

/// Address search panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    /// Sequence number of the most recently issued query
    pub latest_seq: u64,
    pub results: Vec<Place>,
    pub pending: bool,
}

/// Nearby POI panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiState {
    pub keyword: String,
    pub radius_m: u32,
    pub latest_seq: u64,
    pub results: Vec<Poi>,
    pub pending: bool,
}

impl Default for PoiState {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_POI_KEYWORD.to_string(),
            radius_m: DEFAULT_POI_RADIUS_M,
            latest_seq: 0,
            results: Vec::new(),
            pending: false,
        }
    }
}

/// Everything the application knows, published as immutable snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub center: Coordinate,
    pub zoom: u8,
    /// Most recent first
    pub markers: Vec<Marker>,
    pub route: RoutePlan,
    pub route_pending: bool,
    pub geofence: Option<Geofence>,
    pub fence_status: FenceStatus,
    pub default_fence_radius_m: f64,
    pub position: TrackedPosition,
    pub search: SearchState,
    pub poi: PoiState,
    pub weather: Option<Weather>,
    next_marker_id: u64,
}

impl AppState {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            markers: Vec::new(),
            route: RoutePlan::empty(),
            route_pending: false,
            geofence: None,
            fence_status: FenceStatus::Unknown,
            default_fence_radius_m: DEFAULT_FENCE_RADIUS_M,
            position: TrackedPosition::default(),
            search: SearchState::default(),
            poi: PoiState::default(),
            weather: None,
            next_marker_id: 1,
        }
    }

    pub fn with_default_fence_radius(mut self, radius_m: f64) -> Self {
        self.default_fence_radius_m = radius_m;
        self
    }

    /// Sets the POI panel's initial keyword and radius.
    pub fn with_poi_defaults(mut self, keyword: impl Into<String>, radius_m: u32) -> Self {
        self.poi.keyword = keyword.into();
        self.poi.radius_m = radius_m;
        self
    }

    /// The stored route endpoint for `role`.
    pub fn endpoint(&self, role: RouteRole) -> Option<Coordinate> {
        match role {
            RouteRole::From => self.route.from,
            RouteRole::To => self.route.to,
        }
    }

    /// Where location-dependent actions apply: the tracked position if
    /// known, otherwise the map center.
    pub fn focus(&self) -> Coordinate {
        self.position.coordinate.unwrap_or(self.center)
    }

    pub(crate) fn push_marker(
        &mut self,
        coordinate: Coordinate,
        label: Option<String>,
        source: MarkerSource,
    ) -> MarkerId {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;
        self.markers.insert(
            0,
            Marker {
                id,
                coordinate,
                label,
                source,
            },
        );
        id
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_prepend_with_increasing_ids() {
        let mut state = AppState::default();
        let a = state.push_marker(DEFAULT_CENTER, Some("a".into()), MarkerSource::Address);
        let b = state.push_marker(DEFAULT_CENTER, None, MarkerSource::Poi(7));

        assert!(b > a);
        assert_eq!(state.markers[0].id, b);
        assert_eq!(state.markers[1].label.as_deref(), Some("a"));
    }

    #[test]
    fn test_route_role_parse() {
        assert_eq!("From".parse::<RouteRole>().unwrap(), RouteRole::From);
        assert_eq!(" to ".parse::<RouteRole>().unwrap(), RouteRole::To);
        assert!("via".parse::<RouteRole>().is_err());
    }

    #[test]
    fn test_focus_prefers_tracked_position() {
        let mut state = AppState::default();
        assert_eq!(state.focus(), state.center);

        let here = Coordinate::new(1.0, 2.0).unwrap();
        state.position.coordinate = Some(here);
        assert_eq!(state.focus(), here);
    }
}
