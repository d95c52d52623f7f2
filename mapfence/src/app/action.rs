//! Inputs and outputs of the reducer.

use std::fmt;

use crate::coord::Coordinate;
use crate::geofence::FenceTransition;
use crate::provider::{Place, Poi, PoiQuery, RoutePlan, Weather};
use crate::tracking::PositionEvent;

use super::state::RouteRole;

/// A user request submitted through the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Debounced free-text address search. A blank query clears results.
    SearchAddress(String),
    /// Recenter on a geocoding result and drop a marker there.
    PickAddress(Place),
    /// Recenter on a POI and drop a marker there.
    PickPoi(Poi),
    SetRouteEndpoint {
        role: RouteRole,
        coordinate: Coordinate,
    },
    /// Plan a route between the stored endpoints, if both are set.
    PlanRoute,
    /// Recenter on a stored route endpoint.
    CenterOn(RouteRole),
    /// Search for `keyword` within `radius_m` of the map center.
    SearchPoi { keyword: String, radius_m: u32 },
    /// Create or replace the geofence.
    SetGeofence { center: Coordinate, radius_m: f64 },
    /// Fence at the tracked position, or the map center when unknown.
    SetGeofenceHere { radius_m: Option<f64> },
    /// A click on the map surface; moves the fence center if one exists.
    MapClick(Coordinate),
    StartTracking,
    StopTracking,
    /// Fetch weather at the tracked position, or the map center.
    LoadWeather,
}

/// Everything the reducer handles: intents plus completions fed back by the
/// runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Intent(Intent),
    GeocodeCompleted { seq: u64, places: Vec<Place> },
    PoiCompleted { seq: u64, pois: Vec<Poi> },
    RouteCompleted(RoutePlan),
    WeatherCompleted(Option<Weather>),
    Position(PositionEvent),
}

impl From<Intent> for Action {
    fn from(intent: Intent) -> Self {
        Action::Intent(intent)
    }
}

/// Work requested by the reducer, executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Geocode { seq: u64, query: String },
    SearchPoi { seq: u64, query: PoiQuery },
    PlanRoute { from: Coordinate, to: Coordinate },
    FetchWeather { at: Coordinate },
    StartTracking,
    StopTracking,
    Notify(Notification),
}

/// Something the presentation layer should surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Geofence(FenceTransition),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Geofence(transition) => write!(f, "{}", transition),
        }
    }
}
