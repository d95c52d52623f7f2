//! Map surface model
//!
//! [`MapView`] is the renderable projection of an [`AppState`]: what a map
//! widget needs to draw, and nothing else. [`TileSource`] turns positions
//! into basemap tile URLs.

mod tiles;

pub use tiles::{TileSource, DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL};

use crate::app::{AppState, MarkerId};
use crate::coord::Coordinate;
use crate::geofence::FenceStatus;

/// Popup text for markers without a label.
pub const DEFAULT_MARKER_LABEL: &str = "Location";

/// A pin to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: MarkerId,
    pub coordinate: Coordinate,
    pub label: String,
}

/// The geofence circle to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenceCircle {
    pub center: Coordinate,
    pub radius_m: f64,
    pub status: FenceStatus,
}

/// Everything a map widget draws for one state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    /// The "you are here" pin
    pub user_position: Option<Coordinate>,
    pub markers: Vec<MapMarker>,
    /// Present only when the route has at least two points
    pub route: Option<Vec<Coordinate>>,
    pub fence: Option<FenceCircle>,
}

impl MapView {
    pub fn from_state(state: &AppState) -> Self {
        let markers = state
            .markers
            .iter()
            .map(|m| MapMarker {
                id: m.id,
                coordinate: m.coordinate,
                label: m
                    .label
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MARKER_LABEL.to_string()),
            })
            .collect();

        let route = (state.route.polyline.len() > 1).then(|| state.route.polyline.clone());

        let fence = state.geofence.map(|f| FenceCircle {
            center: f.center,
            radius_m: f.radius_m,
            status: state.fence_status,
        });

        Self {
            center: state.center,
            zoom: state.zoom,
            user_position: state.position.coordinate,
            markers,
            route,
            fence,
        }
    }

    /// URL of the basemap tile under the view center.
    pub fn center_tile_url(&self, tiles: &TileSource) -> Option<String> {
        tiles.tile_url_for(&self.center, self.zoom).ok()
    }
}
