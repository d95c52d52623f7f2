//! Text rendering of session snapshots.
//!
//! The [`Presenter`] watches successive snapshots and reports what changed,
//! so asynchronous results (search, POIs, routes, weather) print when they
//! land rather than when the command was typed.

use mapfence::app::AppState;
use mapfence::coord::Coordinate;
use mapfence::map::{MapView, TileSource};
use mapfence::provider::{Place, Poi, RoutePlan};

/// Turns snapshot changes into output lines.
pub struct Presenter {
    previous: AppState,
    /// Last search sequence whose results were printed
    shown_search: u64,
    shown_poi: u64,
}

impl Presenter {
    pub fn new(initial: AppState) -> Self {
        Self {
            shown_search: initial.search.latest_seq,
            shown_poi: initial.poi.latest_seq,
            previous: initial,
        }
    }

    /// Lines describing everything that changed since the last call.
    ///
    /// Snapshots may be coalesced, so completions are detected from sequence
    /// numbers rather than from seeing the pending flag flip.
    pub fn update(&mut self, next: AppState) -> Vec<String> {
        let prev = &self.previous;
        let mut lines = Vec::new();

        let search = &next.search;
        if !search.pending && search.latest_seq != self.shown_search {
            self.shown_search = search.latest_seq;
            if !search.query.trim().is_empty() {
                if search.results.is_empty() {
                    lines.push(format!("No places found for '{}'", search.query.trim()));
                } else {
                    lines.push(format!("Results for '{}':", search.query.trim()));
                    lines.extend(place_lines(&search.results));
                }
            }
        }

        let poi = &next.poi;
        if !poi.pending && poi.latest_seq != self.shown_poi {
            self.shown_poi = poi.latest_seq;
            if !poi.keyword.is_empty() {
                if poi.results.is_empty() {
                    lines.push(format!("No '{}' within {} m", poi.keyword, poi.radius_m));
                } else {
                    lines.push(format!("Nearby '{}':", poi.keyword));
                    lines.extend(poi_lines(&poi.results, next.center));
                }
            }
        }

        // An endpoint edit drops the old route without a result to report
        let same_endpoints = next.route.from == prev.route.from && next.route.to == prev.route.to;
        if same_endpoints
            && !next.route_pending
            && (prev.route_pending || next.route.polyline != prev.route.polyline)
        {
            lines.push(route_line(&next.route));
        }

        if next.weather != prev.weather {
            if let Some(weather) = next.weather {
                lines.push(format!("Weather at {}: {}", next.focus(), weather));
            }
        }

        if next.markers.len() > prev.markers.len() {
            if let Some(marker) = next.markers.first() {
                lines.push(format!(
                    "Marker {} at {}: {}",
                    marker.id,
                    marker.coordinate,
                    marker.label.as_deref().unwrap_or("Location")
                ));
            }
        }

        if next.geofence != prev.geofence {
            if let Some(fence) = next.geofence {
                lines.push(format!(
                    "Geofence at {}, radius {:.0} m ({})",
                    fence.center, fence.radius_m, next.fence_status
                ));
            }
        }

        if next.position.is_tracking != prev.position.is_tracking {
            lines.push(if next.position.is_tracking {
                "Tracking started".to_string()
            } else {
                "Tracking stopped".to_string()
            });
        }

        if next.position.last_error != prev.position.last_error {
            if let Some(error) = &next.position.last_error {
                lines.push(format!("Location error: {}", error));
            }
        }

        self.previous = next;
        lines
    }
}

pub fn place_lines(places: &[Place]) -> Vec<String> {
    places
        .iter()
        .enumerate()
        .map(|(i, place)| format!("{:>3}. {} ({})", i + 1, place.label, place.coordinate))
        .collect()
}

/// POI list with distances from `from`.
pub fn poi_lines(pois: &[Poi], from: Coordinate) -> Vec<String> {
    pois.iter()
        .enumerate()
        .map(|(i, poi)| {
            format!(
                "{:>3}. {} ({:.0} m)",
                i + 1,
                poi.label,
                from.distance_to(&poi.coordinate)
            )
        })
        .collect()
}

fn route_line(route: &RoutePlan) -> String {
    match route.summary() {
        Some(summary) => format!("Route: {}", summary),
        None => "No route found".to_string(),
    }
}

fn optional(coordinate: Option<Coordinate>) -> String {
    coordinate
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// The `status` report.
pub fn status_lines(state: &AppState, source: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Center:    {} (zoom {})", state.center, state.zoom),
        format!(
            "Position:  {} [{} {}]",
            optional(state.position.coordinate),
            source,
            if state.position.is_tracking {
                "tracking"
            } else {
                "idle"
            }
        ),
    ];

    if let Some(error) = &state.position.last_error {
        lines.push(format!("           last error: {}", error));
    }

    lines.push(match &state.geofence {
        Some(fence) => format!(
            "Geofence:  {} r={:.0} m, {}",
            fence.center, fence.radius_m, state.fence_status
        ),
        None => "Geofence:  -".to_string(),
    });

    lines.push(format!(
        "Route:     {} -> {}{}",
        optional(state.route.from),
        optional(state.route.to),
        match (state.route_pending, state.route.summary()) {
            (true, _) => " (planning...)".to_string(),
            (false, Some(summary)) => format!(", {}", summary),
            (false, None) => String::new(),
        }
    ));

    lines.push(format!("Markers:   {}", state.markers.len()));

    if let Some(weather) = state.weather {
        lines.push(format!("Weather:   {}", weather));
    }

    lines
}

/// The `map` report: what a map widget would draw.
pub fn map_lines(view: &MapView, tiles: &TileSource) -> Vec<String> {
    let mut lines = vec![format!("View {} at zoom {}", view.center, view.zoom)];

    if let Some(url) = view.center_tile_url(tiles) {
        lines.push(format!("  tile      {}", url));
    }
    if let Some(position) = view.user_position {
        lines.push(format!("  you       {}", position));
    }
    for marker in &view.markers {
        lines.push(format!(
            "  marker {}  {} {}",
            marker.id, marker.coordinate, marker.label
        ));
    }
    if let Some(route) = &view.route {
        lines.push(format!("  route     {} points", route.len()));
    }
    if let Some(fence) = &view.fence {
        lines.push(format!(
            "  fence     {} r={:.0} m ({})",
            fence.center, fence.radius_m, fence.status
        ));
    }
    lines.push(format!("  {}", tiles.attribution()));

    lines
}
