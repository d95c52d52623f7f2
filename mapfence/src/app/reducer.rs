//! The pure state transition function.
//!
//! [`reduce`] takes the current state and one action and returns the next
//! state plus the effects the runtime must carry out. It performs no I/O, so
//! every behavior of the application can be tested by feeding actions in
//! sequence.

use tracing::debug;

use crate::coord::Coordinate;
use crate::geofence::{self, Geofence};
use crate::provider::{PoiQuery, RoutePlan};
use crate::tracking::PositionEvent;

use super::action::{Action, Effect, Intent, Notification};
use super::state::{AppState, MarkerSource, RouteRole};

/// Applies `action` to `state`.
pub fn reduce(mut state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::Intent(intent) => apply_intent(&mut state, intent, &mut effects),

        Action::GeocodeCompleted { seq, places } => {
            if seq == state.search.latest_seq {
                state.search.results = places;
                state.search.pending = false;
            } else {
                debug!(seq, latest = state.search.latest_seq, "Discarding stale geocode result");
            }
        }

        Action::PoiCompleted { seq, pois } => {
            if seq == state.poi.latest_seq {
                state.poi.results = pois;
                state.poi.pending = false;
            } else {
                debug!(seq, latest = state.poi.latest_seq, "Discarding stale POI result");
            }
        }

        Action::RouteCompleted(plan) => {
            // Endpoints edited while the request was in flight win
            if plan.from == state.route.from && plan.to == state.route.to {
                state.route = plan;
                state.route_pending = false;
            } else {
                debug!("Discarding route planned for previous endpoints");
            }
        }

        Action::WeatherCompleted(weather) => state.weather = weather,

        Action::Position(event) => match event {
            PositionEvent::Fix(coordinate) => {
                state.position.coordinate = Some(coordinate);
                state.position.last_error = None;
                evaluate_fence(&mut state, &mut effects);
            }
            PositionEvent::Error(message) => {
                state.position.last_error = Some(message);
            }
            PositionEvent::Unavailable(message) => {
                state.position.last_error = Some(message);
                state.position.is_tracking = false;
            }
        },
    }

    (state, effects)
}

fn apply_intent(state: &mut AppState, intent: Intent, effects: &mut Vec<Effect>) {
    match intent {
        Intent::SearchAddress(query) => {
            state.search.latest_seq += 1;
            let seq = state.search.latest_seq;
            let trimmed = query.trim().to_string();
            state.search.query = query;

            if trimmed.is_empty() {
                state.search.results.clear();
                state.search.pending = false;
            } else {
                state.search.pending = true;
                effects.push(Effect::Geocode {
                    seq,
                    query: trimmed,
                });
            }
        }

        Intent::PickAddress(place) => {
            state.center = place.coordinate;
            state.push_marker(place.coordinate, Some(place.label), MarkerSource::Address);
        }

        Intent::PickPoi(poi) => {
            state.center = poi.coordinate;
            state.push_marker(poi.coordinate, Some(poi.label), MarkerSource::Poi(poi.id));
        }

        Intent::SetRouteEndpoint { role, coordinate } => {
            if state.endpoint(role) != Some(coordinate) {
                // Geometry and any request in flight belong to the old endpoints
                let (from, to) = match role {
                    RouteRole::From => (Some(coordinate), state.route.to),
                    RouteRole::To => (state.route.from, Some(coordinate)),
                };
                state.route = RoutePlan {
                    from,
                    to,
                    ..RoutePlan::empty()
                };
                state.route_pending = false;
            }
        }

        Intent::PlanRoute => match (state.route.from, state.route.to) {
            (Some(from), Some(to)) => {
                state.route_pending = true;
                effects.push(Effect::PlanRoute { from, to });
            }
            _ => debug!("Route planning needs both endpoints"),
        },

        Intent::CenterOn(role) => match state.endpoint(role) {
            Some(endpoint) => state.center = endpoint,
            None => debug!(%role, "No endpoint to center on"),
        },

        Intent::SearchPoi { keyword, radius_m } => {
            state.poi.latest_seq += 1;
            let seq = state.poi.latest_seq;
            let keyword = keyword.trim().to_string();
            state.poi.keyword = keyword.clone();
            state.poi.radius_m = radius_m;

            if keyword.is_empty() {
                state.poi.results.clear();
                state.poi.pending = false;
            } else {
                state.poi.pending = true;
                effects.push(Effect::SearchPoi {
                    seq,
                    query: PoiQuery {
                        center: state.center,
                        keyword,
                        radius_m,
                    },
                });
            }
        }

        Intent::SetGeofence { center, radius_m } => place_fence(state, center, radius_m, effects),

        Intent::SetGeofenceHere { radius_m } => {
            let radius_m = radius_m.unwrap_or(state.default_fence_radius_m);
            let center = state.focus();
            place_fence(state, center, radius_m, effects);
        }

        Intent::MapClick(coordinate) => match state.geofence {
            Some(fence) => {
                state.geofence = Some(fence.moved_to(coordinate));
                evaluate_fence(state, effects);
            }
            None => debug!(at = %coordinate, "Map click ignored, no geofence"),
        },

        Intent::StartTracking => {
            if state.position.is_tracking {
                debug!("Tracking already active");
            } else {
                state.position.is_tracking = true;
                effects.push(Effect::StartTracking);
            }
        }

        Intent::StopTracking => {
            if state.position.is_tracking {
                state.position.is_tracking = false;
                effects.push(Effect::StopTracking);
            }
        }

        Intent::LoadWeather => effects.push(Effect::FetchWeather { at: state.focus() }),
    }
}

fn place_fence(
    state: &mut AppState,
    center: Coordinate,
    radius_m: f64,
    effects: &mut Vec<Effect>,
) {
    match Geofence::new(center, radius_m) {
        Ok(fence) => {
            state.geofence = Some(fence);
            evaluate_fence(state, effects);
        }
        Err(e) => debug!(error = %e, "Geofence rejected"),
    }
}

/// Re-derives the fence status, queueing a notification on a transition.
fn evaluate_fence(state: &mut AppState, effects: &mut Vec<Effect>) {
    let evaluation = geofence::evaluate(
        state.position.coordinate,
        state.geofence.as_ref(),
        state.fence_status,
    );
    state.fence_status = evaluation.status;

    if let Some(transition) = evaluation.transition {
        effects.push(Effect::Notify(Notification::Geofence(transition)));
    }
}
