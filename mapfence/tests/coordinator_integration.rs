//! Integration tests for the application coordinator.
//!
//! These drive a running [`Coordinator`] end to end with in-process adapters
//! and position sources:
//! - Geofence enter/exit notifications from tracked positions
//! - Route planning preconditions and idempotence
//! - Debounced, sequence-checked address search
//! - Tracker errors, replay playback and session teardown
//!
//! Run with: `cargo test --test coordinator_integration`

use std::future::Future;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use mapfence::app::{
    AppState, Coordinator, CoordinatorConfig, CoordinatorHandle, Intent, MapServices,
    MarkerSource, Notification, RouteRole,
};
use mapfence::coord::{destination, Coordinate, DEFAULT_CENTER};
use mapfence::geofence::{FenceStatus, FenceTransition};
use mapfence::map::MapView;
use mapfence::provider::{Place, Poi, PoiQuery, RoutePlan, Weather};
use mapfence::tracking::{
    GeolocationTracker, PositionEvent, PositionSource, ReplaySource, TrackingError,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// What the fake services were asked to do.
#[derive(Default)]
struct Calls {
    geocoded: Mutex<Vec<String>>,
    routed: Mutex<usize>,
}

/// Deterministic in-memory services.
#[derive(Clone, Default)]
struct FakeServices {
    calls: Arc<Calls>,
}

impl MapServices for FakeServices {
    fn geocode(&self, query: &str) -> impl Future<Output = Vec<Place>> + Send {
        self.calls.geocoded.lock().unwrap().push(query.to_string());
        let places = vec![Place {
            label: format!("{}, Delhi", query),
            coordinate: destination(&DEFAULT_CENTER, 45.0, 1_000.0),
        }];
        async move { places }
    }

    async fn search_poi(&self, query: &PoiQuery) -> Vec<Poi> {
        vec![Poi {
            id: 9001,
            coordinate: destination(&query.center, 180.0, 250.0),
            label: format!("Nearest {}", query.keyword),
            kind: "node".into(),
        }]
    }

    fn route(&self, from: Coordinate, to: Coordinate) -> impl Future<Output = RoutePlan> + Send {
        *self.calls.routed.lock().unwrap() += 1;
        let plan = RoutePlan {
            polyline: vec![from, to],
            distance_m: from.distance_to(&to),
            duration_s: from.distance_to(&to) / 10.0,
            ..RoutePlan::unrouted(from, to)
        };
        async move { plan }
    }

    async fn weather(&self, _at: Coordinate) -> Option<Weather> {
        Some(Weather {
            temperature_c: 29.5,
            wind_speed: 7.0,
        })
    }
}

/// Position source fed by the test through a channel.
///
/// Only the first tracking session receives the scripted events; later
/// sessions stay silent until cancelled.
struct ScriptedPositions {
    script: Mutex<Option<mpsc::Receiver<PositionEvent>>>,
}

impl ScriptedPositions {
    fn new() -> (Self, mpsc::Sender<PositionEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                script: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

impl PositionSource for ScriptedPositions {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn watch(
        &self,
        events: mpsc::Sender<PositionEvent>,
        cancel: CancellationToken,
    ) -> Result<(), TrackingError> {
        let script = self.script.lock().unwrap().take();
        let Some(mut script) = script else {
            cancel.cancelled().await;
            return Ok(());
        };

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                next = script.recv() => match next {
                    Some(event) => events
                        .send(event)
                        .await
                        .map_err(|_| TrackingError::ChannelClosed)?,
                    None => {
                        cancel.cancelled().await;
                        return Ok(());
                    }
                },
            }
        }
    }
}

fn start_with<P: PositionSource>(source: P) -> (CoordinatorHandle, Arc<Calls>) {
    let services = FakeServices::default();
    let calls = Arc::clone(&services.calls);
    let handle = Coordinator::new(
        services,
        GeolocationTracker::new(source),
        CoordinatorConfig::default(),
    )
    .start();
    (handle, calls)
}

fn start_scripted() -> (CoordinatorHandle, Arc<Calls>, mpsc::Sender<PositionEvent>) {
    let (source, script) = ScriptedPositions::new();
    let (handle, services) = start_with(source);
    (handle, services, script)
}

async fn next_notification(rx: &mut broadcast::Receiver<Notification>) -> Notification {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("notification timed out")
        .expect("notification channel closed")
}

fn fix_at(distance_m: f64) -> PositionEvent {
    PositionEvent::Fix(destination(&DEFAULT_CENTER, 0.0, distance_m))
}

// ============================================================================
// Geofence
// ============================================================================

#[tokio::test]
async fn test_boundary_crossing_notifies_once() {
    let (handle, _, script) = start_scripted();
    let mut alerts = handle.notifications();

    handle
        .dispatch(Intent::SetGeofence {
            center: DEFAULT_CENTER,
            radius_m: 400.0,
        })
        .await
        .unwrap();
    handle.dispatch(Intent::StartTracking).await.unwrap();

    script.send(fix_at(401.0)).await.unwrap();
    let state = handle
        .wait_for(|s| s.fence_status != FenceStatus::Unknown)
        .await
        .unwrap();
    assert_eq!(state.fence_status, FenceStatus::Outside);

    script.send(fix_at(399.0)).await.unwrap();
    assert_eq!(
        next_notification(&mut alerts).await,
        Notification::Geofence(FenceTransition::Entered)
    );
    assert_eq!(handle.snapshot().fence_status, FenceStatus::Inside);

    // Staying inside is silent; leaving fires Exited
    script.send(fix_at(100.0)).await.unwrap();
    script.send(fix_at(800.0)).await.unwrap();
    assert_eq!(
        next_notification(&mut alerts).await,
        Notification::Geofence(FenceTransition::Exited)
    );

    handle.shutdown().await;
}

#[tokio::test]
async fn test_map_click_moves_fence_under_user() {
    let (handle, _, script) = start_scripted();
    let mut alerts = handle.notifications();

    handle.dispatch(Intent::StartTracking).await.unwrap();
    script.send(fix_at(0.0)).await.unwrap();
    handle
        .wait_for(|s| s.position.coordinate.is_some())
        .await
        .unwrap();

    // Fence placed where the user is
    handle
        .dispatch(Intent::SetGeofenceHere { radius_m: None })
        .await
        .unwrap();
    let state = handle
        .wait_for(|s| s.fence_status == FenceStatus::Inside)
        .await
        .unwrap();
    assert_eq!(state.geofence.unwrap().radius_m, 400.0);

    // Clicking far away drags the fence off the user
    let far = destination(&DEFAULT_CENTER, 90.0, 2_000.0);
    handle.dispatch(Intent::MapClick(far)).await.unwrap();
    assert_eq!(
        next_notification(&mut alerts).await,
        Notification::Geofence(FenceTransition::Exited)
    );
    assert_eq!(handle.snapshot().geofence.unwrap().center, far);

    handle.shutdown().await;
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_plan_route_without_endpoints_is_noop() {
    let (handle, services, _script) = start_scripted();

    handle.dispatch(Intent::PlanRoute).await.unwrap();
    // A later intent proves PlanRoute was already reduced
    handle
        .dispatch(Intent::SetGeofenceHere { radius_m: None })
        .await
        .unwrap();
    let state = handle.wait_for(|s| s.geofence.is_some()).await.unwrap();

    assert_eq!(state.route, RoutePlan::empty());
    assert!(!state.route_pending);
    assert_eq!(*services.routed.lock().unwrap(), 0);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_plan_route_is_idempotent() {
    let (handle, services, _script) = start_scripted();
    let to = destination(&DEFAULT_CENTER, 90.0, 5_000.0);

    handle
        .dispatch(Intent::SetRouteEndpoint {
            role: RouteRole::From,
            coordinate: DEFAULT_CENTER,
        })
        .await
        .unwrap();
    handle
        .dispatch(Intent::SetRouteEndpoint {
            role: RouteRole::To,
            coordinate: to,
        })
        .await
        .unwrap();

    handle.dispatch(Intent::PlanRoute).await.unwrap();
    let first = handle
        .wait_for(|s| !s.route.is_empty() && !s.route_pending)
        .await
        .unwrap()
        .route;

    handle.dispatch(Intent::PlanRoute).await.unwrap();
    let second = handle
        .wait_for(|s| !s.route_pending && *services.routed.lock().unwrap() == 2)
        .await
        .unwrap()
        .route;

    assert_eq!(first, second);
    assert_eq!(first.polyline.len(), 2);
    assert!(first.summary().is_some());

    let view = MapView::from_state(&handle.snapshot());
    assert_eq!(view.route.unwrap().len(), 2);

    handle.dispatch(Intent::CenterOn(RouteRole::To)).await.unwrap();
    handle.wait_for(|s| s.center == to).await.unwrap();

    handle.shutdown().await;
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_only_latest_query_applied() {
    let (handle, services, _script) = start_scripted();

    handle
        .dispatch(Intent::SearchAddress("a".into()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle
        .dispatch(Intent::SearchAddress("ab".into()))
        .await
        .unwrap();

    let state = handle
        .wait_for(|s| !s.search.pending && !s.search.results.is_empty())
        .await
        .unwrap();

    assert_eq!(state.search.results[0].label, "ab, Delhi");
    assert_eq!(*services.geocoded.lock().unwrap(), vec!["ab".to_string()]);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_search_pick_drops_marker() {
    let (handle, _, _script) = start_scripted();

    handle
        .dispatch(Intent::SearchAddress("Connaught Place".into()))
        .await
        .unwrap();
    let state = handle
        .wait_for(|s| !s.search.results.is_empty())
        .await
        .unwrap();

    let place = state.search.results[0].clone();
    handle.dispatch(Intent::PickAddress(place.clone())).await.unwrap();
    let state = handle.wait_for(|s| !s.markers.is_empty()).await.unwrap();

    assert_eq!(state.center, place.coordinate);
    assert_eq!(state.markers[0].source, MarkerSource::Address);
    assert_eq!(state.markers[0].label.as_deref(), Some("Connaught Place, Delhi"));

    handle.shutdown().await;
}

#[tokio::test]
async fn test_poi_search_and_pick() {
    let (handle, _, _script) = start_scripted();

    handle
        .dispatch(Intent::SearchPoi {
            keyword: "pharmacy".into(),
            radius_m: 500,
        })
        .await
        .unwrap();
    let state = handle
        .wait_for(|s| !s.poi.pending && !s.poi.results.is_empty())
        .await
        .unwrap();
    let poi = state.poi.results[0].clone();
    assert_eq!(poi.label, "Nearest pharmacy");

    handle.dispatch(Intent::PickPoi(poi.clone())).await.unwrap();
    let state = handle.wait_for(|s| !s.markers.is_empty()).await.unwrap();
    assert_eq!(state.markers[0].source, MarkerSource::Poi(9001));
    assert_eq!(state.center, poi.coordinate);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_weather_loaded_for_center() {
    let (handle, _, _script) = start_scripted();

    handle.dispatch(Intent::LoadWeather).await.unwrap();
    let state = handle.wait_for(|s| s.weather.is_some()).await.unwrap();
    assert_eq!(state.weather.unwrap().temperature_c, 29.5);

    handle.shutdown().await;
}

// ============================================================================
// Tracking
// ============================================================================

#[tokio::test]
async fn test_tracker_error_keeps_position() {
    let (handle, _, script) = start_scripted();

    handle.dispatch(Intent::StartTracking).await.unwrap();
    script.send(fix_at(50.0)).await.unwrap();
    let with_fix = handle
        .wait_for(|s| s.position.coordinate.is_some())
        .await
        .unwrap();

    script
        .send(PositionEvent::Error("GPS signal lost".into()))
        .await
        .unwrap();
    let state = handle
        .wait_for(|s| s.position.last_error.is_some())
        .await
        .unwrap();

    assert_eq!(state.position.last_error.as_deref(), Some("GPS signal lost"));
    assert_eq!(state.position.coordinate, with_fix.position.coordinate);
    assert!(state.position.is_tracking);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_events_after_stop_are_ignored() {
    let (handle, _, script) = start_scripted();

    handle.dispatch(Intent::StartTracking).await.unwrap();
    script.send(fix_at(10.0)).await.unwrap();
    let tracked = handle
        .wait_for(|s| s.position.coordinate.is_some())
        .await
        .unwrap();

    handle.dispatch(Intent::StopTracking).await.unwrap();
    handle
        .wait_for(|s| !s.position.is_tracking)
        .await
        .unwrap();

    // The producer is gone; nothing it queued can move the position
    let _ = script.send(fix_at(900.0)).await;
    handle
        .dispatch(Intent::SetGeofenceHere { radius_m: None })
        .await
        .unwrap();
    let state = handle.wait_for(|s| s.geofence.is_some()).await.unwrap();
    assert_eq!(state.position.coordinate, tracked.position.coordinate);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_replay_track_end_to_end() {
    let mut track = tempfile::NamedTempFile::new().unwrap();
    let inside = destination(&DEFAULT_CENTER, 0.0, 100.0);
    let outside = destination(&DEFAULT_CENTER, 0.0, 1_000.0);
    writeln!(track, "# morning walk").unwrap();
    writeln!(track, "{},{}", outside.latitude, outside.longitude).unwrap();
    writeln!(track, "{},{}", inside.latitude, inside.longitude).unwrap();

    let source = ReplaySource::new(track.path()).with_interval(Duration::from_millis(20));
    let (handle, _) = start_with(source);
    let mut alerts = handle.notifications();

    handle
        .dispatch(Intent::SetGeofence {
            center: DEFAULT_CENTER,
            radius_m: 400.0,
        })
        .await
        .unwrap();
    handle.dispatch(Intent::StartTracking).await.unwrap();

    assert_eq!(
        next_notification(&mut alerts).await,
        Notification::Geofence(FenceTransition::Entered)
    );

    // The replay ends and tracking turns itself off, keeping the last fix
    let state: AppState = handle
        .wait_for(|s| !s.position.is_tracking && s.position.last_error.is_some())
        .await
        .unwrap();
    assert_eq!(state.position.coordinate, Some(inside));
    assert!(state.position.last_error.unwrap().contains("ended"));

    handle.shutdown().await;
}
