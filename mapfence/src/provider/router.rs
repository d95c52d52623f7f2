//! Driving routes via an OSRM server.

use std::fmt;
use std::future::Future;

use serde::Deserialize;
use tracing::{debug, warn};

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::coord::Coordinate;

/// Public OSRM demo server.
pub const DEFAULT_ROUTER_URL: &str = "https://router.project-osrm.org";

/// A route and the endpoints it was planned for.
///
/// An empty plan (no geometry, zero distance) is the neutral value and also
/// what a failed or routeless request produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePlan {
    pub from: Option<Coordinate>,
    pub to: Option<Coordinate>,
    /// Route geometry in travel order
    pub polyline: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RoutePlan {
    /// The neutral plan: no endpoints, no geometry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty plan that still records the requested endpoints.
    pub fn unrouted(from: Coordinate, to: Coordinate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    /// True when there is no usable route.
    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty() && self.distance_m <= 0.0
    }

    /// Human-readable distance and ETA, absent for an empty plan.
    pub fn summary(&self) -> Option<RouteSummary> {
        if self.distance_m > 0.0 {
            Some(RouteSummary {
                distance_m: self.distance_m,
                duration_s: self.duration_s,
            })
        } else {
            None
        }
    }
}

/// Distance/ETA pair rendered as `"12.34 km · ETA 17 min"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl RouteSummary {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// ETA rounded to whole minutes.
    pub fn eta_minutes(&self) -> u64 {
        (self.duration_s / 60.0).round().max(0.0) as u64
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} km · ETA {} min",
            self.distance_km(),
            self.eta_minutes()
        )
    }
}

/// Trait for route planning.
///
/// Failures yield [`RoutePlan::unrouted`] for the requested endpoints.
pub trait Router: Send + Sync {
    fn route(&self, from: Coordinate, to: Coordinate)
        -> impl Future<Output = RoutePlan> + Send;
}

#[derive(Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[longitude, latitude]`
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

/// Router backed by the OSRM HTTP API.
pub struct OsrmRouter<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> OsrmRouter<C> {
    pub fn new(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Builds the driving-route URL. OSRM takes `lon,lat` pairs.
    pub fn build_url(&self, from: &Coordinate, to: &Coordinate) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url.trim_end_matches('/'),
            from.longitude,
            from.latitude,
            to.longitude,
            to.latitude
        )
    }

    /// Requests a route, surfacing transport and decoding errors.
    pub async fn fetch(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RoutePlan, ProviderError> {
        let url = self.build_url(&from, &to);
        let body = self.http_client.get(&url).await?;
        parse_route(&body, from, to)
    }
}

impl<C: AsyncHttpClient> Router for OsrmRouter<C> {
    async fn route(&self, from: Coordinate, to: Coordinate) -> RoutePlan {
        match self.fetch(from, to).await {
            Ok(plan) => {
                debug!(
                    points = plan.polyline.len(),
                    distance_m = plan.distance_m,
                    duration_s = plan.duration_s,
                    "Route planned"
                );
                plan
            }
            Err(e) => {
                warn!(from = %from, to = %to, error = %e, "Route request failed");
                RoutePlan::unrouted(from, to)
            }
        }
    }
}

fn parse_route(
    body: &[u8],
    from: Coordinate,
    to: Coordinate,
) -> Result<RoutePlan, ProviderError> {
    let response: OsrmResponse = serde_json::from_slice(body)?;

    let Some(route) = response.routes.into_iter().next() else {
        return Ok(RoutePlan::unrouted(from, to));
    };

    let polyline = route
        .geometry
        .coordinates
        .into_iter()
        .filter_map(|[lon, lat]| Coordinate::new(lat, lon).ok())
        .collect();

    Ok(RoutePlan {
        from: Some(from),
        to: Some(to),
        polyline,
        distance_m: route.distance,
        duration_s: route.duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    fn endpoints() -> (Coordinate, Coordinate) {
        (
            Coordinate::new(28.6139, 77.2090).unwrap(),
            Coordinate::new(28.5355, 77.3910).unwrap(),
        )
    }

    const ROUTE: &str = r#"{
        "code": "Ok",
        "routes": [{
            "geometry": {"type": "LineString", "coordinates": [[77.2090, 28.6139], [77.30, 28.57], [77.3910, 28.5355]]},
            "distance": 23456.7,
            "duration": 1830.0
        }]
    }"#;

    #[test]
    fn test_build_url_uses_lon_lat_order() {
        let (from, to) = endpoints();
        let router = OsrmRouter::new(MockAsyncHttpClient::with_body("{}"), "https://osrm.test/");
        assert_eq!(
            router.build_url(&from, &to),
            "https://osrm.test/route/v1/driving/77.209,28.6139;77.391,28.5355?overview=full&geometries=geojson"
        );
    }

    #[tokio::test]
    async fn test_route_swaps_geojson_pairs() {
        let (from, to) = endpoints();
        let router = OsrmRouter::new(MockAsyncHttpClient::with_body(ROUTE), DEFAULT_ROUTER_URL);

        let plan = router.route(from, to).await;

        assert_eq!(plan.polyline.len(), 3);
        assert!((plan.polyline[0].latitude - 28.6139).abs() < 1e-9);
        assert!((plan.polyline[0].longitude - 77.2090).abs() < 1e-9);
        assert_eq!(plan.from, Some(from));
        assert_eq!(plan.to, Some(to));
        assert!((plan.distance_m - 23456.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_routes_is_empty_plan() {
        let (from, to) = endpoints();
        let router = OsrmRouter::new(
            MockAsyncHttpClient::with_body(r#"{"code": "NoRoute", "routes": []}"#),
            DEFAULT_ROUTER_URL,
        );

        let plan = router.route(from, to).await;
        assert!(plan.is_empty());
        assert!(plan.summary().is_none());
        assert_eq!(plan.from, Some(from));
    }

    #[tokio::test]
    async fn test_failure_is_empty_plan_with_endpoints() {
        let (from, to) = endpoints();
        let http = MockAsyncHttpClient::with_error(ProviderError::HttpError("timeout".into()));
        let plan = OsrmRouter::new(http, DEFAULT_ROUTER_URL).route(from, to).await;

        assert_eq!(plan, RoutePlan::unrouted(from, to));
    }

    #[test]
    fn test_summary_formatting() {
        let (from, to) = endpoints();
        let plan = RoutePlan {
            distance_m: 12_345.0,
            duration_s: 1_029.0,
            ..RoutePlan::unrouted(from, to)
        };

        let summary = plan.summary().unwrap();
        assert_eq!(summary.eta_minutes(), 17);
        assert_eq!(summary.to_string(), "12.35 km · ETA 17 min");
    }
}
