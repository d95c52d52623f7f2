//! Nearby point-of-interest search via the Overpass API.
//!
//! The query selects named nodes, ways and relations within `radius` meters
//! of a center whose tags match `keyword` case-insensitively:
//!
//! ```text
//! [out:json][timeout:10];
//! nwr(around:RADIUS,LAT,LON)[name][~"KEYWORD"~".",i];
//! out center 25;
//! ```
//!
//! Ways and relations carry their position in a `center` object; nodes carry
//! `lat`/`lon` directly.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, warn};

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::coord::Coordinate;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_POI_URL: &str = "https://overpass-api.de/api/interpreter";

/// Number of features kept from a search.
pub const DEFAULT_MAX_POIS: usize = 25;

/// Default keyword for the POI panel.
pub const DEFAULT_POI_KEYWORD: &str = "cafe";

/// Default search radius in meters.
pub const DEFAULT_POI_RADIUS_M: u32 = 1000;

/// Label used when a feature carries no `name` tag.
pub const UNNAMED_LABEL: &str = "(no name)";

/// A nearby named feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    /// Upstream element id
    pub id: u64,
    pub coordinate: Coordinate,
    pub label: String,
    /// Element type (`node`, `way` or `relation`)
    pub kind: String,
}

/// Parameters of a POI search.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiQuery {
    pub center: Coordinate,
    /// Matched against tag keys as a case-insensitive regular expression
    pub keyword: String,
    pub radius_m: u32,
}

/// Trait for nearby feature search.
///
/// Failures are absorbed and yield an empty list.
pub trait PoiSearch: Send + Sync {
    /// Returns named features near `query.center`.
    fn search(&self, query: &PoiQuery) -> impl Future<Output = Vec<Poi>> + Send;
}

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
}

#[derive(Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

/// POI search backed by an Overpass interpreter.
pub struct OverpassPoiSearch<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
    max_results: usize,
}

impl<C: AsyncHttpClient> OverpassPoiSearch<C> {
    /// Creates a search client posting to the interpreter at `endpoint`.
    pub fn new(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            max_results: DEFAULT_MAX_POIS,
        }
    }

    /// Overrides how many features are kept.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Builds the Overpass QL query for `query`.
    pub fn build_query(&self, query: &PoiQuery) -> String {
        format!(
            "[out:json][timeout:10];\nnwr(around:{},{},{})[name][~\"{}\"~\".\",i];\nout center {};",
            query.radius_m,
            query.center.latitude,
            query.center.longitude,
            escape_ql_string(&query.keyword),
            self.max_results
        )
    }

    /// Performs the search, surfacing transport and decoding errors.
    pub async fn fetch(&self, query: &PoiQuery) -> Result<Vec<Poi>, ProviderError> {
        let ql = self.build_query(query);
        let body = self.http_client.post_text(&self.endpoint, &ql).await?;
        parse_elements(&body, self.max_results)
    }
}

impl<C: AsyncHttpClient> PoiSearch for OverpassPoiSearch<C> {
    async fn search(&self, query: &PoiQuery) -> Vec<Poi> {
        match self.fetch(query).await {
            Ok(pois) => {
                debug!(
                    keyword = %query.keyword,
                    radius_m = query.radius_m,
                    results = pois.len(),
                    "POI search complete"
                );
                pois
            }
            Err(e) => {
                warn!(keyword = %query.keyword, error = %e, "POI search failed");
                Vec::new()
            }
        }
    }
}

/// Escapes a value for use inside a double-quoted Overpass QL string.
fn escape_ql_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn parse_elements(body: &[u8], max_results: usize) -> Result<Vec<Poi>, ProviderError> {
    let response: OverpassResponse = serde_json::from_slice(body)?;

    Ok(response
        .elements
        .into_iter()
        .take(max_results)
        .filter_map(|mut e| {
            let (lat, lon) = match (e.lat, e.lon, &e.center) {
                (Some(lat), Some(lon), _) => (lat, lon),
                (_, _, Some(center)) => (center.lat, center.lon),
                _ => return None,
            };
            let coordinate = Coordinate::new(lat, lon).ok()?;
            let label = e
                .tags
                .remove("name")
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNNAMED_LABEL.to_string());
            Some(Poi {
                id: e.id,
                coordinate,
                label,
                kind: e.kind,
            })
        })
        .collect())
}
