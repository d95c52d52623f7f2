//! Address search via a Nominatim-compatible geocoding service.
//!
//! # API Endpoint
//!
//! - `{base}/search?format=json&q={query}` with `Accept-Language: en`
//!
//! Nominatim returns latitude and longitude as JSON strings; entries that do
//! not parse to a valid coordinate are dropped.

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, warn};

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::coord::Coordinate;

/// Public OpenStreetMap Nominatim instance.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Number of candidates kept from a search.
pub const DEFAULT_MAX_PLACES: usize = 6;

/// A geocoding candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Human-readable place name
    pub label: String,
    pub coordinate: Coordinate,
}

/// Trait for free-text address search.
///
/// Failures are absorbed: an unreachable service or a malformed response
/// yields an empty list.
pub trait Geocoder: Send + Sync {
    /// Returns a short ranked list of candidate places for `query`.
    fn search(&self, query: &str) -> impl Future<Output = Vec<Place>> + Send;
}

#[derive(Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim HTTP endpoint.
pub struct NominatimGeocoder<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    max_results: usize,
}

impl<C: AsyncHttpClient> NominatimGeocoder<C> {
    /// Creates a geocoder against `base_url` (without the `/search` path).
    pub fn new(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            max_results: DEFAULT_MAX_PLACES,
        }
    }

    /// Overrides how many candidates are kept.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn build_url(&self, query: &str) -> Result<String, ProviderError> {
        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        reqwest::Url::parse_with_params(&endpoint, &[("format", "json"), ("q", query)])
            .map(String::from)
            .map_err(|e| ProviderError::InvalidRequest(format!("{}: {}", endpoint, e)))
    }

    /// Performs the search, surfacing transport and decoding errors.
    pub async fn fetch(&self, query: &str) -> Result<Vec<Place>, ProviderError> {
        let url = self.build_url(query)?;
        let body = self
            .http_client
            .get_with_headers(&url, &[("Accept-Language", "en")])
            .await?;
        parse_places(&body, self.max_results)
    }
}

impl<C: AsyncHttpClient> Geocoder for NominatimGeocoder<C> {
    async fn search(&self, query: &str) -> Vec<Place> {
        match self.fetch(query).await {
            Ok(places) => {
                debug!(query, results = places.len(), "Geocoder search complete");
                places
            }
            Err(e) => {
                warn!(query, error = %e, "Geocoder search failed");
                Vec::new()
            }
        }
    }
}

fn parse_places(body: &[u8], max_results: usize) -> Result<Vec<Place>, ProviderError> {
    let raw: Vec<NominatimPlace> = serde_json::from_slice(body)?;

    Ok(raw
        .into_iter()
        .filter_map(|p| {
            let lat = p.lat.trim().parse().ok()?;
            let lon = p.lon.trim().parse().ok()?;
            let coordinate = Coordinate::new(lat, lon).ok()?;
            Some(Place {
                label: p.display_name,
                coordinate,
            })
        })
        .take(max_results)
        .collect())
}
