//! Remote service adapters
//!
//! Each adapter wraps one public HTTP API behind a small trait so the
//! coordinator can be tested without a network:
//!
//! | Trait | Implementation | Service |
//! |-------|----------------|---------|
//! | [`Geocoder`] | [`NominatimGeocoder`] | Nominatim free-text search |
//! | [`PoiSearch`] | [`OverpassPoiSearch`] | Overpass nearby features |
//! | [`Router`] | [`OsrmRouter`] | OSRM driving routes |
//! | [`WeatherService`] | [`OpenMeteoWeather`] | Open-Meteo current conditions |
//!
//! Trait methods never fail: transport and decoding errors are logged and
//! turned into empty results. The inherent `fetch` methods surface them for
//! callers such as the CLI that want to report the failure.
//!
//! ```ignore
//! use mapfence::provider::{AsyncReqwestClient, NominatimGeocoder, Geocoder};
//!
//! let http = AsyncReqwestClient::new()?;
//! let geocoder = NominatimGeocoder::new(http, "https://nominatim.openstreetmap.org");
//! let places = geocoder.search("India Gate").await;
//! ```

mod geocoder;
mod http;
mod poi;
mod router;
mod types;
mod weather;

pub use geocoder::{Geocoder, NominatimGeocoder, Place, DEFAULT_GEOCODER_URL, DEFAULT_MAX_PLACES};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use poi::{
    OverpassPoiSearch, Poi, PoiQuery, PoiSearch, DEFAULT_MAX_POIS, DEFAULT_POI_KEYWORD,
    DEFAULT_POI_RADIUS_M, DEFAULT_POI_URL, UNNAMED_LABEL,
};
pub use router::{OsrmRouter, RoutePlan, RouteSummary, Router, DEFAULT_ROUTER_URL};
pub use types::ProviderError;
pub use weather::{OpenMeteoWeather, Weather, WeatherService, DEFAULT_WEATHER_URL};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
