//! The adapter bundle the runtime calls into.

use std::future::Future;

use crate::coord::Coordinate;
use crate::provider::{
    AsyncReqwestClient, Geocoder, NominatimGeocoder, OpenMeteoWeather, OsrmRouter,
    OverpassPoiSearch, Place, Poi, PoiQuery, PoiSearch, RoutePlan, Router, Weather,
    WeatherService,
};

/// Every remote capability the coordinator needs.
///
/// Like the adapter traits, methods never fail; they return neutral values.
pub trait MapServices: Send + Sync + 'static {
    fn geocode(&self, query: &str) -> impl Future<Output = Vec<Place>> + Send;

    fn search_poi(&self, query: &PoiQuery) -> impl Future<Output = Vec<Poi>> + Send;

    fn route(&self, from: Coordinate, to: Coordinate) -> impl Future<Output = RoutePlan> + Send;

    fn weather(&self, at: Coordinate) -> impl Future<Output = Option<Weather>> + Send;
}

/// Groups one adapter per capability.
pub struct Services<G, P, R, W> {
    pub geocoder: G,
    pub poi: P,
    pub router: R,
    pub weather: W,
}

impl<G, P, R, W> MapServices for Services<G, P, R, W>
where
    G: Geocoder + 'static,
    P: PoiSearch + 'static,
    R: Router + 'static,
    W: WeatherService + 'static,
{
    async fn geocode(&self, query: &str) -> Vec<Place> {
        self.geocoder.search(query).await
    }

    async fn search_poi(&self, query: &PoiQuery) -> Vec<Poi> {
        self.poi.search(query).await
    }

    async fn route(&self, from: Coordinate, to: Coordinate) -> RoutePlan {
        self.router.route(from, to).await
    }

    async fn weather(&self, at: Coordinate) -> Option<Weather> {
        self.weather.current(at).await
    }
}

/// The public-web service stack.
pub type HttpServices = Services<
    NominatimGeocoder<AsyncReqwestClient>,
    OverpassPoiSearch<AsyncReqwestClient>,
    OsrmRouter<AsyncReqwestClient>,
    OpenMeteoWeather<AsyncReqwestClient>,
>;

/// Endpoints and limits for [`HttpServices::from_endpoints`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceEndpoints {
    pub geocoder_url: String,
    pub poi_url: String,
    pub router_url: String,
    pub weather_url: String,
    pub max_places: usize,
    pub max_pois: usize,
}

impl HttpServices {
    /// Builds all four adapters over one shared HTTP client.
    pub fn from_endpoints(http: AsyncReqwestClient, endpoints: &ServiceEndpoints) -> Self {
        Services {
            geocoder: NominatimGeocoder::new(http.clone(), endpoints.geocoder_url.clone())
                .with_max_results(endpoints.max_places),
            poi: OverpassPoiSearch::new(http.clone(), endpoints.poi_url.clone())
                .with_max_results(endpoints.max_pois),
            router: OsrmRouter::new(http.clone(), endpoints.router_url.clone()),
            weather: OpenMeteoWeather::new(http, endpoints.weather_url.clone()),
        }
    }
}
