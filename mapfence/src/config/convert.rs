//! Conversions from file settings into runtime component configuration.

use std::time::Duration;

use super::settings::ConfigFile;
use crate::app::{AppState, CoordinatorConfig, ServiceEndpoints};
use crate::map::TileSource;
use crate::provider::{AsyncReqwestClient, ProviderError};
use crate::tracking::{ReplaySource, UdpPositionSource};

impl ConfigFile {
    /// Endpoints and limits for the HTTP service stack.
    pub fn service_endpoints(&self) -> ServiceEndpoints {
        ServiceEndpoints {
            geocoder_url: self.services.geocoder_url.clone(),
            poi_url: self.services.poi_url.clone(),
            router_url: self.services.router_url.clone(),
            weather_url: self.services.weather_url.clone(),
            max_places: self.search.max_results,
            max_pois: self.poi.max_results,
        }
    }

    /// Builds the shared HTTP client.
    pub fn http_client(&self) -> Result<AsyncReqwestClient, ProviderError> {
        AsyncReqwestClient::with_options(self.http.timeout, &self.http.user_agent)
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            search_debounce: Duration::from_millis(self.search.debounce_ms),
            ..CoordinatorConfig::default()
        }
    }

    /// The state a fresh session starts from.
    pub fn initial_state(&self) -> AppState {
        AppState::new(self.map.center, self.map.zoom)
            .with_default_fence_radius(self.geofence.radius)
            .with_poi_defaults(self.poi.keyword.clone(), self.poi.radius)
    }

    pub fn tile_source(&self) -> TileSource {
        TileSource::new(self.services.tile_url.clone())
    }

    pub fn udp_source(&self) -> UdpPositionSource {
        UdpPositionSource::new(self.tracking.port)
    }

    /// The replay source, if a track file is configured.
    pub fn replay_source(&self) -> Option<ReplaySource> {
        self.tracking.replay_file.as_ref().map(|path| {
            ReplaySource::new(path.clone())
                .with_interval(Duration::from_millis(self.tracking.replay_interval_ms))
        })
    }
}
