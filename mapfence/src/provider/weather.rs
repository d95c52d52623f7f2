//! Current conditions from Open-Meteo.

use std::fmt;
use std::future::Future;

use serde::Deserialize;
use tracing::{debug, warn};

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::coord::Coordinate;

/// Public Open-Meteo forecast endpoint.
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Current weather at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    pub temperature_c: f64,
    /// Wind speed at 10 m, km/h
    pub wind_speed: f64,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C, wind {:.1} km/h", self.temperature_c, self.wind_speed)
    }
}

/// Trait for current-weather lookups. `None` on any failure.
pub trait WeatherService: Send + Sync {
    fn current(&self, at: Coordinate) -> impl Future<Output = Option<Weather>> + Send;
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    wind_speed_10m: f64,
}

/// Weather backed by the Open-Meteo forecast API.
pub struct OpenMeteoWeather<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: AsyncHttpClient> OpenMeteoWeather<C> {
    pub fn new(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    pub fn build_url(&self, at: &Coordinate) -> String {
        format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,wind_speed_10m",
            self.endpoint, at.latitude, at.longitude
        )
    }

    pub async fn fetch(&self, at: Coordinate) -> Result<Weather, ProviderError> {
        let body = self.http_client.get(&self.build_url(&at)).await?;
        let response: ForecastResponse = serde_json::from_slice(&body)?;
        let current = response
            .current
            .ok_or_else(|| ProviderError::InvalidResponse("missing current block".to_string()))?;

        Ok(Weather {
            temperature_c: current.temperature_2m,
            wind_speed: current.wind_speed_10m,
        })
    }
}

impl<C: AsyncHttpClient> WeatherService for OpenMeteoWeather<C> {
    async fn current(&self, at: Coordinate) -> Option<Weather> {
        match self.fetch(at).await {
            Ok(weather) => {
                debug!(at = %at, weather = %weather, "Weather loaded");
                Some(weather)
            }
            Err(e) => {
                warn!(at = %at, error = %e, "Weather request failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::DEFAULT_CENTER;
    use crate::provider::MockAsyncHttpClient;

    #[test]
    fn test_build_url_requests_current_block() {
        let weather = OpenMeteoWeather::new(MockAsyncHttpClient::with_body("{}"), DEFAULT_WEATHER_URL);
        let url = weather.build_url(&DEFAULT_CENTER);
        assert!(url.starts_with(DEFAULT_WEATHER_URL));
        assert!(url.contains("latitude=28.6139&longitude=77.209"));
        assert!(url.ends_with("current=temperature_2m,wind_speed_10m"));
    }

    #[tokio::test]
    async fn test_current_reads_temperature_and_wind() {
        let body = r#"{"current": {"time": "2026-05-01T12:00", "temperature_2m": 31.4, "wind_speed_10m": 11.5}}"#;
        let weather = OpenMeteoWeather::new(MockAsyncHttpClient::with_body(body), DEFAULT_WEATHER_URL);

        let current = weather.current(DEFAULT_CENTER).await.unwrap();
        assert!((current.temperature_c - 31.4).abs() < 1e-9);
        assert!((current.wind_speed - 11.5).abs() < 1e-9);
        assert_eq!(current.to_string(), "31.4°C, wind 11.5 km/h");
    }

    #[tokio::test]
    async fn test_missing_block_is_none() {
        let weather = OpenMeteoWeather::new(MockAsyncHttpClient::with_body("{}"), DEFAULT_WEATHER_URL);
        assert!(weather.current(DEFAULT_CENTER).await.is_none());
    }
}
