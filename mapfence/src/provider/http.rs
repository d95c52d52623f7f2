//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::types::ProviderError;

/// Default request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent. Nominatim's usage policy rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = concat!("mapfence/", env!("CARGO_PKG_VERSION"));

/// Trait for asynchronous HTTP client operations.
///
/// Adapters are generic over this trait so tests can substitute a mock
/// without touching the network.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Performs an async HTTP GET request with custom headers.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `headers` - Slice of (header_name, header_value) tuples
    fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Performs an async HTTP POST request with a plain text body.
    fn post_text(
        &self,
        url: &str,
        body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client with the default timeout and User-Agent.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_options(DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    /// Creates a client with a custom timeout and User-Agent.
    pub fn with_options(timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<Vec<u8>, ProviderError> {
        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(ProviderError::HttpError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(ProviderError::HttpError(format!(
                    "Failed to read response: {}",
                    e
                )))
            }
        }
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.get_with_headers(url, &[]).await
    }

    async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, ProviderError> {
        trace!(url = url, "HTTP GET request starting");

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = match request.send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ProviderError::HttpError(format!("Request failed: {}", e)));
            }
        };

        Self::read_body(url, response).await
    }

    async fn post_text(&self, url: &str, body: &str) -> Result<Vec<u8>, ProviderError> {
        trace!(url = url, bytes = body.len(), "HTTP POST request starting");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!(url = url, error = %e, "HTTP POST failed");
                ProviderError::HttpError(format!("POST request failed: {}", e))
            })?;

        Self::read_body(url, response).await
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// A request seen by [`MockAsyncHttpClient`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub body: Option<String>,
        pub headers: Vec<(String, String)>,
    }

    /// Mock async HTTP client that returns a fixed response and records requests.
    #[derive(Clone)]
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
        pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl MockAsyncHttpClient {
        pub fn with_body(body: &str) -> Self {
            Self {
                response: Ok(body.as_bytes().to_vec()),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn with_error(error: ProviderError) -> Self {
            Self {
                response: Err(error),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn recorded(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn record(
            &self,
            method: &'static str,
            url: &str,
            body: Option<&str>,
            headers: &[(&str, &str)],
        ) {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                body: body.map(str::to_string),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            self.record("GET", url, None, &[]);
            self.response.clone()
        }

        async fn get_with_headers(
            &self,
            url: &str,
            headers: &[(&str, &str)],
        ) -> Result<Vec<u8>, ProviderError> {
            self.record("GET", url, None, headers);
            self.response.clone()
        }

        async fn post_text(&self, url: &str, body: &str) -> Result<Vec<u8>, ProviderError> {
            self.record("POST", url, Some(body), &[]);
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_mock_async_client_success() {
        let mock = MockAsyncHttpClient::with_body("[]");

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), b"[]".to_vec());
        assert_eq!(mock.recorded()[0].url, "http://example.com");
    }

    #[tokio::test]
    async fn test_mock_async_client_error() {
        let mock = MockAsyncHttpClient::with_error(ProviderError::HttpError("Test error".into()));

        let result = mock.post_text("http://example.com", "q").await;
        assert!(result.is_err());
        assert_eq!(mock.recorded()[0].body.as_deref(), Some("q"));
    }

    #[test]
    fn test_default_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("mapfence/"));
    }

    #[test]
    fn test_client_builds() {
        assert!(AsyncReqwestClient::with_options(5, "test-agent").is_ok());
    }
}
