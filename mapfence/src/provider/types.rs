//! Provider error type

use thiserror::Error;

/// Errors that can occur while talking to an external service.
///
/// These never reach the coordinator: each adapter logs them and falls back
/// to its neutral result (empty list, empty route, no weather).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Request could not be built from the given inputs
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(e.to_string())
    }
}
