//! Custom error types for the application.
//!
//! - [`ApiError`] - Backend envelope signalled a failure (or its payload was unusable)
//! - [`FetchError`] - Transport failures while talking to the API

use serde_json::Value;
use thiserror::Error;

/// Error produced when an API envelope signals failure.
///
/// `details` carries the envelope's `error` (or `errors`) payload untouched so
/// callers can render field-level validation messages.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: Option<i64>,
    pub details: Option<Value>,
}

impl ApiError {
    /// Error name exposed to UI collaborators.
    pub const NAME: &'static str = "ApiError";

    pub fn new(message: impl Into<String>, status_code: Option<i64>, details: Option<Value>) -> Self {
        Self {
            message: message.into(),
            status_code,
            details,
        }
    }
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, ...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::new(err.to_string(), None, None)
    }
}
