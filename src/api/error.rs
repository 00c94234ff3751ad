//! Shared error handling for backend responses.
//!
//! Wraps HTTP failures with enough structure to distinguish rate limiting
//! and auth problems from plain API errors before they become `DeskError`.

use std::fmt;

use crate::error::DeskError;

/// Structured backend error preserving HTTP status information.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if available
    pub status: Option<reqwest::StatusCode>,
    /// Retry-After header value in seconds, if available
    pub retry_after: Option<u64>,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            retry_after: None,
            message: message.into(),
        }
    }

    /// Create a new API error with HTTP status information.
    pub fn with_status(message: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            status: Some(status),
            retry_after: None,
            message: message.into(),
        }
    }

    /// Set the retry-after value.
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status
            .is_some_and(|s| s == reqwest::StatusCode::TOO_MANY_REQUESTS)
    }

    pub fn is_auth(&self) -> bool {
        self.status.is_some_and(|s| {
            s == reqwest::StatusCode::UNAUTHORIZED || s == reqwest::StatusCode::FORBIDDEN
        })
    }

    pub fn is_transient(&self) -> bool {
        self.status.is_some_and(|s| s.is_server_error())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for DeskError {
    fn from(error: ApiError) -> Self {
        if error.is_rate_limited() {
            return DeskError::RateLimited(error.retry_after.unwrap_or(60));
        }
        if error.is_auth() {
            return DeskError::Auth(error.message);
        }

        match error.status {
            Some(status) => DeskError::Api(format!(
                "backend returned {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                error.message
            )),
            None => DeskError::Api(error.message),
        }
    }
}
