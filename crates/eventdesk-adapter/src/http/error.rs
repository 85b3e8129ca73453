/*
[INPUT]:  Error sources (HTTP, envelope, serialization, auth, local validation)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::task::TransitionError;

/// Message used when a failed envelope carries no `msg`
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Main error type for the eventdesk adapter
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success envelope or status
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Session is missing or expired (HTTP 401)
    #[error("Not authenticated: {message}")]
    Unauthorized { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected locally before sending
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Transition not allowed by the task lifecycle
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Create an error from a non-success HTTP status and body text
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or(DEFAULT_ERROR_MESSAGE)
                .to_string()
        } else {
            message
        };

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Api {
                code: i64::from(status.as_u16()),
                message,
            }
        }
    }
}

/// Result type alias for eventdesk operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_auth_error() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_auth_error());
        assert!(!ApiError::from_status(StatusCode::FORBIDDEN, "nope").is_auth_error());
        assert!(!ApiError::Validation("x".to_string()).is_auth_error());
    }

    #[test]
    fn test_from_status() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "Invalid event");
        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Invalid event");
            }
            _ => panic!("Expected Api error variant"),
        }

        match ApiError::from_status(StatusCode::UNAUTHORIZED, "  ") {
            ApiError::Unauthorized { message } => assert_eq!(message, "Unauthorized"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
