//! Client error types.

use campsync_core::recurrence::SeriesError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Recurring series rejected: {0}")]
    Series(#[from] SeriesError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use campsync_core::recurrence::RecurrenceError;

    #[test]
    fn test_series_error_message() {
        let err: ClientError = SeriesError::InvalidRule(RecurrenceError::InvalidInterval).into();
        assert_eq!(
            err.to_string(),
            "Recurring series rejected: Invalid recurrence rule: Interval must be at least 1"
        );
    }

    #[test]
    fn test_server_error_message() {
        let err = ClientError::ServerError {
            status: 422,
            message: "name is required".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 422: name is required");
    }
}
