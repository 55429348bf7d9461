//! Errors raised by the HTTP collaborators.

use thiserror::Error;

/// Failure talking to the gallery backend or the staging host.
///
/// The `Display` text is the opaque cause surfaced to users through
/// `FetchFailed` / `UploadFailed`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Endpoint configuration does not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request could not be built (e.g. bad mime type on a multipart part).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure.
    #[error("Connection to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured total timeout.
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered with a non-success status.
    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failure happened before the server produced an answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Connection { .. } | ApiError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Server error: 500 - boom");
        assert!(!err.is_transport());
    }

    #[test]
    fn timeout_is_transport() {
        let err = ApiError::Timeout { duration: 30 };
        assert_eq!(err.to_string(), "Request timeout after 30s");
        assert!(err.is_transport());
    }
}
