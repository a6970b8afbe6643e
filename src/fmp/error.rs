//! Gateway error types.

use thiserror::Error;

/// Errors raised while talking to the upstream provider.
///
/// A non-200 response keeps its status code and body so callers can match on
/// the kind of failure instead of parsing the message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No credential is configured; raised before any network attempt.
    #[error("API key is required for FMP API requests")]
    MissingApiKey,

    /// The upstream answered with a status other than 200.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("API request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Transport-level failure (DNS, connection reset, TLS, ...).
    #[error("API request failed: {0}")]
    Request(String),

    /// The upstream body was not valid JSON.
    #[error("Invalid JSON in API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Query parameters could not be encoded.
    #[error("Failed to encode query parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl GatewayError {
    /// Create a new transport-level error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// The upstream status code, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = GatewayError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "API request failed with status 404: Not Found"
        );
    }

    #[test]
    fn test_missing_api_key_message() {
        let err = GatewayError::MissingApiKey;
        assert!(err.to_string().contains("API key is required"));
        assert_eq!(err.status(), None);
    }
}
