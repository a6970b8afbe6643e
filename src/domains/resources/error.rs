//! Resource-specific error types.

use thiserror::Error;

use crate::domains::schema::SchemaError;
use crate::fmp::GatewayError;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource is listed but nothing serves its content.
    #[error("Resource has no readable content: {0}")]
    Unreadable(String),

    /// Fetching live data for the resource failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The resource definitions could not be loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Live data could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }
}
