//! Tool-specific error types.

use thiserror::Error;

use crate::domains::schema::SchemaError;
use crate::fmp::GatewayError;

/// Errors that can occur while building the registry or running a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The upstream data provider failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Two tools were registered under the same name.
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// A tool's schema definition exists but could not be loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A tool has no input schema definition.
    #[error("No schema configuration found for service: {0}")]
    MissingSchema(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_errors_keep_their_message() {
        let err: ToolError = GatewayError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "API request failed with status 500: boom");
    }

    #[test]
    fn test_setup_error_messages() {
        assert_eq!(
            ToolError::MissingSchema("get_x".into()).to_string(),
            "No schema configuration found for service: get_x"
        );
        assert_eq!(
            ToolError::DuplicateTool("get_x".into()).to_string(),
            "Duplicate tool name: get_x"
        );
    }
}
