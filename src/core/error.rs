//! Unified error type for server startup and transport failures.
//!
//! Per-call failures never reach this type: tools report them as text
//! results, resources and prompts as MCP error responses.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::{
    prompts::PromptError, resources::ResourceError, schema::SchemaError, tools::ToolError,
};
use crate::fmp::GatewayError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream client could not be built.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Schema definitions could not be loaded.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// The transport failed to start or stopped abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
