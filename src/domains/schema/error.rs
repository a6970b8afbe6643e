//! Schema source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading schema definitions.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A definition file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A definition file is not valid JSON or does not match its shape.
    #[error("Invalid definition in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SchemaError {
    pub fn parse(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }
}
