//! Schema source for tool input contracts, resources and prompts.
//!
//! Definitions are JSON files under a single root:
//!
//! - `services/<tool>.json` - JSON Schema for one tool's arguments
//! - `resources.json` - `{"resources": [...]}`
//! - `prompts.json` - `{"prompts": [...]}`
//!
//! The copies under `schema/` in the repository are compiled in; setting
//! `MCP_SCHEMA_DIR` points the server at a directory with the same layout.

mod error;
mod loader;

pub use error::SchemaError;
pub use loader::{PromptArgumentDescriptor, PromptDescriptor, ResourceDescriptor, SchemaSource};
