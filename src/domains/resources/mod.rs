//! Resources domain module.
//!
//! Resources are readable documents advertised to MCP clients: live market
//! snapshots and the score methodology.
//!
//! ## Architecture
//!
//! - `content.rs` - What serves each resource URI
//! - `service.rs` - Resource service for listing and reading
//! - `error.rs` - Resource-specific error types
//!
//! The catalogue itself is declared in `schema/resources.json`.

mod content;
mod error;
mod service;

pub use content::{ResourceContent, score_methodology};
pub use error::ResourceError;
pub use service::{ResourceEntry, ResourceService};
