//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server.

pub mod metrics;
pub mod prompts;
pub mod resources;
pub mod schema;
pub mod tools;
