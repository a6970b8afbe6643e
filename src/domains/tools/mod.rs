//! Tools domain module.
//!
//! Tools are the financial operations MCP clients call: raw upstream data
//! (profiles, statements, quotes, prices, indicators) and derived analysis
//! (DCF, Altman Z-Score, Piotroski F-Score).
//!
//! ## Architecture
//!
//! - `handlers.rs` - The [`FinancialTool`] contract
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Central tool registry and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing [`FinancialTool`]
//! 2. Add its input schema to `schema/services/<name>.json`
//! 3. Add it to `definitions::all_tools`
//!
//! The registry refuses to start if the schema file is missing or the name
//! is already taken.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
