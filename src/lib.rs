//! Financial Modeling Prep MCP server.
//!
//! Exposes Financial Modeling Prep market and fundamentals data to Model
//! Context Protocol clients as tools, alongside derived analysis: DCF
//! scenarios, the Altman Z-Score, the Piotroski F-Score and a composite
//! financial strength rating.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **fmp**: the upstream gateway (HTTP client, records, request parameters)
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the financial operations clients call
//!   - **metrics**: pure score and valuation computations
//!   - **resources**: readable market snapshots and methodology docs
//!   - **prompts**: analysis prompt templates
//!   - **schema**: tool input schemas, resource and prompt declarations
//!
//! # Example
//!
//! ```rust,no_run
//! use fmp_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod fmp;

pub use core::{Config, Error, McpServer, Result};
