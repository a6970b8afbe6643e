//! The contract every financial tool implements.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};

use super::error::ToolError;

/// A named, self-describing financial operation.
///
/// The input schema is not part of the trait: it is looked up in the schema
/// source under [`FinancialTool::name`] when the registry is built.
///
/// `execute` turns validation failures and "no data" into ordinary results.
/// Upstream faults may be returned as `Err`; the registry renders them as
/// `Error: {message}`.
#[async_trait]
pub trait FinancialTool: Send + Sync {
    /// Stable identifier used for dispatch and schema lookup.
    fn name(&self) -> &'static str;

    /// Description shown to clients.
    fn description(&self) -> &'static str;

    /// Run the tool against raw protocol arguments.
    async fn execute(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}
