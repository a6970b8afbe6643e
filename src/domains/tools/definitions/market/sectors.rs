//! Sector performance tool.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;
use tracing::info;

use crate::domains::tools::definitions::common::text_result;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub const NO_SECTORS: &str = "No sector performance data available";

pub struct SectorPerformanceTool {
    client: Arc<FmpClient>,
}

impl SectorPerformanceTool {
    pub const NAME: &'static str = "get_sector_performance";

    pub const DESCRIPTION: &'static str =
        "Get daily performance (percentage change) of market sectors";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    /// Upstream sends the change as a string such as `"-0.5123%"`; numbers
    /// are accepted too.
    pub fn format(sectors: &[FinancialRecord]) -> String {
        let mut text = String::from("Sector Performance\n");

        for sector in sectors {
            let change = match sector.get("changesPercentage") {
                Some(Value::Number(n)) => n
                    .as_f64()
                    .map_or_else(|| n.to_string(), |v| format!("{v:.2}%")),
                Some(Value::String(s)) => s.clone(),
                _ => "N/A".to_string(),
            };
            let _ = write!(text, "\n{}: {}", sector.display("sector"), change);
        }

        text
    }
}

#[async_trait]
impl FinancialTool for SectorPerformanceTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn execute(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        info!("Fetching sector performance");
        let sectors = self.client.sector_performance().await?;
        if sectors.is_empty() {
            return Ok(text_result(NO_SECTORS.to_string()));
        }

        Ok(text_result(Self::format(&sectors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{args, only_text};
    use crate::fmp::testing::{StubTransport, stub_client};
    use serde_json::json;

    #[tokio::test]
    async fn test_sector_lines() {
        let stub = Arc::new(StubTransport::new().route(
            "/sectors-performance",
            json!([
                {"sector": "Technology", "changesPercentage": "1.2345%"},
                {"sector": "Energy", "changesPercentage": -0.5}
            ]),
        ));
        let tool = SectorPerformanceTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({}))).await.unwrap());

        assert_eq!(text, "Sector Performance\n\nTechnology: 1.2345%\nEnergy: -0.50%");
    }

    #[tokio::test]
    async fn test_sectors_empty() {
        let stub = Arc::new(StubTransport::new());
        let tool = SectorPerformanceTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({}))).await.unwrap());

        assert_eq!(text, NO_SECTORS);
    }
}
