//! Income statement tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::whole_dollars;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub struct IncomeStatementTool {
    client: Arc<FmpClient>,
}

impl IncomeStatementTool {
    pub const NAME: &'static str = "get_income_statement";

    pub const DESCRIPTION: &'static str = "Get income statement information for a company";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    /// Most recent fiscal year.
    pub fn format(record: &FinancialRecord) -> String {
        format!(
            "Income Statement for {}\n\n\
             Date: {}\n\
             Revenue: {}\n\
             Gross Profit: {}\n\
             Operating Income: {}\n\
             Net Income: {}",
            record.display("symbol"),
            record.display("date"),
            whole_dollars(record.number("revenue")),
            whole_dollars(record.number("grossProfit")),
            whole_dollars(record.number("operatingIncome")),
            whole_dollars(record.number("netIncome")),
        )
    }
}

#[async_trait]
impl FinancialTool for IncomeStatementTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn execute(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let Some(symbol) = symbol_argument(&arguments) else {
            return Ok(error_result(SYMBOL_REQUIRED));
        };

        info!("Fetching income statement for {}", symbol);
        let record = self.client.income_statement(&symbol).await?;
        if record.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{args, only_text};
    use crate::fmp::testing::{StubTransport, stub_client};
    use serde_json::json;

    #[tokio::test]
    async fn test_income_statement_formatting() {
        let stub = Arc::new(StubTransport::new().route(
            "/income-statement/AAPL",
            json!([
                {
                    "symbol": "AAPL",
                    "date": "2023-09-30",
                    "revenue": 383285000000i64,
                    "grossProfit": 169148000000i64,
                    "operatingIncome": 114301000000i64,
                    "netIncome": 96995000000i64
                },
                {"symbol": "AAPL", "date": "2022-09-24", "revenue": 394328000000i64}
            ]),
        ));
        let tool = IncomeStatementTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({"symbol": "AAPL"}))).await.unwrap());

        assert!(text.contains("Date: 2023-09-30"));
        assert!(text.contains("Revenue: $383,285,000,000"));
        assert!(text.contains("Net Income: $96,995,000,000"));
    }

    #[test]
    fn test_missing_figures_render_na() {
        let record: FinancialRecord =
            serde_json::from_value(json!({"symbol": "X", "revenue": 1000})).unwrap();
        let text = IncomeStatementTool::format(&record);
        assert!(text.contains("Revenue: $1,000"));
        assert!(text.contains("Gross Profit: N/A"));
    }
}
