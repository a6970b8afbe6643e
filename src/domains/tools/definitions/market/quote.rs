//! Real-time stock quote tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::{dollars, percent};
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub struct StockQuoteTool {
    client: Arc<FmpClient>,
}

impl StockQuoteTool {
    pub const NAME: &'static str = "get_stock_quote";

    pub const DESCRIPTION: &'static str = "Get current stock price and quote information";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(record: &FinancialRecord) -> String {
        format!(
            "Stock Quote for {}\n\n\
             Current Price: {}\n\
             Change: {} ({})\n\
             Day Range: {} - {}\n\
             52-Week Range: {} - {}",
            record.display("symbol"),
            dollars(record.number("price")),
            dollars(record.number("change")),
            percent(record.number("changesPercentage")),
            dollars(record.number("dayLow")),
            dollars(record.number("dayHigh")),
            dollars(record.number("yearLow")),
            dollars(record.number("yearHigh")),
        )
    }
}

#[async_trait]
impl FinancialTool for StockQuoteTool {
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

        info!("Fetching stock quote for {}", symbol);
        let record = self.client.stock_quote(&symbol).await?;
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
    async fn test_quote_contains_price_and_change_percent() {
        let stub = Arc::new(StubTransport::new().route(
            "/quote/AAPL",
            json!([{
                "symbol": "AAPL",
                "price": 150.25,
                "change": 1.85,
                "changesPercentage": 1.25,
                "dayLow": 148.5,
                "dayHigh": 151.0,
                "yearLow": 124.17,
                "yearHigh": 198.23
            }]),
        ));
        let tool = StockQuoteTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({"symbol": "AAPL"}))).await.unwrap());

        assert!(text.contains("150.25"));
        assert!(text.contains("1.25%"));
        assert!(text.contains("Change: $1.85 (1.25%)"));
        assert!(text.contains("Day Range: $148.50 - $151.00"));
        assert!(text.contains("52-Week Range: $124.17 - $198.23"));
    }

    #[tokio::test]
    async fn test_quote_symbol_is_trimmed() {
        let stub = Arc::new(StubTransport::new().route("/quote/AAPL", json!([{"symbol": "AAPL"}])));
        let tool = StockQuoteTool::new(stub_client(&stub));

        tool.execute(args(json!({"symbol": "  AAPL "}))).await.unwrap();

        assert_eq!(stub.endpoints(), vec!["/quote/AAPL".to_string()]);
    }
}
