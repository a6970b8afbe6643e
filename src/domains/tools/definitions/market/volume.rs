//! Trading volume tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::count;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub struct TradingVolumeTool {
    client: Arc<FmpClient>,
}

impl TradingVolumeTool {
    pub const NAME: &'static str = "get_trading_volume";

    pub const DESCRIPTION: &'static str = "Get trading volume data for a stock symbol";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(record: &FinancialRecord) -> String {
        format!(
            "Trading Volume for {}\n\n\
             Current Volume: {}\n\
             Average Volume: {}\n\
             Date: {}",
            record.display("symbol"),
            count(record.integer("volume")),
            count(record.integer("avgVolume")),
            record.display("date"),
        )
    }
}

#[async_trait]
impl FinancialTool for TradingVolumeTool {
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

        info!("Fetching trading volume for {}", symbol);
        let record = self.client.trading_volume(&symbol).await?;
        if record.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_volume_is_thousands_separated() {
        let record: FinancialRecord = serde_json::from_value(json!({
            "symbol": "AAPL",
            "volume": 48744900,
            "avgVolume": 55000000
        }))
        .unwrap();

        let text = TradingVolumeTool::format(&record);

        assert!(text.contains("Current Volume: 48,744,900"));
        assert!(text.contains("Average Volume: 55,000,000"));
        assert!(text.contains("Date: N/A"));
    }
}
