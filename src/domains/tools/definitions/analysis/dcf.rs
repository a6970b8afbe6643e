//! Discounted cash flow valuation tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::dollars;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

/// Upstream field carrying the market price in DCF records.
pub const STOCK_PRICE_FIELD: &str = "Stock Price";

pub struct DcfValuationTool {
    client: Arc<FmpClient>,
}

impl DcfValuationTool {
    pub const NAME: &'static str = "get_dcf_valuation";

    pub const DESCRIPTION: &'static str = "Get discounted cash flow (DCF) valuation for a company";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(record: &FinancialRecord) -> String {
        let fair_value = record.number("dcf");
        let price = record.number(STOCK_PRICE_FIELD);

        let mut text = format!(
            "DCF Valuation Analysis for {}\n\n\
             Date: {}\n\n\
             DCF Fair Value: {}\n\
             Current Stock Price: {}",
            record.display("symbol"),
            record.display("date"),
            dollars(fair_value),
            dollars(price),
        );

        if let (Some(fair_value), Some(price)) = (fair_value, price) {
            if price != 0.0 {
                let upside = (fair_value - price) / price * 100.0;
                let verdict = if upside > 0.0 {
                    "Undervalued"
                } else if upside < 0.0 {
                    "Overvalued"
                } else {
                    "Fair Value"
                };
                text.push_str(&format!("\nUpside/Downside: {upside:.2}% ({verdict})"));
            }
        }

        text
    }
}

#[async_trait]
impl FinancialTool for DcfValuationTool {
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

        info!("Fetching DCF valuation for {}", symbol);
        let record = self.client.dcf_valuation(&symbol).await?;
        if record.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&record)))
    }
}
