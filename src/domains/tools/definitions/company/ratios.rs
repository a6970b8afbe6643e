//! Financial ratios tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::{fraction_percent, ratio};
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub struct FinancialRatiosTool {
    client: Arc<FmpClient>,
}

impl FinancialRatiosTool {
    pub const NAME: &'static str = "get_financial_ratios";

    pub const DESCRIPTION: &'static str =
        "Get financial ratios and metrics for analyzing company performance";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(record: &FinancialRecord) -> String {
        format!(
            "Financial Ratios for {}\n\n\
             Date: {}\n\n\
             LIQUIDITY RATIOS:\n\
             Current Ratio: {}\n\
             Quick Ratio: {}\n\n\
             PROFITABILITY RATIOS:\n\
             Return on Equity (ROE): {}\n\
             Return on Assets (ROA): {}\n\
             Gross Profit Margin: {}\n\
             Operating Profit Margin: {}\n\
             Net Profit Margin: {}\n\n\
             LEVERAGE RATIOS:\n\
             Debt-to-Equity Ratio: {}",
            record.display("symbol"),
            record.display("date"),
            ratio(record.number("currentRatio")),
            ratio(record.number("quickRatio")),
            fraction_percent(record.number("returnOnEquity")),
            fraction_percent(record.number("returnOnAssets")),
            fraction_percent(record.number("grossProfitMargin")),
            fraction_percent(record.number("operatingProfitMargin")),
            fraction_percent(record.number("netProfitMargin")),
            ratio(record.number("debtEquityRatio")),
        )
    }
}

#[async_trait]
impl FinancialTool for FinancialRatiosTool {
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

        info!("Fetching financial ratios for {}", symbol);
        let record = self.client.financial_ratios(&symbol).await?;
        if record.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&record)))
    }
}
