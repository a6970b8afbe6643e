//! Market indices tool.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::text_result;
use crate::domains::tools::definitions::format::dollars;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub const NO_INDICES: &str = "No market indices data available";

pub struct MarketIndicesTool {
    client: Arc<FmpClient>,
}

impl MarketIndicesTool {
    pub const NAME: &'static str = "get_market_indices";

    pub const DESCRIPTION: &'static str = "Get market indices information (S&P 500, NASDAQ, DOW)";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(indices: &[FinancialRecord]) -> String {
        let mut text = String::from("Market Indices\n\n");

        for index in indices {
            let name = index
                .text("name")
                .map_or_else(|| index.display("symbol"), str::to_string);
            let _ = writeln!(text, "Index: {name}");
            let _ = writeln!(text, "Symbol: {}", index.display("symbol"));
            let _ = writeln!(text, "Price: {}", dollars(index.number("price")));

            match (index.number("change"), index.number("changesPercentage")) {
                (Some(change), Some(pct)) => {
                    let _ = write!(text, "Change: ${change:.2} ({pct:.2}%)\n\n");
                }
                _ => text.push_str("Change: N/A\n\n"),
            }
        }

        text
    }
}

#[async_trait]
impl FinancialTool for MarketIndicesTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn execute(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        info!("Fetching market indices");
        let indices = self.client.market_indices().await?;
        if indices.is_empty() {
            return Ok(text_result(NO_INDICES.to_string()));
        }

        Ok(text_result(Self::format(&indices)))
    }
}
