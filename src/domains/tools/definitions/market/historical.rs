//! Historical daily prices tool.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, date_argument, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::verbatim_dollars;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

/// Entries rendered before the remainder is summarized.
const SHOWN_ENTRIES: usize = 5;

pub struct HistoricalPricesTool {
    client: Arc<FmpClient>,
}

impl HistoricalPricesTool {
    pub const NAME: &'static str = "get_historical_prices";

    pub const DESCRIPTION: &'static str = "Get historical price data for a stock symbol";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(symbol: &str, entries: &[FinancialRecord]) -> String {
        let mut text = format!("Historical Prices for {symbol}\n\n");

        for entry in entries.iter().take(SHOWN_ENTRIES) {
            let _ = writeln!(
                text,
                "Date: {} | Open: {} | High: {} | Low: {} | Close: {} | Volume: {}",
                entry.display("date"),
                verbatim_dollars(entry, "open"),
                verbatim_dollars(entry, "high"),
                verbatim_dollars(entry, "low"),
                verbatim_dollars(entry, "close"),
                entry.display("volume"),
            );
        }

        if entries.len() > SHOWN_ENTRIES {
            let _ = write!(text, "\n... and {} more entries", entries.len() - SHOWN_ENTRIES);
        }

        text
    }
}

#[async_trait]
impl FinancialTool for HistoricalPricesTool {
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
        let from = match date_argument(&arguments, "from_date") {
            Ok(date) => date,
            Err(result) => return Ok(result),
        };
        let to = match date_argument(&arguments, "to_date") {
            Ok(date) => date,
            Err(result) => return Ok(result),
        };

        info!("Fetching historical prices for {} ({:?} to {:?})", symbol, from, to);
        let entries = self.client.historical_prices(&symbol, from, to).await?;
        if entries.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&symbol, &entries)))
    }
}
