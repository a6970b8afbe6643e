//! Enterprise value tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::{count, dollars, whole_dollars};
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub struct EnterpriseValuesTool {
    client: Arc<FmpClient>,
}

impl EnterpriseValuesTool {
    pub const NAME: &'static str = "get_enterprise_values";

    pub const DESCRIPTION: &'static str =
        "Get enterprise value metrics (market capitalization, debt, cash, enterprise value) for a company";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    /// Market cap plus debt minus cash, as reported upstream.
    pub fn format(record: &FinancialRecord) -> String {
        format!(
            "Enterprise Values for {}\n\n\
             Date: {}\n\
             Stock Price: {}\n\
             Shares Outstanding: {}\n\
             Market Capitalization: {}\n\
             Minus Cash and Cash Equivalents: {}\n\
             Add Total Debt: {}\n\
             Enterprise Value: {}",
            record.display("symbol"),
            record.display("date"),
            dollars(record.number("stockPrice")),
            count(record.integer("numberOfShares")),
            whole_dollars(record.number("marketCapitalization")),
            whole_dollars(record.number("minusCashAndCashEquivalents")),
            whole_dollars(record.number("addTotalDebt")),
            whole_dollars(record.number("enterpriseValue")),
        )
    }
}

#[async_trait]
impl FinancialTool for EnterpriseValuesTool {
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

        info!("Fetching enterprise values for {}", symbol);
        let record = self.client.enterprise_values(&symbol).await?;
        if record.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&record)))
    }
}
