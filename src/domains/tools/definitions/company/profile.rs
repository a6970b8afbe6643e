//! Company profile tool.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

pub struct CompanyProfileTool {
    client: Arc<FmpClient>,
}

impl CompanyProfileTool {
    pub const NAME: &'static str = "get_company_profile";

    pub const DESCRIPTION: &'static str = "Get company profile information";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    pub fn format(record: &FinancialRecord) -> String {
        format!(
            "Company Profile for {}\n\n\
             Company Name: {}\n\
             Industry: {}\n\
             Website: {}\n\
             Description: {}",
            record.display("symbol"),
            record.display("companyName"),
            record.display("industry"),
            record.display("website"),
            record.display("description"),
        )
    }
}

#[async_trait]
impl FinancialTool for CompanyProfileTool {
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

        info!("Fetching company profile for {}", symbol);
        let record = self.client.company_profile(&symbol).await?;
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
    async fn test_profile_formatting() {
        let stub = Arc::new(StubTransport::new().route(
            "/profile/AAPL",
            json!([{
                "symbol": "AAPL",
                "companyName": "Apple Inc.",
                "industry": "Consumer Electronics",
                "website": "https://www.apple.com",
                "description": "Apple designs smartphones."
            }]),
        ));
        let tool = CompanyProfileTool::new(stub_client(&stub));

        let result = tool.execute(args(json!({"symbol": "AAPL"}))).await.unwrap();
        let text = only_text(&result);

        assert!(text.starts_with("Company Profile for AAPL"));
        assert!(text.contains("Company Name: Apple Inc."));
        assert!(text.contains("Industry: Consumer Electronics"));
        assert!(text.contains("Website: https://www.apple.com"));
    }

    #[tokio::test]
    async fn test_profile_missing_fields_render_na() {
        let stub = Arc::new(StubTransport::new().route("/profile/", json!([{"symbol": "XYZ"}])));
        let tool = CompanyProfileTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({"symbol": "XYZ"}))).await.unwrap());

        assert!(text.contains("Industry: N/A"));
        assert!(text.contains("Description: N/A"));
    }
}
