//! Tool definitions module.
//!
//! One file per financial operation, grouped by what the tool reads:
//! company fundamentals, market data, or derived analysis.

pub mod analysis;
pub mod common;
pub mod company;
pub mod format;
pub mod market;

use std::sync::Arc;

use crate::fmp::FmpClient;

use super::FinancialTool;

pub use analysis::{DcfValuationTool, EnhancedDcfTool, FinancialHealthTool};
pub use company::{CompanyProfileTool, EnterpriseValuesTool, FinancialRatiosTool, IncomeStatementTool};
pub use market::{
    HistoricalPricesTool, MarketIndicesTool, SectorPerformanceTool, StockQuoteTool,
    TechnicalIndicatorsTool, TradingVolumeTool,
};

/// Every financial tool, in catalogue order, sharing one gateway client.
pub fn all_tools(client: Arc<FmpClient>) -> Vec<Arc<dyn FinancialTool>> {
    let tools: [Arc<dyn FinancialTool>; 13] = [
        Arc::new(CompanyProfileTool::new(client.clone())),
        Arc::new(IncomeStatementTool::new(client.clone())),
        Arc::new(StockQuoteTool::new(client.clone())),
        Arc::new(HistoricalPricesTool::new(client.clone())),
        Arc::new(MarketIndicesTool::new(client.clone())),
        Arc::new(TradingVolumeTool::new(client.clone())),
        Arc::new(FinancialRatiosTool::new(client.clone())),
        Arc::new(DcfValuationTool::new(client.clone())),
        Arc::new(TechnicalIndicatorsTool::new(client.clone())),
        Arc::new(EnterpriseValuesTool::new(client.clone())),
        Arc::new(SectorPerformanceTool::new(client.clone())),
        Arc::new(FinancialHealthTool::new(client.clone())),
        Arc::new(EnhancedDcfTool::new(client)),
    ];
    tools.into()
}
