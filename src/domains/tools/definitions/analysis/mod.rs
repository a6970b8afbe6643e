//! Valuation and financial health analysis.

pub mod dcf;
pub mod enhanced_dcf;
pub mod health;

pub use dcf::DcfValuationTool;
pub use enhanced_dcf::EnhancedDcfTool;
pub use health::FinancialHealthTool;
