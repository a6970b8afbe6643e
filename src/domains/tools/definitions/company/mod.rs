//! Company fundamentals: profile, statements, ratios, enterprise value.

pub mod enterprise_values;
pub mod income_statement;
pub mod profile;
pub mod ratios;

pub use enterprise_values::EnterpriseValuesTool;
pub use income_statement::IncomeStatementTool;
pub use profile::CompanyProfileTool;
pub use ratios::FinancialRatiosTool;
