//! Enhanced DCF analysis: levered fair value, growth scenarios, and a
//! financial health sub-score behind an investment thesis.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::dcf::STOCK_PRICE_FIELD;
use crate::domains::metrics::{
    GrowthScenarios, HealthInputs, HealthScore, InvestmentThesis, levered_dcf, scenario_dcf,
    upside_percent,
};
use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, deserialize_arguments, error_result, no_data_result, symbol_argument,
    text_result,
};
use crate::domains::tools::definitions::format::{billions, dollars, fraction_percent, ratio};
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{Dataset, FinancialRecord, FmpClient};

/// Optional scenario parameters. Defaults are built per call.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ScenarioArguments {
    #[schemars(description = "Growth rate per scenario as a fraction")]
    #[serde(default)]
    pub growth_scenarios: Option<GrowthScenarios>,

    #[schemars(description = "Discount rate adjustment as a fraction (default 0)")]
    #[serde(default)]
    pub discount_rate_adjustment: Option<f64>,
}

/// Everything the report prints, computed from the fetched records.
///
/// Raw upstream figures stay `None` when absent and render as `N/A`; only
/// the health sub-score treats them as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DcfReport {
    pub date: String,
    pub stock_price: Option<f64>,
    pub base_dcf: Option<f64>,
    pub levered_dcf: Option<f64>,
    pub scenarios: GrowthScenarios,
    pub bull_dcf: Option<f64>,
    pub base_case_dcf: Option<f64>,
    pub bear_dcf: Option<f64>,
    pub health: HealthScore,
    pub current_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub beta: Option<f64>,
    pub net_debt: Option<f64>,
}

/// Records the report is computed from; all but `dcf` may be empty.
pub struct DcfInputs<'a> {
    pub dcf: &'a FinancialRecord,
    pub balance_sheet: &'a FinancialRecord,
    pub income_statement: &'a FinancialRecord,
    pub cash_flow: &'a FinancialRecord,
    pub key_metrics: &'a FinancialRecord,
}

/// Upside against a positive market price, `None` otherwise.
fn upside(fair_value: Option<f64>, price: Option<f64>) -> Option<f64> {
    let price = price.filter(|p| *p > 0.0)?;
    fair_value.map(|value| upside_percent(value, price))
}

fn upside_text(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}%"))
}

impl DcfReport {
    pub fn compute(inputs: &DcfInputs<'_>, scenarios: GrowthScenarios, discount_adjustment: f64) -> Self {
        let base_dcf = inputs.dcf.number("dcf");
        let stock_price = inputs.dcf.number(STOCK_PRICE_FIELD);

        let bs = inputs.balance_sheet;
        let total_debt = bs.number("totalDebt");
        let cash = bs.number("cashAndCashEquivalents");
        let equity = bs.number("totalStockholdersEquity");

        let km = inputs.key_metrics;
        let market_cap = km.number("marketCap");
        let return_on_equity = km.number("returnOnEquity");

        let free_cash_flow = inputs.cash_flow.number("freeCashFlow");
        let revenue = inputs.income_statement.number("revenue");

        // Shares are implied by market cap over price; a non-positive price implies zero.
        let shares_outstanding = match (market_cap, stock_price) {
            (Some(cap), Some(price)) if price > 0.0 => Some(cap / price),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        };
        let levered = base_dcf.zip(shares_outstanding).map(|(dcf, shares)| {
            levered_dcf(dcf, total_debt.unwrap_or(0.0), cash.unwrap_or(0.0), shares)
        });

        let current_ratio = bs.number("totalCurrentAssets").map(|assets| {
            assets / bs.number("totalCurrentLiabilities").unwrap_or(0.0).max(1.0)
        });
        let debt_to_equity = total_debt.map(|debt| debt / equity.unwrap_or(0.0).max(1.0));
        let net_debt = match (total_debt, cash) {
            (None, None) => None,
            (debt, cash) => Some(debt.unwrap_or(0.0) - cash.unwrap_or(0.0)),
        };

        let scenario = |growth: f64| base_dcf.map(|dcf| scenario_dcf(dcf, growth, discount_adjustment));

        Self {
            date: inputs.dcf.display("date"),
            stock_price,
            base_dcf,
            levered_dcf: levered,
            scenarios,
            bull_dcf: scenario(scenarios.bull),
            base_case_dcf: scenario(scenarios.base),
            bear_dcf: scenario(scenarios.bear),
            health: HealthScore::compute(&HealthInputs {
                current_ratio: current_ratio.unwrap_or(0.0),
                debt_to_equity,
                return_on_equity: return_on_equity.unwrap_or(0.0),
                free_cash_flow: free_cash_flow.unwrap_or(0.0),
                revenue: revenue.unwrap_or(0.0),
            }),
            current_ratio,
            debt_to_equity,
            return_on_equity,
            free_cash_flow,
            market_cap,
            enterprise_value: km.number("enterpriseValue"),
            beta: km.number("beta"),
            net_debt,
        }
    }

    pub fn format(&self, symbol: &str) -> String {
        let upside_base = upside(self.base_dcf, self.stock_price);
        let upside_levered = upside(self.levered_dcf, self.stock_price);

        let mut text = format!("Enhanced DCF Analysis for {symbol}\nDate: {}\n\n", self.date);

        text.push_str("=== CORE VALUATION ===\n");
        let _ = writeln!(text, "Current Stock Price: {}", dollars(self.stock_price));
        let _ = writeln!(text, "Base DCF Fair Value: {}", dollars(self.base_dcf));
        let _ = write!(text, "Levered DCF Fair Value: {}\n\n", dollars(self.levered_dcf));
        let _ = writeln!(text, "Upside/Downside (Base): {}", upside_text(upside_base));
        let _ = write!(text, "Upside/Downside (Levered): {}\n\n", upside_text(upside_levered));

        text.push_str("=== SCENARIO ANALYSIS ===\n");
        let cases = [
            ("Bull", self.bull_dcf, self.scenarios.bull),
            ("Base", self.base_case_dcf, self.scenarios.base),
            ("Bear", self.bear_dcf, self.scenarios.bear),
        ];
        for (case, value, growth) in cases {
            let _ = writeln!(
                text,
                "{case} Case DCF: {} ({:.1}% growth)",
                dollars(value),
                growth * 100.0
            );
        }
        text.push('\n');

        text.push_str("=== FINANCIAL HEALTH METRICS ===\n");
        let _ = writeln!(
            text,
            "Financial Health Score: {:.1}/100 ({})",
            self.health.score, self.health.grade
        );
        let _ = writeln!(text, "Current Ratio: {}", ratio(self.current_ratio));
        let _ = writeln!(text, "Debt-to-Equity: {}", ratio(self.debt_to_equity));
        let _ = writeln!(text, "Return on Equity: {}", fraction_percent(self.return_on_equity));
        let _ = write!(text, "Free Cash Flow: {}\n\n", billions(self.free_cash_flow));

        text.push_str("=== VALUATION CONTEXT ===\n");
        let _ = writeln!(text, "Market Cap: {}", billions(self.market_cap));
        let _ = writeln!(text, "Enterprise Value: {}", billions(self.enterprise_value));
        let _ = writeln!(text, "Beta: {}", ratio(self.beta));
        let _ = write!(text, "Net Debt: {}\n\n", billions(self.net_debt));

        text.push_str("=== INVESTMENT THESIS ===\n");
        text.push_str(&match upside_levered {
            Some(upside) => InvestmentThesis::from_upside(upside).summary(upside, self.health.grade),
            None => InvestmentThesis::unavailable_summary(self.health.grade),
        });

        text
    }
}

pub struct EnhancedDcfTool {
    client: Arc<FmpClient>,
}

impl EnhancedDcfTool {
    pub const NAME: &'static str = "get_enhanced_dcf_analysis";

    pub const DESCRIPTION: &'static str = "Perform enhanced DCF analysis with levered DCF, scenario modeling, and comprehensive financial health metrics";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FinancialTool for EnhancedDcfTool {
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
        let params: ScenarioArguments = match deserialize_arguments(arguments) {
            Ok(params) => params,
            Err(result) => return Ok(result),
        };
        let discount_adjustment = params.discount_rate_adjustment.unwrap_or(0.0);
        if discount_adjustment <= -1.0 {
            return Ok(error_result(
                "Discount rate adjustment must be greater than -1",
            ));
        }
        let scenarios = params.growth_scenarios.unwrap_or_default();

        info!("Running enhanced DCF analysis for {}", symbol);
        let fetched = tokio::try_join!(
            self.client.dcf_valuation(&symbol),
            self.client.dataset_first(Dataset::BalanceSheet, &symbol),
            self.client.dataset_first(Dataset::IncomeStatement, &symbol),
            self.client.cash_flow(&symbol),
            self.client.dataset_first(Dataset::KeyMetrics, &symbol),
        );
        let (dcf, balance_sheet, income_statement, cash_flow, key_metrics) = match fetched {
            Ok(records) => records,
            Err(e) => {
                return Ok(error_result(&format!(
                    "Error performing enhanced DCF analysis: {e}"
                )));
            }
        };

        if dcf.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        let report = DcfReport::compute(
            &DcfInputs {
                dcf: &dcf,
                balance_sheet: &balance_sheet,
                income_statement: &income_statement,
                cash_flow: &cash_flow,
                key_metrics: &key_metrics,
            },
            scenarios,
            discount_adjustment,
        );
        Ok(text_result(report.format(&symbol)))
    }
}
