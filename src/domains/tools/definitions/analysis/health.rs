//! Advanced financial health analysis: Altman Z-Score, Piotroski F-Score
//! and a composite strength rating.
//!
//! Statement endpoints return one record per fiscal year, most recent first.
//! The second record, when present, supplies the prior-year figures the
//! trend criteria of the F-Score compare against.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use tracing::{debug, info};

use crate::domains::metrics::{
    AltmanInputs, AltmanZScore, HealthVerdict, PiotroskiFScore, PiotroskiInputs, StrengthInputs,
    StrengthRating,
};
use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, error_result, no_data_result, symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::{billions, fraction_percent, ratio};
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient};

fn zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// One fiscal year of the statements the analysis reads.
#[derive(Debug, Default)]
pub struct FiscalYear<'a> {
    pub balance_sheet: Option<&'a FinancialRecord>,
    pub income_statement: Option<&'a FinancialRecord>,
    pub cash_flow: Option<&'a FinancialRecord>,
    pub key_metrics: Option<&'a FinancialRecord>,
}

/// Figures extracted from one fiscal year, `None` where upstream sent
/// nothing. The score inputs read missing figures as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fundamentals {
    pub total_assets: Option<f64>,
    pub current_assets: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub retained_earnings: Option<f64>,
    pub long_term_debt: Option<f64>,
    pub stockholders_equity: Option<f64>,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub gross_profit: Option<f64>,
    pub ebit: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub market_cap: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
}

impl Fundamentals {
    pub fn extract(year: &FiscalYear<'_>) -> Self {
        let empty = FinancialRecord::default();
        let bs = year.balance_sheet.unwrap_or(&empty);
        let is = year.income_statement.unwrap_or(&empty);
        let cf = year.cash_flow.unwrap_or(&empty);
        let km = year.key_metrics.unwrap_or(&empty);

        Self {
            total_assets: bs.number("totalAssets"),
            current_assets: bs.number("totalCurrentAssets"),
            current_liabilities: bs.number("totalCurrentLiabilities"),
            total_liabilities: bs.number("totalLiabilities"),
            retained_earnings: bs.number("retainedEarnings"),
            long_term_debt: bs.number("longTermDebt"),
            stockholders_equity: bs.number("totalStockholdersEquity"),
            revenue: is.number("revenue"),
            net_income: is.number("netIncome"),
            gross_profit: is.number("grossProfit"),
            // EBITDA stands in for EBIT.
            ebit: is.number("ebitda"),
            operating_cash_flow: cf.number("operatingCashFlow"),
            free_cash_flow: cf.number("freeCashFlow"),
            market_cap: km.number("marketCap"),
            shares_outstanding: km.number("sharesOutstanding"),
            return_on_equity: km.number("returnOnEquity"),
            return_on_assets: km.number("returnOnAssets"),
        }
    }

    /// Known only when both current figures are reported.
    pub fn working_capital(&self) -> Option<f64> {
        Some(self.current_assets? - self.current_liabilities?)
    }

    pub fn current_ratio(&self) -> Option<f64> {
        let assets = self.current_assets?;
        Some(assets / zero(self.current_liabilities).max(1.0))
    }

    pub fn debt_to_equity(&self) -> Option<f64> {
        let liabilities = self.total_liabilities?;
        Some(liabilities / zero(self.stockholders_equity).max(1.0))
    }

    pub fn gross_margin(&self) -> Option<f64> {
        let gross_profit = self.gross_profit?;
        Some(gross_profit / zero(self.revenue).max(1.0))
    }

    pub fn asset_turnover(&self) -> Option<f64> {
        let revenue = self.revenue?;
        Some(revenue / zero(self.total_assets).max(1.0))
    }

    pub fn altman_inputs(&self) -> AltmanInputs {
        AltmanInputs {
            working_capital: zero(self.current_assets) - zero(self.current_liabilities),
            total_assets: zero(self.total_assets),
            retained_earnings: zero(self.retained_earnings),
            ebit: zero(self.ebit),
            market_cap: zero(self.market_cap),
            total_liabilities: zero(self.total_liabilities),
            revenue: zero(self.revenue),
        }
    }

    pub fn piotroski_inputs(&self) -> PiotroskiInputs {
        PiotroskiInputs {
            net_income: zero(self.net_income),
            operating_cash_flow: zero(self.operating_cash_flow),
            return_on_assets: zero(self.return_on_assets),
            total_assets: zero(self.total_assets),
            current_assets: zero(self.current_assets),
            current_liabilities: zero(self.current_liabilities),
            long_term_debt: zero(self.long_term_debt),
            shares_outstanding: zero(self.shares_outstanding),
            gross_margin: zero(self.gross_margin()),
            asset_turnover: zero(self.asset_turnover()),
        }
    }
}

/// The complete analysis for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReport {
    pub current: Fundamentals,
    pub altman: AltmanZScore,
    pub piotroski: PiotroskiFScore,
    pub rating: StrengthRating,
}

impl HealthReport {
    pub fn compute(current: Fundamentals, prior: Option<Fundamentals>) -> Self {
        let altman = AltmanZScore::compute(&current.altman_inputs());
        let prior_inputs = prior.map(|p| p.piotroski_inputs());
        let piotroski = PiotroskiFScore::compute(&current.piotroski_inputs(), prior_inputs.as_ref());
        let rating = StrengthRating::compute(&StrengthInputs {
            altman_z: altman.value,
            piotroski_score: piotroski.score,
            current_ratio: zero(current.current_ratio()),
            debt_to_equity: zero(current.debt_to_equity()),
            return_on_equity: zero(current.return_on_equity),
            return_on_assets: zero(current.return_on_assets),
        });

        Self {
            current,
            altman,
            piotroski,
            rating,
        }
    }

    pub fn format(&self, symbol: &str) -> String {
        let f = &self.current;
        let [wc_ta, re_ta, ebit_ta, mc_tl, rev_ta] = f.altman_inputs().components();

        let mut text = format!("Advanced Financial Health Analysis for {symbol}\n\n");

        text.push_str("=== FINANCIAL HEALTH SCORES ===\n");
        let _ = writeln!(text, "Altman Z-Score: {:.2}", self.altman.value);
        let _ = write!(text, "└─ {}\n\n", self.altman.interpretation());
        let _ = writeln!(text, "Piotroski F-Score: {}/9", self.piotroski.score);
        let _ = write!(text, "└─ {}\n\n", self.piotroski.interpretation());
        let _ = write!(
            text,
            "Overall Financial Strength Rating: {}/100 ({})\n\n",
            self.rating.rating, self.rating.grade
        );

        text.push_str("=== KEY FINANCIAL METRICS ===\n");
        text.push_str("Liquidity:\n");
        let _ = writeln!(text, "• Current Ratio: {}", ratio(f.current_ratio()));
        let _ = write!(text, "• Working Capital: {}\n\n", billions(f.working_capital()));
        text.push_str("Leverage:\n");
        let _ = writeln!(text, "• Debt-to-Equity: {}", ratio(f.debt_to_equity()));
        let _ = write!(text, "• Long-term Debt: {}\n\n", billions(f.long_term_debt));
        text.push_str("Profitability:\n");
        let _ = writeln!(text, "• Return on Equity: {}", fraction_percent(f.return_on_equity));
        let _ = writeln!(text, "• Return on Assets: {}", fraction_percent(f.return_on_assets));
        let _ = write!(text, "• Gross Margin: {}\n\n", fraction_percent(f.gross_margin()));
        text.push_str("Cash Flow:\n");
        let _ = writeln!(text, "• Operating Cash Flow: {}", billions(f.operating_cash_flow));
        let _ = write!(text, "• Free Cash Flow: {}\n\n", billions(f.free_cash_flow));

        text.push_str("=== BANKRUPTCY RISK ANALYSIS ===\n");
        text.push_str("Altman Z-Score Components:\n");
        let _ = writeln!(text, "• Working Capital/Total Assets: {wc_ta:.3}");
        let _ = writeln!(text, "• Retained Earnings/Total Assets: {re_ta:.3}");
        let _ = writeln!(text, "• EBIT/Total Assets: {ebit_ta:.3}");
        let _ = writeln!(text, "• Market Cap/Total Liabilities: {mc_tl:.3}");
        let _ = write!(text, "• Revenue/Total Assets: {rev_ta:.3}\n\n");

        text.push_str("=== FINANCIAL STRENGTH SUMMARY ===\n");
        text.push_str(&HealthVerdict::from_rating(self.rating.rating).summary(symbol));

        text
    }
}

pub struct FinancialHealthTool {
    client: Arc<FmpClient>,
}

impl FinancialHealthTool {
    pub const NAME: &'static str = "get_advanced_financial_health";

    pub const DESCRIPTION: &'static str = "Perform advanced financial health analysis including Altman Z-Score and Piotroski F-Score";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FinancialTool for FinancialHealthTool {
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

        info!("Analyzing financial health of {}", symbol);
        let fetched = tokio::try_join!(
            self.client.balance_sheets(&symbol),
            self.client.income_statements(&symbol),
            self.client.cash_flow(&symbol),
            self.client.key_metrics(&symbol),
        );
        let (balance_sheets, income_statements, cash_flow, key_metrics) = match fetched {
            Ok(statements) => statements,
            Err(e) => {
                return Ok(error_result(&format!(
                    "Error performing financial health analysis: {e}"
                )));
            }
        };

        if balance_sheets.is_empty() && income_statements.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        let current = Fundamentals::extract(&FiscalYear {
            balance_sheet: balance_sheets.first(),
            income_statement: income_statements.first(),
            cash_flow: Some(&cash_flow),
            key_metrics: key_metrics.first(),
        });
        let prior = (balance_sheets.len() > 1 || income_statements.len() > 1).then(|| {
            Fundamentals::extract(&FiscalYear {
                balance_sheet: balance_sheets.get(1),
                income_statement: income_statements.get(1),
                cash_flow: None,
                key_metrics: key_metrics.get(1),
            })
        });
        debug!(symbol, with_prior_year = prior.is_some(), "Computing health scores");

        let report = HealthReport::compute(current, prior);
        Ok(text_result(report.format(&symbol)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{args, only_text};
    use crate::fmp::testing::{StubTransport, stub_client};
    use serde_json::json;

    fn healthy_stub() -> StubTransport {
        StubTransport::new()
            .route(
                "/balance-sheet-statement/",
                json!([
                    {
                        "totalAssets": 1.0e11,
                        "totalCurrentAssets": 4.0e10,
                        "totalCurrentLiabilities": 2.0e10,
                        "totalLiabilities": 3.0e10,
                        "retainedEarnings": 5.0e10,
                        "longTermDebt": 1.0e10,
                        "totalStockholdersEquity": 7.0e10
                    },
                    {
                        "totalAssets": 9.0e10,
                        "totalCurrentAssets": 3.0e10,
                        "totalCurrentLiabilities": 2.0e10,
                        "longTermDebt": 1.2e10
                    }
                ]),
            )
            .route(
                "/income-statement/",
                json!([
                    {"revenue": 8.0e10, "netIncome": 1.2e10, "grossProfit": 3.2e10, "ebitda": 2.0e10},
                    {"revenue": 7.0e10, "grossProfit": 2.45e10}
                ]),
            )
            .route(
                "/cash-flow-statement/",
                json!([{"operatingCashFlow": 1.5e10, "freeCashFlow": 1.0e10}]),
            )
            .route(
                "/key-metrics/",
                json!([
                    {"marketCap": 2.0e11, "sharesOutstanding": 1.0e9, "returnOnEquity": 0.17, "returnOnAssets": 0.12},
                    {"sharesOutstanding": 1.1e9}
                ]),
            )
    }

    #[tokio::test]
    async fn test_full_report_sections() {
        let stub = Arc::new(healthy_stub());
        let tool = FinancialHealthTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({"symbol": "MSFT"}))).await.unwrap());

        assert!(text.starts_with("Advanced Financial Health Analysis for MSFT"));
        assert!(text.contains("└─ Safe Zone - Low bankruptcy risk"));
        assert!(text.contains("Piotroski F-Score: 9/9"));
        assert!(text.contains("• Current Ratio: 2.00"));
        assert!(text.contains("• Working Capital: $20.0B"));
        assert!(text.contains("• Gross Margin: 40.00%"));
        assert!(text.contains("• Return on Equity: 17.00%"));
        assert!(text.contains("• Market Cap/Total Liabilities: 6.667"));
        assert!(text.contains("Overall Financial Strength Rating: 97/100 (AAA - Excellent)"));
        assert!(text.ends_with("🟢 STRONG: MSFT demonstrates excellent financial health with low bankruptcy risk"));
        assert_eq!(stub.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_single_year_scores_profitability_only() {
        let stub = Arc::new(
            StubTransport::new()
                .route("/balance-sheet-statement/", json!([{"totalAssets": 1000.0}]))
                .route("/income-statement/", json!([{"netIncome": 100.0}]))
                .route("/cash-flow-statement/", json!([{"operatingCashFlow": 50.0}]))
                .route("/key-metrics/", json!([{"returnOnAssets": 0.1}])),
        );
        let tool = FinancialHealthTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({"symbol": "X"}))).await.unwrap());

        assert!(text.contains("Piotroski F-Score: 3/9"));
        assert!(text.contains("└─ Average Quality - Moderate financial position"));
    }

    #[tokio::test]
    async fn test_absent_fields_render_na() {
        let stub = Arc::new(
            StubTransport::new().route("/balance-sheet-statement/", json!([{"totalAssets": 1.0e9}])),
        );
        let tool = FinancialHealthTool::new(stub_client(&stub));

        let text = only_text(&tool.execute(args(json!({"symbol": "X"}))).await.unwrap());

        assert!(text.contains("• Current Ratio: N/A"));
        assert!(text.contains("• Working Capital: N/A"));
        assert!(text.contains("• Debt-to-Equity: N/A"));
        assert!(text.contains("• Long-term Debt: N/A"));
        assert!(text.contains("• Return on Equity: N/A"));
        assert!(text.contains("• Return on Assets: N/A"));
        assert!(text.contains("• Gross Margin: N/A"));
        assert!(text.contains("• Operating Cash Flow: N/A"));
        assert!(text.contains("• Free Cash Flow: N/A"));
        assert!(!text.contains("$0.0B"));
        // Scores still treat the gaps as zero.
        assert!(text.contains("Altman Z-Score: 0.00"));
        assert!(text.contains("Piotroski F-Score: 0/9"));
    }

    #[tokio::test]
    async fn test_no_statements_is_no_data() {
        let stub = Arc::new(
            StubTransport::new().route("/key-metrics/", json!([{"marketCap": 1.0e9}])),
        );
        let tool = FinancialHealthTool::new(stub_client(&stub));

        let result = tool.execute(args(json!({"symbol": "NONE"}))).await.unwrap();

        assert_eq!(only_text(&result), "No data found for symbol: NONE");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_wrapped() {
        let stub = Arc::new(
            StubTransport::new().raw_route("/cash-flow-statement/", 500, "Internal Server Error"),
        );
        let tool = FinancialHealthTool::new(stub_client(&stub));

        let result = tool.execute(args(json!({"symbol": "AAPL"}))).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            only_text(&result),
            "Error: Error performing financial health analysis: API request failed with status 500: Internal Server Error"
        );
    }

    #[test]
    fn test_missing_statements_default_to_zero() {
        let fundamentals = Fundamentals::extract(&FiscalYear::default());
        assert_eq!(fundamentals, Fundamentals::default());

        let report = HealthReport::compute(fundamentals, None);
        assert_eq!(report.altman.value, 0.0);
        assert_eq!(report.altman.interpretation(), "Insufficient data");
    }
}
