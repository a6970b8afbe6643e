//! Levered and scenario DCF, plus the valuation health sub-score.

use std::fmt;

use schemars::JsonSchema;
use serde::Deserialize;

/// Equity value per share after subtracting net debt.
///
/// Returns `0.0` when `shares_outstanding` is not positive.
pub fn levered_dcf(unlevered_dcf: f64, total_debt: f64, cash: f64, shares_outstanding: f64) -> f64 {
    if shares_outstanding <= 0.0 {
        return 0.0;
    }

    let enterprise_value = unlevered_dcf * shares_outstanding;
    let net_debt = total_debt - cash;
    (enterprise_value - net_debt) / shares_outstanding
}

/// `base_dcf * (1 + growth) / (1 + discount)`.
pub fn scenario_dcf(base_dcf: f64, growth_adjustment: f64, discount_adjustment: f64) -> f64 {
    base_dcf * (1.0 + growth_adjustment) * (1.0 / (1.0 + discount_adjustment))
}

/// Percentage gap between a fair value and the market price.
///
/// Zero when the price is not positive.
pub fn upside_percent(fair_value: f64, price: f64) -> f64 {
    if price > 0.0 {
        (fair_value - price) / price * 100.0
    } else {
        0.0
    }
}

/// Growth assumptions per scenario, as fractions.
///
/// Each field falls back to its own default when omitted, so a partial
/// override such as `{"bull": 0.3}` keeps the base and bear defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GrowthScenarios {
    pub bull: f64,
    pub base: f64,
    pub bear: f64,
}

impl Default for GrowthScenarios {
    fn default() -> Self {
        Self {
            bull: 0.15,
            base: 0.10,
            bear: 0.05,
        }
    }
}

/// Inputs to the valuation health sub-score.
///
/// `debt_to_equity` is `None` when the balance sheet carries no debt
/// figure; the leverage pillar then scores nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthInputs {
    pub current_ratio: f64,
    pub debt_to_equity: Option<f64>,
    pub return_on_equity: f64,
    pub free_cash_flow: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthGrade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Self::Excellent,
            s if s >= 60.0 => Self::Good,
            s if s >= 40.0 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four 25-point pillars: liquidity, leverage, profitability, cash generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScore {
    pub score: f64,
    pub grade: HealthGrade,
}

impl HealthScore {
    pub fn compute(inputs: &HealthInputs) -> Self {
        let liquidity = match inputs.current_ratio {
            r if r >= 2.0 => 25.0,
            r if r >= 1.5 => 20.0,
            r if r >= 1.0 => 15.0,
            _ => 0.0,
        };

        let leverage = match inputs.debt_to_equity {
            Some(d) if d <= 0.3 => 25.0,
            Some(d) if d <= 0.5 => 20.0,
            Some(d) if d <= 1.0 => 15.0,
            _ => 0.0,
        };

        let profitability = Self::tiered(inputs.return_on_equity);

        // Without revenue there is no margin to grade.
        let cash_generation = if inputs.revenue > 0.0 {
            Self::tiered(inputs.free_cash_flow / inputs.revenue)
        } else {
            0.0
        };

        let score = liquidity + leverage + profitability + cash_generation;
        Self {
            score,
            grade: HealthGrade::from_score(score),
        }
    }

    fn tiered(ratio: f64) -> f64 {
        match ratio {
            r if r >= 0.15 => 25.0,
            r if r >= 0.10 => 20.0,
            r if r >= 0.05 => 15.0,
            _ => 0.0,
        }
    }
}

/// Recommendation driven by the levered upside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentThesis {
    StrongBuy,
    Buy,
    Hold,
    Sell,
}

impl InvestmentThesis {
    pub fn from_upside(upside_percent: f64) -> Self {
        match upside_percent {
            u if u > 20.0 => Self::StrongBuy,
            u if u > 10.0 => Self::Buy,
            u if u > -10.0 => Self::Hold,
            _ => Self::Sell,
        }
    }

    /// One-line thesis combining the upside and the health grade.
    pub fn summary(self, upside_percent: f64, grade: HealthGrade) -> String {
        let health = grade.label().to_lowercase();
        match self {
            Self::StrongBuy => format!(
                "🟢 STRONG BUY: {upside_percent:.1}% upside with {health} financial health"
            ),
            Self::Buy => {
                format!("🟡 BUY: {upside_percent:.1}% upside with {health} financial health")
            }
            Self::Hold => format!(
                "🟠 HOLD: {upside_percent:.1}% upside/downside with {health} financial health"
            ),
            Self::Sell => {
                format!("🔴 SELL: {upside_percent:.1}% downside with {health} financial health")
            }
        }
    }

    /// Thesis line when no market price is known to measure upside against.
    pub fn unavailable_summary(grade: HealthGrade) -> String {
        format!(
            "⚪ N/A: upside unknown without a stock price, {} financial health",
            grade.label().to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levered_dcf_without_shares_is_zero() {
        assert_eq!(levered_dcf(150.0, 1e9, 5e8, 0.0), 0.0);
        assert_eq!(levered_dcf(150.0, 1e9, 5e8, -10.0), 0.0);
    }

    #[test]
    fn test_levered_dcf_subtracts_net_debt_per_share() {
        // (100 * 10 - (300 - 100)) / 10 = 80
        assert_eq!(levered_dcf(100.0, 300.0, 100.0, 10.0), 80.0);
        // Net cash raises the per-share value.
        assert_eq!(levered_dcf(100.0, 0.0, 50.0, 10.0), 105.0);
    }

    #[test]
    fn test_scenario_identity() {
        assert_eq!(scenario_dcf(123.45, 0.0, 0.0), 123.45);
    }

    #[test]
    fn test_scenario_growth_and_discount() {
        let value = scenario_dcf(100.0, 0.10, 0.10);
        assert!((value - 100.0).abs() < 1e-9);
        assert!((scenario_dcf(100.0, 0.15, 0.0) - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_scenarios_partial_override() {
        let scenarios: GrowthScenarios = serde_json::from_str(r#"{"bull": 0.3}"#).unwrap();
        assert_eq!(scenarios.bull, 0.3);
        assert_eq!(scenarios.base, 0.10);
        assert_eq!(scenarios.bear, 0.05);
    }

    #[test]
    fn test_upside_percent() {
        assert_eq!(upside_percent(120.0, 100.0), 20.0);
        assert_eq!(upside_percent(80.0, 100.0), -20.0);
        assert_eq!(upside_percent(80.0, 0.0), 0.0);
    }

    #[test]
    fn test_health_score_tiers() {
        let strong = HealthScore::compute(&HealthInputs {
            current_ratio: 2.1,
            debt_to_equity: Some(0.2),
            return_on_equity: 0.2,
            free_cash_flow: 20.0,
            revenue: 100.0,
        });
        assert_eq!(strong.score, 100.0);
        assert_eq!(strong.grade, HealthGrade::Excellent);

        let middling = HealthScore::compute(&HealthInputs {
            current_ratio: 1.2,
            debt_to_equity: Some(0.8),
            return_on_equity: 0.12,
            free_cash_flow: 6.0,
            revenue: 100.0,
        });
        assert_eq!(middling.score, 65.0);
        assert_eq!(middling.grade, HealthGrade::Good);
    }

    #[test]
    fn test_health_score_without_revenue() {
        let score = HealthScore::compute(&HealthInputs {
            current_ratio: 0.5,
            debt_to_equity: Some(3.0),
            return_on_equity: 0.01,
            free_cash_flow: 1e9,
            revenue: 0.0,
        });
        assert_eq!(score.score, 0.0);
        assert_eq!(score.grade, HealthGrade::Poor);
    }

    #[test]
    fn test_unknown_leverage_scores_nothing() {
        let score = HealthScore::compute(&HealthInputs {
            current_ratio: 2.1,
            debt_to_equity: None,
            return_on_equity: 0.2,
            free_cash_flow: 20.0,
            revenue: 100.0,
        });
        assert_eq!(score.score, 75.0);
        assert_eq!(score.grade, HealthGrade::Good);
    }

    #[test]
    fn test_thesis_bands() {
        assert_eq!(InvestmentThesis::from_upside(25.0), InvestmentThesis::StrongBuy);
        assert_eq!(InvestmentThesis::from_upside(20.0), InvestmentThesis::Buy);
        assert_eq!(InvestmentThesis::from_upside(10.0), InvestmentThesis::Hold);
        assert_eq!(InvestmentThesis::from_upside(-10.0), InvestmentThesis::Sell);
        assert_eq!(
            InvestmentThesis::Buy.summary(12.34, HealthGrade::Good),
            "🟡 BUY: 12.3% upside with good financial health"
        );
        assert_eq!(
            InvestmentThesis::unavailable_summary(HealthGrade::Poor),
            "⚪ N/A: upside unknown without a stock price, poor financial health"
        );
    }
}
