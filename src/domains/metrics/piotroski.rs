//! Piotroski F-Score.

use std::fmt;

/// One fiscal period's figures.
///
/// The same shape is used for the current and the prior year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PiotroskiInputs {
    pub net_income: f64,
    pub operating_cash_flow: f64,
    pub return_on_assets: f64,
    pub total_assets: f64,
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub long_term_debt: f64,
    pub shares_outstanding: f64,
    pub gross_margin: f64,
    pub asset_turnover: f64,
}

impl PiotroskiInputs {
    fn leverage(&self) -> f64 {
        self.long_term_debt / self.total_assets.max(1.0)
    }

    fn current_ratio(&self) -> f64 {
        self.current_assets / self.current_liabilities.max(1.0)
    }
}

/// The nine binary criteria, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    PositiveNetIncome,
    PositiveReturnOnAssets,
    PositiveOperatingCashFlow,
    CashFlowExceedsIncome,
    LowerLeverage,
    HigherCurrentRatio,
    NoDilution,
    HigherGrossMargin,
    HigherAssetTurnover,
}

impl Criterion {
    pub const ALL: [Criterion; 9] = [
        Self::PositiveNetIncome,
        Self::PositiveReturnOnAssets,
        Self::PositiveOperatingCashFlow,
        Self::CashFlowExceedsIncome,
        Self::LowerLeverage,
        Self::HigherCurrentRatio,
        Self::NoDilution,
        Self::HigherGrossMargin,
        Self::HigherAssetTurnover,
    ];

    /// Whether the criterion compares against the prior year.
    pub fn needs_prior_year(self) -> bool {
        !matches!(
            self,
            Self::PositiveNetIncome
                | Self::PositiveReturnOnAssets
                | Self::PositiveOperatingCashFlow
                | Self::CashFlowExceedsIncome
        )
    }

    /// A prior-year criterion only counts when the prior figure it compares
    /// against is positive.
    fn passes(self, current: &PiotroskiInputs, prior: Option<&PiotroskiInputs>) -> bool {
        match self {
            Self::PositiveNetIncome => current.net_income > 0.0,
            Self::PositiveReturnOnAssets => current.return_on_assets > 0.0,
            Self::PositiveOperatingCashFlow => current.operating_cash_flow > 0.0,
            Self::CashFlowExceedsIncome => current.operating_cash_flow > current.net_income,
            Self::LowerLeverage => prior.is_some_and(|p| {
                p.long_term_debt > 0.0 && current.leverage() < p.leverage()
            }),
            Self::HigherCurrentRatio => prior.is_some_and(|p| {
                p.current_liabilities > 0.0 && current.current_ratio() > p.current_ratio()
            }),
            Self::NoDilution => prior.is_some_and(|p| {
                p.shares_outstanding > 0.0 && current.shares_outstanding <= p.shares_outstanding
            }),
            Self::HigherGrossMargin => prior
                .is_some_and(|p| p.gross_margin > 0.0 && current.gross_margin > p.gross_margin),
            Self::HigherAssetTurnover => prior.is_some_and(|p| {
                p.asset_turnover > 0.0 && current.asset_turnover > p.asset_turnover
            }),
        }
    }
}

/// Quality band of an F-Score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiotroskiQuality {
    High,
    Good,
    Average,
    Poor,
}

impl PiotroskiQuality {
    pub fn from_score(score: u8) -> Self {
        match score {
            7.. => Self::High,
            5..=6 => Self::Good,
            3..=4 => Self::Average,
            _ => Self::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High Quality - Strong financial position",
            Self::Good => "Good Quality - Solid financial position",
            Self::Average => "Average Quality - Moderate financial position",
            Self::Poor => "Poor Quality - Weak financial position",
        }
    }
}

impl fmt::Display for PiotroskiQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An F-Score (0 to 9) with its quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiotroskiFScore {
    pub score: u8,
    pub quality: PiotroskiQuality,
    /// Outcome per criterion, indexed like [`Criterion::ALL`].
    pub passed: [bool; 9],
    /// Whether prior-year figures took part in the score.
    pub with_prior_year: bool,
}

impl PiotroskiFScore {
    /// Without `prior`, only the four profitability criteria can score.
    pub fn compute(current: &PiotroskiInputs, prior: Option<&PiotroskiInputs>) -> Self {
        let passed = Criterion::ALL.map(|criterion| criterion.passes(current, prior));
        let score = passed.iter().filter(|&&ok| ok).count() as u8;

        Self {
            score,
            quality: PiotroskiQuality::from_score(score),
            passed,
            with_prior_year: prior.is_some(),
        }
    }

    pub fn interpretation(&self) -> &'static str {
        self.quality.label()
    }
}
