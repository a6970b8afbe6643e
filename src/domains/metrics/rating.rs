//! Composite financial strength rating (0 to 100).

use std::fmt;

use super::altman::{AltmanZScore, AltmanZone};

/// Inputs to the composite rating.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrengthInputs {
    pub altman_z: f64,
    pub piotroski_score: u8,
    pub current_ratio: f64,
    pub debt_to_equity: f64,
    pub return_on_equity: f64,
    pub return_on_assets: f64,
}

/// Letter grade attached to a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CreditGrade {
    Ccc,
    B,
    Bb,
    Bbb,
    A,
    Aa,
    Aaa,
}

impl CreditGrade {
    pub fn from_rating(rating: f64) -> Self {
        match rating {
            r if r >= 85.0 => Self::Aaa,
            r if r >= 75.0 => Self::Aa,
            r if r >= 65.0 => Self::A,
            r if r >= 55.0 => Self::Bbb,
            r if r >= 45.0 => Self::Bb,
            r if r >= 35.0 => Self::B,
            _ => Self::Ccc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA - Excellent",
            Self::Aa => "AA - Very Good",
            Self::A => "A - Good",
            Self::Bbb => "BBB - Satisfactory",
            Self::Bb => "BB - Speculative",
            Self::B => "B - Highly Speculative",
            Self::Ccc => "CCC - Substantial Risk",
        }
    }
}

impl fmt::Display for CreditGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rating points (truncated to an integer) and grade.
///
/// The grade is taken from the untruncated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthRating {
    pub rating: u32,
    pub grade: CreditGrade,
}

impl StrengthRating {
    pub fn compute(inputs: &StrengthInputs) -> Self {
        let raw = Self::raw(inputs);
        Self {
            rating: raw as u32,
            grade: CreditGrade::from_rating(raw),
        }
    }

    fn raw(inputs: &StrengthInputs) -> f64 {
        let solvency = match AltmanZScore::zone_for(inputs.altman_z) {
            AltmanZone::Safe => 30.0,
            AltmanZone::Gray => 20.0,
            _ => 10.0,
        };

        let quality = f64::from(inputs.piotroski_score.min(9)) / 9.0 * 30.0;

        let liquidity = match inputs.current_ratio {
            r if r >= 2.0 => 15.0,
            r if r >= 1.5 => 12.0,
            r if r >= 1.0 => 8.0,
            _ => 4.0,
        };

        let leverage = match inputs.debt_to_equity {
            d if d <= 0.3 => 15.0,
            d if d <= 0.6 => 12.0,
            d if d <= 1.0 => 8.0,
            _ => 4.0,
        };

        let profitability = ((inputs.return_on_equity.max(0.0) + inputs.return_on_assets.max(0.0))
            * 50.0)
            .min(10.0);

        solvency + quality + liquidity + leverage + profitability
    }
}

/// Plain-language verdict printed under a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthVerdict {
    Strong,
    Stable,
    Caution,
    Weak,
}

impl HealthVerdict {
    pub fn from_rating(rating: u32) -> Self {
        match rating {
            75.. => Self::Strong,
            55..=74 => Self::Stable,
            35..=54 => Self::Caution,
            _ => Self::Weak,
        }
    }

    /// One-line summary for `symbol`.
    pub fn summary(self, symbol: &str) -> String {
        match self {
            Self::Strong => format!(
                "🟢 STRONG: {symbol} demonstrates excellent financial health with low bankruptcy risk"
            ),
            Self::Stable => {
                format!("🟡 STABLE: {symbol} shows good financial health with manageable risk")
            }
            Self::Caution => {
                format!("🟠 CAUTION: {symbol} has moderate financial health with some concerns")
            }
            Self::Weak => {
                format!("🔴 WEAK: {symbol} shows poor financial health with significant risks")
            }
        }
    }
}
