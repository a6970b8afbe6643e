//! Content providers behind the listed resource URIs.

use crate::domains::metrics::{AltmanZone, CreditGrade, PiotroskiQuality};

/// Where the content of a resource comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceContent {
    /// Live index quotes from the upstream provider.
    MarketIndices,

    /// Live sector performance from the upstream provider.
    SectorPerformance,

    /// Generated description of the score models.
    ScoreMethodology,

    /// Listed only; reading fails.
    Unavailable,
}

impl ResourceContent {
    pub const MARKET_INDICES_URI: &'static str = "financial://market/indices";
    pub const SECTORS_URI: &'static str = "financial://market/sectors";
    pub const SCORES_URI: &'static str = "financial://docs/scores";

    pub fn for_uri(uri: &str) -> Self {
        match uri {
            Self::MARKET_INDICES_URI => Self::MarketIndices,
            Self::SECTORS_URI => Self::SectorPerformance,
            Self::SCORES_URI => Self::ScoreMethodology,
            _ => Self::Unavailable,
        }
    }
}

/// Markdown summary of the Z-Score, F-Score and strength rating models.
///
/// Band labels are taken from the metric types so the document cannot drift
/// from what the tools print.
pub fn score_methodology() -> String {
    let zones = [AltmanZone::Safe, AltmanZone::Gray, AltmanZone::Distress];
    let qualities = [
        (PiotroskiQuality::High, "7-9"),
        (PiotroskiQuality::Good, "5-6"),
        (PiotroskiQuality::Average, "3-4"),
        (PiotroskiQuality::Poor, "0-2"),
    ];
    let grades = [
        (CreditGrade::Aaa, 85),
        (CreditGrade::Aa, 75),
        (CreditGrade::A, 65),
        (CreditGrade::Bbb, 55),
        (CreditGrade::Bb, 45),
        (CreditGrade::B, 35),
    ];

    let mut doc = String::from("# Financial Score Methodology\n\n");

    doc.push_str("## Altman Z-Score\n\n");
    doc.push_str("Z = 1.2A + 1.4B + 3.3C + 0.6D + 1.0E where A = working capital / total assets, ");
    doc.push_str("B = retained earnings / total assets, C = EBIT / total assets, ");
    doc.push_str("D = market cap / total liabilities, E = revenue / total assets.\n\n");
    for (zone, bound) in zones.iter().zip(["Z > 2.99", "1.81 < Z <= 2.99", "Z <= 1.81"]) {
        doc.push_str(&format!("- {bound}: {}\n", zone.label()));
    }

    doc.push_str("\n## Piotroski F-Score\n\n");
    doc.push_str("One point each for positive net income, positive ROA, positive operating ");
    doc.push_str("cash flow, and operating cash flow above net income. With a prior fiscal ");
    doc.push_str("year available, one point each for lower leverage, a higher current ratio, ");
    doc.push_str("no share dilution, a higher gross margin and higher asset turnover.\n\n");
    for (quality, range) in qualities {
        doc.push_str(&format!("- {range}: {}\n", quality.label()));
    }

    doc.push_str("\n## Financial Strength Rating\n\n");
    doc.push_str("0-100 points: Z-Score zone (30), F-Score (30), current ratio (15), ");
    doc.push_str("debt-to-equity (15), ROE plus ROA (10).\n\n");
    for (grade, floor) in grades {
        doc.push_str(&format!("- {floor}+: {}\n", grade.label()));
    }
    doc.push_str(&format!("- below 35: {}\n", CreditGrade::Ccc.label()));

    doc
}
