//! Derived financial metrics.
//!
//! Pure computations over plain numbers; no I/O. Every score is returned
//! together with its interpretation band.

mod altman;
mod dcf;
mod piotroski;
mod rating;

pub use altman::{AltmanInputs, AltmanZScore, AltmanZone};
pub use dcf::{
    GrowthScenarios, HealthGrade, HealthInputs, HealthScore, InvestmentThesis, levered_dcf,
    scenario_dcf, upside_percent,
};
pub use piotroski::{Criterion, PiotroskiFScore, PiotroskiInputs, PiotroskiQuality};
pub use rating::{CreditGrade, HealthVerdict, StrengthInputs, StrengthRating};
