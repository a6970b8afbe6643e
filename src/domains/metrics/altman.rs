//! Altman Z-Score bankruptcy-risk model.

use std::fmt;

/// Statement figures the Z-Score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AltmanInputs {
    pub working_capital: f64,
    pub total_assets: f64,
    pub retained_earnings: f64,
    /// EBIT, or EBITDA as a proxy.
    pub ebit: f64,
    pub market_cap: f64,
    pub total_liabilities: f64,
    pub revenue: f64,
}

impl AltmanInputs {
    /// The five ratios A..E, in formula order.
    ///
    /// Denominators are floored at 1 so the ratios are always finite.
    pub fn components(&self) -> [f64; 5] {
        let assets = self.total_assets.max(1.0);
        [
            self.working_capital / assets,
            self.retained_earnings / assets,
            self.ebit / assets,
            self.market_cap / self.total_liabilities.max(1.0),
            self.revenue / assets,
        ]
    }
}

/// Risk band of a Z-Score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltmanZone {
    Safe,
    Gray,
    Distress,
    InsufficientData,
}

impl AltmanZone {
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe Zone - Low bankruptcy risk",
            Self::Gray => "Gray Zone - Moderate bankruptcy risk",
            Self::Distress => "Distress Zone - High bankruptcy risk",
            Self::InsufficientData => "Insufficient data",
        }
    }
}

impl fmt::Display for AltmanZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A Z-Score together with its risk band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltmanZScore {
    pub value: f64,
    pub zone: AltmanZone,
}

impl AltmanZScore {
    const SAFE_ABOVE: f64 = 2.99;
    const GRAY_ABOVE: f64 = 1.81;

    /// `Z = 1.2A + 1.4B + 3.3C + 0.6D + 1.0E`.
    ///
    /// Non-positive total assets short-circuit to `0.0` / insufficient data.
    pub fn compute(inputs: &AltmanInputs) -> Self {
        if inputs.total_assets <= 0.0 {
            return Self {
                value: 0.0,
                zone: AltmanZone::InsufficientData,
            };
        }

        let [a, b, c, d, e] = inputs.components();
        let value = 1.2 * a + 1.4 * b + 3.3 * c + 0.6 * d + 1.0 * e;

        Self {
            value,
            zone: Self::zone_for(value),
        }
    }

    pub fn zone_for(value: f64) -> AltmanZone {
        if value > Self::SAFE_ABOVE {
            AltmanZone::Safe
        } else if value > Self::GRAY_ABOVE {
            AltmanZone::Gray
        } else {
            AltmanZone::Distress
        }
    }

    pub fn interpretation(&self) -> &'static str {
        self.zone.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> AltmanInputs {
        AltmanInputs {
            working_capital: 20.0,
            total_assets: 100.0,
            retained_earnings: 40.0,
            ebit: 15.0,
            market_cap: 300.0,
            total_liabilities: 50.0,
            revenue: 120.0,
        }
    }

    #[test]
    fn test_zero_total_assets_is_insufficient_data() {
        let inputs = AltmanInputs {
            total_assets: 0.0,
            ..healthy()
        };
        let score = AltmanZScore::compute(&inputs);
        assert_eq!(score.value, 0.0);
        assert_eq!(score.interpretation(), "Insufficient data");
    }

    #[test]
    fn test_negative_total_assets_is_insufficient_data() {
        let inputs = AltmanInputs {
            total_assets: -5.0,
            ..healthy()
        };
        assert_eq!(
            AltmanZScore::compute(&inputs).zone,
            AltmanZone::InsufficientData
        );
    }

    #[test]
    fn test_formula() {
        // 1.2*0.2 + 1.4*0.4 + 3.3*0.15 + 0.6*6 + 1.0*1.2 = 6.095
        let score = AltmanZScore::compute(&healthy());
        assert!((score.value - 6.095).abs() < 1e-9);
        assert_eq!(score.zone, AltmanZone::Safe);
    }

    #[test]
    fn test_zero_liabilities_are_floored() {
        let inputs = AltmanInputs {
            total_liabilities: 0.0,
            ..healthy()
        };
        let score = AltmanZScore::compute(&inputs);
        assert!(score.value.is_finite());
        assert_eq!(inputs.components()[3], 300.0);
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(AltmanZScore::zone_for(3.0), AltmanZone::Safe);
        assert_eq!(AltmanZScore::zone_for(2.99), AltmanZone::Gray);
        assert_eq!(AltmanZScore::zone_for(1.82), AltmanZone::Gray);
        assert_eq!(AltmanZScore::zone_for(1.81), AltmanZone::Distress);
        assert_eq!(AltmanZScore::zone_for(-4.0), AltmanZone::Distress);
    }
}
