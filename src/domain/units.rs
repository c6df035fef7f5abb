//! Unit-tagged ratios.
//!
//! The backend is not consistent about whether a number is a unit fraction
//! (`0.1234`) or an already-scaled percentage (`12.34`). Every value is tagged
//! at the point where it is read, using the convention of the endpoint it came
//! from, so display code never has to guess.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// A value in [0, 1] (possibly outside for APRs above 100%)
    Fraction(f64),
    /// A value that is already a percentage
    Percent(f64),
}

impl Ratio {
    pub fn as_percent(self) -> f64 {
        match self {
            Ratio::Fraction(v) => v * 100.0,
            Ratio::Percent(v) => v,
        }
    }

    /// `12.34%` style rendering with the requested number of decimals
    pub fn format(self, decimals: usize) -> String {
        format!("{:.*}%", decimals, self.as_percent())
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Fraction,
    Percent,
}

impl Unit {
    pub fn tag(self, value: f64) -> Ratio {
        match self {
            Unit::Fraction => Ratio::Fraction(value),
            Unit::Percent => Ratio::Percent(value),
        }
    }
}

/// How one endpoint/response shape expresses its numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConvention {
    pub score: Unit,
    pub apr: Unit,
    pub roi: Unit,
    pub weights: Unit,
}

/// `positions` / `position_recommendations` responses: APR and ROI arrive as
/// percentages, scores and weights as fractions.
pub const FLAT_RECOMMENDATIONS: UnitConvention = UnitConvention {
    score: Unit::Fraction,
    apr: Unit::Percent,
    roi: Unit::Percent,
    weights: Unit::Fraction,
};

/// `rankings` responses: everything is a fraction.
pub const RANKED_RECOMMENDATIONS: UnitConvention = UnitConvention {
    score: Unit::Fraction,
    apr: Unit::Fraction,
    roi: Unit::Fraction,
    weights: Unit::Fraction,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_scaled() {
        assert_eq!(Ratio::Fraction(0.1234).to_string(), "12.34%");
        assert_eq!(Ratio::Fraction(0.4).format(0), "40%");
    }

    #[test]
    fn percent_is_not_scaled() {
        assert_eq!(Ratio::Percent(12.346).to_string(), "12.35%");
        assert_eq!(Ratio::Percent(0.1234).to_string(), "0.12%");
    }

    // The same raw APR renders differently depending on which response shape
    // delivered it. This is the backend's behaviour, kept on purpose.
    #[test]
    fn conventions_disagree_on_apr() {
        let raw = 0.1234;
        assert_eq!(FLAT_RECOMMENDATIONS.apr.tag(raw).to_string(), "0.12%");
        assert_eq!(RANKED_RECOMMENDATIONS.apr.tag(raw).to_string(), "12.34%");
    }
}
