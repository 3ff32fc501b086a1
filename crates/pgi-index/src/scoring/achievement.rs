use crate::catalogue::{Indicator, Polarity};
use serde::{Deserialize, Serialize};

/// Normalised 0-100 achievement for one achieved value.
///
/// Higher-is-better values are already percentages and pass through unchanged.
/// Lower-is-better values score 100 up to the target, then lose points in
/// proportion to the relative overshoot, floored at zero.
pub fn achievement_percentage(indicator: &Indicator, achieved: f64) -> f64 {
    match indicator.polarity {
        Polarity::HigherIsBetter => achieved,
        Polarity::LowerIsBetter => {
            let target = indicator.target;
            if achieved <= target {
                100.0
            } else {
                (100.0 - (achieved - target) / target * 100.0).max(0.0)
            }
        }
    }
}

pub fn target_met(indicator: &Indicator, achieved: f64) -> bool {
    match indicator.polarity {
        Polarity::HigherIsBetter => achieved >= indicator.target,
        Polarity::LowerIsBetter => achieved <= indicator.target,
    }
}

/// Distance still to cover before the target is met; negative once exceeded.
pub fn gap_to_target(indicator: &Indicator, achieved: f64) -> f64 {
    match indicator.polarity {
        Polarity::HigherIsBetter => indicator.target - achieved,
        Polarity::LowerIsBetter => achieved - indicator.target,
    }
}

/// Dashboard colour band for a score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Average,
    NeedsFocus,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            Self::Excellent
        } else if percentage >= 65.0 {
            Self::Good
        } else if percentage >= 55.0 {
            Self::Average
        } else {
            Self::NeedsFocus
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsFocus => "Needs Focus",
        }
    }
}
