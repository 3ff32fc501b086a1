use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tier of the administrative hierarchy an indicator can be measured at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    State,
    District,
    Block,
    School,
}

impl Level {
    pub const fn ordered() -> [Self; 4] {
        [Self::State, Self::District, Self::Block, Self::School]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::District => "district",
            Self::Block => "block",
            Self::School => "school",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::District => "District",
            Self::Block => "Block",
            Self::School => "School",
        }
    }

    /// Lenient parse used by level filters; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "state" => Some(Self::State),
            "district" => Some(Self::District),
            "block" => Some(Self::Block),
            "school" => Some(Self::School),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hierarchy level `{0}` (expected state, district, block, or school)")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnknownLevel(value.to_string()))
    }
}

/// Measurement unit of an indicator's achieved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percentage,
    PercentagePointDifference,
    Days,
}

impl Unit {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percentage => "%",
            Self::PercentagePointDifference => "pp difference",
            Self::Days => "days",
        }
    }

    /// Polarity assumed when a catalogue entry does not state one.
    pub const fn default_polarity(self) -> Polarity {
        match self {
            Self::Percentage => Polarity::HigherIsBetter,
            Self::PercentagePointDifference | Self::Days => Polarity::LowerIsBetter,
        }
    }
}

/// Direction in which an indicator's achieved value improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "Higher is better",
            Self::LowerIsBetter => "Lower is better",
        }
    }
}

/// Top-level weighted performance category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub key: String,
    pub name: String,
    pub code: String,
    /// Share of the grand total; all domain weights add up to 1.0.
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

/// A single measurable metric inside one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub key: String,
    pub code: String,
    pub name: String,
    pub domain: String,
    /// Relative importance among the indicators of the same domain.
    pub weight: f64,
    pub levels: Vec<Level>,
    pub unit: Unit,
    pub polarity: Polarity,
    pub target: f64,
    /// How the value is derived upstream. Documentation only.
    pub formula: String,
}

impl Indicator {
    pub fn applies_at(&self, level: Level) -> bool {
        self.levels.contains(&level)
    }

    pub fn is_lower_better(&self) -> bool {
        self.polarity == Polarity::LowerIsBetter
    }
}
