use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Contribution of one domain to the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub name: String,
    pub code: String,
    pub weight: f64,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
}

/// Graded score for one entity. `domain_breakdown` keeps catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub domain_breakdown: IndexMap<String, DomainScore>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn percentage_of(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    }
}
