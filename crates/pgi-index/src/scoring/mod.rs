mod achievement;
mod result;

pub use achievement::{achievement_percentage, gap_to_target, target_met, PerformanceBand};
pub use result::{DomainScore, ScoreResult};

pub(crate) use result::{percentage_of, round2};

use crate::catalogue::{Catalogue, DomainPartition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const DEFAULT_MAX_SCORE: f64 = 1000.0;

/// Achieved value per indicator key for a single entity.
pub type AchievedValues = BTreeMap<String, f64>;

/// Scale applied to the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub max_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

/// Stateless aggregator over an immutable catalogue.
///
/// Scoring never fails: unknown indicator keys are ignored, indicators without
/// an achieved value are skipped, and unknown or empty domains contribute zero.
/// A skipped indicator still counts in its domain's weight denominator, so
/// missing data pulls the domain score toward zero.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'c> {
    catalogue: &'c Catalogue,
    config: ScoringConfig,
}

impl<'c> ScoringEngine<'c> {
    pub fn new(catalogue: &'c Catalogue, config: ScoringConfig) -> Self {
        Self { catalogue, config }
    }

    /// Engine over the embedded catalogue with the default 1000-point scale.
    pub fn standard() -> ScoringEngine<'static> {
        ScoringEngine::new(Catalogue::standard(), ScoringConfig::default())
    }

    pub fn catalogue(&self) -> &'c Catalogue {
        self.catalogue
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    /// Total score on the configured scale.
    pub fn score(&self, achieved: &AchievedValues) -> ScoreResult {
        self.total_score(achieved, self.config.max_score)
    }

    /// Contribution of one domain to a total out of `max_score`, unrounded.
    pub fn domain_score(&self, domain_key: &str, achieved: &AchievedValues, max_score: f64) -> f64 {
        self.catalogue
            .partition(domain_key)
            .map(|partition| contribution(partition, achieved, max_score))
            .unwrap_or(0.0)
    }

    pub fn total_score(&self, achieved: &AchievedValues, max_score: f64) -> ScoreResult {
        let mut domain_breakdown = IndexMap::with_capacity(self.catalogue.domains().len());
        let mut total_score = 0.0;

        for partition in self.catalogue.partitions() {
            let score = contribution(partition, achieved, max_score);
            let domain = partition.domain;
            let domain_max = domain.weight * max_score;

            domain_breakdown.insert(
                domain.key.clone(),
                DomainScore {
                    name: domain.name.clone(),
                    code: domain.code.clone(),
                    weight: domain.weight,
                    score: round2(score),
                    max_score: round2(domain_max),
                    percentage: round2(percentage_of(score, domain_max)),
                },
            );
            total_score += score;
        }

        let ignored = achieved
            .keys()
            .filter(|key| self.catalogue.indicator(key).is_none())
            .count();
        debug!(
            total_score,
            max_score,
            supplied = achieved.len(),
            ignored,
            "computed PGI total"
        );

        ScoreResult {
            total_score: round2(total_score),
            max_score,
            percentage: round2(percentage_of(total_score, max_score)),
            domain_breakdown,
        }
    }
}

fn contribution(partition: DomainPartition<'_>, achieved: &AchievedValues, max_score: f64) -> f64 {
    let total_weight = partition.weight_total;
    if total_weight <= 0.0 {
        return 0.0;
    }

    let mut weighted_achievement = 0.0;
    for indicator in partition.indicators() {
        let Some(&value) = achieved.get(&indicator.key) else {
            continue;
        };
        if !value.is_finite() {
            warn!(indicator = %indicator.key, value, "ignoring non-finite achieved value");
            continue;
        }

        let local_weight = indicator.weight / total_weight;
        weighted_achievement += achievement_percentage(indicator, value) * local_weight;
    }

    (weighted_achievement / 100.0) * partition.domain.weight * max_score
}
