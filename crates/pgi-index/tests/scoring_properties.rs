//! Property-based checks of the aggregation rules over the standard catalogue.

use pgi_index::{AchievedValues, Catalogue, ScoringEngine};
use proptest::prelude::*;

fn indicator_keys() -> Vec<String> {
    Catalogue::standard()
        .indicators()
        .iter()
        .map(|indicator| indicator.key.clone())
        .collect()
}

fn achieved_values() -> impl Strategy<Value = AchievedValues> {
    prop::collection::btree_map(prop::sample::select(indicator_keys()), 0.0f64..=100.0, 0..60)
}

fn raw_total(engine: &ScoringEngine<'_>, achieved: &AchievedValues) -> f64 {
    engine
        .catalogue()
        .domains()
        .iter()
        .map(|domain| engine.domain_score(&domain.key, achieved, 1000.0))
        .sum()
}

proptest! {
    #[test]
    fn prop_scoring_is_idempotent(achieved in achieved_values()) {
        let engine = ScoringEngine::standard();
        prop_assert_eq!(engine.score(&achieved), engine.score(&achieved));
    }

    #[test]
    fn prop_scores_stay_within_scale(achieved in achieved_values()) {
        let result = ScoringEngine::standard().score(&achieved);
        prop_assert!(result.total_score >= 0.0 && result.total_score <= 1000.0);
        prop_assert!(result.percentage >= 0.0 && result.percentage <= 100.0);
        for domain in result.domain_breakdown.values() {
            prop_assert!(domain.score >= 0.0 && domain.score <= domain.max_score);
        }
    }

    /// A supplied indicator never lowers the total; the domain denominator does
    /// not depend on which indicators are present.
    #[test]
    fn prop_adding_an_indicator_never_lowers_the_total(
        achieved in achieved_values(),
        extra in prop::sample::select(indicator_keys()),
        value in 0.0f64..=100.0,
    ) {
        let engine = ScoringEngine::standard();
        let mut without = achieved;
        without.remove(&extra);
        let mut with = without.clone();
        with.insert(extra, value);

        prop_assert!(raw_total(&engine, &with) + 1e-9 >= raw_total(&engine, &without));
    }

    #[test]
    fn prop_domain_scores_add_up_to_total(achieved in achieved_values()) {
        let result = ScoringEngine::standard().score(&achieved);
        let sum: f64 = result.domain_breakdown.values().map(|domain| domain.score).sum();
        prop_assert!((sum - result.total_score).abs() <= 0.05);
    }

    #[test]
    fn prop_total_scales_linearly_with_max_score(achieved in achieved_values()) {
        let engine = ScoringEngine::standard();
        let full = engine.total_score(&achieved, 1000.0).total_score;
        let tenth = engine.total_score(&achieved, 100.0).total_score;
        prop_assert!((full / 10.0 - tenth).abs() <= 0.011);
    }
}
