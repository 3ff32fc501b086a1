//! Drill-down views built on top of the scoring engine.

mod ranking;
pub mod views;

pub use ranking::rank_reports;
pub use views::{DomainReportEntry, EntityReport, IndicatorDetailView, RankedEntity};

use crate::catalogue::Indicator;
use crate::inputs::ScoreSheet;
use crate::scoring::{
    achievement_percentage, gap_to_target, round2, target_met, PerformanceBand, ScoringEngine,
};

impl EntityReport {
    /// Scores a sheet and lists every indicator measurable at the entity's level.
    ///
    /// Indicators without an input show no achieved value and zero achievement;
    /// the domain and total scores are exactly what the engine returns.
    pub fn build(engine: &ScoringEngine<'_>, sheet: &ScoreSheet) -> Self {
        let catalogue = engine.catalogue();
        let entity = sheet.entity();
        let result = engine.score(&sheet.achieved_values());

        let domains = catalogue
            .domains()
            .iter()
            .filter_map(|domain| {
                let score = result.domain_breakdown.get(&domain.key)?;
                let indicators = catalogue
                    .indicators()
                    .iter()
                    .filter(|indicator| {
                        indicator.domain == domain.key && indicator.applies_at(entity.level)
                    })
                    .map(|indicator| {
                        indicator_detail(
                            indicator,
                            sheet.get(&indicator.key).map(|s| s.achieved_value),
                        )
                    })
                    .collect();
                let band = PerformanceBand::from_percentage(score.percentage);

                Some(DomainReportEntry {
                    domain_key: domain.key.clone(),
                    domain_name: score.name.clone(),
                    domain_code: score.code.clone(),
                    weight: score.weight,
                    score: score.score,
                    max_score: score.max_score,
                    percentage: score.percentage,
                    band,
                    band_label: band.label(),
                    indicators,
                })
            })
            .collect();

        let band = PerformanceBand::from_percentage(result.percentage);
        EntityReport {
            entity_id: entity.entity_id.clone(),
            level: entity.level,
            total_score: result.total_score,
            max_score: result.max_score,
            percentage: result.percentage,
            band,
            band_label: band.label(),
            domains,
        }
    }
}

fn indicator_detail(indicator: &Indicator, achieved: Option<f64>) -> IndicatorDetailView {
    let achieved = achieved.filter(|value| value.is_finite());

    IndicatorDetailView {
        indicator_key: indicator.key.clone(),
        indicator_code: indicator.code.clone(),
        indicator_name: indicator.name.clone(),
        unit: indicator.unit,
        polarity: indicator.polarity,
        target: indicator.target,
        achieved_value: achieved.map(round2),
        achievement_percentage: achieved
            .map(|value| round2(achievement_percentage(indicator, value)))
            .unwrap_or(0.0),
        weight_in_domain: indicator.weight,
        target_met: achieved
            .map(|value| target_met(indicator, value))
            .unwrap_or(false),
        gap_to_target: achieved.map(|value| round2(gap_to_target(indicator, value))),
    }
}
