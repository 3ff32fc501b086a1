use crate::catalogue::{Level, Polarity, Unit};
use crate::scoring::PerformanceBand;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorDetailView {
    pub indicator_key: String,
    pub indicator_code: String,
    pub indicator_name: String,
    pub unit: Unit,
    pub polarity: Polarity,
    pub target: f64,
    pub achieved_value: Option<f64>,
    pub achievement_percentage: f64,
    pub weight_in_domain: f64,
    pub target_met: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_to_target: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainReportEntry {
    pub domain_key: String,
    pub domain_name: String,
    pub domain_code: String,
    pub weight: f64,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub band: PerformanceBand,
    pub band_label: &'static str,
    pub indicators: Vec<IndicatorDetailView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub entity_id: String,
    pub level: Level,
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub band: PerformanceBand,
    pub band_label: &'static str,
    pub domains: Vec<DomainReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub rank: usize,
    pub entity_id: String,
    pub level: Level,
    pub total_score: f64,
    pub percentage: f64,
    pub band: PerformanceBand,
}
