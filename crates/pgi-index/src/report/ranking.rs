use super::views::{EntityReport, RankedEntity};
use crate::catalogue::Level;

/// Top `limit` entities at `level`, best percentage first.
///
/// Ties are broken by entity id so the ordering is stable across runs.
pub fn rank_reports(reports: &[EntityReport], level: Level, limit: usize) -> Vec<RankedEntity> {
    let mut candidates: Vec<&EntityReport> = reports
        .iter()
        .filter(|report| report.level == level)
        .collect();

    candidates.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.entity_id.cmp(&b.entity_id))
    });

    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, report)| RankedEntity {
            rank: index + 1,
            entity_id: report.entity_id.clone(),
            level: report.level,
            total_score: report.total_score,
            percentage: report.percentage,
            band: report.band,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PerformanceBand;

    fn report(entity_id: &str, level: Level, percentage: f64) -> EntityReport {
        let band = PerformanceBand::from_percentage(percentage);
        EntityReport {
            entity_id: entity_id.to_string(),
            level,
            total_score: percentage * 10.0,
            max_score: 1000.0,
            percentage,
            band,
            band_label: band.label(),
            domains: Vec::new(),
        }
    }

    #[test]
    fn ranks_descending_with_stable_ties_and_limit() {
        let reports = vec![
            report("pune", Level::District, 61.0),
            report("nashik", Level::District, 72.5),
            report("haveli", Level::Block, 90.0),
            report("aurangabad", Level::District, 61.0),
            report("nagpur", Level::District, 40.0),
        ];

        let ranked = rank_reports(&reports, Level::District, 3);

        let ids: Vec<&str> = ranked.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["nashik", "aurangabad", "pune"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
        assert_eq!(ranked[0].band, PerformanceBand::Good);
    }

    #[test]
    fn empty_when_no_report_matches_level() {
        let reports = vec![report("pune", Level::District, 61.0)];
        assert!(rank_reports(&reports, Level::School, 10).is_empty());
    }
}
