//! Per-entity indicator inputs supplied by the surrounding storage layer.
//!
//! A [`ScoreSheet`] is the consistent snapshot the scoring engine expects: one
//! achieved value per indicator for one entity, latest record wins.

mod importer;
mod parser;

pub use crate::scoring::AchievedValues;
pub use importer::ScoreSheetImporter;

use crate::catalogue::{Catalogue, Level, Unit, UnknownLevel};
use crate::scoring::achievement_percentage;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("indicator `{0}` is not in the catalogue")]
    UnknownIndicator(String),
    #[error(transparent)]
    UnknownLevel(#[from] UnknownLevel),
    #[error("score for {found} cannot be added to the sheet of {expected}")]
    EntityMismatch { expected: EntityRef, found: EntityRef },
    #[error("invalid timestamp `{0}` (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidTimestamp(String),
    #[error("failed to read score export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// A node in the state/district/block/school hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub level: Level,
    pub entity_id: String,
}

impl EntityRef {
    pub fn new(level: Level, entity_id: impl Into<String>) -> Self {
        Self {
            level,
            entity_id: entity_id.into(),
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`", self.level, self.entity_id)
    }
}

/// Stored achievement for one indicator of one entity.
///
/// Target, unit and domain are copied from the catalogue when the record is
/// written so that historical records survive later catalogue edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityIndicatorScore {
    pub entity: EntityRef,
    pub indicator_key: String,
    pub domain: String,
    pub unit: Unit,
    pub achieved_value: f64,
    pub target_value: f64,
    pub achievement_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<NaiveDateTime>,
}

impl EntityIndicatorScore {
    pub fn record(
        catalogue: &Catalogue,
        entity: EntityRef,
        indicator_key: &str,
        achieved_value: f64,
        recorded_at: Option<NaiveDateTime>,
    ) -> Result<Self, InputError> {
        let indicator = catalogue
            .indicator(indicator_key)
            .ok_or_else(|| InputError::UnknownIndicator(indicator_key.to_string()))?;

        Ok(Self {
            entity,
            indicator_key: indicator.key.clone(),
            domain: indicator.domain.clone(),
            unit: indicator.unit,
            achieved_value,
            target_value: indicator.target,
            achievement_percentage: achievement_percentage(indicator, achieved_value),
            recorded_at,
        })
    }

    /// Whether this record should replace `existing` in a snapshot.
    fn supersedes(&self, existing: &Self) -> bool {
        match (self.recorded_at, existing.recorded_at) {
            (Some(new), Some(old)) => new >= old,
            (None, Some(_)) => false,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    entity: EntityRef,
    scores: BTreeMap<String, EntityIndicatorScore>,
}

impl ScoreSheet {
    pub fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            scores: BTreeMap::new(),
        }
    }

    pub fn from_records<I>(entity: EntityRef, records: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = EntityIndicatorScore>,
    {
        let mut sheet = Self::new(entity);
        for record in records {
            sheet.insert(record)?;
        }
        Ok(sheet)
    }

    /// Builds a sheet from a raw key/value map, dropping keys the catalogue
    /// does not know.
    pub fn from_achieved_values(
        catalogue: &Catalogue,
        entity: EntityRef,
        achieved: &AchievedValues,
    ) -> Self {
        let mut sheet = Self::new(entity);
        for (key, &value) in achieved {
            match EntityIndicatorScore::record(catalogue, sheet.entity.clone(), key, value, None) {
                Ok(record) => {
                    sheet.scores.insert(record.indicator_key.clone(), record);
                }
                Err(_) => debug!(indicator = %key, entity = %sheet.entity, "skipping unknown indicator"),
            }
        }
        sheet
    }

    /// Adds a record, keeping whichever of old and new was recorded last.
    pub fn insert(&mut self, record: EntityIndicatorScore) -> Result<(), InputError> {
        if record.entity != self.entity {
            return Err(InputError::EntityMismatch {
                expected: self.entity.clone(),
                found: record.entity,
            });
        }

        match self.scores.get(&record.indicator_key) {
            Some(existing) if !record.supersedes(existing) => {}
            _ => {
                self.scores.insert(record.indicator_key.clone(), record);
            }
        }
        Ok(())
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn get(&self, indicator_key: &str) -> Option<&EntityIndicatorScore> {
        self.scores.get(indicator_key)
    }

    pub fn scores(&self) -> impl Iterator<Item = &EntityIndicatorScore> {
        self.scores.values()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Engine input for this entity.
    pub fn achieved_values(&self) -> AchievedValues {
        self.scores
            .iter()
            .map(|(key, score)| (key.clone(), score.achieved_value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 6, day).and_then(|date| date.and_hms_opt(9, 0, 0))
    }

    fn district() -> EntityRef {
        EntityRef::new(Level::District, "mh_pune")
    }

    #[test]
    fn record_denormalises_target_and_computes_achievement() {
        let catalogue = Catalogue::standard();
        let record = EntityIndicatorScore::record(
            catalogue,
            district(),
            "eq_gender_lang_class3",
            4.5,
            None,
        )
        .expect("indicator exists");

        assert_eq!(record.domain, "equity");
        assert_eq!(record.unit, Unit::PercentagePointDifference);
        assert_eq!(record.target_value, 3.0);
        assert!((record.achievement_percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn record_rejects_unknown_indicator() {
        let result =
            EntityIndicatorScore::record(Catalogue::standard(), district(), "lo_music", 1.0, None);
        assert!(matches!(result, Err(InputError::UnknownIndicator(key)) if key == "lo_music"));
    }

    #[test]
    fn latest_record_wins_regardless_of_arrival_order() {
        let catalogue = Catalogue::standard();
        let newer =
            EntityIndicatorScore::record(catalogue, district(), "lo_math_class3", 71.0, at(20))
                .expect("record");
        let older =
            EntityIndicatorScore::record(catalogue, district(), "lo_math_class3", 58.0, at(2))
                .expect("record");

        let sheet = ScoreSheet::from_records(district(), [newer, older]).expect("same entity");

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.achieved_values()["lo_math_class3"], 71.0);
    }

    #[test]
    fn insert_rejects_records_for_other_entities() {
        let catalogue = Catalogue::standard();
        let foreign = EntityIndicatorScore::record(
            catalogue,
            EntityRef::new(Level::Block, "haveli"),
            "lo_math_class3",
            60.0,
            None,
        )
        .expect("record");

        let mut sheet = ScoreSheet::new(district());
        assert!(matches!(
            sheet.insert(foreign),
            Err(InputError::EntityMismatch { .. })
        ));
        assert!(sheet.is_empty());
    }

    #[test]
    fn from_achieved_values_drops_unknown_keys() {
        let achieved: AchievedValues = [
            ("lo_math_class3".to_string(), 64.0),
            ("unknown".to_string(), 10.0),
        ]
        .into_iter()
        .collect();

        let sheet = ScoreSheet::from_achieved_values(Catalogue::standard(), district(), &achieved);

        assert_eq!(sheet.len(), 1);
        assert!(sheet.get("unknown").is_none());
    }
}
