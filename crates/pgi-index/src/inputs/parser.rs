use super::InputError;
use crate::catalogue::Level;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ScoreRow {
    pub(crate) level: Level,
    pub(crate) entity_id: String,
    pub(crate) indicator_key: String,
    pub(crate) achieved_value: f64,
    pub(crate) recorded_at: Option<NaiveDateTime>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ScoreRow>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawScoreRow>() {
        let raw = record?;
        let level = raw.level.parse::<Level>()?;
        let recorded_at = match raw.recorded_at.as_deref() {
            Some(value) => Some(
                parse_datetime(value).ok_or_else(|| InputError::InvalidTimestamp(value.to_string()))?,
            ),
            None => None,
        };

        rows.push(ScoreRow {
            level,
            entity_id: raw.entity_id,
            indicator_key: raw.indicator_key,
            achieved_value: raw.achieved_value,
            recorded_at,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawScoreRow {
    level: String,
    entity_id: String,
    indicator_key: String,
    achieved_value: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    recorded_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}
