use super::parser::{self, ScoreRow};
use super::{EntityIndicatorScore, EntityRef, InputError, ScoreSheet};
use crate::catalogue::Catalogue;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Builds per-entity score sheets from a flat CSV export.
///
/// Expected header: `level,entity_id,indicator_key,achieved_value[,recorded_at]`.
/// Sheets are returned in the order their entity first appears.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        catalogue: &Catalogue,
        path: P,
    ) -> Result<Vec<ScoreSheet>, InputError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(catalogue, file)
    }

    pub fn from_reader<R: Read>(
        catalogue: &Catalogue,
        reader: R,
    ) -> Result<Vec<ScoreSheet>, InputError> {
        let mut sheets: Vec<ScoreSheet> = Vec::new();
        let mut positions: HashMap<EntityRef, usize> = HashMap::new();
        let mut skipped = 0usize;

        for row in parser::parse_rows(reader)? {
            let ScoreRow {
                level,
                entity_id,
                indicator_key,
                achieved_value,
                recorded_at,
            } = row;
            let entity = EntityRef::new(level, entity_id);

            let record = match EntityIndicatorScore::record(
                catalogue,
                entity.clone(),
                &indicator_key,
                achieved_value,
                recorded_at,
            ) {
                Ok(record) => record,
                Err(InputError::UnknownIndicator(key)) => {
                    warn!(indicator = %key, %entity, "skipping score for unknown indicator");
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let position = *positions.entry(entity.clone()).or_insert_with(|| {
                sheets.push(ScoreSheet::new(entity));
                sheets.len() - 1
            });
            if let Some(sheet) = sheets.get_mut(position) {
                sheet.insert(record)?;
            }
        }

        debug!(entities = sheets.len(), skipped, "imported score sheets");
        Ok(sheets)
    }
}
