use super::domain::{Domain, Indicator, Level, Polarity, Unit};
use super::CatalogueError;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CatalogueDocument {
    domains: Vec<Domain>,
    indicators: Vec<IndicatorDefinition>,
}

#[derive(Debug, Deserialize)]
struct IndicatorDefinition {
    key: String,
    code: String,
    name: String,
    domain: String,
    weight: f64,
    levels: Vec<Level>,
    unit: Unit,
    #[serde(default)]
    polarity: Option<Polarity>,
    target: f64,
    #[serde(default)]
    formula: String,
}

impl IndicatorDefinition {
    fn into_indicator(self) -> Indicator {
        let mut levels = self.levels;
        levels.sort();
        levels.dedup();

        Indicator {
            key: self.key,
            code: self.code,
            name: self.name,
            domain: self.domain,
            weight: self.weight,
            levels,
            polarity: self.polarity.unwrap_or_else(|| self.unit.default_polarity()),
            unit: self.unit,
            target: self.target,
            formula: self.formula,
        }
    }
}

pub(crate) fn parse_document<R: Read>(
    reader: R,
) -> Result<(Vec<Domain>, Vec<Indicator>), CatalogueError> {
    let document: CatalogueDocument = serde_json::from_reader(reader)?;
    Ok(split(document))
}

pub(crate) fn parse_str(raw: &str) -> Result<(Vec<Domain>, Vec<Indicator>), CatalogueError> {
    let document: CatalogueDocument = serde_json::from_str(raw)?;
    Ok(split(document))
}

fn split(document: CatalogueDocument) -> (Vec<Domain>, Vec<Indicator>) {
    let indicators = document
        .indicators
        .into_iter()
        .map(IndicatorDefinition::into_indicator)
        .collect();
    (document.domains, indicators)
}
