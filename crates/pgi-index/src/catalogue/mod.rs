//! Immutable registry of PGI domains and indicators.
//!
//! The standard catalogue ships as an embedded JSON asset and is parsed and
//! validated once per process by [`Catalogue::standard`]. Alternative
//! catalogues go through the same validation via [`Catalogue::from_path`] or
//! [`Catalogue::from_reader`]. Nothing hands out mutable access after load.

pub mod domain;
mod loader;
mod validation;

pub use domain::{Domain, Indicator, Level, Polarity, Unit, UnknownLevel};

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

const STANDARD_CATALOGUE: &str = include_str!("../../data/catalogue.json");

static STANDARD: OnceLock<Catalogue> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("domain `{0}` not found in catalogue")]
    DomainNotFound(String),
    #[error("failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalogue document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate domain key `{0}`")]
    DuplicateDomain(String),
    #[error("duplicate indicator key `{0}`")]
    DuplicateIndicator(String),
    #[error("indicator `{indicator}` references unknown domain `{domain}`")]
    UnknownDomainReference { indicator: String, domain: String },
    #[error("domain `{key}` has invalid weight {weight}")]
    InvalidDomainWeight { key: String, weight: f64 },
    #[error("indicator `{key}` has invalid weight {weight}")]
    InvalidIndicatorWeight { key: String, weight: f64 },
    #[error("domain weights sum to {sum}, expected 1.0")]
    DomainWeightSum { sum: f64 },
    #[error("indicator `{0}` is not measured at any level")]
    NoLevels(String),
    #[error("indicator `{key}` has invalid target {target}")]
    InvalidTarget { key: String, target: f64 },
}

#[derive(Debug, Clone)]
struct Partition {
    members: Vec<usize>,
    weight_total: f64,
}

/// Indicators of one domain together with the cached weight denominator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DomainPartition<'c> {
    pub(crate) domain: &'c Domain,
    pub(crate) weight_total: f64,
    members: &'c [usize],
    indicators: &'c [Indicator],
}

impl<'c> DomainPartition<'c> {
    pub(crate) fn indicators(self) -> impl Iterator<Item = &'c Indicator> + 'c {
        let (members, indicators) = (self.members, self.indicators);
        members
            .iter()
            .filter_map(move |&position| indicators.get(position))
    }
}

#[derive(Debug, Clone)]
pub struct Catalogue {
    domains: Vec<Domain>,
    indicators: Vec<Indicator>,
    partitions: Vec<Partition>,
    domain_index: HashMap<String, usize>,
    indicator_index: HashMap<String, usize>,
}

impl Catalogue {
    /// Validates the definitions and caches per-domain weight totals.
    pub fn new(domains: Vec<Domain>, indicators: Vec<Indicator>) -> Result<Self, CatalogueError> {
        validation::validate(&domains, &indicators)?;

        let domain_index: HashMap<String, usize> = domains
            .iter()
            .enumerate()
            .map(|(position, domain)| (domain.key.clone(), position))
            .collect();
        let indicator_index = indicators
            .iter()
            .enumerate()
            .map(|(position, indicator)| (indicator.key.clone(), position))
            .collect();

        let mut partitions = vec![
            Partition {
                members: Vec::new(),
                weight_total: 0.0,
            };
            domains.len()
        ];
        for (position, indicator) in indicators.iter().enumerate() {
            if let Some(partition) = domain_index
                .get(&indicator.domain)
                .and_then(|&domain| partitions.get_mut(domain))
            {
                partition.members.push(position);
                partition.weight_total += indicator.weight;
            }
        }

        Ok(Self {
            domains,
            indicators,
            partitions,
            domain_index,
            indicator_index,
        })
    }

    /// Process-wide catalogue built from the embedded asset.
    pub fn standard() -> &'static Catalogue {
        STANDARD.get_or_init(|| {
            let catalogue = Self::from_json_str(STANDARD_CATALOGUE)
                .expect("embedded PGI catalogue is valid");
            tracing::debug!(
                domains = catalogue.domains.len(),
                indicators = catalogue.indicators.len(),
                "loaded standard PGI catalogue"
            );
            catalogue
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogueError> {
        let (domains, indicators) = loader::parse_str(raw)?;
        Self::new(domains, indicators)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let (domains, indicators) = loader::parse_document(reader)?;
        Self::new(domains, indicators)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Domains in catalogue order.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Indicators in catalogue order.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn domain(&self, key: &str) -> Option<&Domain> {
        self.domain_index
            .get(key)
            .and_then(|&position| self.domains.get(position))
    }

    pub fn indicator(&self, key: &str) -> Option<&Indicator> {
        self.indicator_index
            .get(key)
            .and_then(|&position| self.indicators.get(position))
    }

    pub fn indicator_by_code(&self, code: &str) -> Option<&Indicator> {
        self.indicators
            .iter()
            .find(|indicator| indicator.code.eq_ignore_ascii_case(code.trim()))
    }

    /// All indicators of a domain keyed by indicator key.
    ///
    /// An existing domain with no indicators yields an empty map; a key absent
    /// from the catalogue is an error.
    pub fn indicators_for_domain(
        &self,
        domain_key: &str,
    ) -> Result<BTreeMap<&str, &Indicator>, CatalogueError> {
        let partition = self
            .partition(domain_key)
            .ok_or_else(|| CatalogueError::DomainNotFound(domain_key.to_string()))?;

        Ok(partition
            .indicators()
            .map(|indicator| (indicator.key.as_str(), indicator))
            .collect())
    }

    /// Indicators measurable at `level`. Unrecognised level names match nothing.
    pub fn indicators_for_level(&self, level: &str) -> BTreeMap<&str, &Indicator> {
        match Level::parse(level) {
            Some(level) => self.indicators_at(level),
            None => BTreeMap::new(),
        }
    }

    pub fn indicators_at(&self, level: Level) -> BTreeMap<&str, &Indicator> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.applies_at(level))
            .map(|indicator| (indicator.key.as_str(), indicator))
            .collect()
    }

    /// Sum of raw indicator weights in a domain, the within-domain denominator.
    pub fn domain_weight_total(&self, domain_key: &str) -> Option<f64> {
        self.partition(domain_key)
            .map(|partition| partition.weight_total)
    }

    pub fn summary(&self) -> CatalogueSummary {
        let domains = self
            .partitions()
            .map(|partition| DomainSummaryEntry {
                key: partition.domain.key.clone(),
                name: partition.domain.name.clone(),
                code: partition.domain.code.clone(),
                weight: partition.domain.weight,
                indicator_count: partition.members.len(),
                indicator_weight_total: partition.weight_total,
            })
            .collect();

        CatalogueSummary {
            total_domains: self.domains.len(),
            total_indicators: self.indicators.len(),
            domains,
        }
    }

    pub(crate) fn partition(&self, domain_key: &str) -> Option<DomainPartition<'_>> {
        let position = *self.domain_index.get(domain_key)?;
        self.partition_at(position)
    }

    /// Partitions in catalogue order.
    pub(crate) fn partitions(&self) -> impl Iterator<Item = DomainPartition<'_>> + '_ {
        (0..self.domains.len()).filter_map(move |position| self.partition_at(position))
    }

    fn partition_at(&self, position: usize) -> Option<DomainPartition<'_>> {
        let domain = self.domains.get(position)?;
        let partition = self.partitions.get(position)?;
        Some(DomainPartition {
            domain,
            weight_total: partition.weight_total,
            members: &partition.members,
            indicators: &self.indicators,
        })
    }
}

/// Counts exposed to dashboards rendering the framework overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueSummary {
    pub total_domains: usize,
    pub total_indicators: usize,
    pub domains: Vec<DomainSummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSummaryEntry {
    pub key: String,
    pub name: String,
    pub code: String,
    pub weight: f64,
    pub indicator_count: usize,
    pub indicator_weight_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(key: &str, weight: f64) -> Domain {
        Domain {
            key: key.to_string(),
            name: key.to_uppercase(),
            code: key[..1].to_uppercase(),
            weight,
            description: String::new(),
        }
    }

    fn indicator(key: &str, domain: &str, weight: f64) -> Indicator {
        Indicator {
            key: key.to_string(),
            code: key.to_uppercase(),
            name: key.to_string(),
            domain: domain.to_string(),
            weight,
            levels: vec![Level::State, Level::District],
            unit: Unit::Percentage,
            polarity: Polarity::HigherIsBetter,
            target: 80.0,
            formula: String::new(),
        }
    }

    #[test]
    fn caches_weight_totals_per_domain() {
        let catalogue = Catalogue::new(
            vec![domain("access", 0.4), domain("equity", 0.6)],
            vec![
                indicator("a1", "access", 10.0),
                indicator("e1", "equity", 5.0),
                indicator("a2", "access", 10.0),
            ],
        )
        .expect("catalogue is valid");

        assert_eq!(catalogue.domain_weight_total("access"), Some(20.0));
        assert_eq!(catalogue.domain_weight_total("equity"), Some(5.0));
        assert_eq!(catalogue.domain_weight_total("governance"), None);

        let access: Vec<&str> = catalogue
            .partition("access")
            .expect("access partition")
            .indicators()
            .map(|indicator| indicator.key.as_str())
            .collect();
        assert_eq!(access, vec!["a1", "a2"]);
    }

    #[test]
    fn empty_domain_is_not_an_error() {
        let catalogue = Catalogue::new(
            vec![domain("access", 0.5), domain("equity", 0.5)],
            vec![indicator("a1", "access", 1.0)],
        )
        .expect("catalogue is valid");

        let equity = catalogue
            .indicators_for_domain("equity")
            .expect("equity exists");
        assert!(equity.is_empty());
        assert_eq!(catalogue.domain_weight_total("equity"), Some(0.0));
    }

    #[test]
    fn rejects_indicator_with_unknown_domain() {
        let result = Catalogue::new(
            vec![domain("access", 1.0)],
            vec![indicator("g1", "governance", 1.0)],
        );

        match result {
            Err(CatalogueError::UnknownDomainReference { indicator, domain }) => {
                assert_eq!(indicator, "g1");
                assert_eq!(domain, "governance");
            }
            other => panic!("expected unknown domain reference, got {other:?}"),
        }
    }

    #[test]
    fn rejects_domain_weights_that_do_not_sum_to_one() {
        let result = Catalogue::new(
            vec![domain("access", 0.5), domain("equity", 0.45)],
            vec![indicator("a1", "access", 1.0)],
        );

        assert!(matches!(result, Err(CatalogueError::DomainWeightSum { .. })));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let duplicate_domain = Catalogue::new(
            vec![domain("access", 0.5), domain("access", 0.5)],
            Vec::new(),
        );
        assert!(matches!(
            duplicate_domain,
            Err(CatalogueError::DuplicateDomain(key)) if key == "access"
        ));

        let duplicate_indicator = Catalogue::new(
            vec![domain("access", 1.0)],
            vec![
                indicator("a1", "access", 1.0),
                indicator("a1", "access", 2.0),
            ],
        );
        assert!(matches!(
            duplicate_indicator,
            Err(CatalogueError::DuplicateIndicator(key)) if key == "a1"
        ));
    }

    #[test]
    fn rejects_non_positive_indicator_weight_and_missing_levels() {
        let zero_weight = Catalogue::new(
            vec![domain("access", 1.0)],
            vec![indicator("a1", "access", 0.0)],
        );
        assert!(matches!(
            zero_weight,
            Err(CatalogueError::InvalidIndicatorWeight { .. })
        ));

        let mut levelless = indicator("a1", "access", 1.0);
        levelless.levels.clear();
        let no_levels = Catalogue::new(vec![domain("access", 1.0)], vec![levelless]);
        assert!(matches!(no_levels, Err(CatalogueError::NoLevels(key)) if key == "a1"));
    }

    #[test]
    fn rejects_lower_is_better_indicator_without_positive_target() {
        let mut gap = indicator("gap", "equity", 5.0);
        gap.unit = Unit::PercentagePointDifference;
        gap.polarity = Polarity::LowerIsBetter;
        gap.target = 0.0;

        let result = Catalogue::new(vec![domain("equity", 1.0)], vec![gap]);
        assert!(matches!(result, Err(CatalogueError::InvalidTarget { .. })));
    }

    #[test]
    fn indicator_lookup_by_code_ignores_case() {
        let catalogue = Catalogue::standard();
        let found = catalogue
            .indicator_by_code("lo-m3")
            .expect("LO-M3 present");
        assert_eq!(found.key, "lo_math_class3");
    }
}
