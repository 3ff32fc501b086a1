use super::domain::{Domain, Indicator};
use super::CatalogueError;
use std::collections::HashSet;

pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub(crate) fn validate(domains: &[Domain], indicators: &[Indicator]) -> Result<(), CatalogueError> {
    let mut domain_keys = HashSet::with_capacity(domains.len());
    for domain in domains {
        if !domain_keys.insert(domain.key.as_str()) {
            return Err(CatalogueError::DuplicateDomain(domain.key.clone()));
        }
        if !domain.weight.is_finite() || domain.weight < 0.0 {
            return Err(CatalogueError::InvalidDomainWeight {
                key: domain.key.clone(),
                weight: domain.weight,
            });
        }
    }

    let sum: f64 = domains.iter().map(|domain| domain.weight).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(CatalogueError::DomainWeightSum { sum });
    }

    let mut indicator_keys = HashSet::with_capacity(indicators.len());
    for indicator in indicators {
        if !indicator_keys.insert(indicator.key.as_str()) {
            return Err(CatalogueError::DuplicateIndicator(indicator.key.clone()));
        }
        if !domain_keys.contains(indicator.domain.as_str()) {
            return Err(CatalogueError::UnknownDomainReference {
                indicator: indicator.key.clone(),
                domain: indicator.domain.clone(),
            });
        }
        if !indicator.weight.is_finite() || indicator.weight <= 0.0 {
            return Err(CatalogueError::InvalidIndicatorWeight {
                key: indicator.key.clone(),
                weight: indicator.weight,
            });
        }
        if indicator.levels.is_empty() {
            return Err(CatalogueError::NoLevels(indicator.key.clone()));
        }
        // the lower-is-better penalty divides by the target
        if !indicator.target.is_finite() || (indicator.is_lower_better() && indicator.target <= 0.0)
        {
            return Err(CatalogueError::InvalidTarget {
                key: indicator.key.clone(),
                target: indicator.target,
            });
        }
    }

    Ok(())
}
