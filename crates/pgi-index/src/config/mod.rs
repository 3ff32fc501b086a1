use crate::catalogue::{Catalogue, CatalogueError};
use crate::scoring::{ScoringConfig, DEFAULT_MAX_SCORE};
use std::borrow::Cow;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for tools embedding the scoring engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub scoring: ScoringConfig,
    pub catalogue: CatalogueSource,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PGI_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let max_score = match env::var("PGI_MAX_SCORE") {
            Ok(raw) => parse_max_score(&raw)?,
            Err(_) => DEFAULT_MAX_SCORE,
        };

        let catalogue = match env::var("PGI_CATALOGUE_PATH") {
            Ok(path) if !path.trim().is_empty() => CatalogueSource::File(PathBuf::from(path.trim())),
            _ => CatalogueSource::Embedded,
        };

        let log_level = env::var("PGI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            scoring: ScoringConfig { max_score },
            catalogue,
            telemetry: TelemetryConfig { log_level },
        })
    }

    /// Replaces the configured scale. `origin` names the setting the value came
    /// from and is reported on rejection.
    pub fn override_max_score(
        &mut self,
        max_score: f64,
        origin: &'static str,
    ) -> Result<(), ConfigError> {
        self.scoring.max_score = validate_max_score(max_score, origin)?;
        Ok(())
    }
}

fn parse_max_score(raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidMaxScore {
            origin: "PGI_MAX_SCORE",
            value: raw.to_string(),
        })?;
    validate_max_score(value, "PGI_MAX_SCORE")
}

fn validate_max_score(value: f64, origin: &'static str) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidMaxScore {
            origin,
            value: value.to_string(),
        })
    }
}

/// Where the indicator catalogue is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    Embedded,
    File(PathBuf),
}

impl CatalogueSource {
    pub fn load(&self) -> Result<Cow<'static, Catalogue>, CatalogueError> {
        match self {
            CatalogueSource::Embedded => Ok(Cow::Borrowed(Catalogue::standard())),
            CatalogueSource::File(path) => Catalogue::from_path(path).map(Cow::Owned),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMaxScore { origin: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxScore { origin, value } => write!(
                f,
                "{} must be a positive finite number, got '{}'",
                origin, value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
