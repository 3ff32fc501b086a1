//! Performance Grading Index (PGI) catalogue and scoring engine.
//!
//! The catalogue is an immutable registry of weighted domains and indicators
//! loaded once per process. The scoring engine turns an entity's achieved
//! indicator values into domain scores and a grand total out of a configurable
//! maximum (1000 by default).

pub mod catalogue;
pub mod config;
pub mod error;
pub mod inputs;
pub mod report;
pub mod scoring;
pub mod telemetry;

pub use catalogue::{
    Catalogue, CatalogueError, CatalogueSummary, Domain, Indicator, Level, Polarity, Unit,
};
pub use inputs::{AchievedValues, EntityIndicatorScore, EntityRef, InputError, ScoreSheet};
pub use report::{rank_reports, EntityReport, RankedEntity};
pub use scoring::{
    DomainScore, PerformanceBand, ScoreResult, ScoringConfig, ScoringEngine, DEFAULT_MAX_SCORE,
};
