use clap::Args;
use pgi_index::error::AppError;
use pgi_index::inputs::ScoreSheetImporter;
use pgi_index::{
    rank_reports, AchievedValues, Catalogue, Domain, EntityRef, EntityReport, Indicator, Level,
    ScoreSheet, ScoringEngine,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON object of indicator key to achieved value (`-` reads stdin)
    #[arg(long)]
    pub(crate) values: PathBuf,
    /// Emit a drill-down report for this level instead of the bare score
    #[arg(long)]
    pub(crate) level: Option<Level>,
    /// Entity id used in the drill-down report
    #[arg(long, default_value = "adhoc")]
    pub(crate) entity_id: String,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV export with level, entity_id, indicator_key, achieved_value columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV export with level, entity_id, indicator_key, achieved_value columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Level to rank
    #[arg(long)]
    pub(crate) level: Level,
    /// Number of entities to list
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Serialize)]
struct DomainListing<'a> {
    domain: &'a Domain,
    indicators: BTreeMap<&'a str, &'a Indicator>,
}

pub(crate) fn run_catalogue_summary(catalogue: &Catalogue) -> Result<(), AppError> {
    print_json(&catalogue.summary())
}

pub(crate) fn run_catalogue_domain(catalogue: &Catalogue, key: &str) -> Result<(), AppError> {
    let indicators = catalogue.indicators_for_domain(key)?;
    let domain = catalogue
        .domain(key)
        .ok_or_else(|| pgi_index::CatalogueError::DomainNotFound(key.to_string()))?;
    print_json(&DomainListing { domain, indicators })
}

pub(crate) fn run_catalogue_level(catalogue: &Catalogue, level: &str) -> Result<(), AppError> {
    print_json(&catalogue.indicators_for_level(level))
}

pub(crate) fn run_score(engine: &ScoringEngine<'_>, args: ScoreArgs) -> Result<(), AppError> {
    let achieved = read_achieved_values(&args.values)?;

    match args.level {
        Some(level) => {
            let sheet = ScoreSheet::from_achieved_values(
                engine.catalogue(),
                EntityRef::new(level, args.entity_id),
                &achieved,
            );
            print_json(&EntityReport::build(engine, &sheet))
        }
        None => print_json(&engine.score(&achieved)),
    }
}

pub(crate) fn run_report(engine: &ScoringEngine<'_>, args: ReportArgs) -> Result<(), AppError> {
    let reports = load_reports(engine, &args.csv)?;
    print_json(&reports)
}

pub(crate) fn run_rank(engine: &ScoringEngine<'_>, args: RankArgs) -> Result<(), AppError> {
    let reports = load_reports(engine, &args.csv)?;
    print_json(&rank_reports(&reports, args.level, args.limit))
}

fn load_reports(engine: &ScoringEngine<'_>, path: &Path) -> Result<Vec<EntityReport>, AppError> {
    let sheets = ScoreSheetImporter::from_path(engine.catalogue(), path)?;
    Ok(sheets
        .iter()
        .map(|sheet| EntityReport::build(engine, sheet))
        .collect())
}

fn read_achieved_values(path: &Path) -> Result<AchievedValues, AppError> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_string(&mut raw)?;
    } else {
        File::open(path)?.read_to_string(&mut raw)?;
    }
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
