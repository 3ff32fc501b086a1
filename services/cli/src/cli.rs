use crate::commands::{
    run_catalogue_domain, run_catalogue_level, run_catalogue_summary, run_rank, run_report,
    run_score, RankArgs, ReportArgs, ScoreArgs,
};
use clap::{Parser, Subcommand};
use pgi_index::config::AppConfig;
use pgi_index::error::AppError;
use pgi_index::telemetry;
use pgi_index::ScoringEngine;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "pgi-index",
    about = "Inspect the Performance Grading Index catalogue and score entities against it",
    version
)]
struct Cli {
    /// Override the configured maximum score (PGI_MAX_SCORE)
    #[arg(long, global = true)]
    max_score: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the indicator catalogue
    Catalogue {
        #[command(subcommand)]
        command: CatalogueCommand,
    },
    /// Score one entity from a JSON map of indicator key to achieved value
    Score(ScoreArgs),
    /// Build drill-down reports for every entity in a CSV score export
    Report(ReportArgs),
    /// Rank entities of one level from a CSV score export
    Rank(RankArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogueCommand {
    /// Domain weights and indicator counts
    Summary,
    /// Indicators belonging to one domain
    Domain { key: String },
    /// Indicators measurable at an administrative level
    Level { level: String },
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(max_score) = cli.max_score {
        config.override_max_score(max_score, "--max-score")?;
    }

    telemetry::init(&config.telemetry)?;

    let catalogue = config.catalogue.load()?;
    let engine = ScoringEngine::new(&catalogue, config.scoring);
    info!(
        ?config.environment,
        indicators = catalogue.indicators().len(),
        max_score = config.scoring.max_score,
        "pgi catalogue ready"
    );

    match cli.command {
        Command::Catalogue { command } => match command {
            CatalogueCommand::Summary => run_catalogue_summary(&catalogue),
            CatalogueCommand::Domain { key } => run_catalogue_domain(&catalogue, &key),
            CatalogueCommand::Level { level } => run_catalogue_level(&catalogue, &level),
        },
        Command::Score(args) => run_score(&engine, args),
        Command::Report(args) => run_report(&engine, args),
        Command::Rank(args) => run_rank(&engine, args),
    }
}
