use crate::config::TelemetryConfig;
use std::env;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const LOG_LEVEL_VAR: &str = "PGI_LOG_LEVEL";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter {
        origin: &'static str,
        value: String,
        source: ParseError,
    },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { origin, value, .. } => {
                write!(f, "invalid log filter '{}' in {}", value, origin)
            }
            TelemetryError::Subscriber(err) => write!(f, "could not install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter directives in effect: a non-empty `RUST_LOG` wins over the
/// configured `PGI_LOG_LEVEL`.
fn filter_directives(config: &TelemetryConfig) -> (&'static str, String) {
    match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) if !value.trim().is_empty() => (EnvFilter::DEFAULT_ENV, value),
        _ => (LOG_LEVEL_VAR, config.log_level.clone()),
    }
}

fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let (origin, directives) = filter_directives(config);
    EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        origin,
        value: directives,
        source,
    })
}

/// Installs the global subscriber. Logs go to stderr so that command output on
/// stdout stays machine readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
