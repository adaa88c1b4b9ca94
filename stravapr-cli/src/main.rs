//! strava-pr CLI — Strava ride and segment reports as CSV.
//!
//! Commands:
//! - `list [--limit N]` — one row per activity, most recent first
//! - `summary` — ride distance and count per bike
//! - `ride [RIDE_ID]` — each segment of a ride against your best effort
//!
//! CSV goes to stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use stravapr_core::{Config, ConfigError, StravaClient};
use stravapr_report::{flush_report, CsvSink, ReportContext, ReportError, RideSelection};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Log level used when neither `RUST_LOG` nor the config file sets one.
const DEFAULT_LOG_LEVEL: &str = "error";

#[derive(Parser)]
#[command(
    name = "strava-pr",
    about = "strava-pr — Strava ride and segment reports as CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List activities, most recent first.
    List {
        /// Only list the N most recent activities.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Total ride distance and ride count per bike.
    Summary,
    /// Compare each segment of a ride against your best effort on it.
    Ride {
        /// Activity to report on. Defaults to the most recent one.
        #[arg(value_name = "RIDE_ID")]
        ride_ids: Vec<u64>,
    },
}

/// A validated command, ready to run.
#[derive(Debug, PartialEq)]
enum Job {
    List { limit: Option<usize> },
    Summary,
    Ride(RideSelection),
}

impl Job {
    fn from_command(command: Commands) -> Result<Self, ReportError> {
        Ok(match command {
            Commands::List { limit } => Job::List { limit },
            Commands::Summary => Job::Summary,
            Commands::Ride { ride_ids } => Job::Ride(RideSelection::from_ids(&ride_ids)?),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli.command, Config::load)
}

/// Validate `command`, then load config and run the report.
///
/// Usage errors surface before `load_config` is called or any request is made.
fn run(
    command: Commands,
    load_config: impl FnOnce() -> Result<Config, ConfigError>,
) -> Result<()> {
    let job = Job::from_command(command)?;

    let config = load_config().context("failed to load configuration")?;
    init_logging(config.log_level.as_deref());
    match &config.source {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("no config file, using environment"),
    }

    let client = StravaClient::new(config.access_token.as_str(), config.base_url.as_str())?;
    let mut ctx = ReportContext::new(&client).context("failed to fetch athlete profile")?;
    info!(?job, "running report");

    let mut sink = CsvSink::new();
    let outcome = match job {
        Job::List { limit } => ctx.list_rides(limit, &mut sink),
        Job::Summary => ctx.summarize_bikes(&mut sink),
        Job::Ride(selection) => ctx.ride_segments(selection, &mut sink),
    };

    flush_report(sink, outcome, &mut io::stdout().lock())?;
    Ok(())
}

/// Filter directive: `RUST_LOG`, then the config level, then [`DEFAULT_LOG_LEVEL`].
fn log_directive(env: Option<String>, config_level: Option<&str>) -> String {
    env.filter(|directive| !directive.trim().is_empty())
        .or_else(|| config_level.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Install the stderr subscriber.
fn init_logging(config_level: Option<&str>) {
    let directive = log_directive(std::env::var(EnvFilter::DEFAULT_ENV).ok(), config_level);
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
