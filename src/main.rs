// s3cost: A tool for reporting AWS S3 storage tiers and costs.
#![forbid(unsafe_code)]
use anyhow::{
    anyhow,
    Context,
    Result,
};
use clap::ArgMatches;
use costs::BreakdownMode;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod cloudwatch;
mod commands;
mod common;
mod costexplorer;
mod costs;
mod report;
mod s3;
mod tiers;

use common::{
    Region,
    Session,
};

// Logging is quiet unless asked for with RUST_LOG.
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns the region given on the command line or in the environment, if any.
fn region(matches: &ArgMatches) -> Region {
    match matches.get_one::<String>("REGION") {
        Some(region) => Region::new().set_region(region),
        None         => Region::new(),
    }
}

fn csv_path(matches: &ArgMatches) -> Option<&PathBuf> {
    matches.get_one::<PathBuf>("CSV")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let matches = cli::parse_args();

    // Credentials are checked before any command runs so that we fail before
    // making any AWS requests.
    let session = Session::load(region(&matches))
        .await
        .context("AWS credentials not found. Please configure AWS CLI or set environment variables.")?;

    debug!("main: Session loaded in '{}'", session.region().name());

    let catalog = s3::Client::new(session.s3(session.region()));

    match matches.subcommand() {
        Some(("costs", sub)) => {
            // Both of these have defaults.
            let days = *sub.get_one::<u32>("DAYS")
                .context("days")?;

            let mode = sub.get_one::<String>("BREAKDOWN_MODE")
                .context("breakdown mode")?;

            let mode = BreakdownMode::from_str(mode)
                .map_err(|e| anyhow!("breakdown mode '{}': {}", mode, e))?;

            let client = costexplorer::Client::new(session.cost_explorer());
            let csv    = csv_path(sub).map(PathBuf::as_path);

            commands::costs::run(&client, days, csv, mode).await
        },
        Some(("buckets", sub)) => {
            let detailed = sub.get_flag("DETAILED");
            let csv      = csv_path(sub).map(PathBuf::as_path);

            commands::buckets::run(&catalog, &session, detailed, csv).await
        },
        Some(("bucket-details", sub)) => {
            let bucket = sub.get_one::<String>("BUCKET_NAME")
                .context("bucket name")?;

            let csv = csv_path(sub).map(PathBuf::as_path);

            commands::bucket_details::run(&catalog, &session, bucket, csv).await
        },
        // We shouldn't ever hit this, clap requires a subcommand.
        _ => Err(anyhow!("no command given")),
    }
}
