// Command line interface parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use clap::{
    crate_description,
    crate_name,
    crate_version,
    value_parser,
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use std::path::PathBuf;
use tracing::debug;

// Default number of days that costs are retrieved for
const DEFAULT_DAYS: &str = "30";

// Default way of combining usage type costs from different months
const DEFAULT_BREAKDOWN_MODE: &str = "overwrite";

// This should match the string values in the BreakdownMode FromStr impl
const VALID_BREAKDOWN_MODES: [&str; 2] = [
    "accumulate",
    "overwrite",
];

// Every command can export its output.
fn csv_arg() -> Arg {
    Arg::new("CSV")
        .long("csv")
        .value_name("PATH")
        .help("Export to CSV file")
        .value_parser(value_parser!(PathBuf))
}

// Create clap app
fn create_app() -> Command {
    debug!("Creating CLI app");

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("REGION")
                .env("AWS_REGION")
                .hide_env_values(true)
                .long("region")
                .short('r')
                .value_name("REGION")
                .help("Set the AWS region used to list buckets")
                .global(true)
        )
        .subcommand(
            Command::new("costs")
                .about("Get S3 storage costs for the specified period")
                .arg(
                    Arg::new("DAYS")
                        .long("days")
                        .value_name("DAYS")
                        .help("Number of days to analyze")
                        .default_value(DEFAULT_DAYS)
                        .value_parser(value_parser!(u32).range(1..))
                )
                .arg(csv_arg())
                .arg(
                    Arg::new("BREAKDOWN_MODE")
                        .long("breakdown-mode")
                        .value_name("MODE")
                        .help("How usage type costs from different months are combined")
                        .default_value(DEFAULT_BREAKDOWN_MODE)
                        .value_parser(VALID_BREAKDOWN_MODES)
                )
        )
        .subcommand(
            Command::new("buckets")
                .about("List all S3 buckets with storage information")
                .arg(
                    Arg::new("DETAILED")
                        .long("detailed")
                        .help("Show detailed storage tier breakdown")
                        .action(ArgAction::SetTrue)
                )
                .arg(csv_arg())
        )
        .subcommand(
            Command::new("bucket-details")
                .about("Get detailed storage tier information for a specific bucket")
                .arg(
                    Arg::new("BUCKET_NAME")
                        .value_name("BUCKET_NAME")
                        .help("Bucket to report on")
                        .required(true)
                )
                .arg(csv_arg())
        )
}

/// Parse the command line arguments, exiting on error.
pub fn parse_args() -> ArgMatches {
    debug!("Parsing command line arguments");

    create_app().get_matches()
}
