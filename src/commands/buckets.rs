// buckets command
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    BucketCatalog,
    BucketNames,
    HumanSize,
    RegionalClients,
    TierSizes,
};
use crate::report::Report;
use crate::tiers::TierResolver;
use std::path::Path;
use tracing::debug;

const DETAILED_HEADERS: &[&str] = &["Bucket", "Storage Tier", "Size"];
const SUMMARY_HEADERS: &[&str] = &["Bucket", "Total Size", "Storage Types"];

// Shown for buckets that we couldn't get any sizes for.
const NO_DATA: &str = "No data";
const NOT_AVAILABLE: &str = "N/A";

/// Returns the names of all buckets, or no names if they can't be listed.
pub async fn bucket_names(catalog: &dyn BucketCatalog) -> BucketNames {
    match catalog.buckets().await {
        Ok(buckets) => buckets,
        Err(e) => {
            eprintln!("Error listing buckets: {:#}", e);

            BucketNames::new()
        },
    }
}

/// Returns an empty `Report` with the headers for the `detailed` or summary
/// listing.
pub fn report(detailed: bool) -> Report {
    if detailed {
        Report::new(DETAILED_HEADERS)
    }
    else {
        Report::new(SUMMARY_HEADERS)
    }
}

/// Adds the rows for `bucket` to `report`.
///
/// A `detailed` listing has one row per storage tier, otherwise the bucket
/// gets a single row with its total size and the names of its storage tiers.
pub fn push_bucket_rows(
    report: &mut Report,
    bucket: &str,
    sizes: &TierSizes,
    detailed: bool,
) {
    if sizes.is_empty() {
        report.push_row([bucket, NO_DATA, NOT_AVAILABLE]);
        return;
    }

    if detailed {
        for (storage_type, size) in sizes.iter() {
            report.push_row([
                bucket.to_string(),
                storage_type.to_string(),
                size.humansize(),
            ]);
        }
    }
    else {
        let storage_types: Vec<&str> = sizes.storage_types()
            .iter()
            .map(|storage_type| storage_type.as_str())
            .collect();

        report.push_row([
            bucket.to_string(),
            sizes.total().humansize(),
            storage_types.join(", "),
        ]);
    }
}

/// Returns the `Report` for `buckets`, resolving the storage tiers of each.
pub async fn bucket_report(
    resolver: &TierResolver<'_>,
    buckets: &[String],
    detailed: bool,
) -> Report {
    let mut report = report(detailed);

    for bucket in buckets {
        println!("Analyzing bucket: {}", bucket);

        let sizes = resolver.resolve(bucket).await;
        push_bucket_rows(&mut report, bucket, &sizes, detailed);
    }

    debug!("bucket_report: {} rows", report.rows().len());

    report
}

/// Prints the storage tiers of every bucket in the account, or writes them
/// to `csv` if given.
pub async fn run(
    catalog: &dyn BucketCatalog,
    clients: &dyn RegionalClients,
    detailed: bool,
    csv: Option<&Path>,
) -> Result<()> {
    println!("Retrieving S3 bucket information...");

    let buckets = bucket_names(catalog).await;
    if buckets.is_empty() {
        println!("No S3 buckets found in the account.");
        return Ok(());
    }

    let resolver = TierResolver::new(catalog, clients);
    let report   = bucket_report(&resolver, &buckets, detailed).await;

    match csv {
        Some(path) => {
            report.export(path)?;
            println!("Bucket data exported to {}", path.display());
        },
        None => {
            if detailed {
                println!("\nS3 Bucket Storage Tiers (Detailed):");
            }
            else {
                println!("\nS3 Bucket Storage Summary:");
            }

            println!("{}", report.table());
        },
    }

    Ok(())
}
