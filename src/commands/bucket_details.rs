// bucket-details command
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    BucketCatalog,
    HumanSize,
    RegionalClients,
    TierSizes,
};
use crate::report::Report;
use crate::tiers::TierResolver;
use std::path::Path;

const HEADERS: &[&str] = &["Storage Tier", "Size"];
const TOTAL: &str = "Total";

/// Returns a `Report` with one row per storage tier in `sizes`.
pub fn tier_report(sizes: &TierSizes) -> Report {
    let mut report = Report::new(HEADERS);

    for (storage_type, size) in sizes.iter() {
        report.push_row([storage_type.to_string(), size.humansize()]);
    }

    report
}

/// Prints the storage tiers of `bucket` and its total size, or writes them
/// to `csv` if given.
///
/// The total is a final `Total` row in the CSV, but printed on its own after
/// the table.
pub async fn run(
    catalog: &dyn BucketCatalog,
    clients: &dyn RegionalClients,
    bucket: &str,
    csv: Option<&Path>,
) -> Result<()> {
    println!("Retrieving detailed information for bucket: {}", bucket);

    let resolver = TierResolver::new(catalog, clients);
    let sizes    = resolver.resolve(bucket).await;

    if sizes.is_empty() {
        println!("No storage tier data found for bucket: {}", bucket);
        return Ok(());
    }

    let mut report = tier_report(&sizes);
    let total      = sizes.total().humansize();

    match csv {
        Some(path) => {
            report.push_row([TOTAL.to_string(), total]);
            report.export(path)?;
            println!("Bucket details exported to {}", path.display());
        },
        None => {
            println!("\nStorage Tier Breakdown for {}:", bucket);
            println!("{}", report.table());
            println!("\nTotal Size: {}", total);
        },
    }

    Ok(())
}
