// costs command
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    CostSource,
    DateWindow,
};
use crate::costs::{
    BreakdownMode,
    CostAggregator,
    UsageBreakdown,
};
use crate::report::{
    dollars,
    Report,
};
use std::path::Path;

const HEADERS: &[&str] = &["Usage Type", "Cost"];

/// Returns the usage type breakdown as a `Report`, most expensive first.
pub fn breakdown_report(breakdown: &UsageBreakdown) -> Report {
    let mut report = Report::new(HEADERS);

    for (usage_type, cost) in breakdown.by_cost_descending() {
        report.push_row([usage_type.to_string(), dollars(cost)]);
    }

    report
}

/// Prints the total S3 cost of the last `days` days followed by the cost per
/// usage type, which is written to `csv` instead if given.
pub async fn run(
    source: &dyn CostSource,
    days: u32,
    csv: Option<&Path>,
    mode: BreakdownMode,
) -> Result<()> {
    println!("Retrieving S3 costs for the last {} days...", days);

    let aggregator = CostAggregator::new(source, DateWindow::trailing_days(days));

    let total = aggregator.total().await;
    println!("\nTotal S3 Cost (last {} days): {}", days, dollars(total));

    let breakdown = aggregator.breakdown(mode).await;
    if breakdown.is_empty() {
        return Ok(());
    }

    let report = breakdown_report(&breakdown);

    match csv {
        Some(path) => {
            report.export(path)?;
            println!("Cost data exported to {}", path.display());
        },
        None => {
            println!("\nDetailed Cost Breakdown:");
            println!("{}", report.table());
        },
    }

    Ok(())
}
