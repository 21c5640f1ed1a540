// Aggregation of S3 cost records
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    CostDimension,
    CostQuery,
    CostRecord,
    CostSource,
    DateWindow,
    Granularity,
};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// The Cost Explorer name of the S3 service.
pub const S3_SERVICE: &str = "Amazon Simple Storage Service";

/// How usage type costs from different months are combined.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BreakdownMode {
    /// The latest month with a cost for a usage type replaces any earlier
    /// month.
    #[default]
    Overwrite,

    /// Costs for a usage type are summed over all months.
    Accumulate,
}

/// This converts from the string arguments we receive on the command line to
/// our enum type.
impl FromStr for BreakdownMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite"  => Ok(Self::Overwrite),
            "accumulate" => Ok(Self::Accumulate),
            _            => Err("no match"),
        }
    }
}

/// Cost per usage type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageBreakdown(BTreeMap<String, f64>);

impl UsageBreakdown {
    /// Returns `true` if there are no usage types with a cost.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `(usage type, cost)` pairs, most expensive first.
    ///
    /// Usage types with equal costs are in name order.
    pub fn by_cost_descending(&self) -> Vec<(&str, f64)> {
        let mut costs: Vec<(&str, f64)> = self.0
            .iter()
            .map(|(usage_type, cost)| (usage_type.as_str(), *cost))
            .collect();

        costs.sort_by(|a, b| b.1.total_cmp(&a.1));

        costs
    }
}

/// Sums the amounts of the records for `service`.
pub fn total_cost(records: &[CostRecord], service: &str) -> f64 {
    records
        .iter()
        .filter(|record| record.key == service)
        .map(|record| record.amount)
        .sum()
}

/// Builds a `UsageBreakdown` from usage type records.
///
/// Records are applied in `period_start` order, so in `Overwrite` mode the
/// latest month wins whatever order the records arrive in. Records without a
/// positive amount are dropped and don't replace an earlier month's cost.
pub fn usage_breakdown(
    records: &[CostRecord],
    mode: BreakdownMode,
) -> UsageBreakdown {
    // Dates are YYYY-MM-DD so they sort as strings. The sort is stable,
    // records within a period keep their order.
    let mut ordered: Vec<&CostRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.period_start.cmp(&b.period_start));

    let mut costs = BTreeMap::new();

    for record in ordered {
        if record.amount <= 0.0 {
            continue;
        }

        match mode {
            BreakdownMode::Overwrite => {
                costs.insert(record.key.clone(), record.amount);
            },
            BreakdownMode::Accumulate => {
                *costs.entry(record.key.clone()).or_insert(0.0) += record.amount;
            },
        }
    }

    UsageBreakdown(costs)
}

/// `CostAggregator` reports S3 costs over a window of days.
pub struct CostAggregator<'a> {
    source: &'a dyn CostSource,
    window: DateWindow,
}

impl<'a> CostAggregator<'a> {
    /// Returns a new `CostAggregator` for the given `window`.
    pub fn new(source: &'a dyn CostSource, window: DateWindow) -> Self {
        Self {
            source,
            window,
        }
    }

    fn query(&self, group_by: CostDimension, granularity: Granularity) -> CostQuery {
        CostQuery {
            service: S3_SERVICE.into(),
            group_by,
            granularity,
            window: self.window,
        }
    }

    /// Returns the total S3 cost, from daily costs grouped by service.
    ///
    /// Errors are reported and result in a total of zero.
    pub async fn total(&self) -> f64 {
        match self.try_total().await {
            Ok(total) => total,
            Err(e) => {
                eprintln!("Error getting S3 costs: {:#}", e);

                0.0
            },
        }
    }

    async fn try_total(&self) -> Result<f64> {
        let query   = self.query(CostDimension::Service, Granularity::Daily);
        let records = self.source.cost_records(&query).await?;
        let total   = total_cost(&records, S3_SERVICE);

        debug!("total: {} from {} records", total, records.len());

        Ok(total)
    }

    /// Returns S3 costs per usage type, from monthly costs grouped by usage
    /// type.
    ///
    /// Errors are reported and result in an empty breakdown.
    pub async fn breakdown(&self, mode: BreakdownMode) -> UsageBreakdown {
        match self.try_breakdown(mode).await {
            Ok(breakdown) => breakdown,
            Err(e) => {
                eprintln!("Error getting detailed S3 costs: {:#}", e);

                UsageBreakdown::default()
            },
        }
    }

    async fn try_breakdown(&self, mode: BreakdownMode) -> Result<UsageBreakdown> {
        let query   = self.query(CostDimension::UsageType, Granularity::Monthly);
        let records = self.source.cost_records(&query).await?;

        debug!("breakdown: {} records, {:?}", records.len(), mode);

        Ok(usage_breakdown(&records, mode))
    }
}
