// Cost query and record types
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    Days,
    Local,
    NaiveDate,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time bucket size of a cost query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Granularity {
    /// One result per day.
    Daily,
    /// One result per calendar month.
    Monthly,
}

/// Dimension that cost results are grouped by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CostDimension {
    /// Group by service name, eg. `Amazon Simple Storage Service`.
    Service,
    /// Group by usage type, eg. `EUW1-TimedStorage-ByteHrs`.
    UsageType,
}

impl CostDimension {
    /// Returns the Cost Explorer dimension key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service   => "SERVICE",
            Self::UsageType => "USAGE_TYPE",
        }
    }
}

/// A range of calendar days, `start` inclusive and `end` exclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateWindow {
    /// First day in the window.
    pub start: NaiveDate,
    /// Day after the last day in the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Returns the window covering the `days` days before today.
    pub fn trailing_days(days: u32) -> Self {
        let today = Local::now().date_naive();

        Self::ending_at(today, days)
    }

    /// Returns the window covering the `days` days before `end`.
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        Self {
            start,
            end,
        }
    }

    /// `start` formatted as `YYYY-MM-DD`.
    pub fn start_date(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// `end` formatted as `YYYY-MM-DD`.
    pub fn end_date(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// A cost and usage query for a single service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CostQuery {
    /// Service that costs are filtered for.
    pub service: String,
    /// Dimension that results are grouped by.
    pub group_by: CostDimension,
    /// Size of the time buckets.
    pub granularity: Granularity,
    /// Period covered by the query.
    pub window: DateWindow,
}

/// The cost of one group within one time bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct CostRecord {
    /// Value of the grouping dimension, eg. the service name or usage type.
    pub key: String,
    /// First day of the time bucket, `YYYY-MM-DD`.
    pub period_start: String,
    /// Cost in the account currency.
    pub amount: f64,
}

impl CostRecord {
    /// Returns a new `CostRecord`.
    pub fn new(key: &str, period_start: &str, amount: f64) -> Self {
        Self {
            key:          key.into(),
            period_start: period_start.into(),
            amount,
        }
    }
}
