// Imports all of the components needed for cloudwatch::client
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// CloudWatch `Client`.
mod client;

/// Implementation of the `TierMetrics` trait for our CloudWatch `Client`.
mod tier_metrics;

pub use client::*;
