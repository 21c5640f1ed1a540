// Imports all of the components needed for costexplorer::client
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Cost Explorer `Client`.
mod client;

/// Implementation of the `CostSource` trait for our Cost Explorer `Client`.
mod cost_source;

pub use client::*;
