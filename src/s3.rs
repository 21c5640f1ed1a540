// Imports all of the components needed for s3::client
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Implementation of the `BucketCatalog` and `ObjectSizer` traits for our S3
/// `Client`.
mod bucket_catalog;

/// Conversion of `ListBuckets` output into bucket names.
mod bucket_list;

/// S3 `Client`.
mod client;

pub use client::*;
