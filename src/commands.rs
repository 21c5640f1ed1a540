// The s3cost commands
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// `bucket-details`: storage tiers of a single bucket.
pub mod bucket_details;

/// `buckets`: storage tiers of every bucket in the account.
pub mod buckets;

/// `costs`: S3 costs over a number of days.
pub mod costs;
