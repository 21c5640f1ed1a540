// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cost;
mod human_size;
mod provider;
mod region;
mod session;
mod storage_type;
mod tier_sizes;

pub use cost::*;
pub use human_size::*;
pub use provider::*;
pub use region::*;
pub use session::*;
pub use storage_type::*;
pub use tier_sizes::*;

/// Bucket names, as returned by `ListBuckets`.
pub type BucketNames = Vec<String>;
