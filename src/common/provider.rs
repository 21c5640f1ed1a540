// Traits implemented by the AWS service clients
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::{
    BucketNames,
    CostQuery,
    CostRecord,
    Region,
    StorageType,
};

/// `BucketCatalog` lists the S3 buckets in the account and where they live.
#[async_trait]
pub trait BucketCatalog: Send + Sync {
    /// Returns a list of bucket names.
    async fn buckets(&self) -> Result<BucketNames>;

    /// Returns the `Region` that `bucket` lives in.
    async fn bucket_region(&self, bucket: &str) -> Result<Region>;
}

/// `TierMetrics` looks up published storage metrics for a bucket.
#[async_trait]
pub trait TierMetrics: Send + Sync {
    /// Returns the latest daily average size, in bytes, of the data stored
    /// under `storage_type` in `bucket`, or `None` if no datapoint exists.
    async fn tier_size(
        &self,
        bucket: &str,
        storage_type: StorageType,
    ) -> Result<Option<u64>>;
}

/// `ObjectSizer` sizes a bucket by walking its objects.
#[async_trait]
pub trait ObjectSizer: Send + Sync {
    /// Returns the sum of the sizes of the current objects in `bucket`.
    async fn size_objects(&self, bucket: &str) -> Result<u64>;
}

/// `RegionalClients` creates service clients bound to a given `Region`.
///
/// Bucket metrics are only published in the bucket's own region, so a new
/// client is created per bucket rather than sharing one.
pub trait RegionalClients {
    /// Returns a `TierMetrics` for buckets in `region`.
    fn tier_metrics(&self, region: &Region) -> Box<dyn TierMetrics + '_>;

    /// Returns an `ObjectSizer` for buckets in `region`.
    fn object_sizer(&self, region: &Region) -> Box<dyn ObjectSizer + '_>;
}

/// `CostSource` runs cost and usage queries.
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Returns every record matching `query`.
    async fn cost_records(&self, query: &CostQuery) -> Result<Vec<CostRecord>>;
}
