// Implement the BucketCatalog and ObjectSizer traits for the s3::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    BucketCatalog,
    BucketNames,
    ObjectSizer,
    Region,
};
use super::client::Client;

#[async_trait]
impl BucketCatalog for Client {
    /// Return the names of all buckets in the account.
    async fn buckets(&self) -> Result<BucketNames> {
        self.list_buckets().await
    }

    /// Return the `Region` of `bucket`.
    async fn bucket_region(&self, bucket: &str) -> Result<Region> {
        self.get_bucket_location(bucket).await
    }
}

#[async_trait]
impl ObjectSizer for Client {
    /// Return the size of `bucket` by listing its objects.
    async fn size_objects(&self, bucket: &str) -> Result<u64> {
        Client::size_objects(self, bucket).await
    }
}
