// Implements the S3 Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_sdk_s3::client::Client as S3Client;
use crate::common::{
    BucketNames,
    Region,
};
use super::bucket_list::BucketList;
use tracing::debug;

/// The S3 `Client`.
pub struct Client {
    /// The AWS SDK `S3Client`.
    pub client: S3Client,
}

impl Client {
    /// Return a new S3 `Client` wrapping the given `S3Client`.
    pub fn new(client: S3Client) -> Self {
        Self {
            client,
        }
    }

    /// Returns a list of bucket names.
    pub async fn list_buckets(&self) -> Result<BucketNames> {
        debug!("list_buckets: Listing...");

        let mut bucket_names       = BucketNames::new();
        let mut continuation_token = None;

        loop {
            let output = self.client.list_buckets()
                .set_continuation_token(continuation_token)
                .send()
                .await
                .context("ListBuckets")?;

            continuation_token = output.continuation_token()
                .map(|token| token.to_string());

            let bucket_list: BucketList = output.into();
            bucket_names.extend_from_slice(bucket_list.bucket_names());

            if continuation_token.is_none() {
                break;
            }
        }

        debug!("list_buckets: Found {} buckets", bucket_names.len());

        Ok(bucket_names)
    }

    /// Return the bucket location (`Region`) for the given `bucket`.
    ///
    /// This method will properly handle the case of the `null` (empty) and
    /// `EU` location constraints, by replacing them with `us-east-1` and
    /// `eu-west-1` respectively.
    pub async fn get_bucket_location(&self, bucket: &str) -> Result<Region> {
        debug!("get_bucket_location for '{}'", bucket);

        let output = self.client.get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .with_context(|| format!("GetBucketLocation for {}", bucket))?;

        let location = output.location_constraint()
            .map(|constraint| constraint.as_str());

        debug!("GetBucketLocation API returned '{:?}'", location);

        Ok(Region::from_location_constraint(location))
    }

    /// Return the size of current objects in the bucket.
    pub async fn size_objects(&self, bucket: &str) -> Result<u64> {
        debug!("size_objects for '{}'", bucket);

        let mut continuation_token = None;
        let mut size               = 0;

        // Loop until all objects are processed.
        loop {
            let output = self.client.list_objects_v2()
                .bucket(bucket)
                .set_continuation_token(continuation_token)
                .send()
                .await
                .with_context(|| format!("ListObjectsV2 for {}", bucket))?;

            // Process the contents and add up the sizes
            size += output.contents()
                .iter()
                .filter_map(|object| object.size())
                .map(|size| u64::try_from(size).unwrap_or(0))
                .sum::<u64>();

            // If the output was truncated (Some(true)), we should have a
            // next_continuation_token.
            // If it wasn't, (Some(false) | None) we're done and can break.
            match output.is_truncated() {
                Some(true) => {
                    let nct = output.next_continuation_token()
                        .map(|token| token.to_string());

                    continuation_token = nct;
                },
                _ => break,
            }

            if continuation_token.is_none() {
                break;
            }
        }

        debug!("size_objects: size for '{}' is '{}'", bucket, size);

        Ok(size)
    }
}
