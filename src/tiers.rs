// Storage tier resolution for buckets
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    BucketCatalog,
    Region,
    RegionalClients,
    StorageType,
    TierSizes,
};
use tracing::debug;

/// `TierResolver` works out how much data a bucket holds in each storage
/// tier.
///
/// CloudWatch metrics in the bucket's own region are used where they exist.
/// Buckets without metrics are sized by listing their objects, with the
/// total reported under `StorageType::FALLBACK`.
pub struct TierResolver<'a> {
    catalog: &'a dyn BucketCatalog,
    clients: &'a dyn RegionalClients,
}

impl<'a> TierResolver<'a> {
    /// Returns a new `TierResolver`.
    pub fn new(
        catalog: &'a dyn BucketCatalog,
        clients: &'a dyn RegionalClients,
    ) -> Self {
        Self {
            catalog,
            clients,
        }
    }

    /// Returns the `Region` of `bucket`, or the default region if the
    /// location can't be looked up.
    pub async fn bucket_region(&self, bucket: &str) -> Region {
        match self.catalog.bucket_region(bucket).await {
            Ok(region) => region,
            Err(e) => {
                debug!(
                    "bucket_region: Using default region for '{}': {:#}",
                    bucket,
                    e,
                );

                Region::default_region()
            },
        }
    }

    /// Returns the storage tier sizes of `bucket`.
    ///
    /// Errors are reported and result in empty `TierSizes`, so that one
    /// bucket can't prevent others from being reported.
    pub async fn resolve(&self, bucket: &str) -> TierSizes {
        match self.try_resolve(bucket).await {
            Ok(sizes) => sizes,
            Err(e) => {
                eprintln!("Error getting storage tiers for {}: {:#}", bucket, e);

                TierSizes::new()
            },
        }
    }

    async fn try_resolve(&self, bucket: &str) -> Result<TierSizes> {
        let region = self.bucket_region(bucket).await;

        debug!("resolve: '{}' is in '{}'", bucket, region.name());

        let metrics   = self.clients.tier_metrics(&region);
        let mut sizes = TierSizes::new();

        for storage_type in StorageType::ALL {
            // A failure for one storage type doesn't stop us looking at the
            // others.
            match metrics.tier_size(bucket, storage_type).await {
                Ok(Some(size)) => sizes.insert(storage_type, size),
                Ok(None)       => {},
                Err(e)         => {
                    debug!(
                        "resolve: Skipping {} for '{}': {:#}",
                        storage_type,
                        bucket,
                        e,
                    );
                },
            }
        }

        if sizes.is_empty() {
            debug!("resolve: No metrics for '{}', listing objects", bucket);

            let sizer = self.clients.object_sizer(&region);
            let size  = sizer.size_objects(bucket).await?;

            sizes.insert(StorageType::FALLBACK, size);
        }

        debug!("resolve: '{}' has {} tiers: {:?}", bucket, sizes.len(), sizes);

        Ok(sizes)
    }
}
