// Session
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Context,
    Result,
};
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_cloudwatch::client::Client as CloudWatchClient;
use aws_sdk_costexplorer::client::Client as CostExplorerClient;
use aws_sdk_s3::client::Client as S3Client;
use aws_types::SdkConfig;
use crate::{
    cloudwatch,
    s3,
};
use super::{
    ObjectSizer,
    Region,
    RegionalClients,
    TierMetrics,
};
use tracing::debug;

/// Cost Explorer is only served from `us-east-1`.
const COST_EXPLORER_REGION: &str = "us-east-1";

/// Shared AWS configuration with verified credentials.
///
/// Service clients are created on demand from the shared configuration,
/// bound to whichever region they're needed in.
#[derive(Debug)]
pub struct Session {
    config: SdkConfig,
    region: Region,
}

impl Session {
    /// Loads the ambient AWS configuration and checks that credentials can be
    /// resolved.
    ///
    /// If `region` isn't set, the region from the environment or profile is
    /// used, falling back to `us-east-1`.
    pub async fn load(region: Region) -> Result<Self> {
        debug!("load: Loading AWS config for region '{}'", region.name());

        let loader = aws_config::defaults(BehaviorVersion::latest());

        let loader = if region.is_set() {
            loader.region(region)
        }
        else {
            loader
        };

        let config = loader.load().await;

        Self::from_sdk_config(config).await
    }

    /// Returns a `Session` for an already loaded `SdkConfig`.
    ///
    /// This fails if the configuration can't provide credentials, before any
    /// request is made to AWS.
    pub async fn from_sdk_config(config: SdkConfig) -> Result<Self> {
        let provider = config.credentials_provider()
            .ok_or_else(|| anyhow!("no credentials provider configured"))?;

        provider.provide_credentials()
            .await
            .context("failed to resolve AWS credentials")?;

        let region = match config.region() {
            Some(region) => Region::default().set_region(region.as_ref()),
            None         => Region::default_region(),
        };

        debug!("from_sdk_config: Session region is '{}'", region.name());

        Ok(Self {
            config,
            region,
        })
    }

    /// The region of the session, used for account wide S3 calls.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Returns an S3 client in `region`.
    pub fn s3(&self, region: &Region) -> S3Client {
        debug!("s3: Creating S3Client in region '{}'", region.name());

        let config = aws_sdk_s3::config::Builder::from(&self.config)
            .region(region.to_sdk())
            .build();

        S3Client::from_conf(config)
    }

    /// Returns a CloudWatch client in `region`.
    pub fn cloudwatch(&self, region: &Region) -> CloudWatchClient {
        debug!(
            "cloudwatch: Creating CloudWatchClient in region '{}'",
            region.name(),
        );

        let config = aws_sdk_cloudwatch::config::Builder::from(&self.config)
            .region(region.to_sdk())
            .build();

        CloudWatchClient::from_conf(config)
    }

    /// Returns a Cost Explorer client.
    pub fn cost_explorer(&self) -> CostExplorerClient {
        let region = Region::default().set_region(COST_EXPLORER_REGION);

        debug!(
            "cost_explorer: Creating CostExplorerClient in region '{}'",
            region.name(),
        );

        let config = aws_sdk_costexplorer::config::Builder::from(&self.config)
            .region(region.to_sdk())
            .build();

        CostExplorerClient::from_conf(config)
    }
}

impl RegionalClients for Session {
    fn tier_metrics(&self, region: &Region) -> Box<dyn TierMetrics + '_> {
        Box::new(cloudwatch::Client::new(self.cloudwatch(region)))
    }

    fn object_sizer(&self, region: &Region) -> Box<dyn ObjectSizer + '_> {
        Box::new(s3::Client::new(self.s3(region)))
    }
}
