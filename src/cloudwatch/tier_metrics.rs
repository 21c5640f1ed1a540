// Implements the TierMetrics trait for CloudWatch Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    StorageType,
    TierMetrics,
};
use super::client::{
    latest_average,
    Client,
};
use tracing::debug;

#[async_trait]
impl TierMetrics for Client {
    /// Get the size of `storage_type` data in `bucket` from the most recent
    /// `BucketSizeBytes` datapoint.
    async fn tier_size(
        &self,
        bucket: &str,
        storage_type: StorageType,
    ) -> Result<Option<u64>> {
        let stats = self.get_metric_statistics(bucket, storage_type).await?;

        // Round up so that a tier holding less than a byte on average still
        // counts as present.
        let size = latest_average(stats.datapoints())
            .map(|bytes| bytes.ceil() as u64);

        debug!(
            "tier_size: '{}' {} is {:?}",
            bucket,
            storage_type,
            size,
        );

        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cloudwatch::client::Client as CloudWatchClient;
    use aws_sdk_cloudwatch::operation::get_metric_statistics::GetMetricStatisticsOutput;
    use aws_sdk_cloudwatch::primitives::DateTime;
    use aws_sdk_cloudwatch::types::Datapoint;
    use aws_smithy_mocks::{
        mock,
        mock_client,
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_tier_size() {
        let tests = vec![
            (Some(1_073_741_824.0), Some(1_073_741_824)),
            (Some(1536.25),         Some(1537)),
            (Some(0.4),             Some(1)),
            (Some(0.0),             Some(0)),
            (None,                  None),
        ];

        for test in tests {
            let average  = test.0;
            let expected = test.1;

            let rule = mock!(CloudWatchClient::get_metric_statistics)
                .then_output(move || {
                    let datapoints = average.map(|average| {
                        vec![
                            Datapoint::builder()
                                .average(average)
                                .timestamp(DateTime::from_secs(1_583_020_800))
                                .build(),
                        ]
                    });

                    GetMetricStatisticsOutput::builder()
                        .label("BucketSizeBytes")
                        .set_datapoints(datapoints)
                        .build()
                });

            let client = Client::new(mock_client!(aws_sdk_cloudwatch, [&rule]));

            let ret = client.tier_size("a-bucket", StorageType::Standard)
                .await
                .unwrap();

            assert_eq!(ret, expected);
        }
    }
}
