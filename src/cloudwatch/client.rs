// Implement the CloudWatch Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_sdk_cloudwatch::client::Client as CloudWatchClient;
use aws_sdk_cloudwatch::operation::get_metric_statistics::GetMetricStatisticsOutput;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{
    Datapoint,
    Dimension,
    StandardUnit,
    Statistic,
};
use crate::common::StorageType;
use std::time::{
    Duration,
    SystemTime,
};
use tracing::debug;

const ONE_DAY: Duration = Duration::from_secs(86_400);

// S3 storage metrics are published once a day, looking back two days
// ensures that there's at least one datapoint.
const LOOKBACK_DAYS: u32 = 2;

/// A `CloudWatch` `Client`
pub struct Client {
    /// The AWS SDK `CloudWatchClient`.
    pub client: CloudWatchClient,
}

impl Client {
    /// Return a new `Client` wrapping the given `CloudWatchClient`.
    pub fn new(client: CloudWatchClient) -> Self {
        Self {
            client,
        }
    }

    /// Returns the `BucketSizeBytes` daily averages for `storage_type` in
    /// `bucket` over the last two days.
    pub async fn get_metric_statistics(
        &self,
        bucket: &str,
        storage_type: StorageType,
    ) -> Result<GetMetricStatisticsOutput> {
        debug!(
            "get_metric_statistics: Processing '{}' {}",
            bucket,
            storage_type,
        );

        let now = SystemTime::now();
        let start_time = DateTime::from(now - (ONE_DAY * LOOKBACK_DAYS));

        let period = i32::try_from(ONE_DAY.as_secs())
            .context("period")?;

        let dimensions = vec![
            Dimension::builder()
                .name("BucketName")
                .value(bucket)
                .build(),
            Dimension::builder()
                .name("StorageType")
                .value(storage_type.as_str())
                .build(),
        ];

        let input = self.client.get_metric_statistics()
            .end_time(DateTime::from(now))
            .metric_name("BucketSizeBytes")
            .namespace("AWS/S3")
            .period(period)
            .set_dimensions(Some(dimensions))
            .start_time(start_time)
            .statistics(Statistic::Average)
            .unit(StandardUnit::Bytes);

        debug!("{:?}", input);

        let output = input
            .send()
            .await
            .with_context(|| {
                format!("GetMetricStatistics for {} {}", bucket, storage_type)
            })?;

        Ok(output)
    }
}

/// Returns the `Average` of the most recent datapoint.
///
/// We don't know which order datapoints will be in if we get more than a
/// single datapoint, so the latest is found by timestamp.
pub fn latest_average(datapoints: &[Datapoint]) -> Option<f64> {
    datapoints
        .iter()
        .filter(|datapoint| datapoint.average().is_some())
        .max_by_key(|datapoint| {
            datapoint.timestamp().map(|t| (t.secs(), t.subsec_nanos()))
        })
        .and_then(|datapoint| datapoint.average())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_mocks::{
        mock,
        mock_client,
    };
    use pretty_assertions::assert_eq;

    fn datapoint(secs: i64, average: f64) -> Datapoint {
        Datapoint::builder()
            .average(average)
            .timestamp(DateTime::from_secs(secs))
            .unit(StandardUnit::Bytes)
            .build()
    }

    #[test]
    fn test_latest_average() {
        let datapoints = vec![
            datapoint(1_583_020_800, 1024.0),
            datapoint(1_583_107_200, 4096.0),
            datapoint(1_582_934_400, 512.0),
        ];

        let ret = latest_average(&datapoints);

        assert_eq!(ret, Some(4096.0));
    }

    #[test]
    fn test_latest_average_skips_missing_average() {
        let datapoints = vec![
            datapoint(1_583_020_800, 123_456_789.0),
            Datapoint::builder()
                .timestamp(DateTime::from_secs(1_583_107_200))
                .build(),
        ];

        let ret = latest_average(&datapoints);

        assert_eq!(ret, Some(123_456_789.0));
    }

    #[test]
    fn test_latest_average_empty() {
        let ret = latest_average(&[]);

        assert_eq!(ret, None);
    }

    #[tokio::test]
    async fn test_get_metric_statistics() {
        let rule = mock!(CloudWatchClient::get_metric_statistics)
            .match_requests(|req| {
                let dimensions: Vec<(Option<&str>, Option<&str>)> = req
                    .dimensions()
                    .iter()
                    .map(|dimension| (dimension.name(), dimension.value()))
                    .collect();

                let window = match (req.start_time(), req.end_time()) {
                    (Some(start), Some(end)) => end.secs() - start.secs(),
                    _                        => 0,
                };

                req.namespace() == Some("AWS/S3")
                    && req.metric_name() == Some("BucketSizeBytes")
                    && req.period() == Some(86_400)
                    && req.statistics().to_vec() == vec![Statistic::Average]
                    && req.unit() == Some(&StandardUnit::Bytes)
                    && window == 2 * 86_400
                    && dimensions == vec![
                        (Some("BucketName"), Some("a-bucket")),
                        (Some("StorageType"), Some("GlacierStorage")),
                    ]
            })
            .then_output(|| {
                GetMetricStatisticsOutput::builder()
                    .label("BucketSizeBytes")
                    .datapoints(datapoint(1_583_020_800, 123_456_789.0))
                    .build()
            });

        let client = Client::new(mock_client!(aws_sdk_cloudwatch, [&rule]));

        let ret = client.get_metric_statistics("a-bucket", StorageType::Glacier)
            .await
            .unwrap();

        assert_eq!(ret.label(), Some("BucketSizeBytes"));
        assert_eq!(latest_average(ret.datapoints()), Some(123_456_789.0));
        assert_eq!(rule.num_calls(), 1);
    }
}
