// Implements the Cost Explorer Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_sdk_costexplorer::client::Client as CostExplorerClient;
use aws_sdk_costexplorer::types::{
    DateInterval,
    Dimension,
    DimensionValues,
    Expression,
    GroupDefinition,
    GroupDefinitionType,
    ResultByTime,
};
use crate::common::{
    CostQuery,
    CostRecord,
    Granularity,
};
use tracing::debug;

/// The cost metric that is requested and summed.
pub const COST_METRIC: &str = "BlendedCost";

/// The Cost Explorer `Client`.
pub struct Client {
    /// The AWS SDK `CostExplorerClient`.
    pub client: CostExplorerClient,
}

impl Client {
    /// Return a new Cost Explorer `Client` wrapping the given
    /// `CostExplorerClient`.
    pub fn new(client: CostExplorerClient) -> Self {
        Self {
            client,
        }
    }

    /// Returns the `ResultByTime` entries for `query`, following result
    /// pages until there are none left.
    pub async fn get_cost_and_usage(
        &self,
        query: &CostQuery,
    ) -> Result<Vec<ResultByTime>> {
        debug!("get_cost_and_usage: {:?}", query);

        let time_period = DateInterval::builder()
            .start(query.window.start_date())
            .end(query.window.end_date())
            .build()
            .context("Failed to build date interval")?;

        let granularity = match query.granularity {
            Granularity::Daily   => aws_sdk_costexplorer::types::Granularity::Daily,
            Granularity::Monthly => aws_sdk_costexplorer::types::Granularity::Monthly,
        };

        let filter = Expression::builder()
            .dimensions(
                DimensionValues::builder()
                    .key(Dimension::Service)
                    .values(query.service.clone())
                    .build(),
            )
            .build();

        let group_by = GroupDefinition::builder()
            .r#type(GroupDefinitionType::Dimension)
            .key(query.group_by.as_str())
            .build();

        let mut results    = Vec::new();
        let mut next_token = None;

        // We loop until we've processed everything.
        loop {
            let output = self.client.get_cost_and_usage()
                .time_period(time_period.clone())
                .granularity(granularity.clone())
                .filter(filter.clone())
                .group_by(group_by.clone())
                .metrics(COST_METRIC)
                .set_next_page_token(next_token)
                .send()
                .await
                .context("GetCostAndUsage")?;

            debug!("get_cost_and_usage: API returned: {:#?}", output);

            results.extend_from_slice(output.results_by_time());

            // If there was a next token, use it, otherwise the loop is done.
            match output.next_page_token() {
                Some(t) => next_token = Some(t.to_string()),
                None    => break,
            }
        }

        Ok(results)
    }
}

/// Flattens Cost Explorer results into one `CostRecord` per group per time
/// period, taking the amount of the `metric` cost metric.
///
/// Groups without a key or without the metric are skipped. Amounts that
/// aren't numbers are an error.
pub fn cost_records(
    results: &[ResultByTime],
    metric: &str,
) -> Result<Vec<CostRecord>> {
    let mut records = Vec::new();

    for result in results {
        let period_start = result.time_period()
            .map(|period| period.start())
            .unwrap_or_default();

        for group in result.groups() {
            let key = match group.keys().first() {
                Some(key) => key,
                None      => continue,
            };

            let amount = group.metrics()
                .and_then(|metrics| metrics.get(metric))
                .and_then(|value| value.amount());

            let amount = match amount {
                Some(amount) => amount,
                None         => continue,
            };

            let amount: f64 = amount.parse()
                .with_context(|| {
                    format!("Invalid {} amount '{}' for '{}'", metric, amount, key)
                })?;

            records.push(CostRecord::new(key, period_start, amount));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_costexplorer::operation::get_cost_and_usage::GetCostAndUsageOutput;
    use aws_sdk_costexplorer::types::{
        Granularity as CostExplorerGranularity,
        Group,
        MetricValue,
    };
    use aws_smithy_mocks::{
        mock,
        mock_client,
    };
    use chrono::NaiveDate;
    use crate::common::{
        CostDimension,
        DateWindow,
    };
    use pretty_assertions::assert_eq;

    const S3_SERVICE: &str = "Amazon Simple Storage Service";

    fn group(key: &str, amount: &str) -> Group {
        Group::builder()
            .keys(key)
            .metrics(
                COST_METRIC,
                MetricValue::builder()
                    .amount(amount)
                    .unit("USD")
                    .build(),
            )
            .build()
    }

    fn result_by_time(start: &str, end: &str, groups: Vec<Group>) -> ResultByTime {
        let period = DateInterval::builder()
            .start(start)
            .end(end)
            .build()
            .unwrap();

        ResultByTime::builder()
            .time_period(period)
            .set_groups(Some(groups))
            .estimated(false)
            .build()
    }

    #[test]
    fn test_cost_records() {
        let results = vec![
            result_by_time("2024-03-01", "2024-03-02", vec![
                group("Amazon Simple Storage Service", "10.00"),
            ]),
            result_by_time("2024-03-02", "2024-03-03", vec![
                group("Amazon Simple Storage Service", "5.5"),
            ]),
        ];

        let ret = cost_records(&results, COST_METRIC).unwrap();

        let expected = vec![
            CostRecord::new("Amazon Simple Storage Service", "2024-03-01", 10.0),
            CostRecord::new("Amazon Simple Storage Service", "2024-03-02", 5.5),
        ];

        assert_eq!(ret, expected);
    }

    #[test]
    fn test_cost_records_skips_other_metrics() {
        let unblended = Group::builder()
            .keys("EUW1-Requests-Tier1")
            .metrics(
                "UnblendedCost",
                MetricValue::builder().amount("1.00").build(),
            )
            .build();

        let results = vec![
            result_by_time("2024-03-01", "2024-04-01", vec![
                unblended,
                Group::builder().build(),
                group("EUW1-TimedStorage-ByteHrs", "0.0000012"),
            ]),
        ];

        let ret = cost_records(&results, COST_METRIC).unwrap();

        let expected = vec![
            CostRecord::new("EUW1-TimedStorage-ByteHrs", "2024-03-01", 0.0000012),
        ];

        assert_eq!(ret, expected);
    }

    #[test]
    fn test_cost_records_invalid_amount() {
        let results = vec![
            result_by_time("2024-03-01", "2024-04-01", vec![
                group("EUW1-TimedStorage-ByteHrs", "lots"),
            ]),
        ];

        let ret = cost_records(&results, COST_METRIC);

        assert!(ret.is_err());
    }

    #[tokio::test]
    async fn test_get_cost_and_usage() {
        let tests = vec![
            (
                Granularity::Daily,
                CostDimension::Service,
                CostExplorerGranularity::Daily,
                "SERVICE",
            ),
            (
                Granularity::Monthly,
                CostDimension::UsageType,
                CostExplorerGranularity::Monthly,
                "USAGE_TYPE",
            ),
        ];

        for test in tests {
            let granularity          = test.0;
            let group_by             = test.1;
            let expected_granularity = test.2;
            let expected_group_by    = test.3;

            let end = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

            let query = CostQuery {
                service: S3_SERVICE.into(),
                group_by,
                granularity,
                window:  DateWindow::ending_at(end, 30),
            };

            let rule = mock!(CostExplorerClient::get_cost_and_usage)
                .match_requests(move |req| {
                    let period = req.time_period()
                        .map(|period| (period.start(), period.end()));

                    let service = req.filter()
                        .and_then(|filter| filter.dimensions())
                        .map(|dimension| (dimension.key(), dimension.values().to_vec()));

                    let groups: Vec<(Option<&GroupDefinitionType>, Option<&str>)> = req
                        .group_by()
                        .iter()
                        .map(|group| (group.r#type(), group.key()))
                        .collect();

                    period == Some(("2024-02-14", "2024-03-15"))
                        && req.granularity() == Some(&expected_granularity)
                        && req.metrics().to_vec() == vec![COST_METRIC.to_string()]
                        && service == Some((
                            Some(&Dimension::Service),
                            vec![S3_SERVICE.to_string()],
                        ))
                        && groups == vec![(
                            Some(&GroupDefinitionType::Dimension),
                            Some(expected_group_by),
                        )]
                        && matches!(req.next_page_token(), None | Some("page-2"))
                })
                .sequence()
                .output(|| {
                    GetCostAndUsageOutput::builder()
                        .results_by_time(result_by_time("2024-02-14", "2024-02-15", vec![
                            group("EUW1-TimedStorage-ByteHrs", "1.25"),
                        ]))
                        .next_page_token("page-2")
                        .build()
                })
                .output(|| {
                    GetCostAndUsageOutput::builder()
                        .results_by_time(result_by_time("2024-02-15", "2024-02-16", vec![
                            group("EUW1-Requests-Tier1", "0.50"),
                        ]))
                        .build()
                })
                .build();

            let client = Client::new(mock_client!(aws_sdk_costexplorer, [&rule]));

            let ret = client.get_cost_and_usage(&query).await.unwrap();
            let ret = cost_records(&ret, COST_METRIC).unwrap();

            let expected = vec![
                CostRecord::new("EUW1-TimedStorage-ByteHrs", "2024-02-14", 1.25),
                CostRecord::new("EUW1-Requests-Tier1", "2024-02-15", 0.50),
            ];

            assert_eq!(ret, expected);
            assert_eq!(rule.num_calls(), 2);
        }
    }
}
