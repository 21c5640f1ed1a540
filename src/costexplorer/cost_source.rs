// Implements the CostSource trait for Cost Explorer Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    CostQuery,
    CostRecord,
    CostSource,
};
use super::client::{
    cost_records,
    Client,
    COST_METRIC,
};
use tracing::debug;

#[async_trait]
impl CostSource for Client {
    /// Run `query` against Cost Explorer, returning `BlendedCost` records.
    async fn cost_records(&self, query: &CostQuery) -> Result<Vec<CostRecord>> {
        let results = self.get_cost_and_usage(query).await?;
        let records = cost_records(&results, COST_METRIC)?;

        debug!("cost_records: {} records for {:?}", records.len(), query);

        Ok(records)
    }
}
