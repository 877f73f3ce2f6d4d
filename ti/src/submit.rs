//! Hands transformed records to Intercom, one bulk job per record

use intercom::BulkClient;
use std::sync::Arc;
use tracing::info;

use crate::TargetError;
use crate::transform::TargetItem;

pub struct BatchSubmitter {
    client: Arc<dyn BulkClient>,
}

impl BatchSubmitter {
    pub fn new(client: Arc<dyn BulkClient>) -> Self {
        Self { client }
    }

    /// Submit `item` as a singleton create batch and return the job id
    pub async fn submit(&self, item: TargetItem) -> Result<String, TargetError> {
        info!(attributes = %serde_json::Value::from(item.clone()), "Core attributes");
        let job = self.client.submit_bulk_job(vec![item.into_inner()]).await?;
        info!(job_id = %job.id, state = ?job.state, "Bulk job submitted");
        Ok(job.id)
    }
}
