//! Intercom bulk API client
//!
//! The [`BulkClient`] trait is the only surface callers depend on; the
//! reqwest-backed [`IntercomClient`] is the production implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::{BULK_USERS_PATH, BulkJobRequest, IntercomError, Job};

/// Submits batches of user "create" items and reports the resulting job
#[async_trait]
pub trait BulkClient: Send + Sync {
    /// Submit one bulk job containing every item in `create_items`
    async fn submit_bulk_job(&self, create_items: Vec<Map<String, Value>>) -> Result<Job, IntercomError>;
}

/// Intercom REST client authenticated with a personal access token
pub struct IntercomClient {
    access_token: String,
    base_url: String,
    http: Client,
}

impl IntercomClient {
    pub fn new(access_token: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self, IntercomError> {
        debug!(%base_url, ?timeout, "IntercomClient::new: called");
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            access_token: access_token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Full URL of the bulk users endpoint
    pub fn bulk_users_url(&self) -> String {
        format!("{}{}", self.base_url, BULK_USERS_PATH)
    }
}

#[async_trait]
impl BulkClient for IntercomClient {
    async fn submit_bulk_job(&self, create_items: Vec<Map<String, Value>>) -> Result<Job, IntercomError> {
        debug!(item_count = create_items.len(), "submit_bulk_job: called");
        let body = BulkJobRequest::create_users(create_items);

        let response = self
            .http
            .post(self.bulk_users_url())
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "submit_bulk_job: API error");
            return Err(IntercomError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let job: Job = serde_json::from_str(&text)
            .map_err(|e| IntercomError::InvalidResponse(format!("unexpected job payload ({e}): {text}")))?;

        debug!(job_id = %job.id, "submit_bulk_job: success");
        Ok(job)
    }
}
