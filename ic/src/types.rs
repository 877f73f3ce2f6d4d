//! Wire types for the bulk API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One operation inside a bulk job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItem {
    pub method: String,
    pub data_type: String,
    pub data: Map<String, Value>,
}

impl BulkItem {
    /// A user "create" operation
    pub fn create_user(data: Map<String, Value>) -> Self {
        Self {
            method: "post".to_string(),
            data_type: "user".to_string(),
            data,
        }
    }
}

/// Request body for `POST /bulk/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkJobRequest {
    pub items: Vec<BulkItem>,
}

impl BulkJobRequest {
    pub fn create_users(create_items: Vec<Map<String, Value>>) -> Self {
        Self {
            items: create_items.into_iter().map(BulkItem::create_user).collect(),
        }
    }
}

/// Links returned with a job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLinks {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// Bulk job as reported by Intercom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,

    #[serde(default)]
    pub app_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub updated_at: Option<i64>,

    #[serde(default)]
    pub links: JobLinks,
}
