//! Intercom client - bulk user submission
//!
//! A deliberately small slice of the Intercom REST API: enough to hand a batch
//! of user "create" items to the bulk endpoint and get a job back.
//!
//! # Example
//!
//! ```ignore
//! use intercom::{BulkClient, IntercomClient};
//!
//! let client = IntercomClient::new("token", intercom::DEFAULT_BASE_URL, Duration::from_secs(30))?;
//! let job = client.submit_bulk_job(vec![item]).await?;
//! println!("{}", job.id);
//! ```

mod client;
mod error;
mod types;

pub use client::{BulkClient, IntercomClient};
pub use error::IntercomError;
pub use types::{BulkItem, BulkJobRequest, Job, JobLinks};

/// Default Intercom API root
pub const DEFAULT_BASE_URL: &str = "https://api.intercom.io";

/// Bulk endpoint for user operations, relative to the API root
pub const BULK_USERS_PATH: &str = "/bulk/users";
