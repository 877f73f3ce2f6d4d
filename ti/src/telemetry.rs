//! Anonymous usage ping
//!
//! A single GET to the Singer collector, fired once at startup on a detached
//! task. Nothing waits on it and every failure is swallowed.

use std::time::Duration;
use tracing::debug;

pub const COLLECTOR_URL: &str = "https://collector.stitchdata.com/i";

const COLLECTOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Query parameters identifying this target and its version
pub fn usage_params(version: &str) -> [(&'static str, String); 5] {
    [
        ("e", "se".to_string()),
        ("aid", "singer".to_string()),
        ("se_ca", "target-intercom".to_string()),
        ("se_ac", "open".to_string()),
        ("se_la", version.to_string()),
    ]
}

/// Spawn the usage ping; must be called from within a tokio runtime
pub fn spawn_usage_report(version: &'static str) {
    tokio::spawn(async move {
        if let Err(e) = send_usage_stats(version).await {
            debug!(error = %e, "Collection request failed");
        }
    });
}

async fn send_usage_stats(version: &str) -> Result<(), reqwest::Error> {
    let client = reqwest::Client::builder().timeout(COLLECTOR_TIMEOUT).build()?;
    let response = client
        .get(COLLECTOR_URL)
        .query(&usage_params(version))
        .send()
        .await?;
    debug!(status = response.status().as_u16(), "Collection request sent");
    Ok(())
}
