//! target-intercom - Singer target for Intercom
//!
//! Reads messages from stdin, writes the final state to stdout.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, error, info, warn};

use intercom::IntercomClient;
use target_intercom::cli::Cli;
use target_intercom::config::Config;
use target_intercom::pipeline::{Pipeline, TargetContext};
use target_intercom::{MessageReader, emit_state, telemetry};

fn parse_level(level: &str) -> tracing::Level {
    match level.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" | "CRITICAL" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", level);
            tracing::Level::INFO
        }
    }
}

/// Logs go to stderr; stdout carries state only
fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) {
    let level = cli_log_level
        .or(config_log_level)
        .map(parse_level)
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!(?level, "Logging initialized");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref());

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    if !config.disable_collection {
        info!(
            "Sending version information to stitchdata.com. To disable sending anonymous usage data, \
             set the config parameter \"disable_collection\" to true"
        );
        telemetry::spawn_usage_report(env!("CARGO_PKG_VERSION"));
    }

    if config.access_token.is_none() && config.users_stream.is_some() {
        warn!("No access_token configured; Intercom will reject submissions");
    }

    let client = IntercomClient::new(
        config.access_token.clone().unwrap_or_default(),
        &config.api_base_url,
        Duration::from_millis(config.timeout_ms),
    )
    .context("Failed to create Intercom client")?;

    let ctx = TargetContext::new(config, Arc::new(client));
    let pipeline = Pipeline::new(&ctx);

    let messages = MessageReader::new(io::stdin().lock());
    let state = match pipeline.run(messages).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Run aborted");
            return Err(e).context("Failed to process input");
        }
    };

    emit_state(&mut io::stdout().lock(), state.as_ref()).context("Failed to emit state")?;
    debug!("Exiting normally");
    Ok(())
}
