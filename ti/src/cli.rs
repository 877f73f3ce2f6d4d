//! CLI argument parsing for target-intercom

use clap::Parser;
use std::path::PathBuf;

/// Reads Singer messages on stdin and pushes user records to Intercom
#[derive(Parser, Debug)]
#[command(name = "target-intercom")]
#[command(author, version, about = "Singer target for pushing data to Intercom", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["target-intercom"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_short_config() {
        let cli = Cli::try_parse_from(["target-intercom", "-c", "config.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
    }

    #[test]
    fn test_long_options() {
        let cli = Cli::try_parse_from(["target-intercom", "--config", "c.json", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["target-intercom", "extra"]).is_err());
    }
}
