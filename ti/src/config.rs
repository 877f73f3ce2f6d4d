//! Target configuration types and loading
//!
//! The config file is the JSON object Singer runners pass with `--config`.

use eyre::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Main target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Intercom personal access token
    pub access_token: Option<String>,

    /// Stream whose records are pushed to Intercom as users
    pub users_stream: Option<String>,

    /// Reserved field name -> flattened source key, applied in file order
    pub reserved_field_overrides: ReservedFieldOverrides,

    /// Skip the anonymous usage ping at startup
    pub disable_collection: bool,

    /// Intercom API root
    pub api_base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Log level used when none is given on the command line
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            users_stream: None,
            reserved_field_overrides: ReservedFieldOverrides::default(),
            disable_collection: false,
            api_base_url: intercom::DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30_000,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from `config_path`, or defaults when no path is given
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path).context(format!("Failed to load config from {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Read only the log level, so logging can be set up before the full load
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let content = fs::read_to_string(config_path?).ok()?;
        let value: serde_json::Value = serde_json::from_str(&content).ok()?;
        value.get("log_level")?.as_str().map(str::to_string)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_json::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Ordered reserved-field overrides
///
/// Serialized as a JSON object; entry order is preserved because overrides may
/// depend on keys produced by earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedFieldOverrides(Vec<(String, String)>);

impl ReservedFieldOverrides {
    /// `(reserved_name, source_key)` pairs in configured order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for ReservedFieldOverrides {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for ReservedFieldOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for ReservedFieldOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OverridesVisitor;

        impl<'de> Visitor<'de> for OverridesVisitor {
            type Value = ReservedFieldOverrides;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of reserved field name to source key")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(ReservedFieldOverrides::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((reserved, source)) = map.next_entry::<String, String>()? {
                    pairs.push((reserved, source));
                }
                Ok(ReservedFieldOverrides(pairs))
            }
        }

        deserializer.deserialize_any(OverridesVisitor)
    }
}
