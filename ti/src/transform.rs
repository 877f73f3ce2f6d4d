//! Record reshaping into Intercom user items
//!
//! A record is flattened (`{"a": {"b": 1}}` becomes `{"a__b": 1}`), configured
//! overrides move source keys onto reserved names, and every non-reserved field
//! is nested under `custom_attributes`.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::TargetError;
use crate::config::{Config, ReservedFieldOverrides};

/// Separator joining parent and child keys while flattening
pub const FLATTEN_SEPARATOR: &str = "__";

/// Fields Intercom treats as user identity or contact data
pub const RESERVED_FIELDS: [&str; 5] = ["id", "user_id", "name", "email", "phone"];

/// Key under which non-reserved fields are submitted
pub const CUSTOM_ATTRIBUTES: &str = "custom_attributes";

pub fn is_reserved(field: &str) -> bool {
    RESERVED_FIELDS.contains(&field)
}

/// Flatten nested objects into a single level
///
/// Arrays are stored as their compact JSON encoding. An empty nested object
/// contributes no keys. If two paths join to the same key the later one wins.
pub fn flatten(record: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    flatten_into(&mut flat, record, None);
    flat
}

fn flatten_into(flat: &mut Map<String, Value>, record: &Map<String, Value>, parent: Option<&str>) {
    for (key, value) in record {
        let joined = match parent {
            Some(p) => format!("{p}{FLATTEN_SEPARATOR}{key}"),
            None => key.clone(),
        };

        match value {
            Value::Object(nested) => flatten_into(flat, nested, Some(&joined)),
            Value::Array(_) => {
                flat.insert(joined, Value::String(value.to_string()));
            }
            other => {
                flat.insert(joined, other.clone());
            }
        }
    }
}

/// Copy each override's source value onto its reserved name, then drop the source key
///
/// Runs in configured order. An override whose source equals its reserved name
/// therefore removes that field.
pub fn apply_overrides(flat: &mut Map<String, Value>, overrides: &ReservedFieldOverrides) -> Result<(), TargetError> {
    for (reserved, source_key) in overrides.iter() {
        let value = flat.get(source_key).cloned().ok_or_else(|| TargetError::Transform {
            reserved: reserved.to_string(),
            source_key: source_key.to_string(),
        })?;
        flat.insert(reserved.to_string(), value);
        flat.remove(source_key);
    }
    Ok(())
}

/// The payload submitted to Intercom for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TargetItem(Map<String, Value>);

impl TargetItem {
    /// Split a flattened record into reserved fields and `custom_attributes`
    pub fn from_flattened(flat: Map<String, Value>) -> Self {
        let mut item = Map::new();
        let mut custom = Map::new();

        for (key, value) in flat {
            if is_reserved(&key) {
                item.insert(key, value);
            } else {
                custom.insert(key, value);
            }
        }

        item.insert(CUSTOM_ATTRIBUTES.to_string(), Value::Object(custom));
        Self(item)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn custom_attributes(&self) -> Option<&Map<String, Value>> {
        self.0.get(CUSTOM_ATTRIBUTES).and_then(Value::as_object)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<TargetItem> for Value {
    fn from(item: TargetItem) -> Self {
        Value::Object(item.0)
    }
}

/// Flatten, override, and partition records for the users stream
#[derive(Debug, Clone, Default)]
pub struct RecordTransformer {
    overrides: ReservedFieldOverrides,
}

impl RecordTransformer {
    pub fn new(config: &Config) -> Self {
        Self {
            overrides: config.reserved_field_overrides.clone(),
        }
    }

    pub fn with_overrides(overrides: ReservedFieldOverrides) -> Self {
        Self { overrides }
    }

    pub fn transform(&self, record: &Map<String, Value>) -> Result<TargetItem, TargetError> {
        let mut flat = flatten(record);
        debug!(field_count = flat.len(), "transform: flattened");
        apply_overrides(&mut flat, &self.overrides)?;
        Ok(TargetItem::from_flattened(flat))
    }
}
