//! Property-based tests for record flattening and partitioning.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use target_intercom::transform::CUSTOM_ATTRIBUTES;
use target_intercom::{FLATTEN_SEPARATOR, RESERVED_FIELDS, TargetItem, flatten};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    // No underscores, so joined keys cannot collide with literal ones
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        prop::string::string_regex("[a-zA-Z0-9 @.]{0,20}").unwrap().prop_map(Value::from),
    ]
}

fn flat_record_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(key_strategy(), scalar_strategy(), 0..10).prop_map(|m| m.into_iter().collect())
}

fn nested_value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn nested_record_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(key_strategy(), nested_value_strategy(), 0..6).prop_map(|m| m.into_iter().collect())
}

fn depth(key: &str) -> usize {
    key.matches(FLATTEN_SEPARATOR).count()
}

// =============================================================================
// FLATTEN PROPERTIES
// =============================================================================

proptest! {
    /// Flattening an already-flat record changes nothing
    #[test]
    fn flatten_is_identity_on_flat_records(record in flat_record_strategy()) {
        prop_assert_eq!(flatten(&record), record);
    }

    /// Flattening is idempotent
    #[test]
    fn flatten_is_idempotent(record in nested_record_strategy()) {
        let once = flatten(&record);
        prop_assert_eq!(flatten(&once), once);
    }

    /// No objects or arrays survive flattening
    #[test]
    fn flatten_leaves_only_scalars(record in nested_record_strategy()) {
        for value in flatten(&record).values() {
            prop_assert!(!value.is_object() && !value.is_array());
        }
    }

    /// Wrapping a record one level deeper prefixes every key
    #[test]
    fn flatten_prefixes_nested_keys(record in nested_record_strategy(), parent in key_strategy()) {
        let mut wrapped = Map::new();
        wrapped.insert(parent.clone(), Value::Object(record.clone()));

        let inner = flatten(&record);
        let outer = flatten(&wrapped);

        prop_assert_eq!(inner.len(), outer.len());
        for (key, value) in &inner {
            let joined = format!("{parent}{FLATTEN_SEPARATOR}{key}");
            prop_assert_eq!(outer.get(&joined), Some(value));
            prop_assert_eq!(depth(&joined), depth(key) + 1);
        }
    }
}

// =============================================================================
// PARTITION PROPERTIES
// =============================================================================

proptest! {
    /// Every flattened field ends up either top-level reserved or custom, never both
    #[test]
    fn partition_preserves_every_field(record in flat_record_strategy()) {
        let item = TargetItem::from_flattened(record.clone());
        let custom = item.custom_attributes().cloned().unwrap_or_default();

        for (key, value) in &record {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                prop_assert_eq!(item.get(key), Some(value));
                prop_assert!(!custom.contains_key(key));
            } else {
                prop_assert_eq!(custom.get(key), Some(value));
            }
        }

        let top_level: Vec<_> = item.as_map().keys().filter(|k| k.as_str() != CUSTOM_ATTRIBUTES).collect();
        prop_assert!(top_level.iter().all(|k| RESERVED_FIELDS.contains(&k.as_str())));
    }
}

#[test]
fn partition_of_empty_record() {
    let item = TargetItem::from_flattened(Map::new());
    assert_eq!(Value::from(item), json!({"custom_attributes": {}}));
}
