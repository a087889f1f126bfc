//! The update merger: folds completion-service field updates into state.
//!
//! Semantics, per field present in the schema:
//! - scalar fields: a non-empty string overwrites the current value;
//! - list fields: a string or array of strings is union-appended without
//!   duplicates;
//! - keys outside the schema are ignored (the completion service invents
//!   fields sometimes);
//! - empty values never erase existing data;
//! - a non-object `updates` value short-circuits the whole merge as a no-op.
//!
//! Malformed updates are never an error — the worst the model can do to the
//! state is nothing.

use serde_json::Value;

use parley_types::{ConversationState, FieldKind, FieldSchema};

/// Applies `updates` to `state`, returning the number of fields changed.
pub fn apply_updates(schema: &FieldSchema, state: &mut ConversationState, updates: &Value) -> usize {
    let Some(map) = updates.as_object() else {
        if !updates.is_null() {
            tracing::debug!("updates is not a JSON object, ignoring");
        }
        return 0;
    };

    let mut changed = 0;

    for (key, value) in map {
        let Some(spec) = schema.get(key) else {
            tracing::debug!(field = %key, "update for unknown field, ignoring");
            continue;
        };

        match spec.kind {
            FieldKind::Text => {
                if let Some(text) = value.as_str() {
                    if !text.trim().is_empty() {
                        state.set_text(spec.name, text.trim());
                        changed += 1;
                    }
                }
            }
            FieldKind::List => {
                let added = merge_list_items(state, spec.name, value);
                if added > 0 {
                    changed += 1;
                }
            }
        }
    }

    changed
}

/// Appends the items carried by `value` to a list field, deduplicating.
/// Accepts a single string or an array of strings; anything else is dropped.
fn merge_list_items(state: &mut ConversationState, name: &str, value: &Value) -> usize {
    let mut added = 0;

    match value {
        Value::String(item) => {
            if !item.trim().is_empty() && state.push_unique(name, item.trim()) {
                added += 1;
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Some(text) = item.as_str() {
                    if !text.trim().is_empty() && state.push_unique(name, text.trim()) {
                        added += 1;
                    }
                }
            }
        }
        _ => {}
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::FieldSpec;
    use serde_json::json;

    fn coffee_schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::text("drinkType", "What would you like to drink?"),
            FieldSpec::text("size", "What size?"),
            FieldSpec::text("milk", "What kind of milk?"),
            FieldSpec::list("extras", "Any extras?"),
            FieldSpec::text("name", "What name is the order under?"),
        ])
    }

    #[test]
    fn scalar_update_overwrites() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);

        let changed = apply_updates(&schema, &mut state, &json!({"drinkType": "latte"}));
        assert_eq!(changed, 1);
        assert_eq!(state.get_text("drinkType"), Some("latte"));

        let changed = apply_updates(&schema, &mut state, &json!({"drinkType": "mocha"}));
        assert_eq!(changed, 1);
        assert_eq!(state.get_text("drinkType"), Some("mocha"));
    }

    #[test]
    fn empty_update_object_is_a_no_op() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);
        state.set_text("size", "large");
        let before = state.clone();

        assert_eq!(apply_updates(&schema, &mut state, &json!({})), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn non_object_updates_short_circuit_as_no_op() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);
        state.set_text("size", "large");
        let before = state.clone();

        for updates in [json!(null), json!("latte"), json!(42), json!(["a", "b"])] {
            assert_eq!(apply_updates(&schema, &mut state, &updates), 0);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);

        let updates = json!({"loyaltyTier": "gold", "size": "small"});
        assert_eq!(apply_updates(&schema, &mut state, &updates), 1);
        assert_eq!(state.get_text("size"), Some("small"));
        assert!(state.get("loyaltyTier").is_none());
    }

    #[test]
    fn empty_values_do_not_erase_existing_data() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);
        state.set_text("name", "Maya");

        assert_eq!(apply_updates(&schema, &mut state, &json!({"name": "  "})), 0);
        assert_eq!(state.get_text("name"), Some("Maya"));
    }

    #[test]
    fn list_updates_union_without_duplicates() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);

        apply_updates(&schema, &mut state, &json!({"extras": ["vanilla", "oat milk"]}));
        apply_updates(&schema, &mut state, &json!({"extras": ["vanilla", "extra shot"]}));

        assert_eq!(state.get_list("extras"), ["vanilla", "oat milk", "extra shot"]);
    }

    #[test]
    fn single_string_accepted_for_list_field() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);

        assert_eq!(apply_updates(&schema, &mut state, &json!({"extras": "caramel"})), 1);
        assert_eq!(state.get_list("extras"), ["caramel"]);
    }

    #[test]
    fn wrong_typed_values_are_skipped_without_error() {
        let schema = coffee_schema();
        let mut state = ConversationState::from_schema(&schema);

        let updates = json!({"size": 12, "extras": {"nested": true}, "milk": "oat"});
        assert_eq!(apply_updates(&schema, &mut state, &updates), 1);
        assert_eq!(state.get_text("milk"), Some("oat"));
        assert!(!state.is_filled("size"));
        assert!(!state.is_filled("extras"));
    }
}
