//! Per-call conversation state.
//!
//! One `ConversationState` is created at call start with every schema field
//! empty, is mutated only by the update merger in `parley-dialog`, and dies
//! with the call. There is no cross-call identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{FieldKind, FieldSchema};

/// The value of a single field: a scalar string or a list of strings.
///
/// Serialises untagged, so state round-trips as plain JSON
/// (`{"name": "Maya", "extras": ["oat milk"]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// An empty value of the given kind.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::List => FieldValue::List(Vec::new()),
        }
    }

    /// A field is filled iff it holds a non-empty string or non-empty list.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::List(items) => !items.is_empty(),
        }
    }
}

/// A flat mapping of field name to current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationState {
    values: BTreeMap<String, FieldValue>,
}

impl ConversationState {
    /// Creates a state with every field of `schema` present and empty.
    pub fn from_schema(schema: &FieldSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|spec| (spec.name.to_string(), FieldValue::empty(spec.kind)))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The scalar value of a text field, if present and filled.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    /// The items of a list field. Empty slice when unfilled or absent.
    pub fn get_list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FieldValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Overwrites a scalar field.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    /// Appends to a list field, skipping values already present.
    ///
    /// Returns `true` if the item was added.
    pub fn push_unique(&mut self, name: &str, item: impl Into<String>) -> bool {
        let item = item.into();
        match self
            .values
            .entry(name.to_string())
            .or_insert_with(|| FieldValue::List(Vec::new()))
        {
            FieldValue::List(items) => {
                if items.contains(&item) {
                    false
                } else {
                    items.push(item);
                    true
                }
            }
            // Field is declared as text; a list push is a schema mismatch
            // and is dropped rather than clobbering the scalar.
            FieldValue::Text(_) => false,
        }
    }

    /// Whether a field is present and filled.
    pub fn is_filled(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(FieldValue::is_filled)
    }

    /// Whether every field of `schema` is filled.
    pub fn is_complete(&self, schema: &FieldSchema) -> bool {
        schema.fields().iter().all(|spec| self.is_filled(spec.name))
    }

    /// The state as a JSON object, for embedding in completion prompts.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;

    fn coffee_schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::text("drinkType", "What would you like to drink?"),
            FieldSpec::text("size", "What size?"),
            FieldSpec::list("extras", "Any extras?"),
            FieldSpec::text("name", "What name is the order under?"),
        ])
    }

    #[test]
    fn from_schema_starts_empty() {
        let state = ConversationState::from_schema(&coffee_schema());
        assert!(!state.is_filled("drinkType"));
        assert!(!state.is_filled("extras"));
        assert!(!state.is_complete(&coffee_schema()));
    }

    #[test]
    fn whitespace_only_text_is_unfilled() {
        let mut state = ConversationState::from_schema(&coffee_schema());
        state.set_text("name", "   ");
        assert!(!state.is_filled("name"));
    }

    #[test]
    fn push_unique_deduplicates() {
        let mut state = ConversationState::from_schema(&coffee_schema());
        assert!(state.push_unique("extras", "oat milk"));
        assert!(!state.push_unique("extras", "oat milk"));
        assert_eq!(state.get_list("extras"), ["oat milk"]);
    }

    #[test]
    fn push_onto_text_field_is_dropped() {
        let mut state = ConversationState::from_schema(&coffee_schema());
        state.set_text("size", "large");
        assert!(!state.push_unique("size", "venti"));
        assert_eq!(state.get_text("size"), Some("large"));
    }

    #[test]
    fn serialises_as_flat_json() {
        let mut state = ConversationState::from_schema(&coffee_schema());
        state.set_text("drinkType", "latte");
        state.push_unique("extras", "vanilla");

        let json = state.to_json();
        assert_eq!(json["drinkType"], "latte");
        assert_eq!(json["extras"][0], "vanilla");
        assert_eq!(json["size"], "");
    }
}
