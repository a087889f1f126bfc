//! Field schema definitions for intake conversations.
//!
//! A schema is the fixed, ordered list of fields an agent variant collects.
//! Declaration order matters: the question sequencer asks for the first
//! unfilled field in this order.

/// The shape of a single collected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// A single free-text value (e.g. a caller's name).
    #[default]
    Text,
    /// An accumulating list of values (e.g. drink extras, cart items).
    List,
}

/// One field an agent collects, with the prompt spoken when it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, the key used in state and in completion updates.
    pub name: &'static str,
    /// The question spoken when this field is the first unfilled one.
    pub prompt: &'static str,
    /// Whether the field holds a single value or a list.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A text field.
    pub const fn text(name: &'static str, prompt: &'static str) -> Self {
        Self {
            name,
            prompt,
            kind: FieldKind::Text,
        }
    }

    /// A list field.
    pub const fn list(name: &'static str, prompt: &'static str) -> Self {
        Self {
            name,
            prompt,
            kind: FieldKind::List,
        }
    }
}

/// The ordered set of fields one agent variant collects.
///
/// Keys not present in the schema are ignored by the update merger; this is
/// the whitelist that guards against the completion service inventing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Fields in declared order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field spec by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Whether the schema declares a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in declared order, for prompt construction.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|spec| spec.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::text("name", "What is your name?"),
            FieldSpec::list("extras", "Any extras?"),
        ])
    }

    #[test]
    fn get_and_contains() {
        let schema = schema();
        assert!(schema.contains("name"));
        assert!(schema.contains("extras"));
        assert!(!schema.contains("invented_by_llm"));
        assert_eq!(schema.get("extras").unwrap().kind, FieldKind::List);
    }

    #[test]
    fn names_preserve_declaration_order() {
        let names: Vec<_> = schema().names().collect();
        assert_eq!(names, vec!["name", "extras"]);
    }
}
