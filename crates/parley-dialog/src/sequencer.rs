//! The question sequencer: picks the next prompt to speak.
//!
//! A deterministic linear scan over the schema in declared order, re-run
//! after every merge. It behaves like a state machine whose states are the
//! unfilled fields plus "complete", with transitions driven solely by merge
//! outcomes, but it is implemented as the scan it really is.

use parley_types::{ConversationState, FieldSchema};

/// Returns the prompt for the first unfilled field in declared order, or
/// `None` when every field is filled and the conversation can complete.
pub fn next_prompt<'a>(schema: &'a FieldSchema, state: &ConversationState) -> Option<&'a str> {
    schema
        .fields()
        .iter()
        .find(|spec| !state.is_filled(spec.name))
        .map(|spec| spec.prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::FieldSpec;

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::text("drinkType", "What would you like to drink?"),
            FieldSpec::text("size", "What size would you like?"),
            FieldSpec::list("extras", "Any extras for you?"),
            FieldSpec::text("name", "What name is the order under?"),
        ])
    }

    #[test]
    fn asks_fields_in_declared_order() {
        let schema = schema();
        let mut state = ConversationState::from_schema(&schema);

        assert_eq!(next_prompt(&schema, &state), Some("What would you like to drink?"));

        state.set_text("drinkType", "latte");
        assert_eq!(next_prompt(&schema, &state), Some("What size would you like?"));

        state.set_text("size", "large");
        assert_eq!(next_prompt(&schema, &state), Some("Any extras for you?"));
    }

    #[test]
    fn skips_filled_fields_regardless_of_fill_order() {
        let schema = schema();
        let mut state = ConversationState::from_schema(&schema);

        // Caller volunteered their name first; the scan still asks for the
        // earliest unfilled field.
        state.set_text("name", "Maya");
        assert_eq!(next_prompt(&schema, &state), Some("What would you like to drink?"));
    }

    #[test]
    fn returns_none_iff_all_fields_filled() {
        let schema = schema();
        let mut state = ConversationState::from_schema(&schema);

        state.set_text("drinkType", "latte");
        state.set_text("size", "large");
        state.push_unique("extras", "oat milk");
        assert!(next_prompt(&schema, &state).is_some());

        state.set_text("name", "Maya");
        assert_eq!(next_prompt(&schema, &state), None);
        assert!(state.is_complete(&schema));
    }
}
