//! The drive-thru express coffee agent.
//!
//! The second coffee bot: a brisker window-service persona with a reduced
//! field set — no milk question, extras folded into the drink line.

use parley_dialog::IntakeAgent;
use parley_types::{ConversationState, FieldSchema, FieldSpec};

pub const RECORD_FILE: &str = "express_orders.json";

fn summarize(state: &ConversationState) -> String {
    format!(
        "{size} {drink} for {name} at the window",
        size = state.get_text("size").unwrap_or("unspecified size"),
        drink = state.get_text("drinkType").unwrap_or("drink"),
        name = state.get_text("name").unwrap_or("the caller"),
    )
}

pub fn agent() -> IntakeAgent {
    IntakeAgent {
        name: "coffee-express",
        instructions: "You are the speaker-box attendant at Rapid Bean drive-thru. \
            Keep every reply to one short sentence — there is a line of cars. \
            You need the drink, the size, and a first name for the order. Do not \
            upsell, do not chat."
            .to_string(),
        greeting: "Rapid Bean, go ahead with your order whenever you're ready.".to_string(),
        closing: "Got it — pull up to the window, please!".to_string(),
        apology: "Sorry, the speaker cut out — one more time?".to_string(),
        schema: FieldSchema::new(vec![
            FieldSpec::text("drinkType", "What are you drinking today?"),
            FieldSpec::text("size", "What size?"),
            FieldSpec::text("name", "Name for the order?"),
        ]),
        summarize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_dialog::next_prompt;

    #[test]
    fn express_schema_is_the_short_one() {
        let agent = agent();
        let names: Vec<_> = agent.schema.names().collect();
        assert_eq!(names, vec!["drinkType", "size", "name"]);

        let state = ConversationState::from_schema(&agent.schema);
        assert_eq!(
            next_prompt(&agent.schema, &state),
            Some("What are you drinking today?")
        );
    }
}
