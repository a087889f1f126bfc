//! The café counter coffee-ordering agent.
//!
//! Collects a full drink specification plus a pickup name, one question at
//! a time, and files the completed order.

use parley_dialog::IntakeAgent;
use parley_types::{ConversationState, FieldSchema, FieldSpec};

/// Order records accumulate in this file under the records directory.
pub const RECORD_FILE: &str = "coffee_orders.json";

fn summarize(state: &ConversationState) -> String {
    let extras = state.get_list("extras");
    let extras = if extras.is_empty() {
        String::from("no extras")
    } else {
        extras.join(", ")
    };
    format!(
        "{size} {drink} with {milk} milk ({extras}) for {name}",
        size = state.get_text("size").unwrap_or("unspecified size"),
        drink = state.get_text("drinkType").unwrap_or("drink"),
        milk = state.get_text("milk").unwrap_or("regular"),
        name = state.get_text("name").unwrap_or("the caller"),
    )
}

pub fn agent() -> IntakeAgent {
    IntakeAgent {
        name: "coffee",
        instructions: "You are the friendly barista at Harbor Light Coffee. \
            Take the caller's drink order conversationally: what drink, what size, \
            what kind of milk, any extras (syrups, extra shots, whipped cream), and \
            the name for the cup. Confirm what you heard in a warm, unhurried tone. \
            If they order something that is not coffee or tea, gently steer them back \
            to the menu."
            .to_string(),
        greeting: "Welcome to Harbor Light Coffee! What can I get started for you today?"
            .to_string(),
        closing: "Wonderful — your order is in. We'll call your name at the counter!"
            .to_string(),
        apology: "Sorry, the espresso machine drowned you out for a second. \
            Could you say that again?"
            .to_string(),
        schema: FieldSchema::new(vec![
            FieldSpec::text("drinkType", "What would you like to drink?"),
            FieldSpec::text("size", "What size would you like — small, medium, or large?"),
            FieldSpec::text("milk", "What kind of milk would you like in that?"),
            FieldSpec::list("extras", "Any extras — syrup, an extra shot, whipped cream?"),
            FieldSpec::text("name", "And what name should I put on the cup?"),
        ]),
        summarize,
    }
}
