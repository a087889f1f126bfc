//! The grocery-cart ordering agent.
//!
//! Builds up a cart as a list field across turns, then takes a delivery
//! name. Each completed order is written to its own timestamped file, one
//! order per conversation.

use parley_dialog::IntakeAgent;
use parley_types::{ConversationState, FieldSchema, FieldSpec};

/// File name for one order. Orders do not share a file; each conversation
/// gets its own, stamped with the time the call started.
pub fn order_file_name() -> String {
    format!("order_{}.json", chrono::Utc::now().format("%Y%m%dT%H%M%SZ"))
}

fn summarize(state: &ConversationState) -> String {
    let items = state.get_list("items");
    format!(
        "{count} item(s) for {name}: {items}",
        count = items.len(),
        name = state.get_text("name").unwrap_or("the caller"),
        items = if items.is_empty() {
            String::from("(empty cart)")
        } else {
            items.join(", ")
        },
    )
}

pub fn agent() -> IntakeAgent {
    IntakeAgent {
        name: "grocery",
        instructions: "You are the phone-order clerk for Greenfield Grocers. \
            Callers list grocery items; add each one to the cart and read back what \
            you added. Keep taking items until the caller says they are done, then \
            collect the name for the delivery slot. Quantities belong in the item \
            text itself, like 'two dozen eggs'. When the caller is finished and you \
            have their name, set done to true."
            .to_string(),
        greeting: "Greenfield Grocers, good morning! What can I add to your cart?".to_string(),
        closing: "Your cart is booked for the next delivery run. Thanks for calling!"
            .to_string(),
        apology: "Sorry, I lost you among the registers. Could you repeat that?".to_string(),
        schema: FieldSchema::new(vec![
            FieldSpec::list("items", "What would you like to add to your cart?"),
            FieldSpec::text("name", "And what name is the delivery under?"),
        ]),
        summarize,
    }
}
