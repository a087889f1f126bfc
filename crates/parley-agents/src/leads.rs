//! The support and lead-capture agent.
//!
//! Front desk for two sister product lines: Northwind Switchgear (industrial
//! control panels) and Northwind Flow (pump monitoring). Collects a prospect
//! profile and hands off to a human on request via the escalate flag.

use parley_dialog::IntakeAgent;
use parley_types::{ConversationState, FieldSchema, FieldSpec};

/// Prospect records accumulate in this file under the records directory.
pub const RECORD_FILE: &str = "prospects.json";

fn summarize(state: &ConversationState) -> String {
    format!(
        "{name} ({company}) interested in {interest}, reach at {email} / {phone}",
        name = state.get_text("name").unwrap_or("unknown caller"),
        company = state.get_text("company_name").unwrap_or("no company"),
        interest = state
            .get_text("primary_product_interest")
            .unwrap_or("unspecified product"),
        email = state.get_text("email").unwrap_or("no email"),
        phone = state.get_text("phone_number").unwrap_or("no phone"),
    )
}

pub fn agent() -> IntakeAgent {
    IntakeAgent {
        name: "leads",
        instructions: "You answer the sales line shared by Northwind Switchgear \
            (industrial control panels) and Northwind Flow (pump monitoring systems). \
            Work out which product line the caller is asking about and collect their \
            contact details for a follow-up: name, email, phone number, company, and \
            which product they are interested in. Answer basic product questions \
            briefly, but your goal is the contact profile. If the caller asks to \
            speak to a person or an engineer, set escalate to true and reassure them \
            someone will call back. When the profile is complete, set done to true."
            .to_string(),
        greeting: "Thanks for calling Northwind — this line covers both Switchgear \
            and Flow products. How can I help you today?"
            .to_string(),
        closing: "Perfect, I have everything I need. Someone from the team will be \
            in touch shortly!"
            .to_string(),
        apology: "Sorry, I didn't quite catch that. Could you say it once more?".to_string(),
        schema: FieldSchema::new(vec![
            FieldSpec::text("name", "May I have your name, please?"),
            FieldSpec::text("email", "What's the best email address for you?"),
            FieldSpec::text("phone_number", "And a phone number we can reach you on?"),
            FieldSpec::text("company_name", "Which company are you calling from?"),
            FieldSpec::text(
                "primary_product_interest",
                "Which product are you most interested in — Switchgear or Flow?",
            ),
        ]),
        summarize,
    }
}
