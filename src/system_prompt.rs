//! System prompt construction for the booking assistant
//!
//! The directive is rebuilt from the catalog, so the model always sees the
//! same treatments and slots the scripted flow would offer.

use crate::catalog::{format_price, Catalog};
use std::fmt::Write;

/// Closing instruction establishing the assistant's role
const ROLE_PROMPT: &str = "Help customers book appointments. Be friendly and professional. \
Only offer the treatments and slots listed above. When a customer has chosen a treatment and a slot, \
confirm the booking by repeating the treatment, the slot and the price.";

/// Build the directive message for a clinic
pub fn build_system_prompt(catalog: &Catalog) -> String {
    let mut prompt = format!("You are a helpful booking assistant for {}.\n", catalog.name());

    prompt.push_str("\nAvailable treatments:\n");
    for treatment in catalog.treatments() {
        let _ = writeln!(
            prompt,
            "- {}: {} ({} min)",
            treatment.name,
            format_price(treatment.price),
            treatment.duration_minutes
        );
    }

    prompt.push_str("\nAvailable slots:\n");
    for slot in catalog.slots() {
        let _ = writeln!(prompt, "- {}", slot.label);
    }

    prompt.push('\n');
    prompt.push_str(ROLE_PROMPT);
    prompt
}
