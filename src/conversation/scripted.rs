//! Scripted booking flow
//!
//! Start -> `TreatmentChoice` -> `SlotChoice` -> Completed. Stages only move
//! forward; input that does not fit the current stage leaves the state as it
//! was and produces a corrective reply.

use super::state::BookingState;
use super::{ConversationEngine, Turn, TurnOutcome};
use crate::catalog::{format_price, Catalog};
use async_trait::async_trait;
use std::sync::Arc;

pub const INVALID_TREATMENT_REPLY: &str = "Please reply with a valid treatment number.";
pub const INVALID_SLOT_REPLY: &str = "Please reply with a valid slot number.";
pub const COMPLETED_REPLY: &str =
    "Your booking is confirmed. How else can I help you? Our team will contact you if anything changes.";

/// Engine running the scripted booking flow over a catalog
pub struct ScriptedEngine {
    catalog: Arc<Catalog>,
}

impl ScriptedEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ConversationEngine for ScriptedEngine {
    type State = BookingState;

    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn advance(&self, state: &BookingState, input: &str) -> Turn<BookingState> {
        advance(&self.catalog, state, input)
    }
}

/// Pure transition function: same catalog, state and input always give the
/// same turn.
pub fn advance(catalog: &Catalog, state: &BookingState, raw_input: &str) -> Turn<BookingState> {
    let input = normalize(raw_input);

    match state {
        BookingState::Start => Turn::advanced(BookingState::TreatmentChoice, greeting(catalog)),

        BookingState::TreatmentChoice => match parse_number(&input)
            .and_then(|id| u32::try_from(id).ok())
            .and_then(|id| catalog.find_treatment(id))
        {
            Some(treatment) => Turn::advanced(
                BookingState::SlotChoice {
                    treatment: treatment.clone(),
                },
                format!(
                    "Great choice: {}.\n\nAvailable slots:\n{}\n\nReply with the slot number to book.",
                    treatment.summary(),
                    catalog.render_slots()
                ),
            ),
            None => reject(state, INVALID_TREATMENT_REPLY),
        },

        BookingState::SlotChoice { treatment } => {
            match parse_number(&input).and_then(|n| catalog.slot(n)) {
                Some(slot) => Turn::advanced(
                    BookingState::Completed {
                        treatment: treatment.clone(),
                        slot: slot.clone(),
                    },
                    format!(
                        "Booking confirmed!\n\nTreatment: {}\nSlot: {}\nPrice: {}\n\nSee you at {}.",
                        treatment.name,
                        slot.label,
                        format_price(treatment.price),
                        catalog.name()
                    ),
                ),
                None => reject(state, INVALID_SLOT_REPLY),
            }
        }

        BookingState::Completed { .. } => Turn::advanced(state.clone(), COMPLETED_REPLY),
    }
}

fn greeting(catalog: &Catalog) -> String {
    format!(
        "Hi! Welcome to {}.\n\nOur treatments:\n{}\n\nReply with the treatment number to choose.",
        catalog.name(),
        catalog.render_treatments()
    )
}

fn reject(state: &BookingState, reply: &str) -> Turn<BookingState> {
    Turn {
        new_state: state.clone(),
        reply: reply.to_string(),
        outcome: TurnOutcome::Rejected,
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn parse_number(input: &str) -> Option<usize> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}
