//! Per-sender conversation state types

use crate::catalog::{Slot, Treatment};
use crate::llm::{LlmMessage, MessageRole};
use serde::Serialize;

/// Stage of the scripted booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    TreatmentChoice,
    SlotChoice,
    Completed,
}

/// Scripted booking state.
///
/// The selected treatment lives inside the variants that need it, so a
/// treatment is present exactly when the stage is `SlotChoice` or
/// `Completed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum BookingState {
    #[default]
    Start,
    TreatmentChoice,
    SlotChoice {
        treatment: Treatment,
    },
    Completed {
        treatment: Treatment,
        slot: Slot,
    },
}

impl BookingState {
    pub fn stage(&self) -> Stage {
        match self {
            BookingState::Start => Stage::Start,
            BookingState::TreatmentChoice => Stage::TreatmentChoice,
            BookingState::SlotChoice { .. } => Stage::SlotChoice,
            BookingState::Completed { .. } => Stage::Completed,
        }
    }

    pub fn selected_treatment(&self) -> Option<&Treatment> {
        match self {
            BookingState::SlotChoice { treatment } | BookingState::Completed { treatment, .. } => {
                Some(treatment)
            }
            BookingState::Start | BookingState::TreatmentChoice => None,
        }
    }

    #[allow(dead_code)] // API completeness
    pub fn booked_slot(&self) -> Option<&Slot> {
        match self {
            BookingState::Completed { slot, .. } => Some(slot),
            _ => None,
        }
    }
}

/// Transcript kept by the assistant engine, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatHistory {
    entries: Vec<LlmMessage>,
}

impl ChatHistory {
    pub fn entries(&self) -> &[LlmMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LlmMessage> {
        self.entries.last()
    }

    /// Number of completed user/assistant exchanges
    pub fn turns(&self) -> usize {
        self.entries
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(LlmMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.entries.push(LlmMessage::assistant(content));
    }
}
