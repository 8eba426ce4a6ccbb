//! Conversation engines
//!
//! An engine maps (current state, inbound text) to (next state, reply). Two
//! engines exist: a scripted booking flow with pure transitions, and an
//! assistant that delegates the reply to a language model.

mod assistant;
mod scripted;
pub mod state;
pub mod store;

#[cfg(test)]
mod proptests;

pub use assistant::{AssistantEngine, APOLOGY_REPLY};
pub use scripted::{
    advance, ScriptedEngine, COMPLETED_REPLY, INVALID_SLOT_REPLY, INVALID_TREATMENT_REPLY,
};
pub use state::{BookingState, ChatHistory, Stage};
pub use store::{ConversationStore, StoreConfig};

use async_trait::async_trait;

/// Result of one conversation turn
#[derive(Debug, Clone, PartialEq)]
pub struct Turn<S> {
    pub new_state: S,
    pub reply: String,
    pub outcome: TurnOutcome,
}

impl<S> Turn<S> {
    pub fn advanced(new_state: S, reply: impl Into<String>) -> Self {
        Self {
            new_state,
            reply: reply.into(),
            outcome: TurnOutcome::Advanced,
        }
    }
}

/// How a turn went, for logging by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The conversation moved on normally
    Advanced,
    /// Input did not match what the current stage expects; state unchanged
    Rejected,
    /// The collaborator failed and a fallback reply was used
    Degraded { error: String },
}

/// A conversation policy shared by every sender
#[async_trait]
pub trait ConversationEngine: Send + Sync + 'static {
    /// Per-sender state; `Default` is the state of a first-time sender
    type State: Default + Clone + Send + Sync + 'static;

    /// Short name used in logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Advance one turn. Never fails: every path yields a reply.
    async fn advance(&self, state: &Self::State, input: &str) -> Turn<Self::State>;
}
