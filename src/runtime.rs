//! Runtime tying an engine to the per-sender store
//!
//! One inbound message is one turn: lock the sender, advance the engine,
//! commit the new state, hand back the reply.

#[cfg(test)]
pub mod testing;

use crate::conversation::{ConversationEngine, ConversationStore, StoreConfig, TurnOutcome};
use async_trait::async_trait;

/// Object-safe entry point used by the HTTP layer
#[async_trait]
pub trait Concierge: Send + Sync {
    /// Run one turn for `sender` and return the reply to send back
    async fn respond(&self, sender: &str, text: &str) -> String;

    /// Name of the engine behind this concierge
    fn engine_name(&self) -> &'static str;

    /// Number of senders currently tracked
    fn tracked_conversations(&self) -> usize;
}

/// Generic runtime that can work with any engine
pub struct ConversationRuntime<E: ConversationEngine> {
    engine: E,
    store: ConversationStore<E::State>,
}

impl<E: ConversationEngine> ConversationRuntime<E> {
    pub fn new(engine: E, store_config: StoreConfig) -> Self {
        Self {
            engine,
            store: ConversationStore::new(store_config),
        }
    }

    #[allow(dead_code)] // Used by tests to inspect committed state
    pub fn store(&self) -> &ConversationStore<E::State> {
        &self.store
    }

    /// Run one turn with the sender's state locked for the whole turn
    pub async fn handle_message(&self, sender: &str, text: &str) -> String {
        let mut state = self.store.lock(sender).await;
        let turn = self.engine.advance(&state, text).await;

        match &turn.outcome {
            TurnOutcome::Advanced => {
                tracing::debug!(sender = %sender, engine = self.engine.name(), "Turn advanced");
            }
            TurnOutcome::Rejected => {
                tracing::info!(sender = %sender, engine = self.engine.name(), "Input rejected, state unchanged");
            }
            TurnOutcome::Degraded { error } => {
                tracing::error!(
                    sender = %sender,
                    engine = self.engine.name(),
                    error = %error,
                    "Reply generation failed, sent fallback"
                );
            }
        }

        *state = turn.new_state;
        turn.reply
    }
}

#[async_trait]
impl<E: ConversationEngine> Concierge for ConversationRuntime<E> {
    async fn respond(&self, sender: &str, text: &str) -> String {
        self.handle_message(sender, text).await
    }

    fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    fn tracked_conversations(&self) -> usize {
        self.store.len()
    }
}
