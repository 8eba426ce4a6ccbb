//! Model-backed assistant engine
//!
//! Each turn appends the user's text, sends directive + full history to the
//! model once, and appends whatever comes back. A failed call still appends
//! an assistant entry (the apology) so the transcript keeps alternating.

use super::state::ChatHistory;
use super::{ConversationEngine, Turn, TurnOutcome};
use crate::catalog::Catalog;
use crate::llm::{LlmError, LlmRequest, LlmService, SystemContent};
use crate::system_prompt::build_system_prompt;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Engine that delegates replies to a language model
pub struct AssistantEngine {
    llm: Arc<dyn LlmService>,
    directive: String,
    timeout: Duration,
}

impl AssistantEngine {
    pub fn new(llm: Arc<dyn LlmService>, catalog: &Catalog, timeout: Duration) -> Self {
        Self {
            llm,
            directive: build_system_prompt(catalog),
            timeout,
        }
    }

    fn build_request(&self, history: &ChatHistory) -> LlmRequest {
        LlmRequest {
            system: vec![SystemContent::new(self.directive.clone())],
            messages: history.entries().to_vec(),
            max_tokens: None,
        }
    }

    async fn generate_reply(&self, history: &ChatHistory) -> Result<String, LlmError> {
        let request = self.build_request(history);
        let response = timeout(self.timeout, self.llm.complete(&request))
            .await
            .map_err(|_| {
                LlmError::timeout(format!(
                    "No completion within {}s",
                    self.timeout.as_secs_f32()
                ))
            })??;

        response
            .reply()
            .map(str::to_string)
            .ok_or_else(|| LlmError::empty_response("Completion contained no text"))
    }
}

#[async_trait]
impl ConversationEngine for AssistantEngine {
    type State = ChatHistory;

    fn name(&self) -> &'static str {
        "assistant"
    }

    async fn advance(&self, state: &ChatHistory, input: &str) -> Turn<ChatHistory> {
        let mut history = state.clone();
        history.push_user(input);

        match self.generate_reply(&history).await {
            Ok(reply) => {
                history.push_assistant(reply.clone());
                Turn::advanced(history, reply)
            }
            Err(e) => {
                history.push_assistant(APOLOGY_REPLY);
                Turn {
                    new_state: history,
                    reply: APOLOGY_REPLY.to_string(),
                    outcome: TurnOutcome::Degraded {
                        error: format!("{}: {}", e.kind, e.message),
                    },
                }
            }
        }
    }
}
