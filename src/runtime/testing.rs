//! Mock implementations for testing
//!
//! These mocks enable engine, runtime and router tests without real I/O.

use crate::gateway::{GatewayError, MessageSender, OutboundMessage, SentMessage};
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Client
// ============================================================================

/// Mock LLM client that returns queued responses
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<LlmResponse, LlmError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }
}

#[async_trait]
impl LlmService for MockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.next_response()
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Delayed Mock LLM Client (for timeout and concurrency testing)
// ============================================================================

/// Mock LLM client with configurable delay
pub struct DelayedMockLlmClient {
    inner: MockLlmClient,
    delay: Duration,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockLlmClient {
    pub fn new(model_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            inner: MockLlmClient::new(model_id),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_response(&self, response: LlmResponse) {
        self.inner.queue_response(response);
    }
}

#[async_trait]
impl LlmService for DelayedMockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        let response = self.inner.next_response();
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        response
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}

// ============================================================================
// Recording Message Sender
// ============================================================================

/// Messaging gateway stand-in that records every outbound message
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<OutboundMessage>>,
    fail_with: Mutex<Option<GatewayError>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery attempt is rejected
    pub fn failing(error: GatewayError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Mutex::new(Some(error)),
        }
    }

    /// Messages handed to the gateway, including rejected ones
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, GatewayError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        match &*self.fail_with.lock().unwrap() {
            Some(error) => Err(error.clone()),
            None => Ok(SentMessage {
                sid: format!("SM{:032}", sent.len()),
                status: "queued".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmMessage;

    fn request() -> LlmRequest {
        LlmRequest {
            system: vec![],
            messages: vec![LlmMessage::user("hi")],
            max_tokens: Some(100),
        }
    }

    #[tokio::test]
    async fn test_mock_llm_client() {
        let mock = MockLlmClient::new("test-model");
        mock.queue_response(LlmResponse::text("Hello"));

        let response = mock.complete(&request()).await.unwrap();
        assert_eq!(response.text, "Hello");
        assert!(response.end_turn);

        // Second call should fail (no more responses)
        let result = mock.complete(&request()).await;
        assert!(result.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_mock_waits() {
        let mock = DelayedMockLlmClient::new("slow", Duration::from_secs(2));
        mock.queue_response(LlmResponse::text("done"));

        let started = tokio::time::Instant::now();
        let response = mock.complete(&request()).await.unwrap();
        assert_eq!(response.text, "done");
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_recording_sender() {
        let sender = RecordingSender::new();
        let message = OutboundMessage {
            from: "whatsapp:+14155238886".to_string(),
            to: "whatsapp:+62811".to_string(),
            body: "hello".to_string(),
        };
        let sent = sender.send(&message).await.unwrap();
        assert_eq!(sent.status, "queued");
        assert_eq!(sender.sent(), vec![message.clone()]);

        let failing = RecordingSender::failing(GatewayError::Network("down".to_string()));
        assert!(failing.send(&message).await.is_err());
        assert_eq!(failing.sent().len(), 1);
    }
}
