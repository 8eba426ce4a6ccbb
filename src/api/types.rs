//! API request and response types

use serde::{Deserialize, Serialize};

/// Inbound message as posted by the gateway (form encoded). Any other
/// gateway fields are ignored.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "MessageSid")]
    pub message_sid: Option<String>,
}

/// Response for the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub engine: &'static str,
    pub conversations: usize,
}
