//! Outbound messaging gateway
//!
//! Replies leave the process through [`MessageSender`]; production uses the
//! Twilio Messages API.

mod twilio;

pub use twilio::{TwilioClient, TwilioConfig, DEFAULT_API_BASE, DEFAULT_SENDER};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// One outbound chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Configured sender address, e.g. `whatsapp:+14155238886`
    #[serde(rename = "From")]
    pub from: String,
    /// Original sender of the inbound message
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Body")]
    pub body: String,
}

/// Gateway acknowledgement for an accepted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub sid: String,
    pub status: String,
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Network(String),
    #[error("gateway rejected message (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

/// Delivers replies to the messaging gateway
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, GatewayError>;
}
