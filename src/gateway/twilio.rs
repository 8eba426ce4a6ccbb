//! Twilio Messages API client

use super::{GatewayError, MessageSender, OutboundMessage, SentMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";
pub const DEFAULT_SENDER: &str = "whatsapp:+14155238886";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and addressing for the Twilio account
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Address replies are sent from
    pub sender: String,
    pub api_base: String,
}

pub struct TwilioClient {
    client: Client,
    config: TwilioConfig,
    messages_url: String,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to create HTTP client: {e}")))?;

        let messages_url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            config.api_base.trim_end_matches('/'),
            config.account_sid
        );

        Ok(Self {
            client,
            config,
            messages_url,
        })
    }

    pub fn sender(&self) -> &str {
        &self.config.sender
    }
}

#[async_trait]
impl MessageSender for TwilioClient {
    async fn send(&self, message: &OutboundMessage) -> Result<SentMessage, GatewayError> {
        let response = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(message)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<TwilioErrorResponse>(&body)
                .map_or(body, |err| format!("{} (code {})", err.message, err.code.unwrap_or(0)));
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        parse_sent_message(&body)
    }
}

fn parse_sent_message(body: &str) -> Result<SentMessage, GatewayError> {
    let resp: TwilioMessageResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("{e} - body: {body}")))?;
    Ok(SentMessage {
        sid: resp.sid,
        status: resp.status,
    })
}

// Twilio API types

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    code: Option<u32>,
    message: String,
}
