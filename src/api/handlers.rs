//! HTTP request handlers

use super::types::{HealthResponse, InboundMessage};
use super::AppState;
use crate::gateway::OutboundMessage;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};

/// Body returned to the gateway for every webhook call
const ACK_BODY: &str = "OK";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inbound chat webhook
        .route("/whatsapp", post(receive_message))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Webhook
// ============================================================

/// Handle one inbound message. Always acknowledges with 200 so the gateway
/// does not redeliver, whatever happens downstream.
async fn receive_message(
    State(state): State<AppState>,
    form: Result<Form<InboundMessage>, FormRejection>,
) -> (StatusCode, &'static str) {
    let inbound = match form {
        Ok(Form(inbound)) => inbound,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed webhook payload");
            return ack();
        }
    };

    if inbound.from.trim().is_empty() {
        tracing::warn!(message_sid = ?inbound.message_sid, "Ignoring message without sender");
        return ack();
    }

    tracing::info!(
        sender = %inbound.from,
        message_sid = ?inbound.message_sid,
        body = %inbound.body,
        "Message received"
    );

    let reply = state.concierge.respond(&inbound.from, &inbound.body).await;

    let outbound = OutboundMessage {
        from: state.sender_address.to_string(),
        to: inbound.from,
        body: reply,
    };

    match state.messenger.send(&outbound).await {
        Ok(sent) => {
            tracing::info!(to = %outbound.to, sid = %sent.sid, status = %sent.status, "Reply sent");
        }
        Err(e) => {
            tracing::error!(to = %outbound.to, error = %e, "Failed to send reply");
        }
    }

    ack()
}

fn ack() -> (StatusCode, &'static str) {
    (StatusCode::OK, ACK_BODY)
}

// ============================================================
// Liveness
// ============================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        engine: state.concierge.engine_name(),
        conversations: state.concierge.tracked_conversations(),
    })
}

async fn get_version() -> &'static str {
    concat!("clinic-concierge ", env!("CARGO_PKG_VERSION"))
}
