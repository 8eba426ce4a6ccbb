//! Clinic Concierge - WhatsApp booking bot
//!
//! Receives chat messages from the Twilio webhook, advances the sender's
//! conversation and replies through the Twilio Messages API.

mod api;
mod catalog;
mod config;
mod conversation;
mod gateway;
mod llm;
mod runtime;
mod system_prompt;

use api::{create_router, AppState};
use catalog::Catalog;
use config::{Config, EngineKind};
use conversation::{AssistantEngine, ScriptedEngine};
use gateway::TwilioClient;
use runtime::{Concierge, ConversationRuntime};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before anything reads the environment
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_concierge=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }

    let config = Config::from_env()?;
    let catalog = Arc::new(Catalog::default());

    let concierge: Arc<dyn Concierge> = match config.engine {
        EngineKind::Scripted => Arc::new(ConversationRuntime::new(
            ScriptedEngine::new(Arc::clone(&catalog)),
            config.store,
        )),
        EngineKind::Assistant => {
            let llm = llm::connect(&config.llm)?;
            tracing::info!(model = %llm.model_id(), timeout_secs = config.llm.timeout.as_secs(), "LLM client initialized");
            Arc::new(ConversationRuntime::new(
                AssistantEngine::new(llm, &catalog, config.llm.timeout),
                config.store,
            ))
        }
    };

    tracing::info!(
        engine = concierge.engine_name(),
        clinic = %catalog.name(),
        store_capacity = config.store.capacity.get(),
        store_idle_ttl_secs = config.store.idle_ttl.as_secs(),
        "Conversation engine ready"
    );

    let messenger = Arc::new(TwilioClient::new(config.twilio)?);
    let sender_address = messenger.sender().to_string();
    let state = AppState::new(concierge, messenger, sender_address);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Clinic concierge listening on {}", addr);
    tracing::info!("Webhook: http://localhost:{}/whatsapp", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
