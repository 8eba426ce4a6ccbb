//! LLM provider abstraction
//!
//! The assistant engine only sees [`LlmService`]; the concrete `OpenAI`
//! client is chosen at startup from [`LlmConfig`].

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a single completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: LlmService + ?Sized> LlmService for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Configuration for the model provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub model: String,
    /// OpenAI-compatible gateway base URL; when set, requests go through it
    pub gateway: Option<String>,
    /// Deadline for one completion, enforced by the assistant engine
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            gateway: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    /// Whether a provider can be built from this configuration
    pub fn is_configured(&self) -> bool {
        self.gateway.is_some() || self.openai_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Build the configured provider, wrapped with request logging
pub fn connect(config: &LlmConfig) -> Result<Arc<dyn LlmService>, LlmError> {
    // In gateway mode the gateway handles authentication
    let api_key = match (&config.gateway, &config.openai_api_key) {
        (_, Some(key)) if !key.is_empty() => key.clone(),
        (Some(_), _) => "implicit".to_string(),
        _ => return Err(LlmError::auth("OPENAI_API_KEY is not set")),
    };

    let service = OpenAIService::new(api_key, config.model.clone(), config.gateway.as_deref())?;
    Ok(Arc::new(LoggingService::new(Arc::new(service))))
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    end_turn = response.end_turn,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    transient = e.kind.is_transient(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
