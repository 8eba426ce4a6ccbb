//! Process configuration from environment variables

use crate::conversation::StoreConfig;
use crate::gateway::{TwilioConfig, DEFAULT_API_BASE, DEFAULT_SENDER};
use crate::llm::LlmConfig;
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
    #[error("CONCIERGE_ENGINE=assistant requires OPENAI_API_KEY or LLM_GATEWAY")]
    AssistantWithoutModel,
}

/// Which conversation engine answers messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Fixed booking script driven by numbered replies
    Scripted,
    /// Free-form replies from the language model
    Assistant,
}

impl FromStr for EngineKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scripted" => Ok(Self::Scripted),
            "assistant" => Ok(Self::Assistant),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub engine: EngineKind,
    pub twilio: TwilioConfig,
    pub llm: LlmConfig,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let twilio = TwilioConfig {
            account_sid: var("TWILIO_ACCOUNT_SID").ok_or(ConfigError::Missing("TWILIO_ACCOUNT_SID"))?,
            auth_token: var("TWILIO_AUTH_TOKEN").ok_or(ConfigError::Missing("TWILIO_AUTH_TOKEN"))?,
            sender: var("TWILIO_WHATSAPP_NUMBER").unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            api_base: var("TWILIO_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        };

        let mut llm = LlmConfig {
            openai_api_key: var("OPENAI_API_KEY"),
            gateway: var("LLM_GATEWAY"),
            ..LlmConfig::default()
        };
        if let Some(model) = var("OPENAI_MODEL") {
            llm.model = model;
        }
        if let Some(secs) = parse_var::<NonZeroU64>(&var, "LLM_TIMEOUT_SECS")? {
            llm.timeout = Duration::from_secs(secs.get());
        }

        let engine = match parse_var::<EngineKind>(&var, "CONCIERGE_ENGINE")? {
            Some(kind) => kind,
            None if llm.is_configured() => EngineKind::Assistant,
            None => EngineKind::Scripted,
        };
        if engine == EngineKind::Assistant && !llm.is_configured() {
            return Err(ConfigError::AssistantWithoutModel);
        }

        let mut store = StoreConfig::default();
        if let Some(capacity) = parse_var::<NonZeroUsize>(&var, "STORE_CAPACITY")? {
            store.capacity = capacity;
        }
        if let Some(secs) = parse_var::<NonZeroU64>(&var, "STORE_IDLE_TTL_SECS")? {
            store.idle_ttl = Duration::from_secs(secs.get());
        }

        let port = parse_var::<u16>(&var, "PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            port,
            engine,
            twilio,
            llm,
            store,
        })
    }
}

fn parse_var<T: FromStr>(
    var: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    var(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}
