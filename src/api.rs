//! HTTP API: the inbound chat webhook plus liveness endpoints

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::gateway::MessageSender;
use crate::runtime::Concierge;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub concierge: Arc<dyn Concierge>,
    pub messenger: Arc<dyn MessageSender>,
    /// Address replies are sent from
    pub sender_address: Arc<str>,
}

impl AppState {
    pub fn new(
        concierge: Arc<dyn Concierge>,
        messenger: Arc<dyn MessageSender>,
        sender_address: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            concierge,
            messenger,
            sender_address: sender_address.into(),
        }
    }
}
