use std::sync::Arc;

use crate::assist::AiAssistant;
use crate::config::Config;
use crate::dictionaries::Dictionaries;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// AI backend. `DisabledAssistant` when no key is configured or AI is off.
    pub assistant: Arc<dyn AiAssistant>,
    /// Keyword data for every heuristic.
    pub dicts: Arc<Dictionaries>,
}

impl AppState {
    pub fn new(config: Config, assistant: Arc<dyn AiAssistant>) -> Self {
        Self {
            config,
            assistant,
            dicts: Arc::new(Dictionaries::default()),
        }
    }
}
