mod assist;
mod config;
mod dictionaries;
mod errors;
mod job;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assist::{AiAssistant, DisabledAssistant, LlmAssistant};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pulp API v{}", env!("CARGO_PKG_VERSION"));

    let assistant = build_assistant(&config)?;
    info!(backend = assistant.backend(), "AI assistant ready");

    let state = AppState::new(config.clone(), assistant);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LLM-backed assistant when a key is configured and AI is enabled; otherwise
/// every AI call falls through to the heuristics.
fn build_assistant(config: &Config) -> Result<Arc<dyn AiAssistant>> {
    match config.ai_key() {
        Some(key) => {
            let client = LlmClient::new(key.to_string())?;
            Ok(Arc::new(LlmAssistant::new(client, config.max_input_chars)))
        }
        None => {
            warn!("No OpenAI API key configured or AI disabled; running heuristics only");
            Ok(Arc::new(DisabledAssistant))
        }
    }
}
