mod calendar;
mod config;
mod errors;
mod llm_client;
mod retry;
mod routes;
mod schedule;
mod state;
mod tutor;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{ChatTransport, HttpChatTransport};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Study Planner API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "API key present: {}",
        if config.has_api_key() { "Yes" } else { "No" }
    );
    if !config.has_api_key() {
        warn!("GROQ_API_KEY is not set; generation requests will fail until it is configured");
    }

    // Initialize provider transport
    let transport: Arc<dyn ChatTransport> =
        Arc::new(HttpChatTransport::new(config.groq_api_url.clone())?);
    if config.provider_max_retries > 0 {
        info!(
            "Provider retries enabled (max {})",
            config.provider_max_retries
        );
    }
    info!("LLM transport initialized (model: {})", config.model);

    let state = AppState::new(config.clone(), transport);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
