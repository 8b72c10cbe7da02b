mod comparison;
mod config;
mod docgen;
mod errors;
mod forms;
mod initiatives;
mod llm_client;
mod rfp;
mod routes;
mod state;
mod storage;
mod template;
mod ui;
mod values;
mod vendors;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionClient, GeminiClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::Storage;

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

    info!("Starting RFP Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize flat-file storage (creates the data directories)
    let storage = Storage::open(&config)?;
    info!("Storage initialized at {}", config.data_dir.display());

    // Initialize the AI backend. The app runs without it; AI endpoints
    // return a configuration error instead.
    let llm: Option<Arc<dyn CompletionClient>> = match &config.gemini_api_key {
        Some(key) => {
            info!("AI client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(GeminiClient::new(key.clone(), config.llm_timeout)))
        }
        None => {
            warn!("GEMINI_API_KEY not set; AI endpoints are disabled");
            None
        }
    };

    let state = AppState {
        storage,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
