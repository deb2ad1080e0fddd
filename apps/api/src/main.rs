mod config;
mod errors;
mod export;
mod llm_client;
mod models;
mod onboarding;
mod routes;
mod simulation;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::export::PdfExporter;
use crate::llm_client::LlmClient;
use crate::onboarding::{FilePreferenceStore, InMemoryPreferenceStore, OnboardingGate, PreferenceStore};
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

    info!("Starting Dream Scenario Simulator API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = LlmClient::new(
        config.groq_api_key.clone(),
        config.completion_api_url.clone(),
        config.completion_timeout,
    )?;
    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY not set; every report will come from the offline estimator");
    }
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.completion_timeout
    );

    // Initialize PDF exporter
    let exporter = PdfExporter::with_default_strategies(config.html_to_pdf_bin.clone());
    info!("PDF strategies: {:?}", exporter.strategy_names());

    // Initialize onboarding gate
    let store: Arc<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => {
            info!("Onboarding preferences persisted to {}", path.display());
            Arc::new(FilePreferenceStore::open(path)?)
        }
        None => Arc::new(InMemoryPreferenceStore::new()),
    };
    let onboarding = OnboardingGate::mount(store)?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        completion: Arc::new(llm),
        exporter: Arc::new(exporter),
        onboarding: Arc::new(onboarding),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
