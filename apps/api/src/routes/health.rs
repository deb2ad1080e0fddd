use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET /health
/// Returns service version and whether AI completions are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "dreamsim-api",
        "model": MODEL,
        "aiEnabled": state.config.groq_api_key.is_some(),
        "pdfStrategies": state.exporter.strategy_names(),
    }))
}
