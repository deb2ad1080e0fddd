//! Axum route handlers for the Simulation API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::{ApiJson, AppError};
use crate::models::{Category, ScenarioForm, SimulationReport};
use crate::simulation::inspiration::examples_for_raw;
use crate::simulation::orchestrator::{run_simulation, ReportSource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub report: SimulationReport,
    pub source: ReportSource,
    pub feasibility_label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ExamplesQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub category: Category,
    pub examples: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/simulations
///
/// Validates the form, then runs the orchestrator. The orchestrator never fails;
/// only an unexpected panic inside it surfaces as `AppError::Simulation`.
pub async fn handle_simulate(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ScenarioForm>,
) -> Result<Json<SimulateResponse>, AppError> {
    let request = form.validate()?;

    let provider = state.completion.clone();
    let outcome = tokio::spawn(async move { run_simulation(provider.as_ref(), &request).await })
        .await
        .map_err(|e| {
            error!("Simulation task aborted: {e}");
            AppError::Simulation(e.to_string())
        })?;

    let feasibility_label = outcome.report.feasibility_band().label();
    Ok(Json(SimulateResponse {
        report: outcome.report,
        source: outcome.source,
        feasibility_label,
    }))
}

/// GET /api/v1/scenarios/examples?category=travel
pub async fn handle_examples(Query(params): Query<ExamplesQuery>) -> Json<ExamplesResponse> {
    let (category, examples) = examples_for_raw(params.category.as_deref());
    Json(ExamplesResponse { category, examples })
}
