//! Axum route handlers for the Onboarding API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::onboarding::OnboardingStep;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub show_welcome: bool,
    pub steps: &'static [OnboardingStep],
}

#[derive(Debug, Serialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

/// GET /api/v1/onboarding
pub async fn handle_get_onboarding(State(state): State<AppState>) -> Json<OnboardingResponse> {
    Json(OnboardingResponse {
        show_welcome: state.onboarding.should_show_welcome(),
        steps: state.onboarding.steps(),
    })
}

/// POST /api/v1/onboarding/dismiss
///
/// `dismissed` is `false` when the flag had already been written.
pub async fn handle_dismiss(
    State(state): State<AppState>,
) -> Result<Json<DismissResponse>, AppError> {
    // The file-backed store writes synchronously.
    let gate = state.onboarding.clone();
    let dismissed = tokio::task::spawn_blocking(move || gate.dismiss())
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(Json(DismissResponse { dismissed }))
}
