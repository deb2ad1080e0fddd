//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::{ApiJson, AppError};
use crate::export::{ExportDocument, PDF_MIME};
use crate::models::{Category, SimulationReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub report: SimulationReport,
    pub scenario: String,
    pub category: Category,
}

/// POST /api/v1/simulations/export
///
/// Returns the PDF as an attachment. Strategy failures are absorbed by the
/// exporter; only "every strategy failed" reaches the client.
pub async fn handle_export(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ExportRequest>,
) -> Result<Response, AppError> {
    let doc = ExportDocument::new(request.report, request.scenario, request.category);

    let file = state.exporter.export(&doc).await.ok_or(AppError::Export)?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
