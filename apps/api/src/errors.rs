use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::scenario::FieldError;
use crate::models::ValidationError;
use crate::onboarding::PreferenceError;

pub const SIMULATION_FAILED_MESSAGE: &str = "Failed to generate simulation. Please try again.";
pub const EXPORT_FAILED_MESSAGE: &str = "Could not generate PDF. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("All PDF strategies failed")]
    Export,

    #[error("Preference store error: {0}")]
    Preferences(#[from] PreferenceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Unreadable bodies (bad JSON, wrong field types, wrong content type) are
/// reported as a validation failure on the `body` field.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationError {
            fields: vec![FieldError {
                field: "body",
                message: rejection.body_text(),
            }],
        })
    }
}

/// `Json` extractor whose rejection is an `AppError`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => {
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": e.to_string(),
                        "fields": e.fields,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Simulation(msg) => {
                tracing::error!("Simulation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SIMULATION_ERROR",
                    SIMULATION_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Export => {
                tracing::error!("PDF export failed with every strategy");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    EXPORT_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Preferences(e) => {
                tracing::error!("Preference store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PREFERENCES_ERROR",
                    "Could not save your preferences".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
