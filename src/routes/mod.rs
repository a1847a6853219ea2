use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::app_state::AppState;
use crate::services::ocr::OcrError;

pub mod health;
pub mod metrics;
pub mod verify;

/// API routes, without the metrics endpoint or middleware layers.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/verify", post(verify::submit_verification))
        .route("/api/v1/verify/batch", post(verify::verify_batch))
        .route("/api/v1/analyze", post(verify::analyze_label))
        .route("/api/v1/scan-form", post(verify::scan_form))
        .with_state(state)
}

/// JSON error body returned by every API route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid label data: {0}")]
    Validation(#[from] garde::Report),

    #[error("Invalid item: {0}")]
    MalformedItem(#[from] serde_json::Error),

    #[error("No items provided")]
    EmptyBatch,

    #[error("Maximum {max} items allowed, got {got}")]
    BatchTooLarge { max: usize, got: usize },

    #[error("No image data provided")]
    MissingImage,

    #[error("OCR service is not configured")]
    OcrNotConfigured,

    #[error("{0}")]
    Ocr(OcrError),
}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::NotConfigured => ApiError::OcrNotConfigured,
            other => ApiError::Ocr(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MalformedItem(_)
            | ApiError::EmptyBatch
            | ApiError::BatchTooLarge { .. }
            | ApiError::MissingImage => StatusCode::BAD_REQUEST,
            ApiError::OcrNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Ocr(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
