use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub verification_engine: ComponentHealth,
    pub ocr: ComponentHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
}

/// GET /health — liveness plus OCR configuration status.
///
/// A missing OCR key only disables `/api/v1/analyze`, so it reports
/// "degraded" rather than failing the check.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ocr_status = if state.ocr.is_configured() {
        "ok"
    } else {
        "not_configured"
    };

    Json(HealthResponse {
        status: if state.ocr.is_configured() {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            verification_engine: ComponentHealth {
                status: "ok".to_string(),
            },
            ocr: ComponentHealth {
                status: ocr_status.to_string(),
            },
        },
    })
}
