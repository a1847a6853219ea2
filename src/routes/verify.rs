use std::time::{Duration, Instant};

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use garde::Validate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::models::verification::{
    AnalyzeRequest, BatchItemResult, BatchVerifyRequest, BatchVerifyResponse, ScanFormRequest,
    ScanFormResponse, VerificationReport, VerificationResponse, VerifyRequest,
};
use crate::routes::ApiError;
use crate::services::validation;

/// POST /api/v1/verify — Verify claimed label values against an OCR result.
pub async fn submit_verification(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerificationResponse>, ApiError> {
    request.validate()?;

    let request_id = Uuid::new_v4();
    let report = run_verification(&state, &request);

    info!(
        request_id = %request_id,
        overall_match = report.overall_match,
        discrepancies = ?report.discrepancies,
        "Label verified"
    );

    Ok(Json(VerificationResponse {
        request_id,
        verified_at: Utc::now(),
        result: report,
    }))
}

/// POST /api/v1/verify/batch — Verify many label/OCR pairs independently.
///
/// An item that does not parse or fails validation gets its own error entry;
/// the rest of the batch is still verified.
pub async fn verify_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchVerifyRequest>,
) -> Result<Json<BatchVerifyResponse>, ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::EmptyBatch);
    }
    if request.items.len() > state.max_batch_size {
        return Err(ApiError::BatchTooLarge {
            max: state.max_batch_size,
            got: request.items.len(),
        });
    }

    let request_id = Uuid::new_v4();
    let results: Vec<BatchItemResult> = request
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let brand_name = item
                .pointer("/expected/brandName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match parse_batch_item(item) {
                Ok(verify_request) => BatchItemResult {
                    index,
                    brand_name,
                    result: Some(run_verification(&state, &verify_request)),
                    error: None,
                },
                Err(e) => BatchItemResult {
                    index,
                    brand_name,
                    result: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    let passed = results
        .iter()
        .filter(|r| r.result.as_ref().is_some_and(|report| report.overall_match))
        .count();
    let invalid = results.iter().filter(|r| r.error.is_some()).count();

    info!(
        request_id = %request_id,
        items = results.len(),
        passed = passed,
        invalid = invalid,
        "Batch verified"
    );

    Ok(Json(BatchVerifyResponse {
        request_id,
        results,
    }))
}

/// POST /api/v1/analyze — Run OCR on a label image, then verify it.
pub async fn analyze_label(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<VerificationResponse>, ApiError> {
    request.validate()?;
    if request.image_base64.trim().is_empty() {
        return Err(ApiError::MissingImage);
    }
    if !state.ocr.is_configured() {
        return Err(ApiError::OcrNotConfigured);
    }

    let request_id = Uuid::new_v4();

    let ocr_start = Instant::now();
    let extracted = match state.ocr.extract_label_fields(&request.image_base64).await {
        Ok(extracted) => extracted,
        Err(e) => {
            metrics::counter!("ocr_requests_failed_total").increment(1);
            warn!(request_id = %request_id, error = %e, "OCR extraction failed");
            return Err(e.into());
        }
    };

    info!(
        request_id = %request_id,
        ocr_duration_ms = ocr_start.elapsed().as_millis() as u64,
        brand = extracted.brand_name.as_deref().unwrap_or(""),
        "OCR extraction complete"
    );

    let verify_request = VerifyRequest {
        expected: request.form_data,
        extracted,
    };
    let report = run_verification(&state, &verify_request);

    info!(
        request_id = %request_id,
        overall_match = report.overall_match,
        discrepancies = ?report.discrepancies,
        "Label analyzed"
    );

    Ok(Json(VerificationResponse {
        request_id,
        verified_at: Utc::now(),
        result: report,
    }))
}

/// POST /api/v1/scan-form — Read the claimed values off an application form image.
pub async fn scan_form(
    State(state): State<AppState>,
    Json(request): Json<ScanFormRequest>,
) -> Result<Json<ScanFormResponse>, ApiError> {
    if request.image_base64.trim().is_empty() {
        return Err(ApiError::MissingImage);
    }
    if !state.ocr.is_configured() {
        return Err(ApiError::OcrNotConfigured);
    }

    let request_id = Uuid::new_v4();

    let ocr_start = Instant::now();
    let extracted = match state.ocr.extract_label_fields(&request.image_base64).await {
        Ok(extracted) => extracted,
        Err(e) => {
            metrics::counter!("ocr_requests_failed_total").increment(1);
            warn!(request_id = %request_id, error = %e, "Form scan failed");
            return Err(e.into());
        }
    };

    info!(
        request_id = %request_id,
        ocr_duration_ms = ocr_start.elapsed().as_millis() as u64,
        "Form scanned"
    );

    Ok(Json(ScanFormResponse {
        request_id,
        result: extracted.into(),
    }))
}

fn parse_batch_item(item: &Value) -> Result<VerifyRequest, ApiError> {
    let request = VerifyRequest::deserialize(item)?;
    request.validate()?;
    Ok(request)
}

fn run_verification(state: &AppState, request: &VerifyRequest) -> VerificationReport {
    let start = Instant::now();
    let report =
        validation::verify_label_with(&request.expected, &request.extracted, &state.thresholds);
    record_metrics(&report, start.elapsed());
    report
}

fn record_metrics(report: &VerificationReport, elapsed: Duration) {
    let outcome = if report.overall_match { "match" } else { "mismatch" };
    metrics::counter!("label_verifications_total", "outcome" => outcome).increment(1);
    metrics::histogram!("label_verification_seconds").record(elapsed.as_secs_f64());
    for field in &report.discrepancies {
        metrics::counter!("label_verification_discrepancies_total", "field" => field.to_string())
            .increment(1);
    }
}
