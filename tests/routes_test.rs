//! Handler-level tests for the HTTP API (no network, no OCR calls).

mod fixtures;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use fixtures::{old_tom_expected, old_tom_extracted};
use label_verify::app_state::AppState;
use label_verify::models::verification::{
    AnalyzeRequest, BatchVerifyRequest, ScanFormRequest, VerifyRequest,
};
use label_verify::routes::health::health_check;
use label_verify::routes::verify::{analyze_label, scan_form, submit_verification, verify_batch};
use label_verify::routes::ApiError;
use label_verify::services::ocr::VisionOcrClient;
use label_verify::{ExpectedLabelData, FieldName, MatchThresholds};

fn test_state(max_batch_size: usize) -> AppState {
    let ocr = VisionOcrClient::new(
        "http://127.0.0.1:9/v1/chat/completions".to_string(),
        "gpt-4o".to_string(),
        None,
    );
    AppState::new(ocr, MatchThresholds::default(), max_batch_size)
}

fn old_tom_request() -> VerifyRequest {
    VerifyRequest {
        expected: old_tom_expected(),
        extracted: old_tom_extracted(),
    }
}

fn batch_item(request: VerifyRequest) -> Value {
    serde_json::to_value(request).unwrap()
}

#[tokio::test]
async fn test_verify_returns_report() {
    let Json(response) = submit_verification(State(test_state(10)), Json(old_tom_request()))
        .await
        .unwrap();

    assert!(response.result.overall_match);
    assert!(response.result.discrepancies.is_empty());
}

#[tokio::test]
async fn test_verify_rejects_blank_claims() {
    let mut request = old_tom_request();
    request.expected.brand_name = "   ".to_string();

    let err = submit_verification(State(test_state(10)), Json(request))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_uses_configured_thresholds() {
    let mut request = old_tom_request();
    request.extracted.alcohol_content = Some("45.3%".to_string());

    let Json(strict) = submit_verification(State(test_state(10)), Json(request.clone()))
        .await
        .unwrap();
    assert_eq!(strict.result.discrepancies, vec![FieldName::AlcoholContent]);

    let mut state = test_state(10);
    state.thresholds.abv_tolerance = 0.3;
    let Json(loose) = submit_verification(State(state), Json(request)).await.unwrap();
    assert!(loose.result.overall_match);
}

#[tokio::test]
async fn test_verify_request_wire_format() {
    let body = json!({
        "expected": {
            "brandName": "Old Tom Distillery",
            "productType": "Bourbon",
            "alcoholContent": "45%",
            "netContents": "750 mL"
        },
        "extracted": {
            "brandName": "Old Tom Distillery",
            "alcoholContent": null,
            "netContents": "750 mL",
            "fullText": "OLD TOM DISTILLERY BOURBON 750 mL"
        }
    });
    let request: VerifyRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.extracted.product_type, None);
    assert!(!request.extracted.government_warning);

    let Json(response) = submit_verification(State(test_state(10)), Json(request))
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("requestId").is_some());
    assert!(json.get("verifiedAt").is_some());
    assert_eq!(
        json["result"]["discrepancies"],
        json!(["alcoholContent", "governmentWarning"])
    );
}

#[tokio::test]
async fn test_batch_verifies_each_item() {
    let mut invalid = old_tom_request();
    invalid.expected.net_contents = String::new();

    let mut mismatched = old_tom_request();
    mismatched.extracted.net_contents = Some("1 L".to_string());

    let request = BatchVerifyRequest {
        items: vec![
            batch_item(old_tom_request()),
            batch_item(invalid),
            batch_item(mismatched),
        ],
    };
    let Json(response) = verify_batch(State(test_state(3)), Json(request)).await.unwrap();

    assert_eq!(response.results.len(), 3);

    let first = &response.results[0];
    assert_eq!(first.index, 0);
    assert_eq!(first.brand_name, "Old Tom Distillery");
    assert!(first.result.as_ref().unwrap().overall_match);

    assert!(response.results[1].result.is_none());
    assert!(response.results[1].error.is_some());

    let third = response.results[2].result.as_ref().unwrap();
    assert_eq!(third.discrepancies, vec![FieldName::NetContents]);
}

#[tokio::test]
async fn test_batch_reports_malformed_item_alone() {
    let mut malformed = batch_item(old_tom_request());
    malformed["extracted"]
        .as_object_mut()
        .unwrap()
        .remove("fullText");

    let request = BatchVerifyRequest {
        items: vec![malformed, json!("not an item"), batch_item(old_tom_request())],
    };
    let Json(response) = verify_batch(State(test_state(3)), Json(request)).await.unwrap();

    let first = &response.results[0];
    assert_eq!(first.brand_name, "Old Tom Distillery");
    assert!(first.result.is_none());
    assert!(first.error.as_deref().unwrap().contains("fullText"));

    assert_eq!(response.results[1].brand_name, "");
    assert!(response.results[1].error.is_some());

    assert!(response.results[2].result.as_ref().unwrap().overall_match);
}

#[test]
fn test_batch_body_keeps_items_raw() {
    let body = json!({ "items": [{ "expected": {}, "extracted": {} }] });
    let request: BatchVerifyRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.items.len(), 1);
}

#[tokio::test]
async fn test_batch_limits() {
    let empty = BatchVerifyRequest { items: Vec::new() };
    let err = verify_batch(State(test_state(2)), Json(empty)).await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyBatch));

    let too_many = BatchVerifyRequest {
        items: vec![batch_item(old_tom_request()); 3],
    };
    let err = verify_batch(State(test_state(2)), Json(too_many)).await.unwrap_err();
    assert!(matches!(err, ApiError::BatchTooLarge { max: 2, got: 3 }));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_requires_image() {
    let request = AnalyzeRequest {
        form_data: old_tom_expected(),
        image_base64: "  ".to_string(),
    };
    let err = analyze_label(State(test_state(10)), Json(request)).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingImage));
}

#[tokio::test]
async fn test_analyze_without_ocr_key_is_unavailable() {
    let request = AnalyzeRequest {
        form_data: old_tom_expected(),
        image_base64: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    };
    let err = analyze_label(State(test_state(10)), Json(request)).await.unwrap_err();
    assert!(matches!(err, ApiError::OcrNotConfigured));
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_scan_form_requires_image() {
    let request = ScanFormRequest {
        image_base64: String::new(),
    };
    let err = scan_form(State(test_state(10)), Json(request)).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingImage));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_form_without_ocr_key_is_unavailable() {
    let request: ScanFormRequest =
        serde_json::from_value(json!({ "imageBase64": "iVBORw0KGgo=" })).unwrap();
    let err = scan_form(State(test_state(10)), Json(request)).await.unwrap_err();
    assert!(matches!(err, ApiError::OcrNotConfigured));
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_scanned_form_fills_missing_fields_with_empty_strings() {
    let mut extracted = old_tom_extracted();
    extracted.product_type = None;
    extracted.net_contents = None;

    let form: ExpectedLabelData = extracted.into();
    assert_eq!(
        serde_json::to_value(&form).unwrap(),
        json!({
            "brandName": "Old Tom Distillery",
            "productType": "",
            "alcoholContent": "45% Alc./Vol. (90 Proof)",
            "netContents": ""
        })
    );
}

#[tokio::test]
async fn test_health_reports_missing_ocr() {
    let Json(health) = health_check(State(test_state(10))).await;
    assert_eq!(health.status, "degraded");
    assert_eq!(health.checks.verification_engine.status, "ok");
    assert_eq!(health.checks.ocr.status, "not_configured");
}

#[test]
fn test_error_response_status() {
    assert_eq!(ApiError::EmptyBatch.into_response().status(), StatusCode::BAD_REQUEST);
    let malformed = serde_json::from_str::<VerifyRequest>("{}").unwrap_err();
    assert_eq!(
        ApiError::from(malformed).into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ApiError::OcrNotConfigured.into_response().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
