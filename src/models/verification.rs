use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::label::{ExpectedLabelData, ExtractedLabelData, FieldName};

/// Outcome of comparing one claimed field against the label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldVerdict {
    #[serde(rename = "match")]
    pub matches: bool,
    pub expected: String,
    pub found: Option<String>,
    /// 0-100.
    pub confidence: u8,
}

impl FieldVerdict {
    /// A non-match with zero confidence, used whenever data is absent or unreadable.
    pub fn unreadable(expected: impl Into<String>, found: Option<String>) -> Self {
        Self {
            matches: false,
            expected: expected.into(),
            found,
            confidence: 0,
        }
    }
}

/// Outcome of the government health warning phrase check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WarningVerdict {
    pub present: bool,
    pub confidence: u8,
    /// The verbatim 27 CFR 16.21 statement was found.
    pub exact: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing_phrases: Vec<String>,
    pub text: String,
}

/// Per-field verdicts of a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
    pub brand_name: FieldVerdict,
    pub product_type: FieldVerdict,
    pub alcohol_content: FieldVerdict,
    pub net_contents: FieldVerdict,
    pub government_warning: WarningVerdict,
}

impl VerificationDetails {
    /// Whether the named field passed. The warning passes when it is present.
    pub fn passed(&self, field: FieldName) -> bool {
        match field {
            FieldName::BrandName => self.brand_name.matches,
            FieldName::ProductType => self.product_type.matches,
            FieldName::AlcoholContent => self.alcohol_content.matches,
            FieldName::NetContents => self.net_contents.matches,
            FieldName::GovernmentWarning => self.government_warning.present,
        }
    }
}

/// Full result of verifying one label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub overall_match: bool,
    pub details: VerificationDetails,
    pub discrepancies: Vec<FieldName>,
    pub extracted_text: String,
}

// ── API payloads ─────────────────────────────────────────────────────

/// POST /api/v1/verify body: claimed values plus an OCR result obtained elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[garde(dive)]
    pub expected: ExpectedLabelData,

    #[garde(skip)]
    pub extracted: ExtractedLabelData,
}

/// POST /api/v1/verify/batch body.
///
/// Items stay raw JSON so one malformed item is reported on its own instead
/// of rejecting the whole body.
#[derive(Debug, Deserialize)]
pub struct BatchVerifyRequest {
    pub items: Vec<serde_json::Value>,
}

/// POST /api/v1/analyze body: claimed values plus the label image for OCR.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[garde(dive)]
    pub form_data: ExpectedLabelData,

    /// Base64 image, either bare or as a `data:image/...;base64,` URL.
    #[garde(skip)]
    pub image_base64: String,
}

/// POST /api/v1/scan-form body: an image of the application form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFormRequest {
    #[serde(default)]
    pub image_base64: String,
}

/// Form values read off the application image, ready to prefill a verify request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFormResponse {
    pub request_id: Uuid,
    pub result: ExpectedLabelData,
}

/// Response for a single verification.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub request_id: Uuid,
    pub verified_at: DateTime<Utc>,
    pub result: VerificationReport,
}

/// One entry of a batch response; exactly one of `result` and `error` is set.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    pub brand_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerificationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchVerifyResponse {
    pub request_id: Uuid,
    pub results: Vec<BatchItemResult>,
}
