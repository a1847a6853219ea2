use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::label::{ExpectedLabelData, ExtractedLabelData, FieldName};
use crate::models::verification::{FieldVerdict, VerificationDetails, VerificationReport};
use crate::services::text::{extract_number, normalize, similarity};
use crate::services::ttb_standards::extract_unit;
use crate::services::warning::verify_government_warning;

/// Minimum confidence (0-100) for brand name and class/type to match.
pub const FUZZY_MATCH_THRESHOLD: u8 = 70;

/// ABV tolerance in percentage points, inclusive.
pub const ABV_TOLERANCE: f64 = 0.1;

/// Net contents tolerance in the statement's own unit, exclusive.
pub const NET_CONTENTS_TOLERANCE: f64 = 0.1;

/// Confidence lost per percentage point of ABV difference.
pub const ABV_PENALTY_PER_POINT: f64 = 20.0;

/// Multiplier applied to the net contents relative error (in percent).
pub const NET_CONTENTS_PENALTY_FACTOR: f64 = 2.0;

/// Confidence when one class/type contains the other or appears in the label text.
pub const PARTIAL_MATCH_CONFIDENCE: u8 = 90;

/// Reported as the found value when a field was located only in the full text.
pub const FOUND_IN_LABEL_TEXT: &str = "Found in label text";

/// Absorbs binary float noise, e.g. `45.1 - 45.0 = 0.10000000000000142`.
const FLOAT_EPSILON: f64 = 1e-9;

/// Overridable matching constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    pub fuzzy_match: u8,
    pub abv_tolerance: f64,
    pub net_contents_tolerance: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            fuzzy_match: FUZZY_MATCH_THRESHOLD,
            abv_tolerance: ABV_TOLERANCE,
            net_contents_tolerance: NET_CONTENTS_TOLERANCE,
        }
    }
}

/// Verify label claims against an OCR result with the default thresholds.
///
/// Every field is always verified, so the report lists all discrepancies in
/// one pass. Unreadable or absent data is a non-match with confidence 0,
/// never an error.
pub fn verify_label(
    expected: &ExpectedLabelData,
    extracted: &ExtractedLabelData,
) -> VerificationReport {
    verify_label_with(expected, extracted, &MatchThresholds::default())
}

/// Verify label claims against an OCR result.
pub fn verify_label_with(
    expected: &ExpectedLabelData,
    extracted: &ExtractedLabelData,
    thresholds: &MatchThresholds,
) -> VerificationReport {
    let details = VerificationDetails {
        brand_name: verify_brand_name(&expected.brand_name, extracted, thresholds),
        product_type: verify_product_type(&expected.product_type, extracted, thresholds),
        alcohol_content: verify_alcohol_content(&expected.alcohol_content, extracted, thresholds),
        net_contents: verify_net_contents(&expected.net_contents, extracted, thresholds),
        government_warning: verify_government_warning(&extracted.full_text),
    };

    if extracted.government_warning != details.government_warning.present {
        debug!(
            ocr_flag = extracted.government_warning,
            phrase_check = details.government_warning.present,
            "OCR warning flag disagrees with phrase check"
        );
    }

    let discrepancies: Vec<FieldName> = FieldName::ALL
        .into_iter()
        .filter(|field| !details.passed(*field))
        .collect();

    debug!(
        overall_match = discrepancies.is_empty(),
        discrepancies = discrepancies.len(),
        "Label verification complete"
    );

    VerificationReport {
        overall_match: discrepancies.is_empty(),
        details,
        discrepancies,
        extracted_text: extracted.full_text.clone(),
    }
}

// ── Brand Name ───────────────────────────────────────────────────────

/// Brand must appear in the OCR brand or anywhere in the label text;
/// otherwise it is scored by edit distance against the OCR brand. A claim
/// with nothing left after normalization scores 0.
pub fn verify_brand_name(
    expected: &str,
    extracted: &ExtractedLabelData,
    thresholds: &MatchThresholds,
) -> FieldVerdict {
    let wanted = normalize(expected);
    let full_text = normalize(&extracted.full_text);
    let ocr_brand = extracted.brand_name.as_deref().map(normalize);

    let in_brand = ocr_brand.as_deref().is_some_and(|b| contains(b, &wanted));
    let in_full_text = contains(&full_text, &wanted);

    let confidence = if wanted.is_empty() {
        0
    } else if in_brand || in_full_text {
        100
    } else {
        ocr_brand
            .as_deref()
            .map_or(0, |b| to_confidence(similarity(&wanted, b)))
    };

    FieldVerdict {
        matches: confidence >= thresholds.fuzzy_match,
        expected: expected.trim().to_string(),
        found: found_value(extracted.brand_name.as_deref(), in_full_text),
        confidence,
    }
}

// ── Class/Type ───────────────────────────────────────────────────────

/// Exact match scores 100, containment either way or presence in the label
/// text scores 90, anything else falls back to edit distance. An empty
/// normalized claim scores 0.
pub fn verify_product_type(
    expected: &str,
    extracted: &ExtractedLabelData,
    thresholds: &MatchThresholds,
) -> FieldVerdict {
    let wanted = normalize(expected);
    let full_text = normalize(&extracted.full_text);
    let ocr_type = extracted.product_type.as_deref().map(normalize);

    let exact = ocr_type
        .as_deref()
        .is_some_and(|t| !wanted.is_empty() && t == wanted);
    let partial = ocr_type
        .as_deref()
        .is_some_and(|t| !t.is_empty() && (contains(t, &wanted) || contains(&wanted, t)));
    let in_full_text = contains(&full_text, &wanted);

    let confidence = if wanted.is_empty() {
        0
    } else if exact {
        100
    } else if partial || in_full_text {
        PARTIAL_MATCH_CONFIDENCE
    } else {
        ocr_type
            .as_deref()
            .map_or(0, |t| to_confidence(similarity(&wanted, t)))
    };

    FieldVerdict {
        matches: confidence >= thresholds.fuzzy_match,
        expected: expected.trim().to_string(),
        found: found_value(extracted.product_type.as_deref(), in_full_text),
        confidence,
    }
}

// ── ABV ──────────────────────────────────────────────────────────────

/// Match is decided by the ABV tolerance alone. Confidence is informational
/// and can sit below the fuzzy threshold for a matching value.
pub fn verify_alcohol_content(
    expected: &str,
    extracted: &ExtractedLabelData,
    thresholds: &MatchThresholds,
) -> FieldVerdict {
    let Some(expected_abv) = extract_number(expected) else {
        return FieldVerdict::unreadable(expected.trim(), None);
    };
    let expected_display = format!("{}%", expected_abv);

    let Some(raw) = extracted.alcohol_content.as_deref() else {
        return FieldVerdict::unreadable(expected_display, None);
    };
    let Some(found_abv) = extract_number(raw) else {
        return FieldVerdict::unreadable(expected_display, Some(raw.to_string()));
    };

    let diff = (expected_abv - found_abv).abs();
    let confidence = if diff < FLOAT_EPSILON {
        100
    } else {
        to_confidence(100.0 - diff * ABV_PENALTY_PER_POINT)
    };

    FieldVerdict {
        matches: diff <= thresholds.abv_tolerance + FLOAT_EPSILON,
        expected: expected_display,
        found: Some(format!("{}%", found_abv)),
        confidence,
    }
}

// ── Net Contents ─────────────────────────────────────────────────────

/// Units must be the same token; amounts are not converted between units.
pub fn verify_net_contents(
    expected: &str,
    extracted: &ExtractedLabelData,
    thresholds: &MatchThresholds,
) -> FieldVerdict {
    let (Some(expected_amount), Some(expected_unit)) =
        (extract_number(expected), extract_unit(expected))
    else {
        return FieldVerdict::unreadable(expected.trim(), None);
    };

    let Some(raw) = extracted.net_contents.as_deref() else {
        return FieldVerdict::unreadable(expected.trim(), None);
    };
    let (Some(found_amount), Some(found_unit)) = (extract_number(raw), extract_unit(raw)) else {
        return FieldVerdict::unreadable(expected.trim(), Some(raw.to_string()));
    };

    let diff = (expected_amount - found_amount).abs();
    let units_match = expected_unit == found_unit;
    let numbers_match = diff < thresholds.net_contents_tolerance;

    let confidence = if !units_match {
        0
    } else if diff < FLOAT_EPSILON {
        100
    } else if expected_amount.abs() < FLOAT_EPSILON {
        0
    } else {
        let relative_error = diff / expected_amount * 100.0;
        to_confidence(100.0 - relative_error * NET_CONTENTS_PENALTY_FACTOR)
    };

    FieldVerdict {
        matches: units_match && numbers_match,
        expected: expected.trim().to_string(),
        found: Some(raw.to_string()),
        confidence,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Substring test where an empty needle never matches.
fn contains(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

fn found_value(ocr_value: Option<&str>, in_full_text: bool) -> Option<String> {
    ocr_value
        .map(str::to_string)
        .or_else(|| in_full_text.then(|| FOUND_IN_LABEL_TEXT.to_string()))
}

fn to_confidence(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}
