//! Government health warning check (27 CFR 16.21).

use crate::models::verification::WarningVerdict;
use crate::services::text::normalize;
use crate::services::ttb_standards::{GOVERNMENT_WARNING_TEXT, REQUIRED_WARNING_PHRASES, WARNING_HEADER};

const STATUS_EXACT: &str = "Exact TTB-compliant warning text detected";
const STATUS_COMPLETE: &str = "All required warning phrases present";
const STATUS_INCOMPLETE: &str = "Government warning present but incomplete";
const STATUS_MISSING: &str = "Government warning missing";

/// Check the label text for the mandatory warning statement.
///
/// Phrase search is case- and whitespace-insensitive, so line breaks inside a
/// phrase on the label do not hide it. Only the "GOVERNMENT WARNING" header
/// gates `present`; the other phrases feed `confidence` and `missing_phrases`.
pub fn verify_government_warning(full_text: &str) -> WarningVerdict {
    let text = normalize(full_text);

    let mut header_found = false;
    let mut found_count = 0usize;
    let mut missing_phrases = Vec::new();

    for phrase in REQUIRED_WARNING_PHRASES {
        if text.contains(&normalize(phrase.needle)) {
            found_count += 1;
            if phrase == WARNING_HEADER {
                header_found = true;
            }
        } else {
            missing_phrases.push(phrase.label.to_string());
        }
    }

    let confidence =
        (found_count as f64 / REQUIRED_WARNING_PHRASES.len() as f64 * 100.0).round() as u8;
    let exact = text.contains(&normalize(GOVERNMENT_WARNING_TEXT));

    let status = if exact {
        STATUS_EXACT
    } else if header_found && missing_phrases.is_empty() {
        STATUS_COMPLETE
    } else if header_found {
        STATUS_INCOMPLETE
    } else {
        STATUS_MISSING
    };

    WarningVerdict {
        present: header_found,
        confidence,
        exact,
        missing_phrases,
        text: status.to_string(),
    }
}
