//! Text primitives shared by every field verifier.
//!
//! All comparisons in the engine run on [`normalize`]d text so that case,
//! punctuation and spacing differences between the application form and the
//! OCR output never cause a mismatch on their own.

use once_cell::sync::Lazy;
use regex::Regex;
use strsim::levenshtein;

/// Anything that is not a word character, whitespace, `%`, `.` or `-`.
static IGNORABLE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s%.\-]").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// First decimal number, e.g. "45" in "45% Alc./Vol. (90 Proof)".
static DECIMAL_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

/// Normalize text for comparison.
///
/// Lowercases, drops ignorable punctuation, collapses whitespace runs to a
/// single space and trims. Punctuation is dropped before whitespace is
/// collapsed so that "Tom & Jerry" and "Tom Jerry" normalize identically.
/// Keep this order: collapsing first would leave a double space behind.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = IGNORABLE_CHARS.replace_all(&lower, "");
    WHITESPACE_RUN.replace_all(stripped.trim(), " ").into_owned()
}

/// Extract the first decimal number from raw text ("750 mL" -> 750.0).
pub fn extract_number(text: &str) -> Option<f64> {
    DECIMAL_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Edit-distance similarity as a percentage in `[0, 100]`.
///
/// Two empty strings are 100% similar.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100.0;
    }
    let distance = levenshtein(a, b) as f64;
    ((1.0 - distance / max_len as f64) * 100.0).clamp(0.0, 100.0)
}
