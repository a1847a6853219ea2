//! TTB labeling reference data.
//!
//! Health warning statement per 27 CFR 16.21 and the volume units accepted in
//! net contents statements (27 CFR 4.37, 5.203, 7.27).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::services::text::normalize;

// ── Government Warning (27 CFR 16.21) ───────────────────────────────────

/// Mandatory health warning statement, official wording.
pub const GOVERNMENT_WARNING_TEXT: &str = "GOVERNMENT WARNING: (1) According to the Surgeon General, \
women should not drink alcoholic beverages during pregnancy because of the risk of birth defects. \
(2) Consumption of alcoholic beverages impairs your ability to drive a car or operate machinery, \
and may cause health problems.";

/// A fragment of the warning statement that must appear on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPhrase {
    /// Reported in `missingPhrases`.
    pub label: &'static str,
    /// Searched for in the label text. "pregnan" covers both "pregnant" and
    /// the official "pregnancy".
    pub needle: &'static str,
}

/// Phrase that decides whether a warning is present at all.
pub const WARNING_HEADER: RequiredPhrase = RequiredPhrase {
    label: "GOVERNMENT WARNING",
    needle: "GOVERNMENT WARNING",
};

/// Required warning fragments, in reporting order.
pub const REQUIRED_WARNING_PHRASES: [RequiredPhrase; 6] = [
    WARNING_HEADER,
    RequiredPhrase { label: "Surgeon General", needle: "Surgeon General" },
    RequiredPhrase { label: "pregnant", needle: "pregnan" },
    RequiredPhrase { label: "birth defects", needle: "birth defects" },
    RequiredPhrase { label: "drive", needle: "drive" },
    RequiredPhrase { label: "health problems", needle: "health problems" },
];

// ── Net Contents Units ───────────────────────────────────────────────────

/// Volume unit recognised in a net contents statement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VolumeUnit {
    Ml,
    L,
    Oz,
    Gal,
}

/// Unit patterns, matched in order against normalized text. A unit may follow
/// its number directly ("750ml"), but `l` never matches inside `ml`.
static UNIT_PATTERNS: Lazy<Vec<(Regex, VolumeUnit)>> = Lazy::new(|| {
    [
        (r"(?:\b|[0-9])(?:ml|millilit(?:er|re)s?)\b", VolumeUnit::Ml),
        (r"(?:\b|[0-9])(?:l|lit(?:er|re)s?)\b", VolumeUnit::L),
        (r"(?:\b|[0-9])(?:oz|fl\s*oz|fluid\s*ounces?)\b", VolumeUnit::Oz),
        (r"(?:\b|[0-9])(?:gal|gallons?)\b", VolumeUnit::Gal),
    ]
    .into_iter()
    .map(|(pattern, unit)| (Regex::new(pattern).unwrap(), unit))
    .collect()
});

/// Extract the volume unit from a net contents string ("750 mL" -> `Ml`).
pub fn extract_unit(text: &str) -> Option<VolumeUnit> {
    let normalized = normalize(text);
    UNIT_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&normalized))
        .map(|(_, unit)| *unit)
}
