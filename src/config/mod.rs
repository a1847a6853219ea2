use serde::Deserialize;

use crate::services::validation::{
    MatchThresholds, ABV_TOLERANCE, FUZZY_MATCH_THRESHOLD, NET_CONTENTS_TOLERANCE,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// API key for the vision OCR service. `/api/v1/analyze` is disabled without it.
    #[serde(default)]
    pub ocr_api_key: Option<String>,

    /// Vision model name
    #[serde(default = "default_ocr_model")]
    pub ocr_model: String,

    /// OpenAI-compatible chat completions URL
    #[serde(default = "default_ocr_endpoint")]
    pub ocr_endpoint: String,

    /// Minimum brand/class confidence (0-100) to count as a match
    #[serde(default = "default_fuzzy_match_threshold")]
    pub fuzzy_match_threshold: u8,

    /// ABV tolerance in percentage points
    #[serde(default = "default_abv_tolerance")]
    pub abv_tolerance: f64,

    /// Net contents tolerance in the label's own unit
    #[serde(default = "default_net_contents_tolerance")]
    pub net_contents_tolerance: f64,

    /// Maximum number of items per batch request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Request body limit in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_ocr_model() -> String {
    "gpt-4o".to_string()
}

fn default_ocr_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_fuzzy_match_threshold() -> u8 {
    FUZZY_MATCH_THRESHOLD
}

fn default_abv_tolerance() -> f64 {
    ABV_TOLERANCE
}

fn default_net_contents_tolerance() -> f64 {
    NET_CONTENTS_TOLERANCE
}

fn default_max_batch_size() -> usize {
    100
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Build from an explicit key/value list (used by tests).
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            fuzzy_match: self.fuzzy_match_threshold,
            abv_tolerance: self.abv_tolerance,
            net_contents_tolerance: self.net_contents_tolerance,
        }
    }
}
