use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::ocr::VisionOcrClient;
use crate::services::validation::MatchThresholds;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub ocr: Arc<VisionOcrClient>,
    pub thresholds: MatchThresholds,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(ocr: VisionOcrClient, thresholds: MatchThresholds, max_batch_size: usize) -> Self {
        Self {
            ocr: Arc::new(ocr),
            thresholds,
            max_batch_size,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let ocr = VisionOcrClient::new(
            config.ocr_endpoint.clone(),
            config.ocr_model.clone(),
            config.ocr_api_key.clone(),
        );
        Self::new(ocr, config.thresholds(), config.max_batch_size)
    }
}
