use reqwest::Client;
use serde::Deserialize;

use crate::models::label::ExtractedLabelData;

/// Labels yielding less recognised text than this are treated as unreadable.
const MIN_FULL_TEXT_CHARS: usize = 10;

const EXTRACTION_PROMPT: &str = r#"You are analyzing an alcohol beverage label. Extract the following information and return it as JSON:

1. brandName: The brand name/distillery name (e.g., "Old Tom Distillery")
2. productType: The product class/type (e.g., "Kentucky Straight Bourbon Whiskey", "IPA", "Cabernet Sauvignon")
3. alcoholContent: The alcohol percentage/ABV (e.g., "45%", "5.5% ABV", "40% Alc./Vol.")
4. netContents: The volume/net contents (e.g., "750 mL", "12 fl oz", "1 L")
5. governmentWarning: Boolean - Does the label contain a "GOVERNMENT WARNING" statement?
6. fullText: All text visible on the label (verbatim)

Return ONLY valid JSON in this exact format:
{
  "brandName": "string or null",
  "productType": "string or null",
  "alcoholContent": "string or null",
  "netContents": "string or null",
  "governmentWarning": boolean,
  "fullText": "string"
}

If any field is not found or unclear, use null for that field. Be precise and extract exact text as it appears."#;

/// Client for an OpenAI-compatible vision chat completions endpoint.
///
/// Performs a single attempt per call; retry and rate limiting belong to the
/// caller.
pub struct VisionOcrClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl VisionOcrClient {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            model,
            // An empty key in the environment means "not configured".
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a label image to the vision model and extract structured fields.
    pub async fn extract_label_fields(
        &self,
        image_base64: &str,
    ) -> Result<ExtractedLabelData, OcrError> {
        let api_key = self.api_key.as_deref().ok_or(OcrError::NotConfigured)?;

        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": EXTRACTION_PROMPT },
                    { "type": "image_url", "image_url": { "url": image_data_url(image_base64) } }
                ]
            }],
            "max_tokens": 1000,
            "temperature": 0.1
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OcrError::EmptyResponse)?;

        parse_extraction(&content)
    }
}

/// Wrap bare base64 as a JPEG data URL; data URLs pass through unchanged.
pub fn image_data_url(image_base64: &str) -> String {
    if image_base64.starts_with("data:") {
        image_base64.to_string()
    } else {
        format!("data:image/jpeg;base64,{}", image_base64)
    }
}

/// Parse the model's reply, tolerating a surrounding markdown code fence.
pub fn parse_extraction(content: &str) -> Result<ExtractedLabelData, OcrError> {
    let cleaned = content.replace("```json", "").replace("```", "");
    let extracted: ExtractedLabelData = serde_json::from_str(cleaned.trim())?;

    if extracted.full_text.trim().chars().count() < MIN_FULL_TEXT_CHARS {
        return Err(OcrError::InsufficientText);
    }

    Ok(extracted)
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR service is not configured (missing API key)")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("OCR service returned no content")]
    EmptyResponse,

    #[error("Failed to parse OCR result, image may be unreadable: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not extract sufficient text from the image")]
    InsufficientText,
}
