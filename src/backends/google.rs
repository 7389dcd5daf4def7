use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backends::{LanguagePair, TranslationBackend};
use crate::errors::BackendError;
use crate::language_utils::get_language_name;

const GOOGLE_TRANSLATE_V2_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Language codes the V2 API accepts, resolved to display names on demand
static SUPPORTED_CODES: &[&str] = &[
    "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en",
    "eo", "es", "et", "eu", "fa", "fi", "fr", "ga", "gl", "gu", "ha", "he", "hi", "hr", "ht",
    "hu", "hy", "id", "ig", "is", "it", "ja", "jv", "ka", "kk", "km", "kn", "ko", "ku", "ky",
    "la", "lo", "lt", "lv", "mg", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "ne", "nl",
    "no", "pa", "pl", "ps", "pt", "ro", "ru", "sd", "si", "sk", "sl", "so", "sq", "sr", "st",
    "su", "sv", "sw", "ta", "te", "tg", "th", "tr", "uk", "ur", "uz", "vi", "xh", "yi", "yo",
    "zh", "zu",
];

/// Google Translate Cloud V2 client
#[derive(Debug)]
pub struct GoogleBackend {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Google Translate V2 response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleTranslateResponse {
    /// Payload wrapper
    pub data: GoogleTranslateData,
}

/// Translation list inside the response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleTranslateData {
    /// One entry per submitted text, in submission order
    pub translations: Vec<GoogleTranslation>,
}

/// A single translated text
#[derive(Debug, Serialize, Deserialize)]
pub struct GoogleTranslation {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl GoogleBackend {
    /// Create a new Google Translate client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for GoogleBackend {
    fn name(&self) -> &'static str {
        "Google Translate Cloud V2 API"
    }

    fn max_text_size(&self) -> usize {
        1000
    }

    fn max_batch_size(&self) -> usize {
        100
    }

    fn supported_languages(&self) -> Vec<LanguagePair> {
        SUPPORTED_CODES
            .iter()
            .map(|code| LanguagePair {
                code: (*code).to_string(),
                name: get_language_name(code).unwrap_or_else(|_| (*code).to_string()),
            })
            .collect()
    }

    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        texts: &[String],
    ) -> Result<Value, BackendError> {
        let api_url = if self.endpoint.is_empty() {
            GOOGLE_TRANSLATE_V2_URL.to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };

        // The V2 API takes repeated q parameters and an empty POST body
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(texts.len() + 4);
        for text in texts {
            query.push(("q", text.as_str()));
        }
        query.push(("target", target_language));
        query.push(("source", source_language));
        query.push(("format", "text"));
        query.push(("key", self.api_key.as_str()));

        let response = self
            .client
            .post(&api_url)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                BackendError::RequestFailed(format!(
                    "Failed to send request to Google Translate API: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate API error ({}): {}", status, error_text);
            return Err(BackendError::from_status(status.as_u16(), error_text));
        }

        // Decoding into typed structs drops metadata fields the API may
        // add, so the returned tree's string leaves are exactly the
        // translations
        let decoded = response
            .json::<GoogleTranslateResponse>()
            .await
            .map_err(|e| {
                BackendError::ParseError(format!(
                    "Failed to parse Google Translate response: {}",
                    e
                ))
            })?;

        serde_json::to_value(&decoded)
            .map_err(|e| BackendError::ParseError(format!("Failed to rebuild response tree: {}", e)))
    }
}
