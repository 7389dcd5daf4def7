use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backends::{LanguagePair, TranslationBackend};
use crate::errors::BackendError;
use crate::language_utils::get_language_name;

const MICROSOFT_TRANSLATE_V3_URL: &str = "https://api.cognitive.microsofttranslator.com";

/// Language codes the V3 API accepts, resolved to display names on demand
static SUPPORTED_CODES: &[&str] = &[
    "af", "am", "ar", "az", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "es",
    "et", "eu", "fa", "fi", "fr", "ga", "gl", "gu", "he", "hi", "hr", "ht", "hu", "hy", "id",
    "is", "it", "ja", "ka", "kk", "km", "kn", "ko", "ku", "ky", "lo", "lt", "lv", "mg", "mi",
    "mk", "ml", "mn", "mr", "ms", "mt", "my", "ne", "nl", "no", "pa", "pl", "ps", "pt", "ro",
    "ru", "sd", "si", "sk", "sl", "so", "sq", "sr", "sv", "sw", "ta", "te", "th", "tr", "uk",
    "ur", "uz", "vi", "zh", "zu",
];

/// Microsoft Translator V3 client
#[derive(Debug)]
pub struct MicrosoftBackend {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the global endpoint)
    endpoint: String,
    /// Custom Translator category (optional)
    category: String,
}

/// Request body element, one per submitted text
#[derive(Debug, Serialize)]
pub struct MicrosoftRequestText {
    /// The text to translate
    #[serde(rename = "Text")]
    pub text: String,
}

/// One result per submitted text, in submission order
#[derive(Debug, Serialize, Deserialize)]
pub struct MicrosoftTranslateResult {
    /// Translations for this text, one per requested target language
    pub translations: Vec<MicrosoftTranslation>,
}

/// A single translated text
#[derive(Debug, Serialize, Deserialize)]
pub struct MicrosoftTranslation {
    /// The translated text
    pub text: String,
}

impl MicrosoftBackend {
    /// Create a new Microsoft Translator client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            category: category.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for MicrosoftBackend {
    fn name(&self) -> &'static str {
        "Microsoft Translator V3 API"
    }

    fn max_text_size(&self) -> usize {
        1000
    }

    fn max_batch_size(&self) -> usize {
        25
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
        let base = if self.endpoint.is_empty() {
            MICROSOFT_TRANSLATE_V3_URL.to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        let api_url = format!("{}/translate", base);

        let mut query: Vec<(&str, &str)> = vec![
            ("api-version", "3.0"),
            ("from", source_language),
            ("to", target_language),
        ];
        if !self.category.is_empty() {
            query.push(("category", self.category.as_str()));
        }

        let body: Vec<MicrosoftRequestText> = texts
            .iter()
            .map(|text| MicrosoftRequestText { text: text.clone() })
            .collect();

        let response = self
            .client
            .post(&api_url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .query(&query)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BackendError::RequestFailed(format!(
                    "Failed to send request to Microsoft Translator API: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Microsoft Translator API error ({}): {}", status, error_text);
            // V3 reports a bad subscription key as 401
            return Err(match status.as_u16() {
                401 => BackendError::Auth {
                    status_code: 401,
                    message: error_text,
                },
                code => BackendError::from_status(code, error_text),
            });
        }

        // Decoding into typed structs drops the language metadata leaves,
        // so the returned tree's string leaves are exactly the
        // translations
        let decoded = response
            .json::<Vec<MicrosoftTranslateResult>>()
            .await
            .map_err(|e| {
                BackendError::ParseError(format!(
                    "Failed to parse Microsoft Translator response: {}",
                    e
                ))
            })?;

        serde_json::to_value(&decoded)
            .map_err(|e| BackendError::ParseError(format!("Failed to rebuild response tree: {}", e)))
    }
}
