/*!
 * Backend implementations for different translation services.
 *
 * This module contains client implementations for machine-translation
 * services:
 * - Google: Google Translate Cloud V2 API
 * - Microsoft: Microsoft Translator V3 API
 */

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::BackendError;

/// A language a backend offers, pairing its wire code with a display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    /// Code the backend expects on the wire
    pub code: String,

    /// Human-readable language name
    pub name: String,
}

/// Common trait for all machine-translation backends
///
/// This trait defines the interface that all backend implementations must
/// follow, allowing them to be used interchangeably by the pipeline. A
/// backend decodes its wire format into a response tree whose string
/// leaves are exactly the translated segments, in submission order; the
/// response walker recovers them without knowing the backend's schema.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Backend name for logs and listings
    fn name(&self) -> &'static str;

    /// Longest text, in characters, accepted per cue
    fn max_text_size(&self) -> usize;

    /// Most cue texts accepted per request
    fn max_batch_size(&self) -> usize;

    /// Languages this backend advertises
    fn supported_languages(&self) -> Vec<LanguagePair>;

    /// Translate a batch of cue texts
    ///
    /// # Arguments
    /// * `source_language` - Language code of the submitted texts
    /// * `target_language` - Language code to translate into
    /// * `texts` - Stripped cue texts, one per cue
    ///
    /// # Returns
    /// * `Result<Value, BackendError>` - The decoded response tree, or an error
    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        texts: &[String],
    ) -> Result<Value, BackendError>;
}

pub mod google;
pub mod microsoft;
