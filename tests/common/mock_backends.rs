/*!
 * Mock backend implementation for testing
 *
 * This module provides a configurable in-process implementation of the
 * TranslationBackend trait so pipeline and controller tests never make
 * external API calls. Replies are shaped like a real backend response
 * tree, so the response walker is exercised the same way as in
 * production.
 */

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use subrelay::backends::{LanguagePair, TranslationBackend};
use subrelay::errors::BackendError;

/// Tracks translate calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct BackendCallTracker {
    /// Count of mock translate calls made
    pub call_count: usize,
    /// Texts submitted per call, in call order
    pub requests: Vec<Vec<String>>,
    /// Language pair of the last call
    pub last_languages: Option<(String, String)>,
}

/// How the mock answers each translate call
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Echo the submitted texts back unchanged
    Echo,
    /// Echo the submitted texts back uppercased
    Uppercase,
    /// Pop the next scripted reply tree, in call order
    Scripted,
    /// Fail the call with this 1-based number, echo on every other call
    FailAtCall(usize),
    /// Echo, but drop the last segment from every reply
    ShortCount,
}

/// Mock translation backend with configurable limits and behavior
#[derive(Debug)]
pub struct MockBackend {
    tracker: Arc<Mutex<BackendCallTracker>>,
    scripted: Mutex<Vec<Value>>,
    behavior: MockBehavior,
    max_text_size: usize,
    max_batch_size: usize,
}

impl MockBackend {
    /// Create a mock that echoes every submitted text back unchanged
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Echo)
    }

    /// Create a mock that echoes every submitted text back uppercased,
    /// so tests can tell translated cues from untouched ones
    pub fn uppercase() -> Self {
        Self::with_behavior(MockBehavior::Uppercase)
    }

    /// Create a mock that answers calls with the given reply trees, in order
    pub fn scripted(replies: Vec<Value>) -> Self {
        let mut mock = Self::with_behavior(MockBehavior::Scripted);
        mock.scripted = Mutex::new(replies);
        mock
    }

    /// Create a mock whose call number `call` (1-based) fails with a
    /// connection error; other calls echo
    pub fn failing_at_call(call: usize) -> Self {
        Self::with_behavior(MockBehavior::FailAtCall(call))
    }

    /// Create a mock that always returns one segment fewer than submitted
    pub fn short_count() -> Self {
        Self::with_behavior(MockBehavior::ShortCount)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        MockBackend {
            tracker: Arc::new(Mutex::new(BackendCallTracker::default())),
            scripted: Mutex::new(Vec::new()),
            behavior,
            max_text_size: 1000,
            max_batch_size: 100,
        }
    }

    /// Override the batching limits the mock advertises
    pub fn with_limits(mut self, max_text_size: usize, max_batch_size: usize) -> Self {
        self.max_text_size = max_text_size;
        self.max_batch_size = max_batch_size;
        self
    }

    /// Get the API call tracker
    pub fn tracker(&self) -> Arc<Mutex<BackendCallTracker>> {
        self.tracker.clone()
    }

    /// Build a reply tree shaped like a real translation response, one
    /// string leaf per segment
    pub fn reply_tree(segments: &[String]) -> Value {
        let translations: Vec<Value> = segments
            .iter()
            .map(|segment| json!({ "translatedText": segment }))
            .collect();
        json!({ "data": { "translations": translations } })
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    fn name(&self) -> &'static str {
        "Mock Translation API"
    }

    fn max_text_size(&self) -> usize {
        self.max_text_size
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    fn supported_languages(&self) -> Vec<LanguagePair> {
        vec![
            LanguagePair {
                code: "en".to_string(),
                name: "English".to_string(),
            },
            LanguagePair {
                code: "fr".to_string(),
                name: "French".to_string(),
            },
        ]
    }

    async fn translate(
        &self,
        source_language: &str,
        target_language: &str,
        texts: &[String],
    ) -> Result<Value, BackendError> {
        let call_number = {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.requests.push(texts.to_vec());
            tracker.last_languages =
                Some((source_language.to_string(), target_language.to_string()));
            tracker.call_count
        };

        match self.behavior {
            MockBehavior::Echo => Ok(Self::reply_tree(texts)),
            MockBehavior::Uppercase => {
                let upper: Vec<String> = texts.iter().map(|t| t.to_uppercase()).collect();
                Ok(Self::reply_tree(&upper))
            }
            MockBehavior::Scripted => {
                let mut replies = self.scripted.lock().unwrap();
                if replies.is_empty() {
                    return Err(BackendError::RequestFailed(
                        "Mock has no scripted reply left".to_string(),
                    ));
                }
                Ok(replies.remove(0))
            }
            MockBehavior::FailAtCall(failing_call) => {
                if call_number == failing_call {
                    Err(BackendError::RequestFailed(
                        "Simulated connection failure".to_string(),
                    ))
                } else {
                    Ok(Self::reply_tree(texts))
                }
            }
            MockBehavior::ShortCount => {
                let truncated = &texts[..texts.len().saturating_sub(1)];
                Ok(Self::reply_tree(truncated))
            }
        }
    }
}
