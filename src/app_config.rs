use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Subtitle handling config
    #[serde(default)]
    pub subtitle: SubtitleConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    // @backend: Google Translate Cloud V2
    #[default]
    Google,
    // @backend: Microsoft Translator V3
    Microsoft,
}

impl BackendKind {
    // @returns: Capitalized backend name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Microsoft => "Microsoft Translator",
        }
    }

    // @returns: Lowercase backend identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Microsoft => "microsoft".to_string(),
        }
    }
}

// Implement Display trait for BackendKind
impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for BackendKind
impl std::str::FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "microsoft" => Ok(Self::Microsoft),
            _ => Err(anyhow!("Invalid backend type: {}", s)),
        }
    }
}

/// Backend configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    // @field: Backend type identifier
    #[serde(rename = "type")]
    pub backend_type: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL override, empty means the public endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Custom Translator category (Microsoft only)
    #[serde(default = "String::new")]
    pub category: String,
}

impl BackendConfig {
    // @param backend_type: Backend enum
    // @returns: Backend config with defaults
    pub fn new(backend_type: BackendKind) -> Self {
        Self {
            backend_type: backend_type.to_lowercase_string(),
            api_key: String::new(),
            endpoint: String::new(),
            category: String::new(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation backend to use
    #[serde(default)]
    pub backend: BackendKind,

    /// Available translation backends
    #[serde(default)]
    pub available_backends: Vec<BackendConfig>,
}

/// Subtitle format family, controls format-specific cleanup
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatFamily {
    /// SubRip (.srt)
    #[default]
    SubRip,
    /// SubStation Alpha (.ass / .ssa), needs override-tag escaping restored
    SubStation,
}

/// How the cue list was prepared before batching
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Each cue carries its own text
    #[default]
    SingleCue,
    /// Unfinished lines were pulled into the following cue
    NextLineMerge,
    /// Whole sentences were merged into the first cue of their run
    SentenceMerge,
}

/// Configuration for subtitle processing
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Output format family for format-specific cleanup
    #[serde(default)]
    pub format_family: FormatFamily,

    /// How the cue list was prepared before batching
    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    /// Target line width when a cue has to be re-wrapped
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Whether to overwrite translated files that already exist
    #[serde(default)]
    pub overwrite_existing: bool,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            format_family: FormatFamily::default(),
            merge_strategy: MergeStrategy::default(),
            wrap_width: default_wrap_width(),
            overwrite_existing: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_wrap_width() -> usize {
    43
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        // Both supported backends authenticate with an API key
        let api_key = self.translation.get_api_key();
        if api_key.is_empty() {
            return Err(anyhow!(
                "Translation API key is required for the {} backend",
                self.translation.backend.display_name()
            ));
        }

        if self.subtitle.wrap_width == 0 {
            return Err(anyhow!("wrap_width must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            translation: TranslationConfig::default(),
            subtitle: SubtitleConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active backend configuration from the available_backends array
    pub fn get_active_backend_config(&self) -> Option<&BackendConfig> {
        let backend_str = self.backend.to_lowercase_string();
        self.available_backends
            .iter()
            .find(|b| b.backend_type == backend_str)
    }

    /// Get a specific backend configuration by type for testing
    pub fn get_backend_config(&self, backend_type: &BackendKind) -> Option<&BackendConfig> {
        let backend_str = backend_type.to_lowercase_string();
        self.available_backends
            .iter()
            .find(|b| b.backend_type == backend_str)
    }

    /// Get the API key for the active backend
    pub fn get_api_key(&self) -> String {
        if let Some(backend_config) = self.get_active_backend_config() {
            if !backend_config.api_key.is_empty() {
                return backend_config.api_key.clone();
            }
        }

        String::new()
    }

    /// Get the endpoint override for the active backend
    pub fn get_endpoint(&self) -> String {
        if let Some(backend_config) = self.get_active_backend_config() {
            if !backend_config.endpoint.is_empty() {
                return backend_config.endpoint.clone();
            }
        }

        String::new()
    }

    /// Get the Custom Translator category for the active backend
    pub fn get_category(&self) -> String {
        if let Some(backend_config) = self.get_active_backend_config() {
            if !backend_config.category.is_empty() {
                return backend_config.category.clone();
            }
        }

        String::new()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            backend: BackendKind::default(),
            available_backends: Vec::new(),
        };

        // Add default backends
        config
            .available_backends
            .push(BackendConfig::new(BackendKind::Google));
        config
            .available_backends
            .push(BackendConfig::new(BackendKind::Microsoft));

        config
    }
}
