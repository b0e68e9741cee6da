//! Sub-configuration structs with defaults matching the hosted services.

use serde::{Deserialize, Serialize};

/// LLM provider settings (Anthropic Messages API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Service tier forwarded to the API ("standard_only" or "auto").
    /// Empty disables the field entirely.
    pub service_tier: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: "${ANTHROPIC_API_KEY}".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            service_tier: "standard_only".to_string(),
        }
    }
}

/// Zero-shot object detection settings.
///
/// The detector is reached through a hosted inference endpoint; the model
/// and its weights are not part of this process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Inference endpoint base URL (model id is appended)
    pub endpoint: String,

    /// Detection model id
    pub model: String,

    /// API key (supports ${ENV_VAR} syntax; optional, empty sends no auth)
    pub api_key: String,

    /// Box confidence threshold
    pub threshold: f32,

    /// Text-grounding threshold
    pub text_threshold: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            model: "IDEA-Research/grounding-dino-tiny".to_string(),
            api_key: "${HF_API_TOKEN}".to_string(),
            threshold: 0.4,
            text_threshold: 0.3,
        }
    }
}

/// Question generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of question/answer sets requested per image
    pub question_count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { question_count: 3 }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON document written to stdout
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
