//! Error types for the LingoLens pipeline.
//!
//! The taxonomy separates four failure classes with different handling:
//! configuration errors (fatal at the process boundary), validation errors
//! (bad client input), adapter errors (an upstream model call failed), and
//! parse errors (the model violated its output contract).

use thiserror::Error;

/// Top-level error type for LingoLens operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Client-input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Upstream dependency failures (detector or LLM call)
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Model output could not be coerced into the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The LLM credential is missing; nothing downstream can run without it
    #[error(
        "Anthropic API key not set. Add llm.api_key to the config file \
         or set the ANTHROPIC_API_KEY environment variable."
    )]
    MissingApiKey,
}

/// Client-input validation errors.
///
/// These are recoverable by the caller and are reported as input problems,
/// never as service failures.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    /// Level string is not one of the six CEFR codes
    #[error("Invalid learner level '{0}' (expected one of A1, A2, B1, B2, C1, C2)")]
    InvalidLevel(String),

    /// Language is not in the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Scene description is empty (bad data from the vision stage)
    #[error("Scene description is empty")]
    EmptyDescription,

    /// Image payload could not be decoded
    #[error("Invalid image payload: {0}")]
    InvalidImage(String),
}

/// Upstream dependency failures.
#[derive(Error, Debug, Clone)]
pub enum AdapterError {
    /// Object detection call failed
    #[error("Detector request failed: {message}")]
    Detector {
        message: String,
        status_code: Option<u16>,
    },

    /// LLM generation call failed
    #[error("LLM request failed: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// The model returned no text content at all
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// Object listing produced no usable objects for the image
    #[error("Object listing contained no usable objects")]
    NoObjects,
}

/// The model violated its structured-output contract.
///
/// Carries the raw response text so callers can log or surface it for
/// diagnosis; the single-pass pipeline never retries a malformed reply.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ParseError {
    /// What went wrong during extraction/parsing
    pub message: String,
    /// The unmodified model output
    pub raw: String,
}

/// Convenience type alias for LingoLens results.
pub type Result<T> = std::result::Result<T, CoreError>;
