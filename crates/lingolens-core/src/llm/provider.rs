//! LLM provider trait and request/response types.
//!
//! Defines the interface the generation adapters talk to, plus the image
//! payload type shared with the detector.

use crate::config::Config;
use crate::error::{AdapterError, ConfigError, ValidationError};
use async_trait::async_trait;
use base64::Engine;
use std::sync::Arc;

/// Base64-encoded image ready to send to a model API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw image bytes.
    ///
    /// The media type is sniffed from the magic bytes; an unrecognizable
    /// payload is rejected as client input rather than forwarded upstream.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        let media_type = sniff_media_type(bytes)?;
        Ok(Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type,
        })
    }

    /// Create an `ImageInput` from a base64 string.
    ///
    /// A `data:image/...;base64,` URL prefix is stripped if present. The
    /// payload is decoded once to verify it is valid base64 holding a
    /// recognizable image format.
    pub fn from_base64(data: &str) -> Result<Self, ValidationError> {
        let stripped = match data.strip_prefix("data:image") {
            Some(_) => data
                .split_once(',')
                .map(|(_, rest)| rest)
                .unwrap_or(data),
            None => data,
        };
        let stripped = stripped.trim();

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(stripped)
            .map_err(|e| ValidationError::InvalidImage(format!("invalid base64: {e}")))?;
        let media_type = sniff_media_type(&bytes)?;

        Ok(Self {
            data: stripped.to_string(),
            media_type,
        })
    }
}

fn sniff_media_type(bytes: &[u8]) -> Result<String, ValidationError> {
    match image::guess_format(bytes) {
        Ok(format) => Ok(format.to_mime_type().to_string()),
        Err(_) => Err(ValidationError::InvalidImage(
            "unrecognized image format".to_string(),
        )),
    }
}

/// A single generation request.
///
/// Vision calls attach an image; text-only calls (question generation,
/// answer evaluation) leave it out. Either way the shape is one user turn
/// with an optional system prompt; no conversation state is kept.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Image to include ahead of the prompt, if any
    pub image: Option<ImageInput>,
    /// System prompt framing the model's role
    pub system: Option<String>,
    /// The user-turn instruction
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl LlmRequest {
    /// Build a vision request: image plus instruction.
    pub fn with_image(image: ImageInput, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            image: Some(image),
            system: None,
            prompt: prompt.into(),
            max_tokens,
        }
    }

    /// Build a text-only request with a system prompt.
    pub fn text(system: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            image: None,
            system: Some(system.into()),
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// The response from a generation call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait the generation adapters are written against.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn LlmProvider>` shared across the pipeline stages).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Check whether the provider is configured.
    async fn is_available(&self) -> bool;

    /// Issue one generation call. Exactly one attempt, no internal retry.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, AdapterError>;
}

/// Build the configured provider.
///
/// Fails with the credential diagnostic when the API key is missing; the
/// CLI treats that as fatal before any command runs.
pub fn build_provider(config: &Config) -> Result<Arc<dyn LlmProvider>, ConfigError> {
    let api_key = config.api_key()?;
    Ok(Arc::new(super::anthropic::AnthropicProvider::new(
        &api_key,
        &config.llm.model,
        &config.llm.service_tier,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest valid PNG header + IHDR chunk prefix, enough for format sniffing
    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_image_input_from_bytes_png() {
        let input = ImageInput::from_bytes(PNG_MAGIC).unwrap();
        assert_eq!(input.media_type, "image/png");
        assert!(!input.data.is_empty());
    }

    #[test]
    fn test_image_input_from_bytes_jpeg() {
        let input = ImageInput::from_bytes(JPEG_MAGIC).unwrap();
        assert_eq!(input.media_type, "image/jpeg");
    }

    #[test]
    fn test_image_input_rejects_garbage() {
        let err = ImageInput::from_bytes(&[0x00, 0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidImage(_)));
    }

    #[test]
    fn test_from_base64_strips_data_url_prefix() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(PNG_MAGIC);
        let with_prefix = format!("data:image/png;base64,{encoded}");
        let input = ImageInput::from_base64(&with_prefix).unwrap();
        assert_eq!(input.data, encoded);
        assert_eq!(input.media_type, "image/png");
    }

    #[test]
    fn test_from_base64_plain() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(JPEG_MAGIC);
        let input = ImageInput::from_base64(&encoded).unwrap();
        assert_eq!(input.data, encoded);
        assert_eq!(input.media_type, "image/jpeg");
    }

    #[test]
    fn test_from_base64_rejects_invalid() {
        let err = ImageInput::from_base64("not!!valid@@base64").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidImage(_)));
    }

    #[test]
    fn test_request_constructors() {
        let image = ImageInput::from_bytes(PNG_MAGIC).unwrap();
        let vision = LlmRequest::with_image(image, "Describe this", 1024);
        assert!(vision.image.is_some());
        assert!(vision.system.is_none());

        let text = LlmRequest::text("You are a tutor.", "Generate questions", 2048);
        assert!(text.image.is_none());
        assert_eq!(text.system.as_deref(), Some("You are a tutor."));
    }
}
