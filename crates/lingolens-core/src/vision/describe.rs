//! Scene description adapter.

use crate::error::AdapterError;
use crate::llm::{ImageInput, LlmProvider, LlmRequest};

const SUMMARY_PROMPT: &str =
    "Generate a 50 word summary of this image. Extract key actions, objects, and relationships.";

const SUMMARY_MAX_TOKENS: u32 = 1024;

/// Ask the multimodal provider for a short scene summary.
///
/// The raw text response is returned as-is; there is no structured
/// contract to enforce here.
pub async fn describe_scene(
    provider: &dyn LlmProvider,
    image: &ImageInput,
) -> Result<String, AdapterError> {
    let request = LlmRequest::with_image(image.clone(), SUMMARY_PROMPT, SUMMARY_MAX_TOKENS);
    let response = provider.generate(&request).await?;
    tracing::debug!(chars = response.text.len(), "Scene description received");
    Ok(response.text)
}
