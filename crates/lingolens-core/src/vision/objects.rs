//! Object listing adapter.
//!
//! Asks the multimodal provider to enumerate tangible objects in the image
//! as a bracketed list, then validates that the response really is one:
//! random selection downstream must never consume unverified prose.

use crate::error::{AdapterError, CoreError};
use crate::extract;
use crate::llm::{ImageInput, LlmProvider, LlmRequest};

const OBJECT_LIST_PROMPT: &str = "List up to 30 discrete, tangible objects in this image. \
    Only include things that are actual objects; do not include abstract concepts, textures, \
    lighting, shadows, blur, background, or vague body parts. Keep each object name generic \
    and concise (1-3 words). Format your answer as a JSON list of strings, like: \
    [\"object1\", \"object2\", ...].";

const OBJECT_LIST_MAX_TOKENS: u32 = 1024;

/// List the salient objects in an image.
///
/// Returns the labels in response order. A reply without a parseable
/// bracketed list is a parse error carrying the raw text; a parseable but
/// empty list is an adapter error, since the orchestrator cannot proceed
/// without at least one object.
pub async fn list_objects(
    provider: &dyn LlmProvider,
    image: &ImageInput,
) -> Result<Vec<String>, CoreError> {
    let request = LlmRequest::with_image(image.clone(), OBJECT_LIST_PROMPT, OBJECT_LIST_MAX_TOKENS);
    let response = provider.generate(&request).await?;

    let objects: Vec<String> = extract::extract_list(&response.text)?;
    let objects: Vec<String> = objects
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if objects.is_empty() {
        return Err(AdapterError::NoObjects.into());
    }

    tracing::debug!(count = objects.len(), "Object listing received");
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedProvider;

    fn png_input() -> ImageInput {
        ImageInput::from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap()
    }

    #[tokio::test]
    async fn test_list_objects_parses_bracketed_reply() {
        let provider = ScriptedProvider::reply(r#"["tent", "campfire", "marshmallow"]"#);
        let objects = list_objects(&provider, &png_input()).await.unwrap();
        assert_eq!(objects, vec!["tent", "campfire", "marshmallow"]);
    }

    #[tokio::test]
    async fn test_list_objects_strips_fences_and_whitespace() {
        let provider =
            ScriptedProvider::reply("```json\n[\" tent \", \"campfire\"]\n```");
        let objects = list_objects(&provider, &png_input()).await.unwrap();
        assert_eq!(objects, vec!["tent", "campfire"]);
    }

    #[tokio::test]
    async fn test_list_objects_rejects_prose() {
        let provider = ScriptedProvider::reply("I see a tent and a campfire in the image.");
        let err = list_objects(&provider, &png_input()).await.unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[tokio::test]
    async fn test_list_objects_rejects_empty_list() {
        let provider = ScriptedProvider::reply("[]");
        let err = list_objects(&provider, &png_input()).await.unwrap_err();
        assert!(matches!(err, CoreError::Adapter(AdapterError::NoObjects)));
    }
}
