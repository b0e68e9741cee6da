//! Structured-response extraction from raw model text.
//!
//! LLM replies frequently wrap the requested JSON in markdown code fences
//! or surround it with commentary. Every call site that expects structured
//! output goes through this one utility instead of re-implementing the
//! heuristic.
//!
//! Contract: input is the raw response text; output is either the parsed
//! value or a [`ParseError`] that preserves the unmodified text for
//! diagnosis. Extraction slices from the first opening delimiter to the
//! last closing delimiter (`{`..`}` for objects, `[`..`]` for lists),
//! which strips ```` ```json ```` fences and prose in one pass.

use crate::error::ParseError;
use serde::de::DeserializeOwned;

/// Extract and parse a JSON object from raw model output.
pub fn extract_object<T: DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    extract(raw, '{', '}')
}

/// Extract and parse a JSON array from raw model output.
pub fn extract_list<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, ParseError> {
    extract(raw, '[', ']')
}

fn extract<T: DeserializeOwned>(raw: &str, open: char, close: char) -> Result<T, ParseError> {
    let trimmed = raw.trim();

    let candidate = match (trimmed.find(open), trimmed.rfind(close)) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => {
            return Err(ParseError {
                message: format!("Response contains no '{open}'..'{close}' section"),
                raw: raw.to_string(),
            });
        }
    };

    serde_json::from_str(candidate).map_err(|e| ParseError {
        message: format!("Failed to parse model response as JSON: {e}"),
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_plain_object() {
        let parsed: Sample = extract_object(r#"{"name": "tent", "count": 2}"#).unwrap();
        assert_eq!(parsed.name, "tent");
        assert_eq!(parsed.count, 2);
    }

    #[test]
    fn test_object_inside_json_fence() {
        let raw = "```json\n{\"name\": \"tent\", \"count\": 2}\n```";
        let parsed: Sample = extract_object(raw).unwrap();
        assert_eq!(parsed.count, 2);
    }

    #[test]
    fn test_object_inside_bare_fence() {
        let raw = "```\n{\"name\": \"tent\", \"count\": 2}\n```";
        let parsed: Sample = extract_object(raw).unwrap();
        assert_eq!(parsed.name, "tent");
    }

    #[test]
    fn test_object_with_surrounding_commentary() {
        let raw = "Here is the JSON you asked for:\n{\"name\": \"tent\", \"count\": 1}\nHope that helps!";
        let parsed: Sample = extract_object(raw).unwrap();
        assert_eq!(parsed.count, 1);
    }

    #[test]
    fn test_list_inside_fence() {
        let raw = "```json\n[\"tent\", \"campfire\", \"marshmallow\"]\n```";
        let parsed: Vec<String> = extract_list(raw).unwrap();
        assert_eq!(parsed, vec!["tent", "campfire", "marshmallow"]);
    }

    #[test]
    fn test_no_braces_preserves_raw() {
        let raw = "Sorry, I can't help with that.";
        let err = extract_object::<Sample>(raw).unwrap_err();
        assert_eq!(err.raw, raw);
        assert!(err.message.contains("no"));
    }

    #[test]
    fn test_malformed_json_preserves_raw() {
        let raw = "{\"name\": \"tent\", \"count\": }";
        let err = extract_object::<Sample>(raw).unwrap_err();
        assert_eq!(err.raw, raw);
        assert!(err.message.contains("parse"));
    }

    #[test]
    fn test_list_delimiters_ignore_object_braces() {
        // An object containing an array must not confuse list extraction
        let raw = "The objects are: [\"cup\", \"plate\"] as requested";
        let parsed: Vec<String> = extract_list(raw).unwrap();
        assert_eq!(parsed, vec!["cup", "plate"]);
    }
}
