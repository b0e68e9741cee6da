//! CLI command handlers and the shared subprocess-contract helpers.
//!
//! Every command writes exactly one JSON document to stdout. Failures
//! print a `{success: false, error}` envelope and exit non-zero, except
//! for configuration errors, which are fatal before any command runs.

pub mod analyze;
pub mod config;
pub mod evaluate;
pub mod generate;

use lingolens_core::{
    output, Config, CoreError, ImageInput, Language, LearnerProfile, Level, LingoLens,
};
use serde::Serialize;
use std::path::Path;

/// The failure envelope shared by every command.
#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Print the failure envelope to stdout and exit non-zero.
pub(crate) fn fail(error: String, pretty: bool) -> ! {
    tracing::error!("{error}");
    let body = ErrorResponse {
        success: false,
        error,
    };
    // Best effort — an unwritable stdout leaves only the exit status.
    let _ = output::write_json(&mut std::io::stdout(), &body, pretty);
    std::process::exit(1);
}

/// Assemble the pipeline, terminating on configuration errors.
///
/// A missing credential is a fatal precondition, not a per-request
/// failure: the diagnostic goes to stderr and the process exits before
/// any external call is attempted.
pub(crate) fn build_pipeline(config: Config) -> LingoLens {
    match LingoLens::new(config) {
        Ok(pipeline) => pipeline,
        Err(CoreError::Config(e)) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to initialize pipeline: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse the learner profile from raw CLI strings.
pub(crate) fn parse_profile(language: &str, level: &str) -> Result<LearnerProfile, String> {
    let language = language.parse::<Language>().map_err(|e| e.to_string())?;
    let level = level.parse::<Level>().map_err(|e| e.to_string())?;
    Ok(LearnerProfile::new(language, level))
}

/// Load the image payload from `--base64` or `--file`.
pub(crate) fn load_image(
    base64: Option<&str>,
    file: Option<&Path>,
) -> Result<ImageInput, String> {
    match (base64, file) {
        (Some(data), _) => ImageInput::from_base64(data).map_err(|e| e.to_string()),
        (None, Some(path)) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy().into_owned()).into_owned();
            let bytes = std::fs::read(&expanded)
                .map_err(|e| format!("Failed to read {expanded}: {e}"))?;
            ImageInput::from_bytes(&bytes).map_err(|e| e.to_string())
        }
        (None, None) => Err("Either --base64 or --file is required".to_string()),
    }
}
