//! The `lingolens evaluate` command: grade student answers.
//!
//! The request arrives as one JSON-encoded argument so the host process
//! can pass the whole payload without shell-quoting individual fields.

use clap::Args;
use lingolens_core::{
    output, Config, EvaluationReport, ImageContext, Language, Level, QuestionItem,
};
use serde::{Deserialize, Serialize};

use super::{build_pipeline, fail, parse_profile};

/// Arguments for the `evaluate` command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON evaluation request document
    #[arg(long)]
    pub data: String,
}

/// The request schema, validated at this boundary.
#[derive(Deserialize)]
struct EvaluateRequest {
    image_description: String,
    questions: Vec<QuestionItem>,
    student_answers: Vec<String>,
    language: String,
    level: String,
    #[serde(default)]
    user_id: Option<String>,
}

/// Success envelope for the host process.
#[derive(Serialize)]
struct EvaluateResponse {
    success: bool,
    evaluation_summary: EvaluationReport,
    metadata: Metadata,
}

#[derive(Serialize)]
struct Metadata {
    /// Stamped by the host process, not here
    evaluated_at: Option<String>,
    user_id: Option<String>,
    request_type: &'static str,
    questions_count: usize,
    language: Language,
    level: Level,
}

/// Execute the evaluate command.
pub async fn execute(args: EvaluateArgs, config: Config) -> anyhow::Result<()> {
    let pretty = config.output.pretty;

    let request: EvaluateRequest = match serde_json::from_str(&args.data) {
        Ok(request) => request,
        Err(e) => fail(format!("Invalid JSON data: {e}"), pretty),
    };

    let profile = match parse_profile(&request.language, &request.level) {
        Ok(profile) => profile,
        Err(e) => fail(e, pretty),
    };

    let context = ImageContext {
        description: request.image_description,
        primary_object: None,
        objects: Vec::new(),
        confidence: 0.0,
    };

    let pipeline = build_pipeline(config);

    let questions_count = request.questions.len();
    let report = pipeline
        .evaluate_answers(
            &context,
            &profile,
            &request.questions,
            &request.student_answers,
        )
        .await;

    let response = EvaluateResponse {
        success: true,
        evaluation_summary: report,
        metadata: Metadata {
            evaluated_at: None,
            user_id: request.user_id,
            request_type: "answer_evaluation",
            questions_count,
            language: profile.language,
            level: profile.level,
        },
    };

    output::write_json(&mut std::io::stdout(), &response, pretty)?;
    Ok(())
}
