//! The `lingolens generate` command: image in, question sets out.

use clap::{ArgGroup, Args};
use lingolens_core::{output, Config, Language, Level, QuestionItem};
use serde::Serialize;
use std::path::PathBuf;

use super::{build_pipeline, fail, load_image, parse_profile};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("image").required(true).args(["base64", "file"])))]
pub struct GenerateArgs {
    /// Base64-encoded image data (a data: URL prefix is accepted)
    #[arg(long)]
    pub base64: Option<String>,

    /// Path to an image file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Target language (English, Spanish, Chinese, Japanese)
    #[arg(long, default_value = "Spanish")]
    pub language: String,

    /// CEFR proficiency level (A1-C2)
    #[arg(long, default_value = "A2")]
    pub level: String,

    /// Caller-supplied user id, echoed back in metadata
    #[arg(long)]
    pub user_id: Option<String>,
}

/// Success envelope for the host process.
#[derive(Serialize)]
struct GenerateResponse {
    success: bool,
    image_analysis: ImageAnalysisBody,
    learning_context: LearningContext,
    questions: Vec<QuestionItem>,
    total_questions: usize,
    instructions: String,
    metadata: Metadata,
}

#[derive(Serialize)]
struct ImageAnalysisBody {
    description: String,
    primary_object: Option<String>,
    detected_objects: Vec<String>,
    confidence: f32,
}

#[derive(Serialize)]
struct LearningContext {
    language: Language,
    level: Level,
}

#[derive(Serialize)]
struct Metadata {
    /// Stamped by the host process, not here
    processed_at: Option<String>,
    user_id: Option<String>,
    request_type: &'static str,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let pretty = config.output.pretty;

    let profile = match parse_profile(&args.language, &args.level) {
        Ok(profile) => profile,
        Err(e) => fail(e, pretty),
    };

    let image = match load_image(args.base64.as_deref(), args.file.as_deref()) {
        Ok(image) => image,
        Err(e) => fail(e, pretty),
    };

    let pipeline = build_pipeline(config);

    let analysis = match pipeline.analyze_image(&image).await {
        Ok(analysis) => analysis,
        Err(e) => fail(format!("Image processing failed: {e}"), pretty),
    };

    let set = match pipeline
        .generate_questions(&analysis.context(), &profile)
        .await
    {
        Ok(set) => set,
        Err(e) => fail(format!("Q&A generation failed: {e}"), pretty),
    };

    let total_questions = set.questions.len();
    let response = GenerateResponse {
        success: true,
        image_analysis: ImageAnalysisBody {
            description: analysis.description,
            primary_object: analysis.primary_object,
            detected_objects: analysis.objects,
            confidence: analysis.confidence,
        },
        learning_context: LearningContext {
            language: profile.language,
            level: profile.level,
        },
        questions: set.questions,
        total_questions,
        instructions: format!(
            "Answer these {total_questions} questions in {} based on the image you saw.",
            profile.language
        ),
        metadata: Metadata {
            processed_at: None,
            user_id: args.user_id,
            request_type: "image_qa_generation",
        },
    };

    output::write_json(&mut std::io::stdout(), &response, pretty)?;
    Ok(())
}
