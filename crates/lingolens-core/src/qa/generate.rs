//! Question generation from a scene description.
//!
//! One structured-generation request per image, asking for complete
//! question/answer sets as JSON. The reply goes through the shared
//! extractor; a malformed reply surfaces as a parse error with the raw
//! text attached; there is no second attempt.

use crate::config::GenerationConfig;
use crate::error::CoreError;
use crate::extract;
use crate::learner::{self, LearnerProfile};
use crate::llm::{LlmProvider, LlmRequest};
use crate::types::{ImageContext, QuestionItem, QuestionSet, QuestionType};
use serde::Deserialize;
use std::sync::Arc;

const GENERATION_MAX_TOKENS: u32 = 2048;

/// What the model must produce for each question.
#[derive(Deserialize)]
struct RawQaSet {
    question: String,
    expected_answer: String,
    question_type: QuestionType,
    difficulty: u8,
    points: u32,
}

/// Envelope shape the prompt requests. `level`/`language` echoes are
/// ignored; the typed profile is authoritative.
#[derive(Deserialize)]
struct QaSetResponse {
    qa_sets: Vec<RawQaSet>,
}

/// Generates question/answer sets for an analyzed image.
pub struct QuestionGenerator {
    provider: Arc<dyn LlmProvider>,
    question_count: usize,
}

impl QuestionGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &GenerationConfig) -> Self {
        Self {
            provider,
            question_count: config.question_count,
        }
    }

    /// Generate a question set for the scene.
    ///
    /// Validates the description before any model call; items in the
    /// result carry sequential 1-based ids.
    pub async fn generate(
        &self,
        context: &ImageContext,
        profile: &LearnerProfile,
    ) -> Result<QuestionSet, CoreError> {
        learner::validate_description(&context.description)?;

        let system = format!(
            "You are an expert {} language tutor creating educational content \
             for {} level students.",
            profile.language, profile.level
        );
        let prompt = build_prompt(context, profile, self.question_count);
        let request = LlmRequest::text(system, prompt, GENERATION_MAX_TOKENS);

        let response = self.provider.generate(&request).await?;
        let parsed: QaSetResponse = extract::extract_object(&response.text)?;

        let questions: Vec<QuestionItem> = parsed
            .qa_sets
            .into_iter()
            .enumerate()
            .map(|(i, raw)| QuestionItem {
                id: i as u32 + 1,
                question: raw.question,
                expected_answer: raw.expected_answer,
                question_type: raw.question_type,
                difficulty: raw.difficulty,
                points: raw.points,
            })
            .collect();

        tracing::debug!(count = questions.len(), "Question set generated");

        Ok(QuestionSet {
            level: profile.level,
            language: profile.language,
            questions,
        })
    }
}

fn build_prompt(context: &ImageContext, profile: &LearnerProfile, count: usize) -> String {
    let language = profile.language;
    let level = profile.level;
    format!(
        "Based on the following image description, create {count} complete \
         question-answer sets for a {language} learner at {level} level:\n\n\
         Scene: {description}\n\n\
         Generate exactly {count} questions with their expected answers. Each question should:\n\
         1. Be relevant to the scene described\n\
         2. Use appropriate grammar and vocabulary for {level} level\n\
         3. Have a clear, specific expected answer\n\
         4. Be answerable based on the scene description\n\n\
         Output in this exact JSON format, with one object per question and \
         {count} objects in the array:\n\
         {{\n\
         \x20 \"level\": \"{level}\",\n\
         \x20 \"language\": \"{language}\",\n\
         \x20 \"qa_sets\": [\n\
         \x20   {{\n\
         \x20     \"question\": \"First question in {language}\",\n\
         \x20     \"expected_answer\": \"Expected answer in {language}\",\n\
         \x20     \"question_type\": \"comprehension|vocabulary|grammar|cultural\",\n\
         \x20     \"difficulty\": 1-5,\n\
         \x20     \"points\": 0-100\n\
         \x20   }}\n\
         \x20 ]\n\
         }}",
        description = context.description,
    )
}
