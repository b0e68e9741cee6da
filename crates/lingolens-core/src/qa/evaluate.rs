//! Answer evaluation against model-generated expected answers.
//!
//! One generation request per question/answer pair, issued sequentially.
//! A failed item becomes an error record in the batch instead of aborting
//! it; totals are computed over the successful evaluations only.

use crate::error::CoreError;
use crate::extract;
use crate::learner::LearnerProfile;
use crate::llm::{LlmProvider, LlmRequest};
use crate::types::{
    EvaluationFailure, EvaluationOutcome, EvaluationReport, EvaluationResult, EvaluationSummary,
    ImageContext, QuestionItem,
};
use serde::Deserialize;
use std::sync::Arc;

const EVALUATION_MAX_TOKENS: u32 = 1024;

/// The fields the model must produce per evaluation. Everything else in
/// the result record is carried over from local truth.
#[derive(Deserialize)]
struct RawEvaluation {
    points_earned: u32,
    feedback: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    areas_for_improvement: Vec<String>,
}

/// Grades student answers one question at a time.
pub struct AnswerEvaluator {
    provider: Arc<dyn LlmProvider>,
}

impl AnswerEvaluator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Evaluate answers paired with questions by position.
    ///
    /// Extra questions or extra answers beyond the common prefix are
    /// silently ignored. Question ids in the report are positional
    /// (1-based), independent of the ids on the supplied items.
    pub async fn evaluate(
        &self,
        context: &ImageContext,
        profile: &LearnerProfile,
        questions: &[QuestionItem],
        answers: &[String],
    ) -> EvaluationReport {
        let mut evaluations = Vec::with_capacity(questions.len().min(answers.len()));

        for (i, (question, answer)) in questions.iter().zip(answers.iter()).enumerate() {
            let question_id = i as u32 + 1;
            match self
                .evaluate_one(context, profile, question, answer, question_id)
                .await
            {
                Ok(result) => evaluations.push(EvaluationOutcome::Success(result)),
                Err(e) => {
                    tracing::warn!(question_id, error = %e, "Evaluation failed for one question");
                    evaluations.push(EvaluationOutcome::Failure(EvaluationFailure {
                        question_id,
                        error: true,
                        message: format!("Failed to evaluate answer: {e}"),
                    }));
                }
            }
        }

        let summary = summarize(&evaluations, profile);
        EvaluationReport {
            evaluations,
            summary,
        }
    }

    async fn evaluate_one(
        &self,
        context: &ImageContext,
        profile: &LearnerProfile,
        question: &QuestionItem,
        answer: &str,
        question_id: u32,
    ) -> Result<EvaluationResult, CoreError> {
        let system = format!(
            "You are an expert {} language tutor providing detailed feedback \
             to help students improve.",
            profile.language
        );
        let prompt = build_prompt(context, profile, question, answer);
        let request = LlmRequest::text(system, prompt, EVALUATION_MAX_TOKENS);

        let response = self.provider.generate(&request).await?;
        let raw: RawEvaluation = extract::extract_object(&response.text)?;

        // The model occasionally awards more than the question is worth.
        let points_earned = raw.points_earned.min(question.points);

        Ok(EvaluationResult {
            question_id,
            question: question.question.clone(),
            expected_answer: question.expected_answer.clone(),
            student_answer: answer.to_string(),
            points_earned,
            max_points: question.points,
            percentage: percentage(points_earned, question.points),
            feedback: raw.feedback,
            strengths: raw.strengths,
            areas_for_improvement: raw.areas_for_improvement,
        })
    }
}

/// Percentage of points earned, rounded to one decimal place.
/// Zero when nothing was at stake.
pub(crate) fn percentage(points: u32, max_points: u32) -> f64 {
    if max_points == 0 {
        return 0.0;
    }
    (points as f64 / max_points as f64 * 100.0 * 10.0).round() / 10.0
}

fn summarize(evaluations: &[EvaluationOutcome], profile: &LearnerProfile) -> EvaluationSummary {
    let mut total_points = 0u32;
    let mut max_points = 0u32;
    for result in evaluations.iter().filter_map(|e| e.as_success()) {
        total_points += result.points_earned;
        max_points += result.max_points;
    }

    EvaluationSummary {
        total_points,
        max_points,
        percentage: percentage(total_points, max_points),
        questions_answered: evaluations.len(),
        level: profile.level,
        language: profile.language,
    }
}

fn build_prompt(
    context: &ImageContext,
    profile: &LearnerProfile,
    question: &QuestionItem,
    answer: &str,
) -> String {
    let language = profile.language;
    let level = profile.level;
    format!(
        "You are evaluating a {language} language student at {level} level.\n\n\
         Image context: {description}\n\n\
         Question: {question}\n\
         Expected Answer: {expected}\n\
         Student Answer: {answer}\n\
         Question Type: {question_type}\n\
         Max Points: {max_points}\n\n\
         Evaluate the student's answer considering:\n\
         1. Accuracy compared to expected answer\n\
         2. Appropriate language level for {level}\n\
         3. Understanding of the image context\n\
         4. Grammar and vocabulary usage\n\n\
         Provide constructive feedback in English and assign points.\n\n\
         Output in this exact JSON format:\n\
         {{\n\
         \x20 \"points_earned\": 0-{max_points},\n\
         \x20 \"feedback\": \"Detailed constructive feedback in English\",\n\
         \x20 \"strengths\": [\"strength1\", \"strength2\"],\n\
         \x20 \"areas_for_improvement\": [\"area1\", \"area2\"]\n\
         }}",
        description = context.description,
        question = question.question,
        expected = question.expected_answer,
        question_type = question.question_type,
        max_points = question.points,
    )
}
