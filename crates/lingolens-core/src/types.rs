//! Core data types for the LingoLens pipeline.
//!
//! Every type here is a transient request/response record: produced by one
//! pipeline stage, consumed by the next, never mutated after construction.

use crate::learner::{Language, Level};
use crate::vision::BoundingBox;
use serde::{Deserialize, Serialize};

/// Scene data handed from image analysis to question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageContext {
    /// Natural-language scene description
    pub description: String,

    /// The object the learner is asked about, when one was selected
    pub primary_object: Option<String>,

    /// All objects the listing adapter found, in response order
    pub objects: Vec<String>,

    /// Detection confidence for the primary object
    pub confidence: f32,
}

/// The complete output of analyzing one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Monotonic per-process request counter
    pub request_id: u64,

    /// Natural-language scene description
    pub description: String,

    /// Randomly selected primary object
    pub primary_object: Option<String>,

    /// All detected objects
    pub objects: Vec<String>,

    /// Best detection score for the primary object, or the fallback
    /// when the detector returned no candidates
    pub confidence: f32,

    /// Bounding box of the primary object in image pixel coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_box: Option<BoundingBox>,
}

impl ImageAnalysis {
    /// The context shape consumed by question generation and evaluation.
    pub fn context(&self) -> ImageContext {
        ImageContext {
            description: self.description.clone(),
            primary_object: self.primary_object.clone(),
            objects: self.objects.clone(),
            confidence: self.confidence,
        }
    }
}

/// Category of a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Comprehension,
    Vocabulary,
    Grammar,
    Cultural,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Comprehension => write!(f, "comprehension"),
            QuestionType::Vocabulary => write!(f, "vocabulary"),
            QuestionType::Grammar => write!(f, "grammar"),
            QuestionType::Cultural => write!(f, "cultural"),
        }
    }
}

fn default_question_type() -> QuestionType {
    QuestionType::Comprehension
}

fn default_difficulty() -> u8 {
    3
}

fn default_points() -> u32 {
    100
}

/// One generated question with its expected answer.
///
/// The serde defaults make the evaluation boundary tolerant of
/// caller-supplied question records that omit grading metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionItem {
    /// 1-based id assigned by the generator
    #[serde(default)]
    pub id: u32,

    /// Question text, in the learner's target language
    pub question: String,

    /// The answer the model expects
    pub expected_answer: String,

    /// Question category
    #[serde(default = "default_question_type")]
    pub question_type: QuestionType,

    /// Difficulty from 1 (easiest) to 5
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,

    /// Maximum points this question is worth (0-100)
    #[serde(default = "default_points")]
    pub points: u32,
}

/// A complete set of generated questions for one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub level: Level,
    pub language: Language,
    pub questions: Vec<QuestionItem>,
}

/// The fixed warm-up question for a language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarterQuestion {
    pub question: String,
}

/// Graded result for one answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub question_id: u32,
    pub question: String,
    pub expected_answer: String,
    pub student_answer: String,
    /// Never exceeds `max_points`
    pub points_earned: u32,
    pub max_points: u32,
    pub percentage: f64,
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
}

/// Error record for a question whose evaluation call failed.
///
/// A bad model response degrades a single item, not the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationFailure {
    pub question_id: u32,
    pub error: bool,
    pub message: String,
}

/// One entry in the evaluations list: a graded result or a per-item error.
///
/// Untagged so the wire shape matches what callers already consume: a
/// result object, or `{question_id, error: true, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationOutcome {
    Success(EvaluationResult),
    Failure(EvaluationFailure),
}

impl EvaluationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationOutcome::Success(_))
    }

    pub fn as_success(&self) -> Option<&EvaluationResult> {
        match self {
            EvaluationOutcome::Success(result) => Some(result),
            EvaluationOutcome::Failure(_) => None,
        }
    }
}

/// Aggregate totals across a batch of evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total_points: u32,
    pub max_points: u32,
    pub percentage: f64,
    pub questions_answered: usize,
    pub level: Level,
    pub language: Language,
}

/// Everything the evaluator produces for one batch of answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub evaluations: Vec<EvaluationOutcome>,
    pub summary: EvaluationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_item_defaults_on_deserialize() {
        // Caller-supplied question records may omit grading metadata
        let json = r#"{"question": "¿Qué ves?", "expected_answer": "Una tienda"}"#;
        let item: QuestionItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 0);
        assert_eq!(item.question_type, QuestionType::Comprehension);
        assert_eq!(item.difficulty, 3);
        assert_eq!(item.points, 100);
    }

    #[test]
    fn test_question_type_wire_format() {
        let json = serde_json::to_string(&QuestionType::Vocabulary).unwrap();
        assert_eq!(json, "\"vocabulary\"");
        let parsed: QuestionType = serde_json::from_str("\"cultural\"").unwrap();
        assert_eq!(parsed, QuestionType::Cultural);
    }

    #[test]
    fn test_evaluation_outcome_untagged_roundtrip() {
        let failure = EvaluationOutcome::Failure(EvaluationFailure {
            question_id: 2,
            error: true,
            message: "Failed to evaluate answer: bad JSON".to_string(),
        });
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"error\":true"));

        let parsed: EvaluationOutcome = serde_json::from_str(&json).unwrap();
        match parsed {
            EvaluationOutcome::Failure(f) => assert_eq!(f.question_id, 2),
            EvaluationOutcome::Success(_) => panic!("Expected failure variant"),
        }
    }

    #[test]
    fn test_image_analysis_context_projection() {
        let analysis = ImageAnalysis {
            request_id: 1,
            description: "A tent by a campfire.".to_string(),
            primary_object: Some("campfire".to_string()),
            objects: vec!["tent".to_string(), "campfire".to_string()],
            confidence: 0.9,
            primary_box: None,
        };
        let context = analysis.context();
        assert_eq!(context.description, analysis.description);
        assert_eq!(context.primary_object.as_deref(), Some("campfire"));
        assert_eq!(context.objects.len(), 2);
    }
}
