//! LingoLens Core - image-driven language-learning content pipeline.
//!
//! Given an image, LingoLens detects a salient object, generates a scene
//! description, asks an LLM for comprehension questions at a target CEFR
//! level, and evaluates free-text student answers against the expected
//! answers. It is an orchestration layer over three external capabilities:
//!
//! ```text
//! Image → Object listing → Primary object → Description → Bounding box
//!       → Question generation → Answer evaluation
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use lingolens_core::{Config, ImageInput, Language, LearnerProfile, Level, LingoLens};
//!
//! #[tokio::main]
//! async fn main() -> lingolens_core::Result<()> {
//!     let config = Config::load()?;
//!     let lingolens = LingoLens::new(config)?;
//!
//!     let image = ImageInput::from_base64(&data)?;
//!     let analysis = lingolens.analyze_image(&image).await?;
//!
//!     let profile = LearnerProfile::new(Language::Spanish, Level::A2);
//!     let questions = lingolens
//!         .generate_questions(&analysis.context(), &profile)
//!         .await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod extract;
pub mod learner;
pub mod llm;
pub mod output;
pub mod qa;
pub mod types;
pub mod vision;

// Re-exports for convenient access
pub use config::Config;
pub use error::{AdapterError, ConfigError, CoreError, ParseError, Result, ValidationError};
pub use learner::{starter_question, validate_description, Language, LearnerProfile, Level};
pub use llm::{ImageInput, LlmProvider};
pub use qa::{AnswerEvaluator, QuestionGenerator};
pub use types::{
    EvaluationOutcome, EvaluationReport, EvaluationResult, EvaluationSummary, ImageAnalysis,
    ImageContext, QuestionItem, QuestionSet, QuestionType, StarterQuestion,
};
pub use vision::{BoundingBox, Detection, HttpDetector, ImageAnalyzer, ObjectDetector};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::sync::Arc;

/// The assembled pipeline and main entry point.
///
/// Constructed once at process start from an explicit [`Config`]; the
/// configuration and the backing clients are shared by reference into
/// each stage, so there is no hidden global state.
pub struct LingoLens {
    config: Config,
    analyzer: ImageAnalyzer,
    generator: QuestionGenerator,
    evaluator: AnswerEvaluator,
}

impl LingoLens {
    /// Build the pipeline with the configured LLM provider and detector.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] when no credential can be
    /// resolved; callers at the process boundary should treat that as
    /// fatal.
    pub fn new(config: Config) -> Result<Self> {
        let detector: Arc<dyn ObjectDetector> = Arc::new(HttpDetector::new(&config));
        let provider = llm::build_provider(&config)?;
        Ok(Self::with_backends(config, provider, detector))
    }

    /// Build the pipeline with explicit backends (used by tests and
    /// embedders that bring their own clients).
    pub fn with_backends(
        config: Config,
        provider: Arc<dyn LlmProvider>,
        detector: Arc<dyn ObjectDetector>,
    ) -> Self {
        let analyzer = ImageAnalyzer::new(provider.clone(), detector);
        let generator = QuestionGenerator::new(provider.clone(), &config.generation);
        let evaluator = AnswerEvaluator::new(provider);
        Self {
            config,
            analyzer,
            generator,
            evaluator,
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze an image: object list, primary object, description, box.
    pub async fn analyze_image(&self, image: &ImageInput) -> Result<ImageAnalysis> {
        self.analyzer.analyze(image).await
    }

    /// Generate a question set for an analyzed scene.
    pub async fn generate_questions(
        &self,
        context: &ImageContext,
        profile: &LearnerProfile,
    ) -> Result<QuestionSet> {
        self.generator.generate(context, profile).await
    }

    /// Evaluate student answers. Per-item failures are captured inside the
    /// report rather than returned as an error.
    pub async fn evaluate_answers(
        &self,
        context: &ImageContext,
        profile: &LearnerProfile,
        questions: &[QuestionItem],
        answers: &[String],
    ) -> EvaluationReport {
        self.evaluator
            .evaluate(context, profile, questions, answers)
            .await
    }
}
