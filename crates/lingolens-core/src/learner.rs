//! Learner profile types and the pre-call validation layer.
//!
//! Validation here is pure and synchronous, with no external calls. Level and
//! language strings are validated once at the boundary (via `FromStr`)
//! into enums, so an invalid level can never reach a model call.

use crate::error::ValidationError;
use crate::types::StarterQuestion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    /// All six CEFR codes, in ascending order.
    pub const ALL: [Level; 6] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            "C2" => Ok(Level::C2),
            _ => Err(ValidationError::InvalidLevel(s.to_string())),
        }
    }
}

/// Target language for generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    Chinese,
    Japanese,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "spanish" => Ok(Language::Spanish),
            "chinese" => Ok(Language::Chinese),
            "japanese" => Ok(Language::Japanese),
            _ => Err(ValidationError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Who the content is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub language: Language,
    pub level: Level,
}

impl LearnerProfile {
    pub fn new(language: Language, level: Level) -> Self {
        Self { language, level }
    }
}

/// Check the scene description every model call depends on.
///
/// The CEFR level and language are carried in the type system, so the only
/// runtime check left is the description itself: an empty one means the
/// vision stage produced bad data, and no generation call should be made.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}

/// The fixed warm-up question shown before generated content.
///
/// Only the languages with a canned translation are supported here; the
/// rest of the pipeline handles any [`Language`].
pub fn starter_question(language: Language) -> Result<StarterQuestion, ValidationError> {
    let question = match language {
        Language::Spanish => "¿Qué es esto?",
        Language::Chinese => "这是什么？",
        Language::Japanese => "これは何ですか？",
        other => {
            return Err(ValidationError::UnsupportedLanguage(other.to_string()));
        }
    };
    Ok(StarterQuestion {
        question: question.to_string(),
    })
}
