//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.model must not be empty".into(),
            ));
        }
        if self.detector.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "detector.model must not be empty".into(),
            ));
        }
        if self.detector.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "detector.endpoint must not be empty".into(),
            ));
        }
        if self.generation.question_count == 0 {
            return Err(ConfigError::ValidationError(
                "generation.question_count must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.threshold) {
            return Err(ConfigError::ValidationError(
                "detector.threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.text_threshold) {
            return Err(ConfigError::ValidationError(
                "detector.text_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_question_count() {
        let mut config = Config::default();
        config.generation.question_count = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("question_count"));
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = Config::default();
        config.llm.model = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("llm.model"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.detector.threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("detector.threshold"));

        config.detector.threshold = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("detector.threshold"));
    }
}
