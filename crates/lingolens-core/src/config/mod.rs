//! Configuration management for LingoLens.
//!
//! Configuration is loaded from the first file found in a fixed ordered
//! candidate list (`./lingolens.toml`, then the platform config dir), with
//! sensible defaults when no file exists. The configuration object is
//! constructed once at process start and passed by reference into each
//! adapter, so there is no global mutable state.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for LingoLens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider settings
    pub llm: LlmConfig,

    /// Object detection settings
    pub detector: DetectorConfig,

    /// Question generation settings
    pub generation: GenerationConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the first candidate location that exists.
    ///
    /// Returns default configuration if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        for path in Self::candidate_paths() {
            if path.exists() {
                tracing::debug!("Loading configuration from {}", path.display());
                return Self::load_from(&path);
            }
        }
        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Ordered candidate locations for the config file.
    ///
    /// The working directory wins over the per-user location so a project
    /// checkout can carry its own settings.
    pub fn candidate_paths() -> Vec<PathBuf> {
        vec![PathBuf::from("lingolens.toml"), Self::default_path()]
    }

    /// Get the default per-user config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.lingolens.lingolens/config.toml
    /// - Linux: ~/.config/lingolens/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\lingolens\config\config.toml
    ///
    /// Falls back to ~/.lingolens/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lingolens", "lingolens")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".lingolens").join("config.toml")
            })
    }

    /// Resolve the LLM credential.
    ///
    /// Resolves `${ENV_VAR}` references and trims whitespace. A missing or
    /// empty key is a fatal precondition: every downstream adapter depends
    /// on it, so callers at the process boundary should terminate with the
    /// returned diagnostic rather than continue.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match resolve_env_var(&self.llm.api_key) {
            Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Resolve the detector credential, if any is configured.
    ///
    /// Unlike the LLM key this one is optional: public inference endpoints
    /// accept unauthenticated calls at reduced rate limits.
    pub fn detector_api_key(&self) -> Option<String> {
        resolve_env_var(&self.detector.api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generation.question_count, 3);
        assert_eq!(config.llm.model, "claude-sonnet-4-20250514");
        assert_eq!(config.detector.threshold, 0.4);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[llm]"));
        assert!(toml.contains("[detector]"));
        assert!(toml.contains("[generation]"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\nmodel = \"claude-test\"\n\n[generation]\nquestion_count = 5"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.llm.model, "claude-test");
        assert_eq!(config.generation.question_count, 5);
        // Unspecified sections keep their defaults
        assert_eq!(config.detector.text_threshold, 0.3);
    }

    #[test]
    fn test_api_key_plain_value_trimmed() {
        let mut config = Config::default();
        config.llm.api_key = "  sk-test-key \n".to_string();
        assert_eq!(config.api_key().unwrap(), "sk-test-key");
    }

    #[test]
    fn test_api_key_missing_env_var() {
        let mut config = Config::default();
        config.llm.api_key = "${DEFINITELY_NOT_SET_XYZ_123}".to_string();
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_api_key_empty_is_missing() {
        let mut config = Config::default();
        config.llm.api_key = String::new();
        assert!(matches!(
            config.api_key().unwrap_err(),
            ConfigError::MissingApiKey
        ));
    }

    #[test]
    fn test_detector_key_optional() {
        let mut config = Config::default();
        config.detector.api_key = String::new();
        assert!(config.detector_api_key().is_none());

        config.detector.api_key = "hf-token".to_string();
        assert_eq!(config.detector_api_key().as_deref(), Some("hf-token"));
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_candidate_paths_order() {
        let paths = Config::candidate_paths();
        assert_eq!(paths[0], PathBuf::from("lingolens.toml"));
        assert_eq!(paths[1], Config::default_path());
    }
}
