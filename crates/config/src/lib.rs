//! Configuration loading, validation, and management for iterthought.
//!
//! Loads configuration from `~/.iterthought/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use iterthought_core::KnowledgeBase;
use serde::{Deserialize, Serialize};

/// The root configuration structure.
///
/// Maps directly to `~/.iterthought/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Refinement loop configuration
    #[serde(default)]
    pub loops: LoopConfig,

    /// Inline knowledge base: topic key → textual content.
    ///
    /// Forwarded to the loops unchanged; only a context injector ever
    /// reads it.
    #[serde(default = "default_knowledge")]
    pub knowledge: HashMap<String, String>,
}

fn default_knowledge() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("basic_info".to_string(), "general knowledge".to_string());
    map
}

/// Where and how to reach the generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Ollama-protocol endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for transient transport failures
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_url() -> String {
    "http://127.0.0.1:11434".into()
}
fn default_model() -> String {
    "llama3.1".into()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

/// Bounded exponential backoff for backend calls.
///
/// `max_attempts = 1` reproduces single-attempt behavior with no retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per generation call (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay before the first retry; doubles per attempt
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}
fn default_base_backoff_ms() -> u64 {
    500
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
        }
    }
}

/// Iteration bounds for the two loop strategies.
///
/// Both counts are unsigned; zero is permitted and produces the
/// documented degenerate behavior (seed-only for the autonomous loop,
/// seed + closing round for the guided loop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Maximum refinement rounds for the autonomous loop
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Total round count for the guided loop
    #[serde(default = "default_guided_iterations")]
    pub guided_iterations: u32,
}

fn default_max_iterations() -> u32 {
    5
}
fn default_guided_iterations() -> u32 {
    3
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            guided_iterations: default_guided_iterations(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.iterthought/config.toml).
    ///
    /// Also checks environment variables:
    /// - `ITERTHOUGHT_BACKEND_URL` overrides `backend.url`
    /// - `ITERTHOUGHT_MODEL` overrides `backend.model`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(url) = std::env::var("ITERTHOUGHT_BACKEND_URL") {
            config.backend.url = url;
        }

        if let Ok(model) = std::env::var("ITERTHOUGHT_MODEL") {
            config.backend.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".iterthought")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.retry.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "backend.retry.max_attempts must be at least 1".into(),
            ));
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "backend.timeout_secs must be at least 1".into(),
            ));
        }

        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.url must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Build the KnowledgeBase forwarded to the loops.
    pub fn knowledge_base(&self) -> KnowledgeBase {
        KnowledgeBase::from(self.knowledge.clone())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            loops: LoopConfig::default(),
            knowledge: default_knowledge(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.url, "http://127.0.0.1:11434");
        assert_eq!(config.backend.model, "llama3.1");
        assert_eq!(config.loops.max_iterations, 5);
        assert_eq!(config.loops.guided_iterations, 3);
    }

    #[test]
    fn default_knowledge_matches_example() {
        let kb = AppConfig::default().knowledge_base();
        assert_eq!(kb.get("basic_info"), Some("general knowledge"));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.backend.model, config.backend.model);
        assert_eq!(parsed.loops.max_iterations, config.loops.max_iterations);
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = AppConfig {
            backend: BackendConfig {
                retry: RetryConfig {
                    max_attempts: 0,
                    ..RetryConfig::default()
                },
                ..BackendConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AppConfig {
            backend: BackendConfig {
                timeout_secs: 0,
                ..BackendConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().backend.model, "llama3.1");
    }

    #[test]
    fn file_config_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backend]
model = "qwen2"
url = "http://10.0.0.2:11434"

[loops]
max_iterations = 8

[knowledge]
physics = "classical mechanics notes"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.backend.model, "qwen2");
        assert_eq!(config.backend.url, "http://10.0.0.2:11434");
        assert_eq!(config.loops.max_iterations, 8);
        // partial sections still get their defaults
        assert_eq!(config.loops.guided_iterations, 3);
        assert_eq!(config.backend.retry.max_attempts, 3);
        assert_eq!(
            config.knowledge_base().get("physics"),
            Some("classical mechanics notes")
        );
    }

    #[test]
    fn invalid_toml_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "backend = not-a-table").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama3.1"));
        assert!(toml_str.contains("11434"));
    }
}
