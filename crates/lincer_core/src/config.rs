//! Configuration: model settings plus API key resolution.
//!
//! Config file: ~/.config/lincer/config.toml (optional). The API key is
//! required and resolved once at startup, environment first and config
//! file second; absence halts the application before any analysis.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the model service credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration errors surfaced at startup
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Chave API Gemini nao configurada. Defina GEMINI_API_KEY no ambiente ou api_key no arquivo de configuracao."
    )]
    MissingApiKey,
}

/// Model service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout; video analysis can take minutes
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Main Lincer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LincerConfig {
    /// Model service settings
    #[serde(default)]
    pub model: ModelConfig,

    /// API key fallback when the environment variable is unset
    #[serde(default)]
    pub api_key: Option<String>,
}

impl LincerConfig {
    /// Config file location (~/.config/lincer/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lincer").join("config.toml"))
    }

    /// Load from the config file, or defaults when it doesn't exist
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the required API key: environment first, then config file.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        let env_value = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key_from(env_value.as_deref())
    }

    fn resolve_api_key_from(&self, env_value: Option<&str>) -> Result<String, ConfigError> {
        if let Some(key) = env_value.map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_default() {
        let config = ModelConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.endpoint, "https://generativelanguage.googleapis.com");
        assert_eq!(config.timeout_secs, 600);
    }

    #[test]
    fn test_api_key_env_wins() {
        let config = LincerConfig {
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_key_from(Some("env-key")).unwrap(),
            "env-key"
        );
    }

    #[test]
    fn test_api_key_falls_back_to_config_file() {
        let config = LincerConfig {
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key_from(None).unwrap(), "file-key");
        // Blank env values don't count as configured
        assert_eq!(config.resolve_api_key_from(Some("  ")).unwrap(), "file-key");
    }

    #[test]
    fn test_api_key_missing_everywhere() {
        let config = LincerConfig::default();
        assert!(config.resolve_api_key_from(None).is_err());
        assert!(config.resolve_api_key_from(Some("")).is_err());
    }

    #[test]
    fn test_config_parses_partial_toml() {
        let config: LincerConfig = toml::from_str("[model]\nmodel = \"gemini-2.0-pro\"\n").unwrap();
        assert_eq!(config.model.model, "gemini-2.0-pro");
        assert_eq!(config.model.timeout_secs, 600);
        assert!(config.api_key.is_none());
    }
}
