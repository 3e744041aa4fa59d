//! Configuration management for Docsense
//!
//! TOML-backed configuration composed from each subsystem's config section,
//! with environment-variable overrides and validation on load.

use crate::embedding::EmbeddingConfig;
use crate::error::{DocsenseError, Result};
use crate::extract::ExtractionConfig;
use crate::search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub extraction: ExtractionConfig,
    pub classifier: ClassifierConfig,
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Classifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Optional TOML rule file overriding the built-in taxonomy rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            extraction: ExtractionConfig::default(),
            classifier: ClassifierConfig::default(),
            embedding: EmbeddingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocsenseError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DocsenseError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Load from the given path, or fall back to defaults when no file exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    let mut config = Config::default();
                    config.apply_env_overrides();
                    Ok(config)
                }
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DocsenseError::Io {
                source: e,
                context: format!("Failed to create config directory: {:?}", parent),
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| DocsenseError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Default config path (~/.config/docsense/config.toml)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docsense")
            .join("config.toml")
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("DOCSENSE_EMBEDDING_MODEL") {
            if !model.is_empty() {
                self.embedding.model = model;
            }
        }
        if let Ok(command) = std::env::var("DOCSENSE_TESSERACT_COMMAND") {
            if !command.is_empty() {
                self.extraction.tesseract_command = command;
            }
        }
        if std::env::var("DOCSENSE_DISABLE_OCR").is_ok() {
            self.extraction.ocr_enabled = false;
        }
    }
}
