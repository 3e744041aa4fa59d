use crate::config::Config;
use crate::error::{DocsenseError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_extraction(config, &mut errors);
        Self::validate_classifier(config, &mut errors);
        Self::validate_embedding(config, &mut errors);
        Self::validate_search(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DocsenseError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_extraction(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.extraction.tesseract_command.is_empty() {
            errors.push(ValidationError::new(
                "extraction.tesseract_command",
                "Tesseract command cannot be empty",
            ));
        }
        if config.extraction.ocr_language.is_empty() {
            errors.push(ValidationError::new(
                "extraction.ocr_language",
                "OCR language cannot be empty",
            ));
        }
        if config.extraction.render_width == 0 {
            errors.push(ValidationError::new(
                "extraction.render_width",
                "Render width must be greater than 0",
            ));
        }
    }

    fn validate_classifier(config: &Config, errors: &mut Vec<ValidationError>) {
        // Rule file existence is not checked here; it may use ~ expansion
        // and RuleRegistry loading reports missing files itself
        if let Some(path) = &config.classifier.rules_file {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    "classifier.rules_file",
                    "Rules file path cannot be empty",
                ));
            }
        }
    }

    fn validate_embedding(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.embedding.model.is_empty() {
            errors.push(ValidationError::new(
                "embedding.model",
                "Model name cannot be empty",
            ));
        }
        if config.embedding.dimension == 0 {
            errors.push(ValidationError::new(
                "embedding.dimension",
                "Dimension must be greater than 0",
            ));
        }
        if config.embedding.max_chars == 0 {
            errors.push(ValidationError::new(
                "embedding.max_chars",
                "Max chars must be greater than 0",
            ));
        }
    }

    fn validate_search(config: &Config, errors: &mut Vec<ValidationError>) {
        for (path, value) in [
            (
                "search.similarity_threshold",
                config.search.similarity_threshold,
            ),
            (
                "search.highlight_threshold",
                config.search.highlight_threshold,
            ),
        ] {
            if !(-1.0..=1.0).contains(&value) {
                errors.push(ValidationError::new(
                    path,
                    format!("Threshold must be within [-1.0, 1.0], got {}", value),
                ));
            }
        }

        if config.search.top_k == 0 {
            errors.push(ValidationError::new(
                "search.top_k",
                "top_k must be greater than 0",
            ));
        }
    }
}
