//! Pattern-driven entity recognition feeding the classifier's entity signals
//!
//! Stands in for a full NLP pipeline: each rule is a labeled set of
//! pre-compiled regexes routed to one taxonomy category with a fixed weight.

use crate::error::{DocsenseError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entity rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRuleConfig {
    /// Label for the rule (organization, person, date, law, ...)
    pub label: String,
    /// Regex patterns; every non-overlapping match counts as one entity
    pub patterns: Vec<String>,
    /// Target taxonomy category receiving the weight
    pub category: String,
    /// Weight added per detected entity
    pub weight: u32,
}

/// Compiled entity rule with pre-compiled regexes
#[derive(Debug, Clone)]
pub struct CompiledEntityRule {
    pub label: String,
    pub regexes: Vec<Regex>,
    /// Index into the registry's category table
    pub category_idx: usize,
    pub weight: u32,
}

impl CompiledEntityRule {
    pub fn compile(config: &EntityRuleConfig, category_idx: usize) -> Result<Self> {
        let regexes = config
            .patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    DocsenseError::Rule(format!(
                        "Invalid pattern for entity rule '{}': {}",
                        config.label, e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            label: config.label.clone(),
            regexes,
            category_idx,
            weight: config.weight,
        })
    }

    /// Count entity occurrences in text (non-overlapping, per pattern)
    pub fn count_matches(&self, text: &str) -> u32 {
        self.regexes
            .iter()
            .map(|r| r.find_iter(text).count() as u32)
            .sum()
    }
}

/// Recognized entity span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedEntity {
    /// Rule label that produced the match
    pub label: String,
    /// Matched text
    pub value: String,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset of the match end
    pub end: usize,
}

/// Extract all entity spans from text, in rule declaration order
pub fn recognize_entities(rules: &[CompiledEntityRule], text: &str) -> Vec<RecognizedEntity> {
    rules
        .iter()
        .flat_map(|rule| {
            rule.regexes.iter().flat_map(|regex| {
                regex.find_iter(text).map(|m| RecognizedEntity {
                    label: rule.label.clone(),
                    value: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                })
            })
        })
        .collect()
}
