//! Declarative weighted-rule tables for document classification
//!
//! The taxonomy is a fixed, ordered set of categories plus three rule kinds:
//! - entity rules (pattern recognizer, high-confidence signals)
//! - keyword lists (+weight per distinct keyword found as a substring)
//! - structural phrase rules (fixed boosts, checked independently)
//!
//! Rules are plain data loaded from TOML (or the built-in default set) and
//! compiled once into a `RuleRegistry`; scoring control flow never changes
//! when rules do.

mod entities;

pub use entities::{recognize_entities, CompiledEntityRule, EntityRuleConfig, RecognizedEntity};

use crate::error::{DocsenseError, Result};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_keyword_weight() -> u32 {
    2
}

/// One taxonomy category with its keyword list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Weight added per distinct keyword present in the text
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: u32,
}

/// Structural phrase rule; exactly one trigger kind must be set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralRuleConfig {
    pub category: String,
    pub weight: u32,
    /// Fires when the phrase occurs anywhere in the lowered text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substring: Option<String>,
    /// Fires when every phrase occurs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<String>,
    /// Fires when at least one phrase occurs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<String>,
}

/// Taxonomy configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Category returned when no signal clears the confidence floor
    pub fallback_category: String,
    /// Minimum winning score; below this the fallback category is returned
    pub min_winning_score: u32,
    /// Categories in declaration order; ties break toward the first declared
    pub category: Vec<CategoryConfig>,
    #[serde(default)]
    pub entity_rule: Vec<EntityRuleConfig>,
    #[serde(default)]
    pub structural_rule: Vec<StructuralRuleConfig>,
}

/// Trigger for a compiled structural rule
#[derive(Debug, Clone)]
pub enum StructuralTrigger {
    Substring(String),
    AllOf(Vec<String>),
    AnyOf(Vec<String>),
}

impl StructuralTrigger {
    /// Evaluate against the lowered document text (substring containment)
    pub fn fires(&self, lowered: &str) -> bool {
        match self {
            StructuralTrigger::Substring(phrase) => lowered.contains(phrase.as_str()),
            StructuralTrigger::AllOf(phrases) => {
                phrases.iter().all(|p| lowered.contains(p.as_str()))
            }
            StructuralTrigger::AnyOf(phrases) => {
                phrases.iter().any(|p| lowered.contains(p.as_str()))
            }
        }
    }
}

/// Compiled structural rule
#[derive(Debug, Clone)]
pub struct CompiledStructuralRule {
    pub trigger: StructuralTrigger,
    pub category_idx: usize,
    pub weight: u32,
}

/// Compiled rule registry shared read-only across classification calls
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    categories: Vec<String>,
    fallback_category: String,
    min_winning_score: u32,
    /// Per-category lowered keyword lists, aligned with `categories`
    keywords: Vec<Vec<String>>,
    /// Per-category keyword weight, aligned with `categories`
    keyword_weights: Vec<u32>,
    entity_rules: Vec<CompiledEntityRule>,
    structural_rules: Vec<CompiledStructuralRule>,
}

impl RuleRegistry {
    /// Compile a registry from parsed configuration
    pub fn from_config(config: TaxonomyConfig) -> Result<Self> {
        if config.category.is_empty() {
            return Err(DocsenseError::Rule(
                "Taxonomy must declare at least one category".to_string(),
            ));
        }

        let categories: Vec<String> = config.category.iter().map(|c| c.name.clone()).collect();

        let lookup = |name: &str, owner: &str| -> Result<usize> {
            categories
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| {
                    DocsenseError::Rule(format!(
                        "Unknown category '{}' referenced by {}",
                        name, owner
                    ))
                })
        };

        // Keyword tables: lowered, deduplicated, declaration order preserved
        let mut keywords = Vec::with_capacity(categories.len());
        let mut keyword_weights = Vec::with_capacity(categories.len());
        for cat in &config.category {
            let mut seen: AHashSet<String> = AHashSet::new();
            let mut list = Vec::new();
            for kw in &cat.keywords {
                let lowered = kw.to_lowercase();
                if seen.insert(lowered.clone()) {
                    list.push(lowered);
                }
            }
            keywords.push(list);
            keyword_weights.push(cat.keyword_weight);
        }

        let entity_rules = config
            .entity_rule
            .iter()
            .map(|rule| {
                let idx = lookup(&rule.category, &format!("entity rule '{}'", rule.label))?;
                CompiledEntityRule::compile(rule, idx)
            })
            .collect::<Result<Vec<_>>>()?;

        let structural_rules = config
            .structural_rule
            .iter()
            .map(|rule| {
                let idx = lookup(&rule.category, "structural rule")?;
                let trigger = Self::compile_trigger(rule)?;
                Ok(CompiledStructuralRule {
                    trigger,
                    category_idx: idx,
                    weight: rule.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            categories,
            fallback_category: config.fallback_category,
            min_winning_score: config.min_winning_score,
            keywords,
            keyword_weights,
            entity_rules,
            structural_rules,
        })
    }

    /// Load and compile a registry from a TOML rule file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DocsenseError::Io {
            source: e,
            context: format!("Failed to read taxonomy rules: {:?}", path),
        })?;
        let config: TaxonomyConfig = toml::from_str(&content)?;
        Self::from_config(config)
    }

    /// Compile the built-in default ruleset
    pub fn default_rules() -> Result<Self> {
        Self::from_config(TaxonomyConfig::default())
    }

    fn compile_trigger(rule: &StructuralRuleConfig) -> Result<StructuralTrigger> {
        let kinds = usize::from(rule.substring.is_some())
            + usize::from(!rule.all_of.is_empty())
            + usize::from(!rule.any_of.is_empty());
        if kinds != 1 {
            return Err(DocsenseError::Rule(format!(
                "Structural rule for '{}' must set exactly one of substring/all_of/any_of",
                rule.category
            )));
        }

        let lower = |v: &[String]| v.iter().map(|p| p.to_lowercase()).collect::<Vec<_>>();
        Ok(if let Some(phrase) = &rule.substring {
            StructuralTrigger::Substring(phrase.to_lowercase())
        } else if !rule.all_of.is_empty() {
            StructuralTrigger::AllOf(lower(&rule.all_of))
        } else {
            StructuralTrigger::AnyOf(lower(&rule.any_of))
        })
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category_name(&self, idx: usize) -> &str {
        &self.categories[idx]
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    pub fn min_winning_score(&self) -> u32 {
        self.min_winning_score
    }

    pub fn keywords(&self, category_idx: usize) -> &[String] {
        &self.keywords[category_idx]
    }

    pub fn keyword_weight(&self, category_idx: usize) -> u32 {
        self.keyword_weights[category_idx]
    }

    pub fn entity_rules(&self) -> &[CompiledEntityRule] {
        &self.entity_rules
    }

    pub fn structural_rules(&self) -> &[CompiledStructuralRule] {
        &self.structural_rules
    }

    /// Extract all entity spans from text (original case)
    pub fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        recognize_entities(&self.entity_rules, text)
    }
}

impl Default for TaxonomyConfig {
    /// Built-in ruleset for the content-management taxonomy
    fn default() -> Self {
        let category = |name: &str, keywords: &[&str]| CategoryConfig {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            keyword_weight: 2,
        };

        let entity = |label: &str, patterns: &[&str], cat: &str, weight: u32| EntityRuleConfig {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            category: cat.to_string(),
            weight,
        };

        let substring = |cat: &str, phrase: &str, weight: u32| StructuralRuleConfig {
            category: cat.to_string(),
            weight,
            substring: Some(phrase.to_string()),
            ..Default::default()
        };
        let all_of = |cat: &str, phrases: &[&str], weight: u32| StructuralRuleConfig {
            category: cat.to_string(),
            weight,
            all_of: phrases.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        };
        let any_of = |cat: &str, phrases: &[&str], weight: u32| StructuralRuleConfig {
            category: cat.to_string(),
            weight,
            any_of: phrases.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        };

        Self {
            fallback_category: "General".to_string(),
            min_winning_score: 2,
            category: vec![
                category(
                    "Administrative",
                    &[
                        "office",
                        "admin",
                        "administrative",
                        "committee",
                        "meeting",
                        "secretariat",
                        "endorsement",
                        "attendance",
                        "subject",
                    ],
                ),
                category(
                    "Academics",
                    &[
                        "academic",
                        "faculty",
                        "student",
                        "class",
                        "course",
                        "curriculum",
                        "syllabus",
                        "lecture",
                        "load",
                        "midterm",
                        "finals",
                    ],
                ),
                category(
                    "Research",
                    &[
                        "research",
                        "study",
                        "rde",
                        "proposal",
                        "ethics",
                        "manuscript",
                        "publication",
                        "extension",
                        "innovation",
                        "narrative report",
                        "terminal report",
                    ],
                ),
                category(
                    "Policies",
                    &[
                        "policy",
                        "guidelines",
                        "procedures",
                        "compliance",
                        "section",
                        "article",
                        "provision",
                        "manual",
                        "repealing clause",
                        "effectivity",
                    ],
                ),
                category(
                    "Official Issuances",
                    &[
                        "memo",
                        "memorandum",
                        "special order",
                        "directive",
                        "instruction",
                        "resolution",
                        "endorsed",
                        "recommendation",
                        "approved",
                        "council",
                        "board",
                        "memorandum of agreement",
                        "moa",
                        "agreement",
                        "parties",
                        "obligations",
                        "responsibilities",
                        "deliverables",
                        "terms and conditions",
                        "scope of work",
                        "duration",
                        "effectivity",
                        "signatories",
                    ],
                ),
                category(
                    "News & Events",
                    &[
                        "event",
                        "activity",
                        "program",
                        "launching",
                        "workshop",
                        "celebration",
                        "highlights",
                        "gallery",
                    ],
                ),
            ],
            entity_rule: vec![
                entity(
                    "organization",
                    &[
                        r"\b(?:[A-Z][A-Za-z&.'-]*\s+)*(?:University|College|Institute|Office|Department|Bureau|Commission|Council|Division|Agency|Corporation|Foundation|Association)\b",
                        r"\b[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\s+(?:Inc\.|Corp\.|LLC|Ltd\.|Co\.)",
                    ],
                    "Administrative",
                    1,
                ),
                entity(
                    "person",
                    &[r"\b(?:Mr|Mrs|Ms|Dr|Prof|Engr|Atty|Hon)\.?\s+[A-Z][a-z]+(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+)?"],
                    "Administrative",
                    1,
                ),
                entity(
                    "date",
                    &[
                        r"\b(?i:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2}(?:st|nd|rd|th)?,?\s*\d{4}\b",
                        r"\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b",
                        r"\b\d{4}[-/]\d{1,2}[-/]\d{1,2}\b",
                        r"\b(?:19|20)\d{2}\b",
                    ],
                    "Official Issuances",
                    1,
                ),
                entity(
                    "law",
                    &[r"(?i)\b(?:GDPR|HIPAA|FERPA|data privacy act|privacy policy|republic act no\.?\s*\d+|ra\s+no\.?\s*\d+)\b"],
                    "Policies",
                    20,
                ),
                entity("policy_term", &[r"(?i)\bmanual\b"], "Policies", 20),
                entity(
                    "event",
                    &[
                        r"(?i)\b(?:annual|international|national|founding)\s+(?:conference|summit|festival|celebration|convention|games)\b",
                        r"(?i)\b(?:foundation day|sports ?fest|intramurals)\b",
                    ],
                    "News & Events",
                    2,
                ),
                entity(
                    "research_term",
                    &[r"(?i)\b(?:terminal report|clinical trial|peer review|methodology section|research paper)\b"],
                    "Research",
                    20,
                ),
            ],
            structural_rule: vec![
                substring("Official Issuances", "resolution no", 12),
                any_of("Official Issuances", &["special order", "so no"], 10),
                substring("Official Issuances", "memorandum", 8),
                substring("Official Issuances", "memorandum of agreement", 12),
                all_of("Official Issuances", &["this agreement", "parties"], 8),
                substring("Official Issuances", "terms and conditions", 5),
                substring("Official Issuances", "obligations of the parties", 10),
                all_of("Academics", &["faculty", "load"], 7),
                all_of("Research", &["research", "abstract"], 5),
                substring("Research", "narrative report", 30),
                substring("Research", "terminal report", 30),
                any_of("News & Events", &["event", "activity"], 5),
                substring("Policies", "manual", 15),
                substring("Policies", "repealing clause", 15),
            ],
        }
    }
}
