//! Multi-signal heuristic document classification
//!
//! Three scoring stages (entity, keyword, structural) each produce a fresh
//! scoreboard; the stages are merged and the argmax picked with a
//! first-declared-wins tie-break and a minimum-confidence floor.

use crate::taxonomy::RuleRegistry;
use std::sync::Arc;

/// Per-classification score accumulation, index-aligned with the taxonomy
/// declaration order. Weights are non-negative, so scores never decrease
/// while signals accumulate and the argmax is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    scores: Vec<u32>,
}

impl Scoreboard {
    /// Scoreboard with every category at zero
    pub fn zeroed(category_count: usize) -> Self {
        Self {
            scores: vec![0; category_count],
        }
    }

    pub fn add(&mut self, category_idx: usize, weight: u32) {
        self.scores[category_idx] += weight;
    }

    /// Elementwise sum of two scoreboards over the same taxonomy
    pub fn merge(mut self, other: &Scoreboard) -> Self {
        debug_assert_eq!(self.scores.len(), other.scores.len());
        for (score, extra) in self.scores.iter_mut().zip(&other.scores) {
            *score += extra;
        }
        self
    }

    pub fn score(&self, category_idx: usize) -> u32 {
        self.scores[category_idx]
    }

    /// Index and score of the winning category; ties break toward the
    /// lowest index (first declared category)
    pub fn winner(&self) -> Option<(usize, u32)> {
        let mut best: Option<(usize, u32)> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((idx, score)),
            }
        }
        best
    }
}

/// Heuristic classifier over an injected, read-only rule registry
pub struct Classifier {
    registry: Arc<RuleRegistry>,
}

impl Classifier {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Classify text into a taxonomy category name.
    ///
    /// Always returns a category; empty or low-evidence text yields the
    /// fallback category. Keyword and structural matching is substring
    /// containment on the lowered text ("so no" matching inside unrelated
    /// words is a known, accepted imprecision of the heuristic).
    pub fn classify(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        let board = self
            .entity_signals(text)
            .merge(&self.keyword_signals(&lowered))
            .merge(&self.structural_signals(&lowered));

        let Some((winner_idx, winning_score)) = board.winner() else {
            return self.registry.fallback_category().to_string();
        };

        if winning_score < self.registry.min_winning_score() {
            tracing::debug!(
                winning_score,
                floor = self.registry.min_winning_score(),
                "classification below confidence floor"
            );
            return self.registry.fallback_category().to_string();
        }

        self.registry.category_name(winner_idx).to_string()
    }

    /// Entity pass over the original-case text; every detected entity adds
    /// its rule weight once per occurrence.
    pub fn entity_signals(&self, text: &str) -> Scoreboard {
        let mut board = Scoreboard::zeroed(self.registry.category_count());
        if text.is_empty() {
            return board;
        }

        for rule in self.registry.entity_rules() {
            let hits = rule.count_matches(text);
            if hits > 0 {
                board.add(rule.category_idx, hits * rule.weight);
            }
        }
        board
    }

    /// Keyword pass: +weight per distinct keyword in a category's list whose
    /// substring occurs in the lowered text. Not counted per raw occurrence.
    pub fn keyword_signals(&self, lowered: &str) -> Scoreboard {
        let mut board = Scoreboard::zeroed(self.registry.category_count());
        if lowered.is_empty() {
            return board;
        }

        for idx in 0..self.registry.category_count() {
            let weight = self.registry.keyword_weight(idx);
            for keyword in self.registry.keywords(idx) {
                if lowered.contains(keyword.as_str()) {
                    board.add(idx, weight);
                }
            }
        }
        board
    }

    /// Structural phrase pass; rules are checked independently, never
    /// mutually exclusive.
    pub fn structural_signals(&self, lowered: &str) -> Scoreboard {
        let mut board = Scoreboard::zeroed(self.registry.category_count());
        if lowered.is_empty() {
            return board;
        }

        for rule in self.registry.structural_rules() {
            if rule.trigger.fires(lowered) {
                board.add(rule.category_idx, rule.weight);
            }
        }
        board
    }
}
