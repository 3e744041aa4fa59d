//! Semantic search over stored document embeddings
//!
//! Exhaustive cosine-similarity ranking plus sentence-level highlighting.
//! Candidates come from the external storage layer; a missing embedding
//! means "not yet searchable" and is skipped, never an error.

mod highlight;
mod ranker;
mod sentences;

pub use highlight::SentenceHighlighter;
pub use ranker::SemanticRanker;
pub use sentences::segment_sentences;

use serde::{Deserialize, Serialize};

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum cosine score a ranked document keeps (inclusive)
    pub similarity_threshold: f32,
    /// Minimum cosine score a highlighted sentence keeps (exclusive)
    pub highlight_threshold: f32,
    /// Maximum highlighted sentences returned per document
    pub top_k: usize,
    /// Sentences with trimmed length not above this are discarded as
    /// fragments or headers
    pub min_sentence_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.35,
            highlight_threshold: 0.35,
            top_k: 5,
            min_sentence_chars: 20,
        }
    }
}

/// Document metadata echoed back with search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub filename: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Ranking candidate handed over by the storage layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCandidate {
    pub id: i64,
    /// Stored embedding; `None` means the document is not yet searchable
    pub embedding: Option<Vec<f32>>,
    pub meta: DocumentMeta,
}

/// Ranked document with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub id: i64,
    pub score: f32,
    pub meta: DocumentMeta,
}

/// Highlighted sentence with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceMatch {
    pub sentence: String,
    pub score: f32,
}

/// Cosine similarity of two vectors.
///
/// Zero-magnitude or length-mismatched inputs score 0.0 rather than
/// producing NaN or panicking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            left = a.len(),
            right = b.len(),
            "embedding dimension mismatch; scoring 0.0"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_is_one() {
        let v = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_opposite_is_negative_one() {
        let a = [1.0, 2.0];
        let b = [-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector_guard() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch_guard() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }
}
