//! Document ranking by cosine similarity against a query embedding

use super::{cosine_similarity, DocumentCandidate, SearchConfig, SimilarityResult};
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use std::cmp::Ordering;
use std::sync::Arc;

/// Ranks stored document embeddings against a free-text query
///
/// Exhaustive scan: every candidate is scored exactly, filtered by the
/// inclusive similarity threshold, and sorted descending. The sort is
/// stable, so equal scores keep their input order.
pub struct SemanticRanker {
    provider: Arc<dyn EmbeddingProvider>,
    config: SearchConfig,
}

impl SemanticRanker {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Rank candidates against the query.
    ///
    /// An empty or whitespace-only query yields an empty result, not an
    /// error. Candidates without a stored embedding are skipped silently.
    pub fn rank(
        &self,
        query: &str,
        candidates: &[DocumentCandidate],
    ) -> Result<Vec<SimilarityResult>, EmbeddingError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.provider.embed(query)?;

        let mut results: Vec<SimilarityResult> = candidates
            .iter()
            .filter_map(|candidate| {
                let embedding = candidate.embedding.as_ref()?;
                let score = cosine_similarity(&query_embedding, embedding);
                (score >= self.config.similarity_threshold).then(|| SimilarityResult {
                    id: candidate.id,
                    score,
                    meta: candidate.meta.clone(),
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        tracing::debug!(
            candidates = candidates.len(),
            matched = results.len(),
            threshold = self.config.similarity_threshold,
            "ranked documents for query"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DocumentMeta;

    /// Provider whose query embedding is a fixed unit vector
    struct FixedQueryProvider;

    impl EmbeddingProvider for FixedQueryProvider {
        fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if text.is_empty() {
                return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
            }
            Ok(vec![1.0, 0.0])
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            texts.iter().map(|t| self.embed(t)).collect()
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn candidate(id: i64, embedding: Option<Vec<f32>>) -> DocumentCandidate {
        DocumentCandidate {
            id,
            embedding,
            meta: DocumentMeta {
                filename: format!("doc-{}.pdf", id),
                ..DocumentMeta::default()
            },
        }
    }

    fn ranker() -> SemanticRanker {
        SemanticRanker::new(Arc::new(FixedQueryProvider), SearchConfig::default())
    }

    #[test]
    fn test_empty_query_is_empty_result() {
        let r = ranker();
        let candidates = vec![candidate(1, Some(vec![1.0, 0.0]))];
        assert!(r.rank("", &candidates).unwrap().is_empty());
        assert!(r.rank("   ", &candidates).unwrap().is_empty());
    }

    #[test]
    fn test_sorted_descending_above_threshold() {
        let r = ranker();
        let candidates = vec![
            candidate(1, Some(vec![0.5, 0.5])),  // ~0.707
            candidate(2, Some(vec![1.0, 0.0])),  // 1.0
            candidate(3, Some(vec![0.0, 1.0])),  // 0.0 -> dropped
            candidate(4, Some(vec![0.9, 0.44])), // ~0.898
        ];

        let results = r.rank("budget report", &candidates).unwrap();
        let ids: Vec<i64> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
        for result in &results {
            assert!(result.score >= 0.35);
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // cosine((1,0), (3,4)) == 3/5 == 0.6 exactly, even in f32
        let config = SearchConfig {
            similarity_threshold: 0.6,
            ..SearchConfig::default()
        };
        let r = SemanticRanker::new(Arc::new(FixedQueryProvider), config);

        let results = r
            .rank("query", &[candidate(7, Some(vec![3.0, 4.0]))])
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 7);
        assert_eq!(results[0].score, 0.6);
    }

    #[test]
    fn test_null_embeddings_skipped() {
        let r = ranker();
        let candidates = vec![
            candidate(1, None),
            candidate(2, Some(vec![1.0, 0.0])),
            candidate(3, None),
        ];

        let results = r.rank("query", &candidates).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let r = ranker();
        let candidates = vec![
            candidate(5, Some(vec![2.0, 0.0])),
            candidate(9, Some(vec![3.0, 0.0])),
        ];

        let results = r.rank("query", &candidates).unwrap();
        let ids: Vec<i64> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn test_metadata_echoed() {
        let r = ranker();
        let results = r
            .rank("query", &[candidate(3, Some(vec![1.0, 0.0]))])
            .unwrap();
        assert_eq!(results[0].meta.filename, "doc-3.pdf");
    }
}
