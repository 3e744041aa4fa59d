//! Sentence-level highlighting of a document against a query

use super::{cosine_similarity, segment_sentences, SearchConfig, SentenceMatch};
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use std::cmp::Ordering;
use std::sync::Arc;

/// Finds the sentences of a document most similar to a query
///
/// Note the threshold is strictly exclusive (score > threshold) where the
/// document ranker's is inclusive; the asymmetry is long-standing observed
/// behavior and kept deliberately.
pub struct SentenceHighlighter {
    provider: Arc<dyn EmbeddingProvider>,
    config: SearchConfig,
}

impl SentenceHighlighter {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Return the top sentences of `text` ranked against `query`.
    ///
    /// Empty text or query yields an empty result. Sentences whose trimmed
    /// length does not exceed the configured minimum are discarded as
    /// fragments or headers before any embedding happens.
    pub fn highlight(
        &self,
        text: &str,
        query: &str,
    ) -> Result<Vec<SentenceMatch>, EmbeddingError> {
        if text.trim().is_empty() || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sentences: Vec<String> = segment_sentences(text)
            .into_iter()
            .filter(|s| s.trim().chars().count() > self.config.min_sentence_chars)
            .collect();
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let sentence_embeddings = self.provider.embed_batch(&sentences)?;
        let query_embedding = self.provider.embed(query)?;

        let mut matches: Vec<SentenceMatch> = sentences
            .into_iter()
            .zip(sentence_embeddings)
            .map(|(sentence, embedding)| SentenceMatch {
                score: cosine_similarity(&query_embedding, &embedding),
                sentence,
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        matches.retain(|m| m.score > self.config.highlight_threshold);
        matches.truncate(self.config.top_k);

        tracing::debug!(
            kept = matches.len(),
            top_k = self.config.top_k,
            threshold = self.config.highlight_threshold,
            "highlighted sentences for query"
        );

        Ok(matches)
    }
}
