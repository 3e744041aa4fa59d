//! Ranking and highlighting behavior with a deterministic stub provider

use docsense::embedding::{DocumentEmbedder, EmbeddingError, EmbeddingProvider};
use docsense::search::{
    DocumentCandidate, DocumentMeta, SearchConfig, SemanticRanker, SentenceHighlighter,
};
use std::sync::Arc;

/// Deterministic 3-dim provider: known phrases embed to fixed directions,
/// everything else lands orthogonal to the query axis
struct StubProvider;

impl EmbeddingProvider for StubProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
        }
        let lowered = text.to_lowercase();
        Ok(if lowered.contains("budget") {
            vec![1.0, 0.0, 0.0]
        } else if lowered.contains("finance") {
            vec![4.0, 3.0, 0.0] // 0.8 against the budget axis
        } else if lowered.contains("audit") {
            vec![3.0, 4.0, 0.0] // 0.6 against the budget axis
        } else {
            vec![0.0, 0.0, 1.0]
        })
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn provider() -> Arc<dyn EmbeddingProvider> {
    Arc::new(StubProvider)
}

fn candidate(id: i64, filename: &str, embedding: Option<Vec<f32>>) -> DocumentCandidate {
    DocumentCandidate {
        id,
        embedding,
        meta: DocumentMeta {
            filename: filename.to_string(),
            category: "Administrative".to_string(),
            ..DocumentMeta::default()
        },
    }
}

#[test]
fn test_empty_query_returns_empty_for_any_candidates() {
    let ranker = SemanticRanker::new(provider(), SearchConfig::default());
    let candidates = vec![
        candidate(1, "a.pdf", Some(vec![1.0, 0.0, 0.0])),
        candidate(2, "b.pdf", Some(vec![0.0, 1.0, 0.0])),
    ];

    assert!(ranker.rank("", &candidates).unwrap().is_empty());
    assert!(ranker.rank(" \t\n", &candidates).unwrap().is_empty());
}

#[test]
fn test_rank_sorts_descending_and_filters() {
    let ranker = SemanticRanker::new(provider(), SearchConfig::default());
    let candidates = vec![
        candidate(1, "audit-plan.pdf", Some(vec![3.0, 4.0, 0.0])), // 0.6
        candidate(2, "budget-2024.pdf", Some(vec![1.0, 0.0, 0.0])), // 1.0
        candidate(3, "unrelated.pdf", Some(vec![0.0, 0.0, 1.0])),  // 0.0
        candidate(4, "finance-summary.pdf", Some(vec![4.0, 3.0, 0.0])), // 0.8
    ];

    let results = ranker.rank("budget report", &candidates).unwrap();

    let names: Vec<&str> = results.iter().map(|m| m.meta.filename.as_str()).collect();
    assert_eq!(
        names,
        vec!["budget-2024.pdf", "finance-summary.pdf", "audit-plan.pdf"]
    );
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
    for result in &results {
        assert!(result.score >= 0.35);
    }
}

#[test]
fn test_rank_skips_missing_embeddings() {
    let ranker = SemanticRanker::new(provider(), SearchConfig::default());
    let candidates = vec![
        candidate(1, "pending.pdf", None),
        candidate(2, "ready.pdf", Some(vec![1.0, 0.0, 0.0])),
    ];

    let results = ranker.rank("budget", &candidates).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 2);
}

#[test]
fn test_rank_of_empty_candidate_set() {
    let ranker = SemanticRanker::new(provider(), SearchConfig::default());
    assert!(ranker.rank("budget", &[]).unwrap().is_empty());
}

#[test]
fn test_highlight_returns_top_k_above_threshold() {
    let highlighter = SentenceHighlighter::new(provider(), SearchConfig::default());
    let text = "The finance committee reviewed the quarterly figures in detail. \
                The audit findings were discussed at considerable length there. \
                Lunch was served in the hall and everyone attended gladly. \
                The budget allocation for laboratories was approved unanimously.";

    let matches = highlighter.highlight(text, "budget").unwrap();

    assert!(matches.len() <= 5);
    assert_eq!(matches.len(), 3);
    assert!(matches[0].sentence.contains("budget allocation"));
    assert!(matches[1].sentence.contains("finance committee"));
    assert!(matches[2].sentence.contains("audit findings"));
    for m in &matches {
        assert!(m.score > 0.35);
    }
    for window in matches.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[test]
fn test_highlight_empty_inputs() {
    let highlighter = SentenceHighlighter::new(provider(), SearchConfig::default());
    assert!(highlighter.highlight("", "budget").unwrap().is_empty());
    assert!(highlighter
        .highlight("The budget was approved for the year.", "")
        .unwrap()
        .is_empty());
}

#[test]
fn test_highlight_drops_short_sentences() {
    let highlighter = SentenceHighlighter::new(provider(), SearchConfig::default());
    // "Budget." is on-topic but far below the length floor
    let matches = highlighter.highlight("Budget. Yes. Ok.", "budget").unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_highlight_respects_custom_top_k() {
    let config = SearchConfig {
        top_k: 1,
        ..SearchConfig::default()
    };
    let highlighter = SentenceHighlighter::new(provider(), config);
    let text = "The budget allocation was approved by the board members. \
                The finance committee endorsed the supplemental budget request.";

    let matches = highlighter.highlight(text, "budget").unwrap();
    assert_eq!(matches.len(), 1);
}

#[test]
fn test_document_embedder_fallback_and_determinism() {
    let embedder = DocumentEmbedder::new(provider(), 5000);

    // Empty text falls back to description + filename, so the document is
    // still searchable
    let fallback = embedder
        .embed_document("", "budget-2024.pdf", "annual budget")
        .unwrap();
    assert_eq!(fallback, vec![1.0, 0.0, 0.0]);

    let a = embedder.embed_document("finance text", "f.pdf", "").unwrap();
    let b = embedder.embed_document("finance text", "f.pdf", "").unwrap();
    assert_eq!(a, b);
}
