//! Document-level embedding policy: bounded input, guaranteed output
//!
//! Wraps a provider with the two rules every stored document follows: text
//! is truncated to a bounded prefix before encoding, and empty text falls
//! back to the description + filename so the document still becomes
//! searchable.

use super::{EmbeddingError, EmbeddingProvider};
use std::sync::Arc;

/// Embeds documents for persistence alongside their records
pub struct DocumentEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
    max_chars: usize,
}

impl DocumentEmbedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, max_chars: usize) -> Self {
        Self {
            provider,
            max_chars,
        }
    }

    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Embed a document's extracted text.
    ///
    /// Deterministic for identical (model, input). Whitespace-only text is
    /// embedded as "{description} {filename}" instead; when even those are
    /// empty, a literal placeholder keeps the vector usable.
    pub fn embed_document(
        &self,
        text: &str,
        filename: &str,
        description: &str,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let content = self.effective_content(text, filename, description);
        self.provider.embed(&content)
    }

    fn effective_content(&self, text: &str, filename: &str, description: &str) -> String {
        if !text.trim().is_empty() {
            return truncate_chars(text, self.max_chars);
        }

        let fallback = format!("{} {}", description, filename);
        let fallback = fallback.trim();
        if fallback.is_empty() {
            tracing::warn!("no text, description, or filename; embedding placeholder");
            "document".to_string()
        } else {
            tracing::debug!(fallback, "empty text; embedding filename and description");
            fallback.to_string()
        }
    }
}

/// Truncate to a prefix of at most `max_chars` characters, on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
