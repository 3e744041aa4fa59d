//! Embedding generation
//!
//! A pretrained sentence-embedding model behind the `EmbeddingProvider`
//! trait, loaded once at process start and shared read-only for the process
//! lifetime. `DocumentEmbedder` layers the document policy (input bound,
//! metadata fallback) on top of the raw provider.

mod document;
mod provider;

pub use document::DocumentEmbedder;
pub use provider::{EmbeddingError, EmbeddingProvider, FastEmbedProvider};

use serde::{Deserialize, Serialize};

/// Configuration for embedding generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model name (e.g., "all-MiniLM-L6-v2")
    pub model: String,
    /// Embedding dimension (384 for MiniLM)
    pub dimension: usize,
    /// Maximum characters of document text encoded per embedding
    pub max_chars: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: FastEmbedProvider::DEFAULT_MODEL.to_string(),
            dimension: 384,
            max_chars: 5000,
        }
    }
}
