//! Upload-time document processing pipeline
//!
//! Composes the extractor, classifier, and embedder behind shared handles:
//! extract -> classify -> embed. The pipeline never fails; each stage
//! degrades to its safe default (empty text, fallback category, no
//! embedding) and the caller persists whatever was produced.

use crate::classify::Classifier;
use crate::embedding::DocumentEmbedder;
use crate::extract::{FileKind, TextExtractor};
use std::path::Path;
use std::sync::Arc;

/// What ingestion produced for one document
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Extracted plain text, possibly empty
    pub text: String,
    /// Assigned taxonomy category
    pub category: String,
    /// Embedding for persistence; `None` means not yet searchable
    pub embedding: Option<Vec<f32>>,
}

/// Upload-time orchestration over shared, read-only collaborators
pub struct IngestPipeline {
    extractor: Arc<TextExtractor>,
    classifier: Arc<Classifier>,
    embedder: Arc<DocumentEmbedder>,
}

impl IngestPipeline {
    pub fn new(
        extractor: Arc<TextExtractor>,
        classifier: Arc<Classifier>,
        embedder: Arc<DocumentEmbedder>,
    ) -> Self {
        Self {
            extractor,
            classifier,
            embedder,
        }
    }

    /// Process an uploaded file from disk
    pub fn ingest_file(&self, path: &Path, description: &str) -> IngestOutcome {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let text = self.extractor.extract(path);
        self.finish(text, &filename, description)
    }

    /// Process an uploaded document already held in memory
    pub fn ingest_bytes(
        &self,
        bytes: &[u8],
        kind: FileKind,
        filename: &str,
        description: &str,
    ) -> IngestOutcome {
        let text = self.extractor.extract_bytes(bytes, kind);
        self.finish(text, filename, description)
    }

    fn finish(&self, text: String, filename: &str, description: &str) -> IngestOutcome {
        let category = self.classifier.classify(&text);

        let embedding = match self.embedder.embed_document(&text, filename, description) {
            Ok(vector) => Some(vector),
            Err(e) => {
                tracing::warn!(
                    filename,
                    error = %e,
                    "embedding failed; document stored as not yet searchable"
                );
                None
            }
        };

        tracing::info!(
            filename,
            category = %category,
            chars = text.chars().count(),
            searchable = embedding.is_some(),
            "document ingested"
        );

        IngestOutcome {
            text,
            category,
            embedding,
        }
    }
}
