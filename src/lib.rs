//! Docsense - Document Understanding & Retrieval Core
//!
//! The classification and semantic-search engine behind a content-management
//! backend: extracts text from heterogeneous document formats (with OCR
//! fallback), assigns each document a taxonomy category through weighted
//! multi-signal heuristics, embeds documents with a local sentence-embedding
//! model, and ranks documents and sentences against free-text queries by
//! cosine similarity.

pub mod classify;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod search;
pub mod taxonomy;

pub use error::{DocsenseError, Result};
