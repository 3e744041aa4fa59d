//! Text extraction for heterogeneous document formats
//!
//! Normalizes PDF (native text with per-page OCR fallback), DOCX, raster
//! images, and plain text into a single string. Extraction never fails
//! outward: unreadable or unsupported input yields an empty string and the
//! caller treats empty text as "no signal".

mod docx;
mod ocr;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Master switch for OCR fallbacks
    pub ocr_enabled: bool,
    /// Tesseract executable name or path
    pub tesseract_command: String,
    /// Tesseract language pack
    pub ocr_language: String,
    /// Target pixel width when rasterizing PDF pages for OCR
    pub render_width: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_enabled: true,
            tesseract_command: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            render_width: 1654,
        }
    }
}

/// Document format inferred from the filename extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Image,
    PlainText,
    Unknown,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "png" | "jpg" | "jpeg" | "tiff" | "tif" => Self::Image,
            "txt" | "md" | "csv" | "log" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

/// Format-normalizing text extractor
///
/// Stateless apart from its configuration; calls are independently
/// parallelizable and never mutate their input.
pub struct TextExtractor {
    config: ExtractionConfig,
}

impl TextExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExtractionConfig::default())
    }

    /// Extract plain text from a file, inferring the format from the
    /// extension. Unreadable files yield an empty string.
    pub fn extract(&self, path: &Path) -> String {
        let kind = FileKind::from_path(path);

        // Images go straight to the OCR binary without a byte round-trip
        if kind == FileKind::Image {
            return ocr::ocr_image_file(&self.config, path).unwrap_or_default();
        }

        match std::fs::read(path) {
            Ok(bytes) => self.extract_bytes(&bytes, kind),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable file; empty text");
                String::new()
            }
        }
    }

    /// Extract plain text from raw bytes of a declared format
    pub fn extract_bytes(&self, bytes: &[u8], kind: FileKind) -> String {
        match kind {
            FileKind::Pdf => self.extract_pdf(bytes),
            FileKind::Docx => docx::extract_docx(bytes).unwrap_or_default(),
            FileKind::Image => self.extract_image_bytes(bytes),
            FileKind::PlainText => lossy_text(bytes),
            FileKind::Unknown => {
                let text = lossy_text(bytes);
                if looks_binary(&text) {
                    String::new()
                } else {
                    text
                }
            }
        }
    }

    /// Per-page native text with OCR fallback for pages that have no
    /// embedded text layer; native and OCR pages mix within one document.
    fn extract_pdf(&self, bytes: &[u8]) -> String {
        let native_pages = match pdf_extract::extract_text_from_mem_by_pages(bytes) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(error = %e, "native PDF text extraction failed");
                Vec::new()
            }
        };

        let page_total = if native_pages.is_empty() {
            ocr::pdf_page_count(bytes).unwrap_or(0)
        } else {
            native_pages.len()
        };
        if page_total == 0 {
            return String::new();
        }

        let needs_ocr: Vec<usize> = (0..page_total)
            .filter(|&i| {
                native_pages
                    .get(i)
                    .map(|p| p.trim().is_empty())
                    .unwrap_or(true)
            })
            .collect();

        let mut ocr_pages: std::collections::HashMap<usize, String> =
            ocr::ocr_pdf_pages(&self.config, bytes, &needs_ocr)
                .into_iter()
                .collect();
        if !needs_ocr.is_empty() {
            tracing::debug!(
                pages = page_total,
                ocr_pages = needs_ocr.len(),
                recognized = ocr_pages.len(),
                "PDF extraction mixed native and OCR pages"
            );
        }

        let mut text = String::new();
        for i in 0..page_total {
            let page_text = match native_pages.get(i) {
                Some(native) if !native.trim().is_empty() => native.trim().to_string(),
                _ => ocr_pages.remove(&i).unwrap_or_default(),
            };
            text.push_str(&page_text);
            text.push('\n');
        }
        text
    }

    fn extract_image_bytes(&self, bytes: &[u8]) -> String {
        let image = match image::load_from_memory(bytes) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "undecodable image; empty text");
                return String::new();
            }
        };
        ocr::ocr_image(&self.config, &image).unwrap_or_default()
    }
}

/// Decode as UTF-8, dropping undecodable bytes rather than failing
fn lossy_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Heuristic binary sniff for unknown formats: a high share of control
/// characters means the bytes were never text
fn looks_binary(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let control = text
        .chars()
        .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
        .count();
    control > text.chars().count() / 10
}
