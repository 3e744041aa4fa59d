//! Optical character recognition via the Tesseract CLI, with pdfium-backed
//! page rasterization for scanned PDFs
//!
//! Every failure path degrades to `None`; extraction must never abort the
//! upload or search pipeline.

use super::ExtractionConfig;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use std::process::Command;

/// Run the Tesseract CLI on an image file and return the recognized text
pub(crate) fn ocr_image_file(config: &ExtractionConfig, path: &Path) -> Option<String> {
    if !config.ocr_enabled {
        return None;
    }

    let output = Command::new(&config.tesseract_command)
        .arg(path)
        .arg("stdout")
        .args(["-l", &config.ocr_language])
        .output();

    match output {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
        Ok(out) => {
            tracing::warn!(
                status = %out.status,
                stderr = %String::from_utf8_lossy(&out.stderr),
                "tesseract exited with failure"
            );
            None
        }
        Err(e) => {
            tracing::warn!(
                command = %config.tesseract_command,
                error = %e,
                "tesseract invocation failed; OCR text unavailable"
            );
            None
        }
    }
}

/// OCR an in-memory image by spilling it to a scratch PNG
pub(crate) fn ocr_image(config: &ExtractionConfig, image: &DynamicImage) -> Option<String> {
    if !config.ocr_enabled {
        return None;
    }

    let scratch = match tempfile::Builder::new().suffix(".png").tempfile() {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(error = %e, "failed to create OCR scratch file");
            return None;
        }
    };

    if let Err(e) = image.save(scratch.path()) {
        tracing::warn!(error = %e, "failed to write OCR scratch image");
        return None;
    }

    ocr_image_file(config, scratch.path())
}

/// Number of pages in a PDF, via pdfium
pub(crate) fn pdf_page_count(bytes: &[u8]) -> Option<usize> {
    let pdfium = bind_pdfium()?;
    let document = pdfium.load_pdf_from_byte_slice(bytes, None).ok()?;
    Some(document.pages().len() as usize)
}

/// Rasterize and OCR the requested PDF pages in one pdfium session.
///
/// Returns `(page_index, text)` pairs for the pages that produced text;
/// pages that fail to render or recognize are simply absent.
pub(crate) fn ocr_pdf_pages(
    config: &ExtractionConfig,
    bytes: &[u8],
    page_indices: &[usize],
) -> Vec<(usize, String)> {
    if !config.ocr_enabled || page_indices.is_empty() {
        return Vec::new();
    }

    let Some(pdfium) = bind_pdfium() else {
        return Vec::new();
    };
    let document = match pdfium.load_pdf_from_byte_slice(bytes, None) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "pdfium failed to open document for OCR");
            return Vec::new();
        }
    };

    let render_config = PdfRenderConfig::new().set_target_width(config.render_width as i32);
    let mut results = Vec::new();

    for &index in page_indices {
        let page = match document.pages().get(index as u16) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(page = index, error = %e, "pdfium failed to load page");
                continue;
            }
        };

        #[allow(unused_mut)]
        let image = match page.render_with_config(&render_config) {
            Ok(mut bitmap) => bitmap.as_image(),
            Err(e) => {
                tracing::warn!(page = index, error = %e, "pdfium failed to render page");
                continue;
            }
        };

        if let Some(text) = ocr_image(config, &image) {
            results.push((index, text));
        }
    }

    results
}

fn bind_pdfium() -> Option<Pdfium> {
    match Pdfium::bind_to_system_library() {
        Ok(bindings) => Some(Pdfium::new(bindings)),
        Err(e) => {
            tracing::warn!(error = %e, "pdfium library unavailable; scanned pages skipped");
            None
        }
    }
}
