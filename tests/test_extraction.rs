//! Extraction never fails outward: every unsupported or unreadable input
//! degrades to an empty string

use docsense::extract::{ExtractionConfig, FileKind, TextExtractor};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn extractor() -> TextExtractor {
    // OCR disabled so tests run without a tesseract install; OCR fallback
    // paths themselves degrade to empty text when the binary is missing
    TextExtractor::new(ExtractionConfig {
        ocr_enabled: false,
        ..ExtractionConfig::default()
    })
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(bytes).unwrap();
    path
}

#[test]
fn test_plain_text_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "memo.txt", b"Memorandum for all offices.");

    assert_eq!(extractor().extract(&path), "Memorandum for all offices.");
}

#[test]
fn test_invalid_utf8_is_dropped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "mixed.txt", b"budget \xc3\x28 report");

    let text = extractor().extract(&path);
    assert!(text.starts_with("budget "));
    assert!(text.ends_with(" report"));
    assert!(!text.contains('\u{FFFD}'));
}

#[test]
fn test_missing_file_is_empty() {
    assert_eq!(extractor().extract(Path::new("/no/such/file.pdf")), "");
}

#[test]
fn test_garbage_for_every_kind_is_empty() {
    let e = extractor();
    let junk: Vec<u8> = (0u8..8).cycle().take(512).collect();

    for kind in [
        FileKind::Pdf,
        FileKind::Docx,
        FileKind::Image,
        FileKind::Unknown,
    ] {
        assert_eq!(e.extract_bytes(&junk, kind), "", "kind: {:?}", kind);
    }
}

#[test]
fn test_empty_bytes_for_every_kind_is_empty() {
    let e = extractor();
    for kind in [
        FileKind::Pdf,
        FileKind::Docx,
        FileKind::Image,
        FileKind::PlainText,
        FileKind::Unknown,
    ] {
        assert_eq!(e.extract_bytes(&[], kind), "", "kind: {:?}", kind);
    }
}

#[test]
fn test_docx_paragraphs_joined_with_newlines() {
    use std::io::Cursor;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Resolution approving the budget.</w:t></w:r></w:p>
            <w:p><w:r><w:t>Adopted unanimously.</w:t></w:r></w:p>
        </w:body></w:document>"#,
    )
    .unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "resolution.docx", &bytes);

    let text = extractor().extract(&path);
    assert_eq!(text, "Resolution approving the budget.\nAdopted unanimously.");
}

#[test]
fn test_unknown_extension_with_text_content() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.dat", b"plain text behind a strange extension");

    assert_eq!(
        extractor().extract(&path),
        "plain text behind a strange extension"
    );
}

#[test]
fn test_extension_detection_is_case_insensitive() {
    assert_eq!(FileKind::from_extension("PDF"), FileKind::Pdf);
    assert_eq!(FileKind::from_extension("Docx"), FileKind::Docx);
    assert_eq!(FileKind::from_extension("TIFF"), FileKind::Image);
}

#[test]
fn test_extract_does_not_mutate_input() {
    let e = extractor();
    let bytes = b"immutable input bytes".to_vec();
    let before = bytes.clone();
    let _ = e.extract_bytes(&bytes, FileKind::PlainText);
    assert_eq!(bytes, before);
}
