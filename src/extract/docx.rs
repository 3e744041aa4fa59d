//! DOCX paragraph extraction
//!
//! A .docx file is a zip archive; the document body lives in
//! `word/document.xml` with visible text inside `<w:t>` runs grouped into
//! `<w:p>` paragraphs. Paragraph order is preserved and no paragraph is
//! filtered, empty ones included.

use std::io::{Cursor, Read};

/// Extract paragraph text from DOCX bytes, newline-separated.
///
/// Returns `None` when the archive or document part is unreadable.
pub(crate) fn extract_docx(bytes: &[u8]) -> Option<String> {
    let mut archive = match zip::ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(e) => {
            tracing::warn!(error = %e, "not a readable docx archive");
            return None;
        }
    };

    let mut xml = String::new();
    match archive.by_name("word/document.xml") {
        Ok(mut part) => {
            if let Err(e) = part.read_to_string(&mut xml) {
                tracing::warn!(error = %e, "failed to read docx document part");
                return None;
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "docx archive has no document part");
            return None;
        }
    }

    Some(paragraphs(&xml).join("\n"))
}

/// Pull paragraph texts out of the document XML in order
fn paragraphs(xml: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let tag = &after_open[..close];
        let after_tag = &after_open[close + 1..];

        if tag == "w:t" || tag.starts_with("w:t ") {
            // Text run: content up to the closing tag
            if let Some(end) = after_tag.find("</w:t>") {
                current.push_str(&decode_entities(&after_tag[..end]));
                rest = &after_tag[end + "</w:t>".len()..];
                continue;
            }
            rest = after_tag;
            continue;
        }

        if tag == "/w:p" {
            result.push(std::mem::take(&mut current));
        }

        rest = after_tag;
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// Decode the XML entities that occur in document text runs
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let entity_rest = &rest[amp..];
        let Some(semi) = entity_rest.find(';') else {
            out.push_str(entity_rest);
            return out;
        };
        let entity = &entity_rest[1..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                let decoded = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => out.push(c),
                    None => out.push_str(&entity_rest[..=semi]),
                }
            }
        }
        rest = &entity_rest[semi + 1..];
    }

    out.push_str(rest);
    out
}
