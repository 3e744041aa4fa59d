//! Heuristic sentence boundary detection
//!
//! Splits on `.`, `!`, or `?` followed by whitespace, guarded by a list of
//! abbreviations and initials that commonly precede a non-final period in
//! administrative documents ("Resolution No. 12", "Dr. Reyes", "e.g. ...").

/// Lowercased tokens whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "engr", "atty", "hon", "jr", "sr", "st", "no", "nos", "vs",
    "etc", "e.g", "i.e", "inc", "corp", "ltd", "co", "dept", "univ", "fig", "sec", "pp", "rev",
];

/// Segment text into trimmed, non-empty sentences
pub fn segment_sentences(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        let is_terminator = b == b'.' || b == b'!' || b == b'?';
        if !is_terminator || i + 1 >= bytes.len() || !bytes[i + 1].is_ascii_whitespace() {
            continue;
        }
        if b == b'.' && ends_with_abbreviation(&text[start..i]) {
            continue;
        }

        let sentence = text[start..=i].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = i + 1;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// True when the text before a period ends in a known abbreviation or a
/// single-letter initial
fn ends_with_abbreviation(before_period: &str) -> bool {
    let token = before_period
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    if token.is_empty() {
        return false;
    }
    // Single-letter initials: "J. Smith"
    if token.chars().count() == 1 && token.chars().all(char::is_alphabetic) {
        return true;
    }

    let lowered = token.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        let text = "The council convened. The agenda was approved! Was quorum met?";
        let sentences = segment_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "The council convened.",
                "The agenda was approved!",
                "Was quorum met?"
            ]
        );
    }

    #[test]
    fn test_abbreviations_not_split() {
        let text = "Resolution No. 12 was signed by Dr. Reyes. It takes effect immediately.";
        let sentences = segment_sentences(text);
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Resolution No. 12"));
    }

    #[test]
    fn test_initials_not_split() {
        let sentences = segment_sentences("Prepared by J. Cruz. Noted by the board.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Prepared by J. Cruz.");
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let sentences = segment_sentences("First sentence. a trailing fragment");
        assert_eq!(sentences, vec!["First sentence.", "a trailing fragment"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_no_split_without_following_whitespace() {
        let sentences = segment_sentences("version 1.2 of the manual applies.");
        assert_eq!(sentences.len(), 1);
    }
}
