/// Sanitize extracted document text before segmentation.
/// Normalizes line endings and page breaks to `\n`, strips other control
/// characters and trailing whitespace. Blank lines are kept: they are report
/// boundaries for the segmenter.
pub fn sanitize_document_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .chars()
        .filter_map(|c| match c {
            '\r' | '\u{000C}' => Some('\n'),
            '\n' | '\t' => Some(c),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect::<String>()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let raw = "Patient: Marie\x00Dubois";
        assert_eq!(sanitize_document_text(raw), "Patient: MarieDubois");
    }

    #[test]
    fn strips_control_characters() {
        let raw = "CPT: 45378\x01\x02\x03\nICD-10: K57.30";
        let clean = sanitize_document_text(raw);
        assert!(!clean.contains('\x01'));
        assert_eq!(clean, "CPT: 45378\nICD-10: K57.30");
    }

    #[test]
    fn normalizes_line_endings_and_page_breaks() {
        let raw = "Report 1\r\nbody\rnext\x0cReport 2";
        assert_eq!(sanitize_document_text(raw), "Report 1\nbody\nnext\nReport 2");
    }

    #[test]
    fn keeps_blank_lines() {
        let raw = "one\n\n\ntwo";
        assert_eq!(sanitize_document_text(raw), "one\n\n\ntwo");
    }

    #[test]
    fn trims_trailing_whitespace_per_line() {
        let raw = "  DIAGNOSIS:   \n  polyp\t ";
        assert_eq!(sanitize_document_text(raw), "  DIAGNOSIS:\n  polyp");
    }

    #[test]
    fn preserves_medical_punctuation_and_accents() {
        let raw = "Barrett's esophagus, 37.5°C, résultat élevé (K22.70)";
        assert_eq!(sanitize_document_text(raw), raw);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize_document_text(""), "");
    }
}
