//! Report segmentation.
//!
//! A document may hold several reports with no fixed boundary format. The
//! separators below are tried from most to least structural; the first one
//! that yields more than one report wins. If none applies, documents with
//! wide blank gaps are split on those gaps, long documents are cut into
//! four equal chunks, and anything else is a single report.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum number of raw blank-gap pieces (empty ones included) for the
/// gap split to apply.
pub const MIN_GAP_SEGMENTS: usize = 4;

/// Documents longer than this (in characters) get the positional split.
pub const POSITIONAL_SPLIT_MIN_CHARS: usize = 1000;

/// Number of chunks produced by the positional split.
pub const POSITIONAL_CHUNKS: usize = 4;

/// Separator heuristics in priority order.
static SEPARATORS: LazyLock<Vec<Separator>> = LazyLock::new(|| {
    vec![
        separator("report-number", r"(?i)\n\s*Report\s+\d+"),
        separator("case-number", r"(?i)\n\s*Case\s+\d+"),
        separator("patient-number", r"(?i)\n\s*Patient\s+\d+"),
        separator("date-name", r"(?i)\n\s*Date:.*?\n.*?Name:"),
        separator("numbered-entry", r"(?i)\n\s*\d+\.\s*(?:Patient|Report)"),
        separator("dash-rule", r"(?i)\n\s*-{3,}\s*\n"),
        separator("equals-rule", r"(?i)\n\s*={3,}\s*\n"),
    ]
});

static BLANK_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("valid regex"));

struct Separator {
    name: &'static str,
    regex: Regex,
}

fn separator(name: &'static str, pattern: &str) -> Separator {
    Separator {
        name,
        regex: Regex::new(pattern).expect("valid regex"),
    }
}

/// Which rule produced a segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    Separator(&'static str),
    BlankGaps,
    Positional,
    Single,
    Empty,
}

/// Split a document into trimmed report texts.
pub fn segment(text: &str) -> Vec<String> {
    segment_with_strategy(text).0
}

/// Like [`segment`], also reporting which rule applied.
pub fn segment_with_strategy(text: &str) -> (Vec<String>, SegmentStrategy) {
    for sep in SEPARATORS.iter() {
        let parts = split_trimmed(&sep.regex, text);
        if parts.len() > 1 {
            tracing::debug!(separator = sep.name, segments = parts.len(), "Split on separator");
            return (parts, SegmentStrategy::Separator(sep.name));
        }
    }

    // The threshold counts raw pieces, empty ones included.
    let gaps: Vec<&str> = BLANK_GAP_RE.split(text).collect();
    if gaps.len() >= MIN_GAP_SEGMENTS {
        let parts = non_empty_trimmed(gaps);
        tracing::debug!(segments = parts.len(), "Split on blank-line gaps");
        return (parts, SegmentStrategy::BlankGaps);
    }

    if text.chars().count() > POSITIONAL_SPLIT_MIN_CHARS {
        let parts: Vec<String> = split_positional(text, POSITIONAL_CHUNKS)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        tracing::debug!(segments = parts.len(), "No separators found, split by length");
        return (parts, SegmentStrategy::Positional);
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        (Vec::new(), SegmentStrategy::Empty)
    } else {
        (vec![trimmed.to_string()], SegmentStrategy::Single)
    }
}

fn split_trimmed(re: &Regex, text: &str) -> Vec<String> {
    non_empty_trimmed(re.split(text))
}

fn non_empty_trimmed<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cut `text` into `chunks` contiguous pieces of `len / chunks` characters;
/// the last piece absorbs the remainder. Cuts fall on char boundaries.
pub fn split_positional(text: &str, chunks: usize) -> Vec<&str> {
    if chunks == 0 {
        return Vec::new();
    }

    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let chunk_chars = boundaries.len() / chunks;
    let byte_at = |char_idx: usize| boundaries.get(char_idx).copied().unwrap_or(text.len());

    (0..chunks)
        .map(|i| {
            let start = byte_at(i * chunk_chars);
            let end = if i + 1 == chunks {
                text.len()
            } else {
                byte_at((i + 1) * chunk_chars)
            };
            &text[start..end]
        })
        .collect()
}
