use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::dictionary::{MedicalDictionary, GASTROINTESTINAL};
use super::terms::TermMatcher;

/// Entries must be longer than this many characters to be kept.
pub const MIN_ENTRY_CHARS: usize = 5;

/// Cap on diagnoses inferred from clinical terms when no section exists.
pub const MAX_FALLBACK_DIAGNOSES: usize = 3;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static ENTRY_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;\n]|(?:\d+\.)").expect("valid regex"));

/// Pull labelled-section entries out of `text`.
///
/// Each pattern's first capture group is the section body. Bodies are
/// whitespace-collapsed, split into entries on semicolons, newlines and
/// numbered markers, and entries of `MIN_ENTRY_CHARS` or fewer are dropped.
pub fn extract_section(text: &str, patterns: &[Regex]) -> BTreeSet<String> {
    let mut entries = BTreeSet::new();

    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let Some(body) = caps.get(1) else { continue };
            let collapsed = WHITESPACE_RE.replace_all(body.as_str().trim(), " ");
            if collapsed.is_empty() {
                continue;
            }
            for piece in ENTRY_SPLIT_RE.split(&collapsed) {
                let entry = piece.trim().trim_end_matches('.');
                if entry.chars().count() > MIN_ENTRY_CHARS {
                    entries.insert(entry.to_string());
                }
            }
        }
    }

    entries
}

/// Diagnoses from labelled sections, falling back to gastrointestinal
/// clinical terms when the report has no diagnosis section.
pub fn extract_diagnoses(
    text: &str,
    patterns: &[Regex],
    clinical_terms: &BTreeSet<String>,
    dictionary: &MedicalDictionary,
) -> BTreeSet<String> {
    let found = extract_section(text, patterns);
    if !found.is_empty() {
        return found;
    }

    let conditions = dictionary.terms(GASTROINTESTINAL);
    clinical_terms
        .iter()
        .filter(|term| conditions.iter().any(|c| term.contains(c.as_str())))
        .take(MAX_FALLBACK_DIAGNOSES)
        .cloned()
        .collect()
}

/// Procedures from labelled sections plus dictionary procedures present in
/// the text.
pub fn extract_procedures(text: &str, patterns: &[Regex], procedures: &TermMatcher) -> BTreeSet<String> {
    let mut found = extract_section(text, patterns);
    found.extend(procedures.find_contained(text));
    found
}
