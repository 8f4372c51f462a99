//! Pipeline diagnostic dump: writes intermediate artifacts to disk.
//!
//! Disabled unless `CLINICAL_EXTRACT_DUMP_DIR` is set. Output structure:
//! ```text
//! {dump_dir}/
//!   00-document.txt
//!   01-segment-1.txt ... 01-segment-N.txt
//!   02-segmentation.json
//!   03-failures.json
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config;
use crate::pipeline::processor::{DocumentOutcome, FailureSummary};

// ──────────────────────────────────────────────
// Dump directory resolution
// ──────────────────────────────────────────────

/// Returns the dump directory if diagnostics are enabled.
pub fn dump_dir() -> Option<PathBuf> {
    config::dump_dir().and_then(|dir| prepare_dir(&dir))
}

/// Creates `dir` if needed. Returns `None` (with a warning) on failure,
/// never blocks the pipeline.
pub fn prepare_dir(dir: &Path) -> Option<PathBuf> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        tracing::warn!(
            path = %dir.display(),
            error = %e,
            "Diagnostic dump: failed to create directory"
        );
        return None;
    }
    Some(dir.to_path_buf())
}

// ──────────────────────────────────────────────
// Dump writers
// ──────────────────────────────────────────────

#[derive(Serialize)]
struct SegmentationInfo<'a> {
    strategy: String,
    segments: usize,
    records: usize,
    failures: usize,
    report_ids: Vec<&'a str>,
}

/// Write the source text, each segment and the outcome summary.
pub fn dump_document(dir: &Path, document_text: &str, outcome: &DocumentOutcome) {
    dump_text(dir, "00-document.txt", document_text);

    for (i, segment) in outcome.segments.iter().enumerate() {
        dump_text(dir, &format!("01-segment-{}.txt", i + 1), segment);
    }

    let info = SegmentationInfo {
        strategy: format!("{:?}", outcome.strategy),
        segments: outcome.segments.len(),
        records: outcome.records.len(),
        failures: outcome.failures.len(),
        report_ids: outcome.records.iter().map(|r| r.report_id.as_str()).collect(),
    };
    dump_json(dir, "02-segmentation.json", &info);

    let failures: Vec<FailureSummary> = outcome.failures.iter().map(FailureSummary::from).collect();
    dump_json(dir, "03-failures.json", &failures);
}

/// Write a JSON artifact (any serde-serializable value).
///
/// Uses pretty-printing for human readability. Never panics.
pub fn dump_json<T: Serialize>(dir: &Path, filename: &str, value: &T) {
    let path = dir.join(filename);
    match serde_json::to_string_pretty(value) {
        Ok(json) => match std::fs::write(&path, json.as_bytes()) {
            Ok(()) => tracing::debug!(
                path = %path.display(),
                size = json.len(),
                "Diagnostic dump: JSON written"
            ),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Diagnostic dump: failed to write JSON"
            ),
        },
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Diagnostic dump: failed to serialize JSON"
        ),
    }
}

/// Write a text artifact. Never panics.
pub fn dump_text(dir: &Path, filename: &str, text: &str) {
    let path = dir.join(filename);
    match std::fs::write(&path, text.as_bytes()) {
        Ok(()) => tracing::debug!(
            path = %path.display(),
            size = text.len(),
            "Diagnostic dump: text written"
        ),
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Diagnostic dump: failed to write text"
        ),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
