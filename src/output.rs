//! Results file writing and console summaries.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use crate::models::{MedicalCodes, ReportRecord};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write results to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize records as a pretty-printed JSON array.
pub fn results_json(records: &[ReportRecord]) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the results file, replacing any existing one.
pub fn write_results(path: &Path, records: &[ReportRecord]) -> Result<(), OutputError> {
    let json = results_json(records)?;
    std::fs::write(path, json.as_bytes()).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), reports = records.len(), "Results written");
    Ok(())
}

/// Example of the results format, shown when no input is found.
pub fn sample_output() -> Vec<ReportRecord> {
    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    vec![ReportRecord {
        report_id: "Report 1".into(),
        clinical_terms: set(&["colonoscopy", "diverticulosis", "hemorrhoids"]),
        anatomical_locations: set(&["rectum", "sigmoid", "sigmoid colon"]),
        diagnosis: set(&["Diverticulosis", "Internal hemorrhoids"]),
        procedures: set(&["biopsy", "colonoscopy"]),
        codes: MedicalCodes {
            icd_10: set(&["K57.30", "K64.1"]),
            cpt: set(&["45378", "45380"]),
            hcpcs: BTreeSet::new(),
            modifiers: BTreeSet::new(),
        },
    }]
}

/// Human-readable per-report summary.
pub fn format_summary(record: &ReportRecord) -> String {
    let mut lines = vec![
        format!("{}:", record.report_id),
        format!("  Clinical Terms: {}", record.clinical_terms.len()),
        format!("  Anatomical Locations: {}", record.anatomical_locations.len()),
        format!("  Diagnoses: {}", record.diagnosis.len()),
        format!("  Procedures: {}", record.procedures.len()),
        format!("  ICD-10 Codes: {}", record.codes.icd_10.len()),
        format!("  CPT Codes: {}", record.codes.cpt.len()),
    ];

    if !record.clinical_terms.is_empty() {
        let preview: Vec<&str> = record.clinical_terms.iter().take(3).map(String::as_str).collect();
        lines.push(format!("    Clinical Terms: {}...", preview.join(", ")));
    }
    if !record.codes.icd_10.is_empty() {
        lines.push(format!("    ICD-10: {}", join(&record.codes.icd_10)));
    }
    if !record.codes.cpt.is_empty() {
        lines.push(format!("    CPT: {}", join(&record.codes.cpt)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
