//! Report assembly and document processing.
//!
//! `ReportExtractor` owns the read-only extraction configuration (dictionary,
//! compiled patterns, term matchers and the clinical term source) and turns
//! report text into `ReportRecord`s. A failing report is dropped and recorded
//! as a `ReportFailure`; the rest of the document is still processed.

use serde::Serialize;

use crate::models::{report_id_for, ReportRecord};
use crate::pipeline::extraction::{
    extract_codes, extract_diagnoses, extract_procedures, select_term_source, EntityRecognizer,
    ExtractionError, ExtractionPatterns, MedicalDictionary, TermMatcher, TermSource,
    ANATOMICAL_LOCATIONS, ANATOMICAL_SUFFIXES, PROCEDURES,
};
use crate::pipeline::segment::{segment_with_strategy, SegmentStrategy};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A report that could not be assembled.
#[derive(Debug)]
pub struct ReportFailure {
    pub report_id: String,
    pub error: ExtractionError,
}

/// Serializable view of a failure, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub report_id: String,
    pub error: String,
}

impl From<&ReportFailure> for FailureSummary {
    fn from(failure: &ReportFailure) -> Self {
        Self {
            report_id: failure.report_id.clone(),
            error: failure.error.to_string(),
        }
    }
}

/// Everything produced from one document.
#[derive(Debug)]
pub struct DocumentOutcome {
    pub segments: Vec<String>,
    pub strategy: SegmentStrategy,
    /// Successful records, in document order.
    pub records: Vec<ReportRecord>,
    pub failures: Vec<ReportFailure>,
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

pub struct ReportExtractor {
    dictionary: MedicalDictionary,
    patterns: ExtractionPatterns,
    anatomy: TermMatcher,
    procedures: TermMatcher,
    term_source: Box<dyn TermSource>,
}

impl ReportExtractor {
    pub fn new(
        dictionary: MedicalDictionary,
        patterns: ExtractionPatterns,
        term_source: Box<dyn TermSource>,
    ) -> Result<Self, ExtractionError> {
        let anatomy = TermMatcher::new(dictionary.require(ANATOMICAL_LOCATIONS)?, ANATOMICAL_SUFFIXES)?;
        let procedures = TermMatcher::new(dictionary.require(PROCEDURES)?, &[])?;
        Ok(Self {
            dictionary,
            patterns,
            anatomy,
            procedures,
            term_source,
        })
    }

    /// Built-in dictionary and patterns, with an optional recognizer layered
    /// over the dictionary for clinical terms.
    pub fn with_recognizer(recognizer: Option<Box<dyn EntityRecognizer>>) -> Result<Self, ExtractionError> {
        let dictionary = MedicalDictionary::builtin();
        let term_source = select_term_source(&dictionary, recognizer)?;
        Self::new(dictionary, ExtractionPatterns::new()?, term_source)
    }

    /// Extract one report. Pure: no I/O, no shared mutable state.
    pub fn assemble(&self, report_text: &str, report_id: &str) -> Result<ReportRecord, ExtractionError> {
        if report_text.trim().is_empty() {
            return Err(ExtractionError::EmptyReport);
        }

        let codes = extract_codes(report_text, &self.patterns);
        let clinical_terms = self.term_source.clinical_terms(report_text)?;
        let anatomical_locations = self.anatomy.find(report_text);
        let diagnosis = extract_diagnoses(
            report_text,
            &self.patterns.diagnosis_sections,
            &clinical_terms,
            &self.dictionary,
        );
        let procedures = extract_procedures(report_text, &self.patterns.procedure_sections, &self.procedures);

        Ok(ReportRecord {
            report_id: report_id.to_string(),
            clinical_terms,
            anatomical_locations,
            diagnosis,
            procedures,
            codes,
        })
    }

    /// Segment a document and assemble every report in order.
    pub fn process_document(&self, document_text: &str) -> DocumentOutcome {
        let (segments, strategy) = segment_with_strategy(document_text);
        tracing::info!(reports = segments.len(), strategy = ?strategy, "Document segmented");

        let mut records = Vec::with_capacity(segments.len());
        let mut failures = Vec::new();

        for (index, text) in segments.iter().enumerate() {
            let report_id = report_id_for(index);
            match self.assemble(text, &report_id) {
                Ok(record) => {
                    tracing::info!(
                        report = %report_id,
                        terms = record.clinical_terms.len(),
                        codes = record.codes.total(),
                        "Processed report"
                    );
                    records.push(record);
                }
                Err(error) => {
                    tracing::warn!(report = %report_id, error = %error, "Report extraction failed, skipping");
                    failures.push(ReportFailure { report_id, error });
                }
            }
        }

        DocumentOutcome {
            segments,
            strategy,
            records,
            failures,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
