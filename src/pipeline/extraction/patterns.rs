use regex::Regex;

use super::ExtractionError;

const ICD10: &str = r"\b[A-Z]\d{2}(?:\.\d{1,2}[A-Z]?)?\b";
const CPT: &str = r"\b\d{5}\b";
const HCPCS: &str = r"\b[A-Z]\d{4}\b";
const MODIFIER: &str = r"(?i)\b(?:modifier\s+)?([A-Z]{2}|\d{2})\b";

const DIAGNOSIS_SECTIONS: &[&str] = &[
    r"(?is)(?:diagnosis|impression|findings?):\s*(.*?)(?:\n\n|\nPROCEDURE|\nRECOMMENDATIONS?|\nPLAN|\z)",
    r"(?is)(?:primary|secondary|final)\s+diagnosis:\s*(.*?)(?:\n\n|\n[A-Z]+:|\z)",
];

const PROCEDURE_SECTIONS: &[&str] = &[
    r"(?is)(?:procedure|procedure\s+performed):\s*(.*?)(?:\n\n|\nDIAGNOSIS|\nFINDINGS?|\nIMPRESSION|\z)",
    r"(?is)(?:endoscopic|surgical)\s+procedure:\s*(.*?)(?:\n\n|\n[A-Z]+:|\z)",
];

/// Compiled code and section patterns. Built once, shared read-only.
///
/// Every section pattern exposes the section body as capture group 1, and the
/// modifier pattern exposes the code itself as group 1.
#[derive(Debug, Clone)]
pub struct ExtractionPatterns {
    pub icd10: Regex,
    pub cpt: Regex,
    pub hcpcs: Regex,
    pub modifier: Regex,
    pub diagnosis_sections: Vec<Regex>,
    pub procedure_sections: Vec<Regex>,
}

impl ExtractionPatterns {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            icd10: Regex::new(ICD10)?,
            cpt: Regex::new(CPT)?,
            hcpcs: Regex::new(HCPCS)?,
            modifier: Regex::new(MODIFIER)?,
            diagnosis_sections: compile_all(DIAGNOSIS_SECTIONS)?,
            procedure_sections: compile_all(PROCEDURE_SECTIONS)?,
        })
    }
}

fn compile_all(sources: &[&str]) -> Result<Vec<Regex>, ExtractionError> {
    sources
        .iter()
        .map(|src| Regex::new(src).map_err(ExtractionError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtin_patterns_compile() {
        let patterns = ExtractionPatterns::new().unwrap();
        assert_eq!(patterns.diagnosis_sections.len(), 2);
        assert_eq!(patterns.procedure_sections.len(), 2);
    }

    #[test]
    fn section_patterns_capture_body_in_group_one() {
        let patterns = ExtractionPatterns::new().unwrap();
        let caps = patterns.diagnosis_sections[0]
            .captures("Impression: mild gastritis\n\nPLAN: follow up")
            .unwrap();
        assert_eq!(&caps[1], "mild gastritis");
    }

    #[test]
    fn icd10_is_case_sensitive() {
        let patterns = ExtractionPatterns::new().unwrap();
        assert!(patterns.icd10.is_match("K57.30"));
        assert!(!patterns.icd10.is_match("k57.30"));
    }

    #[test]
    fn compile_all_reports_invalid_pattern() {
        let err = compile_all(&[r"(unclosed"]).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPattern(_)));
    }
}
