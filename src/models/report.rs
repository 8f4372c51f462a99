use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Billing and diagnostic codes harvested from one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCodes {
    #[serde(rename = "ICD-10")]
    pub icd_10: BTreeSet<String>,
    #[serde(rename = "CPT")]
    pub cpt: BTreeSet<String>,
    #[serde(rename = "HCPCS")]
    pub hcpcs: BTreeSet<String>,
    #[serde(rename = "Modifiers")]
    pub modifiers: BTreeSet<String>,
}

impl MedicalCodes {
    pub fn total(&self) -> usize {
        self.icd_10.len() + self.cpt.len() + self.hcpcs.len() + self.modifiers.len()
    }
}

/// One extracted report, serialized with the results-file key names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(rename = "ReportID")]
    pub report_id: String,
    #[serde(rename = "Clinical Terms")]
    pub clinical_terms: BTreeSet<String>,
    #[serde(rename = "Anatomical Locations")]
    pub anatomical_locations: BTreeSet<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: BTreeSet<String>,
    #[serde(rename = "Procedures")]
    pub procedures: BTreeSet<String>,
    #[serde(flatten)]
    pub codes: MedicalCodes,
}

/// Identifier assigned to the report at `index` (zero-based) in document order.
pub fn report_id_for(index: usize) -> String {
    format!("Report {}", index + 1)
}
