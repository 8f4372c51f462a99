//! Static medical vocabulary for dictionary matching.
//!
//! Terms are lowercase and grouped by category. The built-in vocabulary covers
//! gastrointestinal endoscopy: conditions, procedures, symptoms and anatomy.

use std::collections::BTreeMap;

use super::ExtractionError;

pub const GASTROINTESTINAL: &str = "gastrointestinal";
pub const PROCEDURES: &str = "procedures";
pub const SYMPTOMS: &str = "symptoms";
pub const ANATOMICAL_LOCATIONS: &str = "anatomical_locations";

/// Categories whose terms are reported as clinical terms.
pub const CLINICAL_CATEGORIES: &[&str] = &[GASTROINTESTINAL, PROCEDURES, SYMPTOMS];

const GASTROINTESTINAL_TERMS: &[&str] = &[
    "diverticulosis", "diverticulitis", "hemorrhoids", "polyp", "polyps",
    "colitis", "proctitis", "gastritis", "esophagitis", "duodenitis",
    "bleeding", "ulcer", "ulceration", "inflammation", "stricture",
    "obstruction", "perforation", "fissure", "fistula", "abscess",
    "barrett's esophagus", "reflux", "gerd", "ibd", "crohn's disease",
    "ulcerative colitis", "celiac disease", "gastroenteritis",
    "adenoma", "adenomatous", "hyperplastic", "sessile", "pedunculated",
    "erosion", "erythema", "friability", "nodular", "villous",
    "tubular", "serrated", "dysplasia", "metaplasia", "neoplasia",
];

const PROCEDURE_TERMS: &[&str] = &[
    "colonoscopy", "endoscopy", "egd", "sigmoidoscopy", "biopsy",
    "polypectomy", "cauterization", "ablation", "dilation",
    "sclerotherapy", "injection", "clipping", "argon plasma coagulation",
    "band ligation", "thermal therapy", "cryotherapy",
    "esophagogastroduodenoscopy", "upper endoscopy", "lower endoscopy",
    "endoscopic mucosal resection", "emr", "esd", "hemostasis",
];

const SYMPTOM_TERMS: &[&str] = &[
    "bleeding", "pain", "cramping", "nausea", "vomiting", "diarrhea",
    "constipation", "bloating", "distension", "melena", "hematochezia",
    "hematemesis", "dysphagia", "odynophagia", "heartburn", "reflux",
    "indigestion", "anorexia", "weight loss", "fatigue", "weakness",
    "abdominal pain", "rectal bleeding", "change in bowel habits",
];

const ANATOMICAL_TERMS: &[&str] = &[
    "esophagus", "stomach", "duodenum", "jejunum", "ileum", "cecum",
    "ascending colon", "transverse colon", "descending colon", "sigmoid colon",
    "rectum", "anus", "anal canal", "gastroesophageal junction", "pylorus",
    "antrum", "fundus", "cardia", "terminal ileum", "ileocecal valve",
    "appendix", "liver", "gallbladder", "pancreas", "spleen", "peritoneum",
    "mucosa", "submucosa", "muscularis", "serosa", "lumen", "wall",
    "distal", "proximal", "sigmoid", "cecal", "hepatic flexure", "splenic flexure",
];

/// Immutable category -> ordered term list mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalDictionary {
    categories: BTreeMap<String, Vec<String>>,
}

impl MedicalDictionary {
    /// The built-in gastrointestinal vocabulary.
    pub fn builtin() -> Self {
        Self::from_categories([
            (GASTROINTESTINAL, GASTROINTESTINAL_TERMS),
            (PROCEDURES, PROCEDURE_TERMS),
            (SYMPTOMS, SYMPTOM_TERMS),
            (ANATOMICAL_LOCATIONS, ANATOMICAL_TERMS),
        ])
    }

    /// Build a dictionary from arbitrary categories. Terms are lowercased and
    /// trimmed; blank terms and repeats within a category are dropped.
    pub fn from_categories<C, T, I, S>(categories: C) -> Self
    where
        C: IntoIterator<Item = (T, I)>,
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, terms) in categories {
            let entry = map.entry(name.into()).or_default();
            for term in terms {
                let term = term.as_ref().trim().to_lowercase();
                if !term.is_empty() && !entry.contains(&term) {
                    entry.push(term);
                }
            }
        }
        Self { categories: map }
    }

    /// Terms of a category, or an empty slice if the category is absent.
    pub fn terms(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Terms of a category that must exist.
    pub fn require(&self, category: &str) -> Result<&[String], ExtractionError> {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(|| ExtractionError::UnknownCategory(category.to_string()))
    }

    /// Union of all clinical-term categories, first occurrence wins.
    pub fn clinical_terms(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for category in CLINICAL_CATEGORIES {
            for term in self.terms(category) {
                if !out.contains(term) {
                    out.push(term.clone());
                }
            }
        }
        out
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

impl Default for MedicalDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
