//! Dictionary term matching and the clinical-term source strategy.
//!
//! A term is found two ways, each contributing on its own:
//! 1. plain containment in the lowercased text adds the dictionary term
//! 2. a word-bounded, suffix-tolerant regex adds every surface form it matches
//!
//! Clinical terms go through [`TermSource`] so a statistical recognizer can be
//! layered on top of the dictionary when one is available.

use std::collections::BTreeSet;

use regex::Regex;

use super::dictionary::MedicalDictionary;
use super::ExtractionError;

/// Plural suffixes tolerated after clinical terms.
pub const CLINICAL_SUFFIXES: &[&str] = &["s", "es", "ies"];

/// Adjectival suffixes tolerated after anatomical terms.
pub const ANATOMICAL_SUFFIXES: &[&str] = &["al", "ic", "ine", "ar"];

/// Entity labels kept from a recognizer.
pub const CLINICAL_ENTITY_LABELS: &[&str] = &["DISEASE", "SYMPTOM", "TREATMENT", "MEDICAL_CONDITION"];

// ═══════════════════════════════════════════════════════════
// Term matcher
// ═══════════════════════════════════════════════════════════

/// Precompiled matcher for one list of dictionary terms.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    entries: Vec<(String, Regex)>,
}

impl TermMatcher {
    pub fn new<S: AsRef<str>>(terms: &[S], suffixes: &[&str]) -> Result<Self, ExtractionError> {
        let suffix_group = if suffixes.is_empty() {
            String::new()
        } else {
            let alternatives: Vec<String> = suffixes.iter().map(|s| regex::escape(s)).collect();
            format!("(?:{})?", alternatives.join("|"))
        };

        let entries = terms
            .iter()
            .map(|term| {
                let term = term.as_ref().to_lowercase();
                let re = Regex::new(&format!(r"(?i)\b{}{}\b", regex::escape(&term), suffix_group))?;
                Ok((term, re))
            })
            .collect::<Result<Vec<_>, ExtractionError>>()?;

        Ok(Self { entries })
    }

    /// Every dictionary term or surface form found in `text`.
    pub fn find(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let mut found = BTreeSet::new();

        for (term, re) in &self.entries {
            if lowered.contains(term.as_str()) {
                found.insert(term.clone());
            }
            for m in re.find_iter(text) {
                found.insert(m.as_str().to_lowercase());
            }
        }

        found
    }

    /// Dictionary terms present by plain containment only.
    pub fn find_contained(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        self.entries
            .iter()
            .filter(|(term, _)| lowered.contains(term.as_str()))
            .map(|(term, _)| term.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-shot form of [`TermMatcher::find`].
pub fn extract_terms<S: AsRef<str>>(
    text: &str,
    terms: &[S],
    suffixes: &[&str],
) -> Result<BTreeSet<String>, ExtractionError> {
    Ok(TermMatcher::new(terms, suffixes)?.find(text))
}

// ═══════════════════════════════════════════════════════════
// Term sources
// ═══════════════════════════════════════════════════════════

/// A labelled span reported by an entity recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: String,
}

/// Statistical named-entity recognizer (external model).
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, ExtractionError>;
}

/// Where clinical terms come from.
pub trait TermSource: Send + Sync {
    fn describe(&self) -> String;

    fn clinical_terms(&self, text: &str) -> Result<BTreeSet<String>, ExtractionError>;
}

/// Dictionary-only clinical terms.
#[derive(Debug, Clone)]
pub struct DictionaryTermSource {
    matcher: TermMatcher,
}

impl DictionaryTermSource {
    pub fn new(dictionary: &MedicalDictionary) -> Result<Self, ExtractionError> {
        Ok(Self {
            matcher: TermMatcher::new(&dictionary.clinical_terms(), CLINICAL_SUFFIXES)?,
        })
    }
}

impl TermSource for DictionaryTermSource {
    fn describe(&self) -> String {
        format!("dictionary ({} terms)", self.matcher.len())
    }

    fn clinical_terms(&self, text: &str) -> Result<BTreeSet<String>, ExtractionError> {
        Ok(self.matcher.find(text))
    }
}

/// Recognizer entities merged with dictionary terms.
pub struct NerTermSource {
    dictionary: DictionaryTermSource,
    recognizer: Box<dyn EntityRecognizer>,
}

impl NerTermSource {
    pub fn new(dictionary: DictionaryTermSource, recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self {
            dictionary,
            recognizer,
        }
    }
}

impl TermSource for NerTermSource {
    fn describe(&self) -> String {
        format!("{} + {}", self.recognizer.name(), self.dictionary.describe())
    }

    fn clinical_terms(&self, text: &str) -> Result<BTreeSet<String>, ExtractionError> {
        // The recognizer sees lowercased text.
        let mut terms: BTreeSet<String> = self
            .recognizer
            .recognize(&text.to_lowercase())?
            .into_iter()
            .filter(|e| CLINICAL_ENTITY_LABELS.contains(&e.label.as_str()))
            .map(|e| e.text.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        terms.extend(self.dictionary.clinical_terms(text)?);
        Ok(terms)
    }
}

/// Pick the clinical term source at startup. Without a recognizer the
/// pipeline runs dictionary-only.
pub fn select_term_source(
    dictionary: &MedicalDictionary,
    recognizer: Option<Box<dyn EntityRecognizer>>,
) -> Result<Box<dyn TermSource>, ExtractionError> {
    let base = DictionaryTermSource::new(dictionary)?;
    let source: Box<dyn TermSource> = match recognizer {
        Some(recognizer) => Box::new(NerTermSource::new(base, recognizer)),
        None => {
            tracing::warn!("No entity recognizer available, using dictionary-only term extraction");
            Box::new(base)
        }
    };
    tracing::info!(source = %source.describe(), "Clinical term source selected");
    Ok(source)
}
