//! Billing and diagnostic code harvesting.
//!
//! Four independent passes over the same text. Matches are syntactic only:
//! nothing is checked against an official code set, and a token may land in
//! more than one group.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use regex::Regex;

use super::patterns::ExtractionPatterns;
use crate::models::MedicalCodes;

/// Numeric range a five-digit CPT match must fall in.
pub const CPT_RANGE: RangeInclusive<u32> = 10_000..=99_999;

/// Extract ICD-10, CPT, HCPCS and modifier codes from report text.
pub fn extract_codes(text: &str, patterns: &ExtractionPatterns) -> MedicalCodes {
    MedicalCodes {
        icd_10: collect_matches(&patterns.icd10, text),
        cpt: collect_matches(&patterns.cpt, text)
            .into_iter()
            .filter(|code| is_valid_cpt(code))
            .collect(),
        hcpcs: collect_matches(&patterns.hcpcs, text),
        modifiers: patterns
            .modifier
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

fn collect_matches(re: &Regex, text: &str) -> BTreeSet<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

fn is_valid_cpt(code: &str) -> bool {
    code.parse::<u32>()
        .map(|n| CPT_RANGE.contains(&n))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn patterns() -> ExtractionPatterns {
        ExtractionPatterns::new().unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extracts_codes_from_billing_block() {
        let text = "DIAGNOSIS: Diverticulosis of sigmoid colon.\n\nCPT: 45378\nICD-10: K57.30";
        let codes = extract_codes(text, &patterns());
        assert_eq!(codes.cpt, set(&["45378"]));
        assert_eq!(codes.icd_10, set(&["K57.30"]));
        assert!(codes.hcpcs.is_empty());
    }

    #[test]
    fn deduplicates_repeated_codes() {
        let text = "CPT: 45378 then again 45378 and 45385";
        let codes = extract_codes(text, &patterns());
        assert_eq!(codes.cpt, set(&["45378", "45385"]));
    }

    #[test]
    fn icd10_with_letter_extension() {
        let codes = extract_codes("Code S72.01A documented, also E11", &patterns());
        assert_eq!(codes.icd_10, set(&["E11", "S72.01A"]));
    }

    #[test]
    fn hcpcs_requires_letter_and_four_digits() {
        let codes = extract_codes("HCPCS: C9734 and G0121, not C973", &patterns());
        assert_eq!(codes.hcpcs, set(&["C9734", "G0121"]));
    }

    #[test]
    fn cpt_ignores_longer_digit_runs() {
        let codes = extract_codes("MRN 1234567 and CPT 43239", &patterns());
        assert_eq!(codes.cpt, set(&["43239"]));
    }

    #[test]
    fn cpt_range_filter_rejects_leading_zero_codes() {
        assert!(!is_valid_cpt("01234"));
        assert!(is_valid_cpt("10000"));
        assert!(is_valid_cpt("99999"));
    }

    #[test]
    fn modifiers_capture_code_without_prefix() {
        let codes = extract_codes("Modifier: 22 and modifier 59", &patterns());
        assert!(codes.modifiers.contains("22"));
        assert!(codes.modifiers.contains("59"));
        assert!(!codes.modifiers.iter().any(|m| m.contains("modifier")));
    }

    #[test]
    fn modifiers_match_incidental_two_letter_words() {
        // No context gating: any standalone two-letter token qualifies.
        let codes = extract_codes("seen in clinic", &patterns());
        assert_eq!(codes.modifiers, set(&["in"]));
    }

    #[test]
    fn codes_are_not_mutually_exclusive() {
        // A five-digit ICD-10 body is also a CPT candidate elsewhere in text.
        let codes = extract_codes("K63.5 and 45380", &patterns());
        assert!(codes.icd_10.contains("K63.5"));
        assert!(codes.cpt.contains("45380"));
    }

    #[test]
    fn empty_text_yields_no_codes() {
        assert_eq!(extract_codes("", &patterns()), MedicalCodes::default());
    }

    proptest! {
        #[test]
        fn extraction_is_idempotent(text in "[A-Za-z0-9 .:\n-]{0,200}") {
            let p = patterns();
            prop_assert_eq!(extract_codes(&text, &p), extract_codes(&text, &p));
        }

        #[test]
        fn every_icd10_code_matches_exact_shape(text in "[A-Z0-9 .a-z\n]{0,200}") {
            let exact = Regex::new(r"^[A-Z]\d{2}(\.\d{1,2}[A-Z]?)?$").unwrap();
            let codes = extract_codes(&text, &patterns());
            for code in &codes.icd_10 {
                prop_assert!(exact.is_match(code), "bad code {}", code);
            }
        }

        #[test]
        fn every_cpt_code_is_in_range(text in "[0-9 ]{0,120}") {
            let codes = extract_codes(&text, &patterns());
            for code in &codes.cpt {
                prop_assert_eq!(code.len(), 5);
                prop_assert!(CPT_RANGE.contains(&code.parse::<u32>().unwrap()));
            }
        }
    }
}
