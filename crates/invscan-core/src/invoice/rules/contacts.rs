//! Phone number and email extraction.

use super::patterns::{EMAIL, PHONE};
use super::{ExtractionMatch, FieldExtractor};

/// Phone number extractor for North American numbers.
///
/// Every match is normalized to `(AAA) EEE-NNNN`.
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PHONE
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let area = caps.get(1).or_else(|| caps.get(2))?;
                let value = format_phone(area.as_str(), &caps[3], &caps[4]);
                Some(
                    ExtractionMatch::new(value, 1.0, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Email address extractor. No validation beyond the pattern.
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMAIL
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), 1.0, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Canonical display form of a phone number.
pub fn format_phone(area: &str, exchange: &str, number: &str) -> String {
    format!("({}) {}-{}", area, exchange, number)
}

/// All phone numbers in order of appearance, normalized.
pub fn extract_phones(text: &str) -> Vec<String> {
    PhoneExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// All email addresses in order of appearance.
pub fn extract_emails(text: &str) -> Vec<String> {
    EmailExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
