//! Company name extraction from proper-noun lines.

use super::patterns::COMPANY_NAME;
use super::{ExtractionMatch, FieldExtractor};

/// Confidence assigned to sender and recipient names.
pub const COMPANY_NAME_CONFIDENCE: f32 = 0.5;

/// Lines starting with these words are headers, not names.
const HEADER_WORDS: &[&str] = &["invoice", "date", "from", "to", "bill", "total"];

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 50;

/// Company name extractor. Scans trimmed lines in order.
pub struct CompanyNameExtractor;

impl CompanyNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompanyNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CompanyNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut offset = 0;

        for raw_line in text.split('\n') {
            let line = raw_line.trim();
            if is_company_name(line) {
                let start = offset + raw_line.len() - raw_line.trim_start().len();
                results.push(
                    ExtractionMatch::new(line.to_string(), COMPANY_NAME_CONFIDENCE, line)
                        .with_position(start, start + line.len()),
                );
            }
            offset += raw_line.len() + 1;
        }

        results
    }
}

/// Check whether a trimmed line looks like a company name.
pub fn is_company_name(line: &str) -> bool {
    let len = line.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return false;
    }

    if !COMPANY_NAME.is_match(line) {
        return false;
    }

    let lowered = line.to_ascii_lowercase();
    !HEADER_WORDS.iter().any(|word| lowered.starts_with(word))
}

/// All company name candidates in order of appearance.
pub fn extract_company_names(text: &str) -> Vec<String> {
    CompanyNameExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}
