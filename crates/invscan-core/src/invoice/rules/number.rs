//! Invoice number extraction.

use regex::Regex;

use super::patterns::{
    INVOICE_NUMBER_CODE, INVOICE_NUMBER_COMPACT, INVOICE_NUMBER_LABELED, INVOICE_NUMBER_PREFIXED,
};
use super::{ExtractionMatch, FieldExtractor};

/// Confidence assigned to any template match.
pub const INVOICE_NUMBER_CONFIDENCE: f32 = 0.7;

/// Shortest token accepted as an invoice number.
const MIN_LENGTH: usize = 4;

/// Labels that commonly follow "Invoice" and are never numbers themselves.
const LABEL_WORDS: &[&str] = &[
    "date", "dated", "number", "total", "amount", "details", "summary", "from",
];

/// Invoice number extractor.
///
/// Templates are tried in order and the first one that yields an acceptable
/// token wins; later templates are never consulted.
pub struct InvoiceNumberExtractor {
    templates: [&'static Regex; 4],
}

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self {
            templates: [
                &*INVOICE_NUMBER_LABELED,
                &*INVOICE_NUMBER_PREFIXED,
                &*INVOICE_NUMBER_CODE,
                &*INVOICE_NUMBER_COMPACT,
            ],
        }
    }

    fn template_matches(&self, template: &Regex, text: &str) -> Vec<ExtractionMatch<String>> {
        template
            .captures_iter(text)
            .filter_map(|caps| {
                let token = caps.get(1)?;
                let value = token.as_str().trim_end_matches('-');
                is_acceptable(value).then(|| {
                    ExtractionMatch::new(value.to_string(), INVOICE_NUMBER_CONFIDENCE, token.as_str())
                        .with_position(token.start(), token.start() + value.len())
                })
            })
            .collect()
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// All acceptable tokens of the first template that has any.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.templates
            .iter()
            .map(|template| self.template_matches(template, text))
            .find(|matches| !matches.is_empty())
            .unwrap_or_default()
    }
}

fn is_acceptable(token: &str) -> bool {
    token.len() >= MIN_LENGTH
        && !LABEL_WORDS
            .iter()
            .any(|label| token.eq_ignore_ascii_case(label))
}

/// Extract the invoice number from text.
pub fn extract_invoice_number(text: &str) -> Option<ExtractionMatch<String>> {
    InvoiceNumberExtractor::new().extract(text)
}
