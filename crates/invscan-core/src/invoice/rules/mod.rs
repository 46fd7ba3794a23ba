//! Rule-based field extractors for recognized invoice text.
//!
//! Each extractor is a pure function of the full text and returns its own
//! matches; none of them share state or consume text for another.

pub mod company;
pub mod contacts;
pub mod dates;
pub mod items;
pub mod number;
pub mod patterns;

pub use company::{extract_company_names, is_company_name, CompanyNameExtractor};
pub use contacts::{extract_emails, extract_phones, format_phone, EmailExtractor, PhoneExtractor};
pub use dates::{extract_dates, normalize_month_first, DateExtractor, InvoiceDates};
pub use items::{clean_description, extract_line_items, LineItemExtractor};
pub use number::{extract_invoice_number, InvoiceNumberExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Byte offset of the match start, or 0 when unknown.
    pub fn start(&self) -> usize {
        self.position.map(|(start, _)| start).unwrap_or(0)
    }
}
