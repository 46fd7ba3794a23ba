//! Line item extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;
use uuid::Uuid;

use super::patterns::{ENUMERATION_MARKER, LINE_ITEM};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::extraction::ExtractedItem;

/// Confidence assigned to every accepted line item.
pub const LINE_ITEM_CONFIDENCE: f32 = 0.6;

/// Words that mark summary or header rows rather than billable items.
const STOPLIST: &[&str] = &[
    "total", "subtotal", "tax", "amount", "due", "date", "invoice", "from", "to", "bill",
];

const MIN_DESCRIPTION_LEN: usize = 3;
const MAX_DESCRIPTION_LEN: usize = 50;

/// A line item before it is given an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemCandidate {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Stated line total, when present. Not cross-checked.
    pub line_total: Option<Decimal>,
}

/// Line item extractor.
pub struct LineItemExtractor;

impl LineItemExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parse_candidate(&self, caps: &regex::Captures<'_>) -> Option<LineItemCandidate> {
        let description = clean_description(&caps[1]);

        if contains_stopword(&description) {
            trace!("Rejecting summary row {:?}", description);
            return None;
        }

        let len = description.chars().count();
        if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&len) {
            trace!("Rejecting description of length {}", len);
            return None;
        }

        let quantity: u32 = caps[2].parse().ok()?;
        let unit_price = parse_amount(&caps[3])?;
        if unit_price <= Decimal::ZERO {
            return None;
        }
        let line_total = caps.get(4).and_then(|m| parse_amount(m.as_str()));

        Some(LineItemCandidate {
            description,
            quantity,
            unit_price,
            line_total,
        })
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = ExtractionMatch<LineItemCandidate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut offset = 0;

        // Matched line by line so a description never spans a line break.
        for line in text.split('\n') {
            for caps in LINE_ITEM.captures_iter(line) {
                let full_match = caps.get(0).unwrap();
                if let Some(candidate) = self.parse_candidate(&caps) {
                    results.push(
                        ExtractionMatch::new(candidate, LINE_ITEM_CONFIDENCE, full_match.as_str())
                            .with_position(offset + full_match.start(), offset + full_match.end()),
                    );
                }
            }
            offset += line.len() + 1;
        }

        results
    }
}

/// Extract line items in order of appearance, each with a fresh identifier.
pub fn extract_line_items(text: &str) -> Vec<ExtractedItem> {
    LineItemExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| ExtractedItem {
            id: Uuid::new_v4().to_string(),
            description: m.value.description,
            quantity: m.value.quantity,
            unit_price: m.value.unit_price,
            confidence: m.confidence,
        })
        .collect()
}

/// Strip a leading enumeration marker and collapse internal whitespace.
pub fn clean_description(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_marker = ENUMERATION_MARKER.replace(trimmed, "");
    without_marker.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when any word of the lowercased description starts with a
/// stoplisted word ("Taxes", "Subtotals", "Invoiced").
fn contains_stopword(description: &str) -> bool {
    description
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| STOPLIST.iter().any(|stop| word.starts_with(stop)))
}

/// Parse a price with optional thousands separators ("1,250.00").
fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', "")).ok()
}
