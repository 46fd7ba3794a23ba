//! Date extraction and ISO normalization.

use chrono::NaiveDate;
use tracing::trace;

use super::patterns::{DATE_DAY_FIRST, DATE_MDY, DATE_MONTH_NAME_FIRST, DATE_YMD};
use super::{ExtractionMatch, FieldExtractor};

/// Confidence of the first date found (taken as the invoice date).
pub const INVOICE_DATE_CONFIDENCE: f32 = 0.7;

/// Confidence of the second date found (taken as the due date).
pub const DUE_DATE_CONFIDENCE: f32 = 0.6;

/// Date field extractor.
///
/// Returns every parseable date in order of appearance, de-duplicated by
/// calendar value.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut found = Vec::new();

        // 03/15/2024, 3-15-24, 03.15.2024
        for caps in DATE_MDY.captures_iter(text) {
            let full_match = caps.get(0).unwrap();
            match normalize_month_first(&caps[1], &caps[2], &caps[3]) {
                Some(date) => found.push(
                    ExtractionMatch::new(date, INVOICE_DATE_CONFIDENCE, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                ),
                None => trace!("Discarding numeric date {:?}", full_match.as_str()),
            }
        }

        // 2024-03-15, 2024/3/15
        for caps in DATE_YMD.captures_iter(text) {
            let full_match = caps.get(0).unwrap();
            let date = parse_number::<i32>(&caps[1]).and_then(|year| {
                NaiveDate::from_ymd_opt(year, parse_number(&caps[2])?, parse_number(&caps[3])?)
            });
            if let Some(date) = date {
                found.push(
                    ExtractionMatch::new(date, INVOICE_DATE_CONFIDENCE, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        // March 15, 2024
        for caps in DATE_MONTH_NAME_FIRST.captures_iter(text) {
            let full_match = caps.get(0).unwrap();
            if let Some(date) = parse_month_name_date(&caps[1], &caps[2], &caps[3]) {
                found.push(
                    ExtractionMatch::new(date, INVOICE_DATE_CONFIDENCE, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        // 15 March 2024
        for caps in DATE_DAY_FIRST.captures_iter(text) {
            let full_match = caps.get(0).unwrap();
            if let Some(date) = parse_month_name_date(&caps[2], &caps[1], &caps[3]) {
                found.push(
                    ExtractionMatch::new(date, INVOICE_DATE_CONFIDENCE, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        // Order of appearance decides, not pattern order.
        found.sort_by_key(|m| m.start());

        let mut results: Vec<Self::Output> = Vec::with_capacity(found.len());
        for candidate in found {
            if !results.iter().any(|r| r.value == candidate.value) {
                results.push(candidate);
            }
        }

        results
    }
}

/// Dates assigned to invoice fields.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDates {
    /// First date in the text.
    pub invoice_date: Option<ExtractionMatch<NaiveDate>>,
    /// Second distinct date in the text.
    pub due_date: Option<ExtractionMatch<NaiveDate>>,
}

/// Extract invoice and due dates by position: first distinct date is the
/// invoice date, second is the due date.
pub fn extract_dates(text: &str) -> InvoiceDates {
    let mut dates = DateExtractor::new().extract_all(text).into_iter();

    let invoice_date = dates.next();
    let due_date = dates.next().map(|mut m| {
        m.confidence = DUE_DATE_CONFIDENCE;
        m
    });

    InvoiceDates {
        invoice_date,
        due_date,
    }
}

/// Normalize an ambiguous numeric date `a/b/c` as month/day/year.
///
/// Two-digit years are placed in the 2000s. A first part above 12 or a second
/// part above 31 discards the date instead of reinterpreting it day-first.
pub fn normalize_month_first(a: &str, b: &str, c: &str) -> Option<NaiveDate> {
    let month: u32 = parse_number(a)?;
    let day: u32 = parse_number(b)?;
    if month > 12 || day > 31 {
        return None;
    }

    let year: i32 = if c.len() == 2 {
        parse_number(&format!("20{}", c))?
    } else {
        parse_number(c)?
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse "<month name> <day> <year>" through chrono's month-name parser.
fn parse_month_name_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let short_month: String = month.chars().take(3).collect();
    let normalized = format!("{} {} {}", short_month, day, year);
    NaiveDate::parse_from_str(&normalized, "%b %d %Y").ok()
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Option<T> {
    s.parse().ok()
}
