use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::DraftError;
use crate::models::draft::parse_iso_date;

/// Supported currencies and their display symbols.
const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "$"),
    ("CNY", "¥"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CAD", "$"),
    ("AUD", "$"),
];

/// Display symbol for a supported currency code.
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, symbol)| *symbol)
}

/// Format an amount as `$1,234.56`. Unknown codes are written as a prefix
/// (`CHF 1,234.56`).
pub fn format_currency(amount: Decimal, code: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match currency_symbol(code) {
        Some(symbol) => format!("{}{}{}.{}", sign, symbol, grouped, cents),
        None => format!("{}{} {}.{}", sign, code, grouped, cents),
    }
}

/// Format an ISO date as `March 15, 2024`. Empty input gives an empty
/// string.
pub fn format_date_us(date: &str) -> Result<String, DraftError> {
    if date.trim().is_empty() {
        return Ok(String::new());
    }

    parse_iso_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .ok_or_else(|| DraftError::InvalidDate(date.to_string()))
}
