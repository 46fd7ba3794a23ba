//! Invoice draft owned by the editor.
//!
//! A draft outlives any single scan: extraction results are merged into it
//! only after the user confirms them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extraction::Contact;

/// Invoice being built by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Issuing party.
    pub sender: Contact,

    /// Billed party.
    pub recipient: Contact,

    /// Invoice number.
    pub invoice_number: String,

    /// Invoice date (`YYYY-MM-DD`).
    pub invoice_date: String,

    /// Payment due date (`YYYY-MM-DD`).
    pub due_date: String,

    /// Currency code (ISO 4217).
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Billable rows.
    pub items: Vec<DraftItem>,

    /// Tax rate in percent.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,

    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// One billable row of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl DraftItem {
    /// A blank row: quantity 1, price 0.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
        }
    }

    /// Quantity times unit price, `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }

    /// Row counts toward the invoice: has a description, positive quantity
    /// and non-negative price.
    pub fn is_billable(&self) -> bool {
        !self.description.trim().is_empty()
            && self.quantity > Decimal::ZERO
            && self.unit_price >= Decimal::ZERO
    }
}

impl InvoiceDraft {
    /// Parse the invoice date, if set and valid.
    pub fn invoice_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.invoice_date)
    }

    /// Parse the due date, if set and valid.
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.due_date)
    }
}

pub(crate) fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
