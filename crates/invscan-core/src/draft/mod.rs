//! Operations on invoice drafts: creation, merging confirmed extraction
//! results, validation, totals and export helpers.

mod email;
mod format;
mod merge;
mod totals;
mod validation;

pub use email::email_link;
pub use format::{currency_symbol, format_currency, format_date_us};
pub use totals::InvoiceTotals;
pub use validation::ValidationIssue;

use chrono::{Days, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::models::config::DraftConfig;
use crate::models::draft::{DraftItem, InvoiceDraft};
use crate::models::extraction::Contact;

/// Generate an invoice number of the form `PREFIX-YYYYMMDD-NNNN`.
///
/// The trailing four digits are random.
pub fn generate_invoice_number(prefix: &str, date: NaiveDate) -> String {
    let suffix = Uuid::new_v4().as_u128() % 10_000;
    format!("{}-{}-{:04}", prefix, date.format("%Y%m%d"), suffix)
}

impl InvoiceDraft {
    /// Fresh draft dated `today`, due after the configured number of days,
    /// with a single blank item.
    pub fn new(config: &DraftConfig, today: NaiveDate) -> Self {
        let due = today
            .checked_add_days(Days::new(config.due_in_days as u64))
            .unwrap_or(today);

        let draft = Self {
            sender: Contact::default(),
            recipient: Contact::default(),
            invoice_number: generate_invoice_number(&config.number_prefix, today),
            invoice_date: today.format("%Y-%m-%d").to_string(),
            due_date: due.format("%Y-%m-%d").to_string(),
            currency: config.currency.clone(),
            items: vec![DraftItem::blank()],
            tax_rate: config.tax_rate,
            notes: String::new(),
        };

        debug!("Created draft {}", draft.invoice_number);
        draft
    }
}
