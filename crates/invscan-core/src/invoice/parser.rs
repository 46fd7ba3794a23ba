//! Maps recognized OCR text onto invoice fields.

use tracing::{debug, info};

use crate::models::extraction::{Contact, ExtractionResult, FieldConfidence};

use super::rules::{
    company::COMPANY_NAME_CONFIDENCE, extract_company_names, extract_dates, extract_emails,
    extract_invoice_number, extract_line_items, extract_phones,
};

/// Field mapper combining the independent rule extractors.
///
/// Extractors run over the same text without cross-validation, so one
/// substring may feed several fields. Contacts and company names are
/// assigned by position: first occurrence to the sender, second to the
/// recipient.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl FieldMapper {
    pub fn new() -> Self {
        Self
    }

    /// Build an extraction result from text. Never fails; unknown fields are
    /// left empty.
    pub fn map(&self, text: &str) -> ExtractionResult {
        info!("Mapping invoice fields from {} characters of text", text.len());

        let mut confidence = FieldConfidence::default();

        let invoice_number = match extract_invoice_number(text) {
            Some(found) => {
                confidence.invoice_number = Some(found.confidence);
                found.value
            }
            None => String::new(),
        };

        let dates = extract_dates(text);
        let invoice_date = dates
            .invoice_date
            .map(|found| {
                confidence.invoice_date = Some(found.confidence);
                found.value.format("%Y-%m-%d").to_string()
            })
            .unwrap_or_default();
        let due_date = dates
            .due_date
            .map(|found| {
                confidence.due_date = Some(found.confidence);
                found.value.format("%Y-%m-%d").to_string()
            })
            .unwrap_or_default();

        let items = extract_line_items(text);
        let phones = extract_phones(text);
        let emails = extract_emails(text);
        let names = extract_company_names(text);

        debug!(
            "Found {} items, {} phones, {} emails, {} name candidates",
            items.len(),
            phones.len(),
            emails.len(),
            names.len()
        );

        let mut phones = phones.into_iter();
        let mut emails = emails.into_iter();
        let mut names = names.into_iter();

        let sender = Contact {
            company_name: names.next().unwrap_or_default(),
            address: String::new(),
            phone: phones.next().unwrap_or_default(),
            email: emails.next().unwrap_or_default(),
        };
        let recipient = Contact {
            company_name: names.next().unwrap_or_default(),
            address: String::new(),
            phone: phones.next().unwrap_or_default(),
            email: emails.next().unwrap_or_default(),
        };

        if !sender.company_name.is_empty() {
            confidence.sender_name = Some(COMPANY_NAME_CONFIDENCE);
        }
        if !recipient.company_name.is_empty() {
            confidence.recipient_name = Some(COMPANY_NAME_CONFIDENCE);
        }

        ExtractionResult {
            sender,
            recipient,
            invoice_number,
            invoice_date,
            due_date,
            items,
            confidence,
        }
    }
}

/// Extract invoice data from recognized text with the default mapper.
pub fn extract_invoice_data(text: &str) -> ExtractionResult {
    FieldMapper::new().map(text)
}
