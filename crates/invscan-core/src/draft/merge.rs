use rust_decimal::Decimal;
use tracing::debug;

use crate::models::draft::{DraftItem, InvoiceDraft};
use crate::models::extraction::{Contact, ExtractedItem, ExtractionResult};

impl InvoiceDraft {
    /// Merge a user-confirmed extraction result into the draft.
    ///
    /// Only non-empty fields overwrite. A party is taken over only when its
    /// company name was recognized; items are replaced as a whole when any
    /// were recognized.
    pub fn apply_extraction(&mut self, result: &ExtractionResult) {
        if !result.invoice_number.is_empty() {
            self.invoice_number = result.invoice_number.clone();
        }
        if !result.invoice_date.is_empty() {
            self.invoice_date = result.invoice_date.clone();
        }
        if !result.due_date.is_empty() {
            self.due_date = result.due_date.clone();
        }

        if !result.sender.company_name.is_empty() {
            merge_contact(&mut self.sender, &result.sender);
        }
        if !result.recipient.company_name.is_empty() {
            merge_contact(&mut self.recipient, &result.recipient);
        }

        if !result.items.is_empty() {
            self.items = result.items.iter().map(DraftItem::from).collect();
        }

        debug!(
            "Applied extraction to draft {} ({} items)",
            self.invoice_number,
            self.items.len()
        );
    }
}

fn merge_contact(target: &mut Contact, source: &Contact) {
    let fields = [
        (&mut target.company_name, &source.company_name),
        (&mut target.address, &source.address),
        (&mut target.phone, &source.phone),
        (&mut target.email, &source.email),
    ];
    for (dst, src) in fields {
        if !src.is_empty() {
            dst.clone_from(src);
        }
    }
}

impl From<&ExtractedItem> for DraftItem {
    fn from(item: &ExtractedItem) -> Self {
        Self {
            id: item.id.clone(),
            description: item.description.clone(),
            quantity: Decimal::from(item.quantity),
            unit_price: item.unit_price,
        }
    }
}
