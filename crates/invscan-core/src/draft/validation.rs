use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::draft::InvoiceDraft;

/// A reason a draft cannot be sent yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationIssue {
    MissingSenderName,
    MissingRecipientName,
    MissingInvoiceNumber,
    MissingInvoiceDate,
    NoBillableItems,
}

impl ValidationIssue {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingSenderName => "Sender company name is required",
            Self::MissingRecipientName => "Recipient company name is required",
            Self::MissingInvoiceNumber => "Invoice number is required",
            Self::MissingInvoiceDate => "Invoice date is required",
            Self::NoBillableItems => "Add at least one valid line item",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl InvoiceDraft {
    /// Check the draft, returning every issue in form order.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.sender.company_name.trim().is_empty() {
            issues.push(ValidationIssue::MissingSenderName);
        }
        if self.recipient.company_name.trim().is_empty() {
            issues.push(ValidationIssue::MissingRecipientName);
        }
        if self.invoice_number.trim().is_empty() {
            issues.push(ValidationIssue::MissingInvoiceNumber);
        }
        if self.invoice_date.is_empty() {
            issues.push(ValidationIssue::MissingInvoiceDate);
        }
        if !self.items.iter().any(|item| item.is_billable()) {
            issues.push(ValidationIssue::NoBillableItems);
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
