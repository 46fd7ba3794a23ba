//! Extraction result handed from the field mapper to the invoice editor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Score at or above which a field is reported as high confidence.
pub const HIGH_CONFIDENCE: f32 = 0.8;

/// Score at or above which a field is reported as medium confidence.
pub const MEDIUM_CONFIDENCE: f32 = 0.5;

/// Best-effort invoice draft recovered from recognized text.
///
/// Every string is empty when the corresponding field was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Issuing party.
    pub sender: Contact,

    /// Billed party.
    pub recipient: Contact,

    /// Invoice number or code.
    pub invoice_number: String,

    /// Invoice date (`YYYY-MM-DD`).
    pub invoice_date: String,

    /// Payment due date (`YYYY-MM-DD`).
    pub due_date: String,

    /// Line items in order of appearance.
    pub items: Vec<ExtractedItem>,

    /// Per-field confidence scores.
    pub confidence: FieldConfidence,
}

impl ExtractionResult {
    /// True when nothing at all could be recovered.
    ///
    /// Callers use this to fall back to showing the raw recognized text.
    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
            && self.recipient.is_empty()
            && self.invoice_number.is_empty()
            && self.invoice_date.is_empty()
            && self.due_date.is_empty()
            && self.items.is_empty()
    }
}

/// Contact details of one invoice party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub company_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    /// Check if the contact has any data.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_empty()
            && self.address.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
    }
}

/// A line item recognized in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    /// Unique within one extraction; not stable across calls.
    pub id: String,

    /// Cleaned item description.
    pub description: String,

    /// Item quantity.
    pub quantity: u32,

    /// Price per unit, always positive.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

/// Fields that carry a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    SenderName,
    RecipientName,
}

impl Field {
    /// All scored fields in display order.
    pub const ALL: [Field; 5] = [
        Field::InvoiceNumber,
        Field::InvoiceDate,
        Field::DueDate,
        Field::SenderName,
        Field::RecipientName,
    ];

    /// Key used in serialized output.
    pub fn key(self) -> &'static str {
        match self {
            Field::InvoiceNumber => "invoiceNumber",
            Field::InvoiceDate => "invoiceDate",
            Field::DueDate => "dueDate",
            Field::SenderName => "senderName",
            Field::RecipientName => "recipientName",
        }
    }
}

/// Confidence per field. `None` means no opinion, not zero confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<f32>,
}

impl FieldConfidence {
    /// Confidence for a single field.
    pub fn get(&self, field: Field) -> Option<f32> {
        match field {
            Field::InvoiceNumber => self.invoice_number,
            Field::InvoiceDate => self.invoice_date,
            Field::DueDate => self.due_date,
            Field::SenderName => self.sender_name,
            Field::RecipientName => self.recipient_name,
        }
    }

    /// Fields that have a score, with their scores.
    pub fn scored(&self) -> impl Iterator<Item = (Field, f32)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|score| (field, score)))
    }

    /// True when no field has a score.
    pub fn is_empty(&self) -> bool {
        self.scored().next().is_none()
    }
}

/// Coarse confidence bucket shown next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Bucket a score: >= 0.8 high, >= 0.5 medium, otherwise low.
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_CONFIDENCE {
            Self::High
        } else if score >= MEDIUM_CONFIDENCE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
