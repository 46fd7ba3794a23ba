//! Core library for scanned invoice processing.
//!
//! This crate provides:
//! - Field extraction from OCR text (invoice number, dates, contacts, line items, company names)
//! - Invoice draft handling (applying confirmed extractions, validation, totals, email links)
//! - Image preprocessing ahead of an external OCR engine
//! - Configuration shared by the CLI and WASM front ends

pub mod draft;
pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;

pub use draft::{
    InvoiceTotals, ValidationIssue, email_link, format_currency, format_date_us,
    generate_invoice_number,
};
pub use error::{InvscanError, Result};
pub use invoice::{FieldMapper, extract_invoice_data};
pub use models::config::InvscanConfig;
pub use models::draft::{DraftItem, InvoiceDraft};
pub use models::extraction::{ConfidenceLevel, Contact, ExtractedItem, ExtractionResult, FieldConfidence};
pub use ocr::{ImagePreprocessor, RecognizedText, ScanOutcome, ScanPipeline, TextRecognizer};
