//! Invoice field extraction from recognized text.

mod parser;
pub mod rules;

pub use parser::{FieldMapper, extract_invoice_data};
