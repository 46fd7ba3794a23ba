//! WASM bindings for scanned invoice field extraction.
//!
//! The browser runs OCR itself and hands the recognized text to these
//! functions; drafts travel back and forth as plain JS objects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use invscan_core::models::config::DraftConfig;
use invscan_core::{
    ConfidenceLevel, ExtractionResult, FieldMapper, InvoiceDraft, RecognizedText, ScanOutcome,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract invoice fields from recognized text.
///
/// Never fails on text content; an error only means the result could not
/// be converted to a JS value.
#[wasm_bindgen]
pub fn extract_invoice_data(text: &str) -> Result<JsValue, JsValue> {
    to_js(&invscan_core::extract_invoice_data(text))
}

/// Confidence label (`"high"`, `"medium"` or `"low"`) for a field score.
#[wasm_bindgen]
pub fn confidence_level(score: f32) -> String {
    ConfidenceLevel::from_score(score).label().to_string()
}

/// Invoice extractor class for browser use.
#[wasm_bindgen]
pub struct InvoiceExtractor {
    mapper: FieldMapper,
}

#[wasm_bindgen]
impl InvoiceExtractor {
    /// Create a new invoice extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            mapper: FieldMapper::new(),
        }
    }

    /// Extract invoice fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.mapper.map(text))
    }

    /// Extract fields and keep the recognized text and OCR confidence
    /// alongside, for manual transcription when nothing maps.
    #[wasm_bindgen]
    pub fn extract_with_text(
        &self,
        text: &str,
        ocr_confidence: Option<f32>,
    ) -> Result<JsValue, JsValue> {
        let outcome = ScanOutcome {
            text: text.to_string(),
            data: self.mapper.map(text),
            ocr_confidence,
        };

        if outcome.needs_manual_entry() {
            web_sys::console::warn_1(&"invscan: no invoice fields recognized".into());
        }

        to_js(&outcome)
    }
}

impl Default for InvoiceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map text from an OCR engine result object (`{ text, confidence }`).
#[wasm_bindgen]
pub fn scan_outcome(recognized: JsValue) -> Result<JsValue, JsValue> {
    let recognized: RecognizedText = from_js(recognized)?;
    to_js(&ScanOutcome::from_recognized(recognized))
}

fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Create an empty draft dated today. `config` is an optional draft
/// configuration object.
#[wasm_bindgen]
pub fn create_draft(config: JsValue) -> Result<JsValue, JsValue> {
    let config: DraftConfig = if config.is_undefined() || config.is_null() {
        DraftConfig::default()
    } else {
        from_js(config)?
    };
    to_js(&InvoiceDraft::new(&config, today()))
}

/// Merge a confirmed extraction result into a draft and return the draft.
#[wasm_bindgen]
pub fn apply_extraction(draft: JsValue, extraction: JsValue) -> Result<JsValue, JsValue> {
    let mut draft: InvoiceDraft = from_js(draft)?;
    let extraction: ExtractionResult = from_js(extraction)?;
    draft.apply_extraction(&extraction);
    to_js(&draft)
}

/// Validation messages for a draft; empty when it can be sent.
#[wasm_bindgen]
pub fn validate_draft(draft: JsValue) -> Result<Vec<String>, JsValue> {
    let draft: InvoiceDraft = from_js(draft)?;
    Ok(draft.validate().iter().map(|issue| issue.to_string()).collect())
}

/// Subtotal, tax and total of a draft.
#[wasm_bindgen]
pub fn draft_totals(draft: JsValue) -> Result<JsValue, JsValue> {
    let draft: InvoiceDraft = from_js(draft)?;
    let totals = draft.totals().map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&totals)
}

/// `mailto:` link for sending a draft.
#[wasm_bindgen]
pub fn email_link(draft: JsValue) -> Result<String, JsValue> {
    let draft: InvoiceDraft = from_js(draft)?;
    invscan_core::email_link(&draft).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format an amount in a currency (`$1,234.56`).
#[wasm_bindgen]
pub fn format_currency(amount: f64, currency: &str) -> String {
    let amount = Decimal::from_f64(amount).unwrap_or_default();
    invscan_core::format_currency(amount, currency)
}

/// Format an ISO date as `March 15, 2024`.
#[wasm_bindgen]
pub fn format_date_us(date: &str) -> Result<String, JsValue> {
    invscan_core::format_date_us(date).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TEXT: &str = "Acme Widgets Inc.\nInvoice #: INV-2024-001\nDate: 03/15/2024\nDesign Work 2 x $300.00";

    #[wasm_bindgen_test]
    fn test_confidence_level() {
        assert_eq!(confidence_level(0.9), "high");
        assert_eq!(confidence_level(0.7), "medium");
        assert_eq!(confidence_level(0.2), "low");
    }

    #[wasm_bindgen_test]
    fn test_extract_round_trips_through_js() {
        let value = extract_invoice_data(TEXT).unwrap();
        let result: ExtractionResult = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(result.invoice_number, "INV-2024-001");
        assert_eq!(result.invoice_date, "2024-03-15");
        assert_eq!(result.items.len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_extract_with_text_keeps_raw_text() {
        let value = InvoiceExtractor::new()
            .extract_with_text("unreadable", Some(42.0))
            .unwrap();
        let outcome: ScanOutcome = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(outcome.text, "unreadable");
        assert_eq!(outcome.ocr_confidence, Some(42.0));
        assert!(outcome.needs_manual_entry());
    }

    #[wasm_bindgen_test]
    fn test_draft_workflow() {
        let draft = create_draft(JsValue::UNDEFINED).unwrap();
        let extraction = extract_invoice_data(TEXT).unwrap();
        let merged = apply_extraction(draft, extraction).unwrap();

        let issues = validate_draft(merged.clone()).unwrap();
        assert_eq!(issues, vec!["Recipient company name is required".to_string()]);

        let link = email_link(merged).unwrap();
        assert!(link.starts_with("mailto:?subject=Invoice%20INV-2024-001"));
    }

    #[wasm_bindgen_test]
    fn test_overflowing_totals_are_errors() {
        let draft = create_draft(JsValue::UNDEFINED).unwrap();
        let extraction =
            extract_invoice_data("Widget 4000000000 x 100000000000000000000").unwrap();
        let merged = apply_extraction(draft, extraction).unwrap();

        assert!(draft_totals(merged.clone()).is_err());
        assert!(email_link(merged).is_err());
    }

    #[wasm_bindgen_test]
    fn test_formatting() {
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_date_us("2024-03-15").unwrap(), "March 15, 2024");
        assert!(format_date_us("15/03/2024").is_err());
    }
}
