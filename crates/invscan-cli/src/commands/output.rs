//! Rendering extraction results as JSON, CSV or text.

use console::style;
use serde::Serialize;

use invscan_core::models::config::OutputFormat as ConfigFormat;
use invscan_core::models::extraction::Field;
use invscan_core::{ConfidenceLevel, Contact, ExtractionResult, ScanOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

impl From<ConfigFormat> for OutputFormat {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Json => OutputFormat::Json,
            ConfigFormat::Csv => OutputFormat::Csv,
            ConfigFormat::Text => OutputFormat::Text,
        }
    }
}

/// Render a scan outcome. JSON carries the raw text only when asked to.
pub fn format_outcome(
    outcome: &ScanOutcome,
    format: OutputFormat,
    include_text: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if include_text => to_json(outcome),
        OutputFormat::Json => to_json(&outcome.data),
        OutputFormat::Csv => format_csv(&outcome.data),
        OutputFormat::Text => Ok(format_text(&outcome.data)),
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_number",
        "invoice_date",
        "due_date",
        "sender_name",
        "sender_phone",
        "sender_email",
        "recipient_name",
        "recipient_phone",
        "recipient_email",
        "item_description",
        "item_quantity",
        "item_unit_price",
    ])?;

    let header = [
        result.invoice_number.as_str(),
        result.invoice_date.as_str(),
        result.due_date.as_str(),
        result.sender.company_name.as_str(),
        result.sender.phone.as_str(),
        result.sender.email.as_str(),
        result.recipient.company_name.as_str(),
        result.recipient.phone.as_str(),
        result.recipient.email.as_str(),
    ];

    if result.items.is_empty() {
        wtr.write_record(header.iter().copied().chain(["", "", ""]))?;
    }

    for item in &result.items {
        let quantity = item.quantity.to_string();
        let unit_price = item.unit_price.to_string();
        wtr.write_record(header.iter().copied().chain([
            item.description.as_str(),
            quantity.as_str(),
            unit_price.as_str(),
        ]))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", or_dash(&result.invoice_number)));
    output.push_str(&format!("Date: {}\n", or_dash(&result.invoice_date)));
    output.push_str(&format!("Due: {}\n", or_dash(&result.due_date)));
    output.push('\n');

    push_contact(&mut output, "Sender", &result.sender);
    push_contact(&mut output, "Recipient", &result.recipient);

    output.push_str("Items:\n");
    if result.items.is_empty() {
        output.push_str("  -\n");
    }
    for item in &result.items {
        output.push_str(&format!(
            "  {} | {} x {}\n",
            item.description, item.quantity, item.unit_price
        ));
    }

    output
}

fn push_contact(output: &mut String, label: &str, contact: &Contact) {
    output.push_str(&format!("{}:\n", label));
    output.push_str(&format!("  {}\n", or_dash(&contact.company_name)));
    for line in [&contact.phone, &contact.email] {
        if !line.is_empty() {
            output.push_str(&format!("  {}\n", line));
        }
    }
    output.push('\n');
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Print per-field confidence with a colored level.
pub fn print_confidence(outcome: &ScanOutcome) {
    println!();
    for field in Field::ALL {
        match outcome.data.confidence.get(field) {
            Some(score) => {
                let level = ConfidenceLevel::from_score(score);
                let label = match level {
                    ConfidenceLevel::High => style(level.label()).green(),
                    ConfidenceLevel::Medium => style(level.label()).yellow(),
                    ConfidenceLevel::Low => style(level.label()).red(),
                };
                println!(
                    "{} {}: {:.0}% ({})",
                    style("ℹ").blue(),
                    field.key(),
                    score * 100.0,
                    label
                );
            }
            None => println!("{} {}: not found", style("ℹ").blue(), field.key()),
        }
    }

    if let Some(ocr) = outcome.ocr_confidence {
        println!("{} OCR confidence: {:.1}%", style("ℹ").blue(), ocr);
    }
}
