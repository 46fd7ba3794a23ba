//! Draft command - build an invoice draft from recognized text.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use invscan_core::{
    InvoiceDraft, InvoiceTotals, ValidationIssue, email_link, extract_invoice_data,
    format_currency,
};

use super::{load_config, read_input};

/// Arguments for the draft command.
#[derive(Args)]
pub struct DraftArgs {
    /// Recognized text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Issue date for the new draft (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Include a mailto link for sending the invoice
    #[arg(long)]
    email: bool,
}

/// Draft together with everything derived from it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftReport<'a> {
    draft: &'a InvoiceDraft,
    totals: InvoiceTotals,
    issues: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_link: Option<String>,
}

pub fn run(args: DraftArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_input(&args.input)?;

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut draft = InvoiceDraft::new(&config.draft, today);

    let extracted = extract_invoice_data(&text);
    draft.apply_extraction(&extracted);
    info!("Draft {} has {} items", draft.invoice_number, draft.items.len());

    let report = DraftReport {
        draft: &draft,
        totals: draft.totals()?,
        issues: draft.validate(),
        email_link: args.email.then(|| email_link(&draft)).transpose()?,
    };
    let rendered = serde_json::to_string_pretty(&report)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Draft written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    eprintln!(
        "{} Total due: {}",
        style("ℹ").blue(),
        format_currency(report.totals.total, &draft.currency)
    );

    if !report.issues.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for issue in &report.issues {
            eprintln!("  - {}", issue);
        }
    }

    Ok(())
}
