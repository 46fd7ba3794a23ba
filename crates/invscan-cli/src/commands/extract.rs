//! Extract command - map a single recognized text file onto invoice fields.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use invscan_core::{RecognizedText, ScanOutcome};

use super::output::{self, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Recognized text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show per-field confidence
    #[arg(long)]
    show_confidence: bool,

    /// Confidence reported by the OCR engine (0-100)
    #[arg(long)]
    ocr_confidence: Option<f32>,

    /// Include the recognized text in JSON output
    #[arg(long)]
    include_text: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if let Some(confidence) = args.ocr_confidence {
        if !(0.0..=100.0).contains(&confidence) {
            anyhow::bail!("OCR confidence must be between 0 and 100, got {}", confidence);
        }
    }

    info!("Extracting fields from {}", args.input.display());
    let text = read_input(&args.input)?;

    let mut recognized = RecognizedText::new(text);
    recognized.confidence = args.ocr_confidence;
    let outcome = ScanOutcome::from_recognized(recognized);

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from(config.output.format));
    let rendered = output::format_outcome(&outcome, format, args.include_text)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    if outcome.needs_manual_entry() {
        eprintln!(
            "{} No invoice fields recognized; enter them manually.",
            style("⚠").yellow()
        );
        if config.output.show_raw_text_on_empty && !outcome.text.trim().is_empty() {
            eprintln!("{}", style("Recognized text:").dim());
            eprintln!("{}", outcome.text.trim_end());
        }
    }

    if args.show_confidence || config.output.show_confidence {
        output::print_confidence(&outcome);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
