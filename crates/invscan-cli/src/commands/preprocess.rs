//! Preprocess command - prepare a scanned image for an OCR engine.

use std::path::PathBuf;

use clap::Args;
use console::style;
use image::GenericImageView;
use tracing::info;

use invscan_core::ImagePreprocessor;

use super::load_config;

/// Arguments for the preprocess command.
#[derive(Args)]
pub struct PreprocessArgs {
    /// Input image
    #[arg(required = true)]
    input: PathBuf,

    /// Output image (format from extension)
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Fixed binarization threshold (default: Otsu)
    #[arg(long)]
    threshold: Option<u8>,

    /// Maximum image dimension
    #[arg(long)]
    max_size: Option<u32>,

    /// Skip binarization
    #[arg(long)]
    no_binarize: bool,
}

pub fn run(args: PreprocessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?.preprocess;

    if let Some(threshold) = args.threshold {
        config.threshold = Some(threshold);
    }
    if let Some(max_size) = args.max_size {
        config.max_image_size = max_size;
    }
    if args.no_binarize {
        config.binarize = false;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let image = image::open(&args.input)?;
    let (width, height) = image.dimensions();
    info!("Loaded {} ({}x{})", args.input.display(), width, height);

    let processed = ImagePreprocessor::from_config(&config).process(&image)?;
    processed.save(&args.output)?;

    let (out_width, out_height) = processed.dimensions();
    println!(
        "{} Wrote {}x{} image to {}",
        style("✓").green(),
        out_width,
        out_height,
        args.output.display()
    );

    Ok(())
}
