//! CLI binary: extract embedded images from PDFs to a directory.

use anyhow::{Context, Result};
use clap::Parser;
use pdfimg2md::cli::{bold, cyan, green, init_tracing, log_level, red, LineProgressCallback};
use pdfimg2md::{extract_many_with_progress, ExtractionProgressCallback, NoopProgressCallback, DEFAULT_IMAGES_DIR};
use std::path::PathBuf;

/// Extract embedded images from PDF files.
#[derive(Parser, Debug)]
#[command(
    name = "pdfimg",
    version,
    about = "Extract embedded images from PDF files",
    long_about = "Extract every embedded raster image from one or more PDF files. \
JPEG, JPEG 2000 and JBIG2 images are written byte-for-byte; raw pixel images are \
saved as PNG. Files are named imagen_1, imagen_2, … across the whole run.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// PDF files to process.
    #[arg(required = true)]
    pdfs: Vec<PathBuf>,

    /// Directory the images are written to (created if missing).
    #[arg(short, long, env = "PDFIMG_OUTPUT_DIR", default_value = DEFAULT_IMAGES_DIR)]
    output_dir: PathBuf,

    /// Print the extracted records as JSON instead of progress lines.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFIMG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFIMG_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(log_level(cli.verbose, cli.quiet, false));

    let progress: &dyn ExtractionProgressCallback = if cli.quiet || cli.json {
        &NoopProgressCallback
    } else {
        &LineProgressCallback
    };

    let results = extract_many_with_progress(&cli.pdfs, Some(cli.output_dir.as_path()), progress);
    let total: usize = results.iter().map(|r| r.images.len()).sum();
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("Failed to serialise results")?
        );
    } else if !cli.quiet {
        println!();
        println!(
            "{} {} images extracted from {} PDFs  →  {}",
            if total > 0 { green("✔") } else { cyan("⚠") },
            bold(&total.to_string()),
            results.len(),
            bold(&cli.output_dir.display().to_string()),
        );
        if failed > 0 {
            println!("  {} {} PDFs failed", red("✗"), failed);
        }
    }

    if failed == results.len() {
        anyhow::bail!("none of the {} PDFs could be processed", failed);
    }
    Ok(())
}
