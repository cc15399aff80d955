//! CLI binary for pdfimg2md.
//!
//! A thin shim over the library crate that validates inputs, maps CLI
//! flags to `ReportConfig` and prints the summary.

use anyhow::{Context, Result};
use clap::Parser;
use pdfimg2md::cli::{
    bold, cyan, dim, green, init_tracing, log_level, red, BarProgressCallback,
};
use pdfimg2md::pipeline::input::partition_inputs;
use pdfimg2md::{
    generate_with_config, ProgressCallback, ReportConfig,
    DEFAULT_IMAGES_DIR, DEFAULT_REPORT_PATH,
};
use std::path::PathBuf;
use std::sync::Arc;

const AFTER_HELP: &str = r#"EXAMPLES:
  # One PDF, default output names
  pdfimg2md document.pdf

  # Several PDFs, custom report and image directory
  pdfimg2md a.pdf b.pdf -o images.md -d out/images

  # Metadata and links only, no Base64 blocks
  pdfimg2md --no-base64 scan.pdf

  # Machine-readable summary
  pdfimg2md --json document.pdf > summary.json

OUTPUT:
  Images are written as imagen_1.<ext>, imagen_2.<ext>, … numbered across
  all input PDFs. The report links to them through the --images-dir path
  exactly as given, so keep it relative to where the report is read.

ENVIRONMENT VARIABLES:
  PDFIMG_OUTPUT           Report path (default: reporte_imagenes.md)
  PDFIMG_IMAGES_DIR       Image directory (default: imagenes_extraidas)
  RUST_LOG                Override the log filter (e.g. pdfimg2md=debug)
"#;

/// Extract images from PDFs and write a Markdown report with Base64 blocks.
#[derive(Parser, Debug)]
#[command(
    name = "pdfimg2md",
    version,
    about = "Extract images from PDFs into a Markdown report with Base64 blocks",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF files to process.
    #[arg(required = true)]
    pdfs: Vec<PathBuf>,

    /// Markdown report to write (overwritten).
    #[arg(short, long, env = "PDFIMG_OUTPUT", default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,

    /// Directory extracted images are written to.
    #[arg(short = 'd', long, env = "PDFIMG_IMAGES_DIR", default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Leave the Base64 blocks out of the report.
    #[arg(long, env = "PDFIMG_NO_BASE64")]
    no_base64: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFIMG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFIMG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFIMG_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep library logs out of the way while the bar is drawing.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    init_tracing(log_level(cli.verbose, cli.quiet, show_progress));

    // ── Validate inputs ──────────────────────────────────────────────────
    let (valid, rejected) = partition_inputs(&cli.pdfs);
    for (path, err) in &rejected {
        eprintln!(
            "{} skipping {}: {}",
            red("✗"),
            bold(&path.display().to_string()),
            err.to_string().lines().next().unwrap_or_default()
        );
    }
    if valid.is_empty() {
        anyhow::bail!("no valid PDF files to process");
    }

    // ── Build config ─────────────────────────────────────────────────────
    let bar = show_progress.then(BarProgressCallback::new_shared);

    let mut builder = ReportConfig::builder()
        .output_path(&cli.output)
        .images_dir(&cli.images_dir)
        .embed_base64(!cli.no_base64);
    if let Some(ref cb) = bar {
        builder = builder.progress_callback(Arc::clone(cb) as ProgressCallback);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let summary = generate_with_config(&valid, &config).context("Report generation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
        return Ok(());
    }

    if !cli.quiet {
        if summary.has_images() {
            eprintln!(
                "{} {} images from {} PDFs  →  {}",
                green("✔"),
                bold(&summary.total_images.to_string()),
                summary.pdf_count,
                bold(&summary.report_path.display().to_string()),
            );
        } else {
            eprintln!(
                "{} no images found in {} PDFs  →  {}",
                cyan("⚠"),
                summary.pdf_count,
                bold(&summary.report_path.display().to_string()),
            );
        }
        eprintln!(
            "   {}",
            dim(&format!("images: {}", summary.images_dir.display()))
        );
        if summary.failed_pdfs + summary.failed_images > 0 {
            eprintln!(
                "   {} {} PDFs and {} images failed; see the report for details",
                red("✗"),
                summary.failed_pdfs,
                summary.failed_images
            );
        }
    }

    Ok(())
}
