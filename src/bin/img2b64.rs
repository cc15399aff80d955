//! CLI binary: encode one image file as Base64.

use anyhow::{Context, Result};
use clap::Parser;
use pdfimg2md::cli::{bold, dim, green, init_tracing, log_level};
use pdfimg2md::pipeline::encode::{encode_file, preview, write_to_file};
use std::path::PathBuf;

/// Encode an image file as standard Base64 text.
#[derive(Parser, Debug)]
#[command(
    name = "img2b64",
    version,
    about = "Encode an image file as standard Base64 text",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Image file to encode.
    image: PathBuf,

    /// Write the full Base64 text to this file.
    #[arg(short, long, env = "IMG2B64_OUTPUT")]
    output: Option<PathBuf>,

    /// Number of Base64 characters shown on stdout.
    #[arg(long, env = "IMG2B64_PREVIEW", default_value_t = 100)]
    preview: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(log_level(cli.verbose, cli.quiet, false));

    let b64 = encode_file(&cli.image)
        .with_context(|| format!("Failed to encode '{}'", cli.image.display()))?;

    if !cli.quiet {
        println!(
            "{} {}  {}",
            green("✔"),
            bold(&cli.image.display().to_string()),
            dim(&format!("{} Base64 characters", b64.len()))
        );
        println!("{}", preview(&b64, cli.preview));
    }

    if let Some(ref output) = cli.output {
        write_to_file(&b64, output)
            .with_context(|| format!("Failed to write '{}'", output.display()))?;
        if !cli.quiet {
            println!("{} saved to {}", green("✔"), bold(&output.display().to_string()));
        }
    }

    Ok(())
}
