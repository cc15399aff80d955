//! Report generation: extraction + Base64 + Markdown in one call.
//!
//! [`generate_with_config`] runs the batch extractor, then writes one
//! section per PDF. Failures are contained at the smallest unit that can
//! fail: a bad PDF becomes a "no images" section with its error, a bad image
//! becomes an inline error note. Only failing to write the report itself is
//! fatal.

use crate::config::ReportConfig;
use crate::error::{ImageError, PdfImgError};
use crate::output::{PdfImages, ReportSummary};
use crate::pipeline::{encode, extract, markdown};
use crate::progress::NoopProgressCallback;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Extract images from `pdf_paths` and write the Markdown report.
///
/// Shorthand for [`generate_with_config`] with only the two paths set.
///
/// # Example
/// ```rust,no_run
/// let summary = pdfimg2md::generate(&["a.pdf", "b.pdf"], "report.md", "images")?;
/// println!("{} images", summary.total_images);
/// # Ok::<(), pdfimg2md::PdfImgError>(())
/// ```
pub fn generate<P: AsRef<Path>>(
    pdf_paths: &[P],
    output_markdown_path: impl AsRef<Path>,
    images_dir: impl AsRef<Path>,
) -> Result<ReportSummary, PdfImgError> {
    let config = ReportConfig::builder()
        .output_path(output_markdown_path.as_ref())
        .images_dir(images_dir.as_ref())
        .build()?;
    generate_with_config(pdf_paths, &config)
}

/// Extract images and write the report as described by `config`.
///
/// # Errors
/// Returns [`PdfImgError::OutputWriteFailed`] if the report file cannot be
/// created or written. Per-PDF and per-image failures are recorded in the
/// report and in the returned [`ReportSummary`] instead.
pub fn generate_with_config<P: AsRef<Path>>(
    pdf_paths: &[P],
    config: &ReportConfig,
) -> Result<ReportSummary, PdfImgError> {
    let progress = config
        .progress_callback
        .as_deref()
        .unwrap_or(&NoopProgressCallback);
    let results = extract::extract_many_with_progress(pdf_paths, Some(config.images_dir.as_path()), progress);

    let write_failed = |source: std::io::Error| PdfImgError::OutputWriteFailed {
        path: config.output_path.clone(),
        source,
    };
    let file = File::create(&config.output_path).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);
    let summary = render_report(&results, config, &mut writer)?;
    writer.flush().map_err(write_failed)?;

    info!(
        "Report written to {} ({} PDFs, {} images)",
        config.output_path.display(),
        summary.pdf_count,
        summary.total_images
    );
    Ok(summary)
}

/// Write the Markdown report for already-extracted `results` to `writer`.
///
/// Images that were saved to disk are encoded from their file, so the
/// Base64 block matches exactly what the link points at; unsaved images are
/// encoded from memory.
pub fn render_report<W: Write>(
    results: &[PdfImages],
    config: &ReportConfig,
    writer: &mut W,
) -> Result<ReportSummary, PdfImgError> {
    let mut summary = ReportSummary {
        pdf_count: results.len(),
        images_dir: config.images_dir.clone(),
        report_path: config.output_path.clone(),
        ..Default::default()
    };

    let mut out = |text: String| {
        writer
            .write_all(text.as_bytes())
            .map_err(|source| PdfImgError::OutputWriteFailed {
                path: config.output_path.clone(),
                source,
            })
    };

    let timestamp = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
    out(markdown::title(&timestamp))?;

    let mut n = 0;
    for pdf in results {
        let name = pdf.file_name();
        if pdf.error.is_some() {
            summary.failed_pdfs += 1;
        }
        if pdf.images.is_empty() {
            out(markdown::no_images(&name, pdf.error.as_deref()))?;
            continue;
        }

        out(markdown::pdf_header(&name, pdf.images.len()))?;
        for img in &pdf.images {
            n += 1;
            summary.total_images += 1;

            let b64 = match &img.saved_path {
                Some(path) => encode::encode_file(path).map_err(|e| ImageError::ReadBack {
                    index: n,
                    path: path.clone(),
                    detail: e.to_string(),
                }),
                None => Ok(encode::encode_bytes(&img.data)),
            };

            let link = markdown::image_link(&config.images_dir, n, &img.extension);
            match b64 {
                Ok(b64) => {
                    let embedded = config.embed_base64.then_some(b64.as_str());
                    out(markdown::image_section(n, &name, img, &link, embedded, b64.len()))?;
                }
                Err(e) => {
                    warn!("{}", e);
                    summary.failed_images += 1;
                    out(markdown::image_error(n, &name, img, &link, &e.to_string()))?;
                }
            }
        }
    }

    out(markdown::summary(&summary))?;
    Ok(summary)
}
