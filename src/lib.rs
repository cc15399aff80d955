//! # pdfimg2md
//!
//! Extract embedded images from PDF files, encode them as Base64 and write
//! a Markdown report that shows both.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF paths
//!  │
//!  ├─ 1. Input    validate paths (.pdf, exists, %PDF- header)
//!  ├─ 2. Extract  walk page image XObjects via lopdf, save imagen_<n>.<ext>
//!  ├─ 3. Encode   image bytes → standard Base64
//!  └─ 4. Report   Markdown: per-PDF sections, per-image metadata + Base64
//! ```
//!
//! Everything is synchronous and sequential. One PDF failing never stops a
//! batch; one image failing never stops a report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfimg2md::{extract, generate};
//! use std::path::Path;
//!
//! // Images only
//! let images = extract("document.pdf", Some(Path::new("images")))?;
//! for img in &images {
//!     println!("page {} #{}: {} ({} bytes)", img.page, img.index, img.extension, img.byte_len());
//! }
//!
//! // Full report
//! let summary = generate(&["a.pdf", "b.pdf"], "report.md", "images")?;
//! eprintln!("{} images from {} PDFs", summary.total_images, summary.pdf_count);
//! # Ok::<(), pdfimg2md::PdfImgError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `img2b64`, `pdfimg` and `pdfimg2md` binaries (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdfimg2md = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ReportConfig, ReportConfigBuilder, DEFAULT_IMAGES_DIR, DEFAULT_REPORT_PATH};
pub use error::{ImageError, PdfImgError};
pub use output::{ExtractedImage, PdfImages, ReportSummary};
pub use pipeline::encode::{encode_bytes, encode_file, write_to_file};
pub use pipeline::extract::{extract, extract_from, extract_many, extract_many_with_progress};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{generate, generate_with_config, render_report};
