//! Configuration for report generation.
//!
//! All report behaviour is controlled through [`ReportConfig`], built via
//! its [`ReportConfigBuilder`]. Defaults match the CLI defaults so library
//! and binary produce the same files.

use crate::error::PdfImgError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default directory for extracted image files.
pub const DEFAULT_IMAGES_DIR: &str = "imagenes_extraidas";

/// Default path of the Markdown report.
pub const DEFAULT_REPORT_PATH: &str = "reporte_imagenes.md";

/// Configuration for [`crate::report::generate_with_config`].
///
/// # Example
/// ```rust
/// use pdfimg2md::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .output_path("out/report.md")
///     .images_dir("out/images")
///     .build()
///     .unwrap();
/// assert!(config.embed_base64);
/// ```
#[derive(Clone)]
pub struct ReportConfig {
    /// Markdown file to create (overwritten). Default: `reporte_imagenes.md`.
    pub output_path: PathBuf,

    /// Directory extracted images are written to and linked from.
    /// Default: `imagenes_extraidas`.
    pub images_dir: PathBuf,

    /// Write the fenced Base64 block for each image. Default: true.
    ///
    /// Turning it off keeps the metadata and image links, which makes the
    /// report readable for documents with large images.
    pub embed_base64: bool,

    /// Receives per-PDF and per-image events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_REPORT_PATH),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            embed_base64: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("output_path", &self.output_path)
            .field("images_dir", &self.images_dir)
            .field("embed_base64", &self.embed_base64)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ReportConfig {
    /// Create a new builder for `ReportConfig`.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.images_dir = dir.into();
        self
    }

    pub fn embed_base64(mut self, v: bool) -> Self {
        self.config.embed_base64 = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReportConfig, PdfImgError> {
        let c = &self.config;
        if c.output_path.as_os_str().is_empty() {
            return Err(PdfImgError::InvalidConfig(
                "report output path must not be empty".into(),
            ));
        }
        if c.output_path.is_dir() {
            return Err(PdfImgError::InvalidConfig(format!(
                "report output path '{}' is a directory",
                c.output_path.display()
            )));
        }
        if c.images_dir.as_os_str().is_empty() {
            return Err(PdfImgError::InvalidConfig(
                "images directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
