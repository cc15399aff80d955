//! Value types produced by extraction and report generation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One raster image pulled out of a PDF page.
///
/// Plain data, created by the extractor and never mutated afterwards. The
/// raw bytes are skipped when serialising; JSON output carries metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// File bytes of the image (JPEG/JPX/JBIG2 stream or PNG container).
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Lower-case file extension: `jpeg`, `png`, `jpx`, `jb2`, or `ccitt`/`bin` for streams kept raw.
    pub extension: String,
    /// 1-indexed page number the image was found on.
    pub page: usize,
    /// 1-indexed position of the image within its page.
    pub index: usize,
    /// Width in pixels as declared by the image dictionary (0 if absent).
    pub width: u32,
    /// Height in pixels as declared by the image dictionary (0 if absent).
    pub height: u32,
    /// Where the bytes were written, when an output directory was given.
    pub saved_path: Option<PathBuf>,
}

impl ExtractedImage {
    /// Size of the raw bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// File name used on disk for the `n`-th image of a run.
    pub fn file_name(n: usize, extension: &str) -> String {
        format!("imagen_{n}.{extension}")
    }
}

/// Extraction result for one PDF of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfImages {
    /// Input path as given by the caller.
    pub path: PathBuf,
    /// Images in page-then-in-page order. Empty when `error` is set.
    pub images: Vec<ExtractedImage>,
    /// Why extraction of this PDF failed, if it did.
    pub error: Option<String>,
}

impl PdfImages {
    /// File name component of `path`, for display.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Totals returned by [`crate::report::generate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    /// Number of PDFs processed (including failed ones).
    pub pdf_count: usize,
    /// Total images found across all PDFs.
    pub total_images: usize,
    /// Images rendered as an inline error instead of a Base64 block.
    pub failed_images: usize,
    /// PDFs whose extraction failed entirely.
    pub failed_pdfs: usize,
    /// Directory the image files were written to.
    pub images_dir: PathBuf,
    /// Path of the written Markdown report.
    pub report_path: PathBuf,
}

impl ReportSummary {
    /// `true` when at least one image was found.
    pub fn has_images(&self) -> bool {
        self.total_images > 0
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_format() {
        assert_eq!(ExtractedImage::file_name(1, "png"), "imagen_1.png");
        assert_eq!(ExtractedImage::file_name(12, "jpeg"), "imagen_12.jpeg");
    }

    #[test]
    fn json_skips_raw_bytes() {
        let img = ExtractedImage {
            data: vec![1, 2, 3],
            extension: "jpeg".into(),
            page: 1,
            index: 2,
            width: 4,
            height: 5,
            saved_path: None,
        };
        let json = serde_json::to_string(&img).unwrap();
        assert!(!json.contains("data"), "got: {json}");
        assert!(json.contains("\"extension\":\"jpeg\""));
    }

    #[test]
    fn pdf_images_file_name() {
        let r = PdfImages {
            path: PathBuf::from("/tmp/docs/report.pdf"),
            images: vec![],
            error: None,
        };
        assert_eq!(r.file_name(), "report.pdf");
    }
}
