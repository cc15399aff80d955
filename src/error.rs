//! Error types for the pdfimg2md library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PdfImgError`]: **Fatal** for the operation that returned it. The
//!   file does not exist, the PDF cannot be parsed, the report cannot be
//!   written. Batch operations catch it per PDF and keep going.
//!
//! * [`ImageError`]: **Non-fatal**. A single image could not be extracted
//!   or encoded. It is logged and rendered inline in the report rather than
//!   losing the whole document to one bad image.
//!
//! Only one variant, [`PdfImgError::FileNotFound`], means "the path is not
//! there"; every other variant is a processing failure that carries its
//! underlying cause.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfimg2md library.
#[derive(Debug, Error)]
pub enum PdfImgError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input path was rejected before any processing (e.g. not `.pdf`).
    #[error("Invalid input '{path}': {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    /// The file exists and was read, but no `%PDF-` header was found.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// lopdf could not parse the document.
    #[error("PDF '{path}' is corrupt or unsupported: {source}")]
    CorruptPdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// PDF is encrypted and the empty user password did not open it.
    #[error("PDF '{path}' is encrypted and cannot be opened without a password")]
    Encrypted { path: PathBuf },

    // ── Processing errors ─────────────────────────────────────────────────
    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text handed to the decoder is not valid standard Base64.
    #[error("Invalid Base64 input: {source}")]
    InvalidBase64 {
        #[from]
        source: base64::DecodeError,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write an output file (report or Base64 dump).
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PdfImgError {
    /// `true` for the "path does not exist" kind; everything else is a
    /// processing error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PdfImgError::FileNotFound { .. })
    }

    /// Map an `io::Error` raised while reading `path`, keeping `NotFound`
    /// as its own kind.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => PdfImgError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => PdfImgError::PermissionDenied { path },
            _ => PdfImgError::Io { path, source },
        }
    }
}

/// A non-fatal error for a single image.
///
/// Logged and rendered into the report; the surrounding PDF and batch
/// carry on.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ImageError {
    /// The image uses a filter or colour space that cannot be turned into a
    /// standard file; its stored stream bytes are kept instead.
    #[error("Page {page}, image {index}: cannot convert to a standard image format ({detail}); raw stream kept")]
    Unsupported {
        page: usize,
        index: usize,
        detail: String,
    },

    /// The saved image file could not be read back for Base64 encoding.
    #[error("Image {index}: could not read '{path}' for encoding: {detail}")]
    ReadBack {
        index: usize,
        path: PathBuf,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let e = PdfImgError::FileNotFound {
            path: "missing.pdf".into(),
        };
        assert!(e.is_not_found());
        assert!(e.to_string().contains("missing.pdf"));
    }

    #[test]
    fn from_read_keeps_not_found_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(PdfImgError::from_read("a.png", io).is_not_found());

        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad");
        let e = PdfImgError::from_read("a.png", io);
        assert!(!e.is_not_found());
        assert!(matches!(e, PdfImgError::Io { .. }));
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;
        let e = PdfImgError::OutputWriteFailed {
            path: "out.md".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("disk full"));
    }

    #[test]
    fn unsupported_image_display() {
        let e = ImageError::Unsupported {
            page: 2,
            index: 3,
            detail: "CCITTFaxDecode".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Page 2"), "got: {msg}");
        assert!(msg.contains("CCITTFaxDecode"), "got: {msg}");
    }
}
