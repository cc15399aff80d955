//! Input validation: check user-supplied paths before any PDF is opened.
//!
//! The report CLI rejects bad inputs one by one and carries on with the
//! rest, so validation returns a typed error per path instead of failing
//! the whole batch. The `%PDF-` header check gives callers a meaningful error
//! rather than a parser failure deep inside lopdf. Like PDF readers, it
//! accepts a header preceded by junk within the first kilobyte.

use crate::error::PdfImgError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How far into the file the `%PDF-` header may start.
const HEADER_SEARCH_LEN: u64 = 1024;

/// `true` if the path ends in `.pdf` (any case).
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Validate a local PDF path: extension, existence, readability, magic bytes.
pub fn validate_pdf_path(path: impl AsRef<Path>) -> Result<PathBuf, PdfImgError> {
    let path = path.as_ref().to_path_buf();

    if !has_pdf_extension(&path) {
        return Err(PdfImgError::InvalidInput {
            path,
            reason: "expected a file ending in .pdf".into(),
        });
    }

    if !path.exists() {
        return Err(PdfImgError::FileNotFound { path });
    }

    if path.is_dir() {
        return Err(PdfImgError::InvalidInput {
            path,
            reason: "is a directory".into(),
        });
    }

    let mut head = Vec::new();
    std::fs::File::open(&path)
        .and_then(|f| f.take(HEADER_SEARCH_LEN).read_to_end(&mut head))
        .map_err(|e| PdfImgError::from_read(&path, e))?;

    if !head.windows(5).any(|w| w == b"%PDF-") {
        head.truncate(4);
        return Err(PdfImgError::NotAPdf { path, magic: head });
    }

    debug!("Validated PDF input: {}", path.display());
    Ok(path)
}

/// Split inputs into valid PDF paths and rejected ones (with the reason),
/// preserving input order on both sides.
pub fn partition_inputs<P: AsRef<Path>>(
    paths: &[P],
) -> (Vec<PathBuf>, Vec<(PathBuf, PdfImgError)>) {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for p in paths {
        match validate_pdf_path(p) {
            Ok(path) => valid.push(path),
            Err(e) => rejected.push((p.as_ref().to_path_buf(), e)),
        }
    }
    (valid, rejected)
}
