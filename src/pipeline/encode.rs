//! Base64 codec: bytes or files → standard Base64 text.
//!
//! Uses the RFC 4648 standard alphabet with `=` padding, the same engine
//! that data-URIs and most Markdown viewers expect.

use crate::error::PdfImgError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::debug;

/// Encode a byte slice. Pure and infallible; the empty slice encodes to "".
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read a whole file and encode its content.
///
/// # Errors
/// * [`PdfImgError::FileNotFound`] if `path` does not exist (nothing is
///   created or touched)
/// * [`PdfImgError::Io`] / [`PdfImgError::PermissionDenied`] on read failure
pub fn encode_file(path: impl AsRef<Path>) -> Result<String, PdfImgError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PdfImgError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| PdfImgError::from_read(path, e))?;
    let b64 = encode_bytes(&bytes);
    debug!(
        "Encoded {} ({} bytes) → {} chars base64",
        path.display(),
        bytes.len(),
        b64.len()
    );
    Ok(b64)
}

/// Overwrite `path` with `text` as UTF-8. Not atomic.
pub fn write_to_file(text: &str, path: impl AsRef<Path>) -> Result<(), PdfImgError> {
    let path = path.as_ref();
    std::fs::write(path, text.as_bytes()).map_err(|source| PdfImgError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} chars base64 to {}", text.len(), path.display());
    Ok(())
}

/// Decode standard Base64 text back to bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, PdfImgError> {
    Ok(STANDARD.decode(text.trim())?)
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
