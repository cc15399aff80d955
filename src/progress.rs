//! Progress-callback trait for per-PDF and per-image extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ReportConfigBuilder::progress_callback`] or pass one to
//! [`crate::pipeline::extract::extract_many_with_progress`] to receive events
//! as the batch runs. The library never prints; the binaries turn these
//! events into progress lines or an indicatif bar.
//!
//! # Example
//!
//! ```rust
//! use pdfimg2md::{ExtractionProgressCallback, ReportConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     images: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for CountingCallback {
//!     fn on_image(&self, page: usize, index: usize, extension: &str, bytes: usize) {
//!         self.images.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {page} image {index}: {extension}, {bytes} bytes");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { images: AtomicUsize::new(0) });
//!
//! let config = ReportConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the extractor as it processes a batch of PDFs.
///
/// Events arrive sequentially from the calling thread. All methods have
/// default no-op implementations so callers only override what they care
/// about.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once before the first PDF is opened.
    fn on_batch_start(&self, total_pdfs: usize) {
        let _ = total_pdfs;
    }

    /// Called before a PDF is opened.
    ///
    /// # Arguments
    /// * `pdf_num`    : 1-indexed position in the batch
    /// * `total_pdfs` : batch size
    fn on_pdf_start(&self, path: &Path, pdf_num: usize, total_pdfs: usize) {
        let _ = (path, pdf_num, total_pdfs);
    }

    /// Called once per page that holds at least one image.
    fn on_page(&self, page: usize, image_count: usize) {
        let _ = (page, image_count);
    }

    /// Called for every extracted image.
    ///
    /// # Arguments
    /// * `page`  : 1-indexed page number
    /// * `index` : 1-indexed position within the page
    /// * `bytes` : size of the extracted bytes
    fn on_image(&self, page: usize, index: usize, extension: &str, bytes: usize) {
        let _ = (page, index, extension, bytes);
    }

    /// Called when a PDF finished without a fatal error.
    fn on_pdf_complete(&self, path: &Path, image_count: usize) {
        let _ = (path, image_count);
    }

    /// Called when a PDF failed; the batch continues.
    fn on_pdf_error(&self, path: &Path, error: &str) {
        let _ = (path, error);
    }

    /// Called once after every PDF has been attempted.
    fn on_batch_complete(&self, total_pdfs: usize, total_images: usize) {
        let _ = (total_pdfs, total_images);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ReportConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        pdfs: AtomicUsize,
        images: AtomicUsize,
        errors: AtomicUsize,
        total: AtomicUsize,
    }

    impl ExtractionProgressCallback for TrackingCallback {
        fn on_pdf_start(&self, _path: &Path, _pdf_num: usize, _total: usize) {
            self.pdfs.fetch_add(1, Ordering::SeqCst);
        }

        fn on_image(&self, _page: usize, _index: usize, _ext: &str, _bytes: usize) {
            self.images.fetch_add(1, Ordering::SeqCst);
        }

        fn on_pdf_error(&self, _path: &Path, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total_pdfs: usize, total_images: usize) {
            self.total.store(total_images, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_pdf_start(Path::new("a.pdf"), 1, 2);
        cb.on_page(1, 3);
        cb.on_image(1, 1, "png", 42);
        cb.on_pdf_complete(Path::new("a.pdf"), 3);
        cb.on_pdf_error(Path::new("b.pdf"), "corrupt");
        cb.on_batch_complete(2, 3);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_pdf_start(Path::new("a.pdf"), 1, 2);
        tracker.on_image(1, 1, "jpeg", 10);
        tracker.on_image(2, 1, "png", 20);
        tracker.on_pdf_start(Path::new("b.pdf"), 2, 2);
        tracker.on_pdf_error(Path::new("b.pdf"), "not found");
        tracker.on_batch_complete(2, 2);

        assert_eq!(tracker.pdfs.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.images.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.total.load(Ordering::SeqCst), 2);
    }
}
