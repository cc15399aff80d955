//! Terminal helpers shared by the binaries (feature `cli`).

use crate::output::display_name;
use crate::progress::ExtractionProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── ANSI colour helpers ──────────────────────────────────────────────────────

pub fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
pub fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
pub fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
pub fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
pub fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

/// Log level for the flags every binary accepts.
///
/// `-v` wins over everything; `-q` or an active progress bar keep the
/// library quiet so it does not tear the terminal output.
pub fn log_level(verbose: bool, quiet: bool, progress_active: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet || progress_active {
        "error"
    } else {
        "warn"
    }
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides `level`.
pub fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

// ── Line-per-event progress (pdfimg) ─────────────────────────────────────────

/// Prints one line per PDF, page and image on stdout.
pub struct LineProgressCallback;

impl ExtractionProgressCallback for LineProgressCallback {
    fn on_pdf_start(&self, path: &Path, pdf_num: usize, total_pdfs: usize) {
        println!(
            "\n{} {}  {}",
            cyan("◆"),
            bold(&path.display().to_string()),
            dim(&format!("({pdf_num}/{total_pdfs})"))
        );
    }

    fn on_page(&self, page: usize, image_count: usize) {
        println!("  Page {page}: {image_count} image(s)");
    }

    fn on_image(&self, _page: usize, index: usize, extension: &str, bytes: usize) {
        println!(
            "    {} image {index}  {}  {}",
            green("✓"),
            extension.to_uppercase(),
            dim(&format!("{bytes} bytes"))
        );
    }

    fn on_pdf_complete(&self, _path: &Path, image_count: usize) {
        println!("  → {image_count} image(s) extracted");
    }

    fn on_pdf_error(&self, _path: &Path, error: &str) {
        println!("  {} {}", red("✗"), red(error.lines().next().unwrap_or(error)));
    }
}

// ── indicatif progress bar (pdfimg2md) ───────────────────────────────────────

/// Progress bar across the PDFs of a batch, with one log line per PDF.
pub struct BarProgressCallback {
    bar: ProgressBar,
    images: AtomicUsize,
    errors: AtomicUsize,
}

impl BarProgressCallback {
    /// Create a callback whose length is set by `on_batch_start`.
    pub fn new_shared() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} PDFs  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        bar.set_style(style);
        bar.set_prefix("Extracting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            images: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        })
    }

    /// Number of images extracted so far.
    pub fn images(&self) -> usize {
        self.images.load(Ordering::SeqCst)
    }

    /// Number of PDFs that failed so far.
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl ExtractionProgressCallback for BarProgressCallback {
    fn on_batch_start(&self, total_pdfs: usize) {
        self.bar.set_length(total_pdfs as u64);
        self.bar.reset_eta();
    }

    fn on_pdf_start(&self, path: &Path, _pdf_num: usize, _total_pdfs: usize) {
        self.bar.set_message(display_name(path));
    }

    fn on_image(&self, _page: usize, _index: usize, _extension: &str, _bytes: usize) {
        self.images.fetch_add(1, Ordering::SeqCst);
    }

    fn on_pdf_complete(&self, path: &Path, image_count: usize) {
        self.bar.println(format!(
            "  {} {:<40}  {}",
            green("✓"),
            display_name(path),
            dim(&format!("{image_count:>4} images")),
        ));
        self.bar.inc(1);
    }

    fn on_pdf_error(&self, path: &Path, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        let first = error.lines().next().unwrap_or(error);
        let msg = if first.chars().count() > 80 {
            format!("{}\u{2026}", first.chars().take(79).collect::<String>())
        } else {
            first.to_string()
        };

        self.bar.println(format!(
            "  {} {:<40}  {}",
            red("✗"),
            display_name(path),
            red(&msg)
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _total_pdfs: usize, _total_images: usize) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_precedence() {
        assert_eq!(log_level(true, true, true), "debug");
        assert_eq!(log_level(false, true, false), "error");
        assert_eq!(log_level(false, false, true), "error");
        assert_eq!(log_level(false, false, false), "warn");
    }

    #[test]
    fn bar_callback_counts_errors() {
        let cb = BarProgressCallback::new_shared();
        cb.bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        cb.on_batch_start(2);
        cb.on_pdf_start(Path::new("a.pdf"), 1, 2);
        cb.on_image(1, 1, "png", 10);
        cb.on_pdf_complete(Path::new("a.pdf"), 1);
        cb.on_pdf_error(Path::new("b.pdf"), "File not found: 'b.pdf'\nCheck the path");
        cb.on_batch_complete(2, 1);
        assert_eq!(cb.errors(), 1);
        assert_eq!(cb.images(), 1);
    }
}
