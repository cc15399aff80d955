//! Markdown builders for the image report.
//!
//! Every function returns a self-contained block ending in a blank line so
//! the report is assembled by plain concatenation. Nothing here touches the
//! file system.

use crate::output::{ExtractedImage, ReportSummary};
use std::path::Path;

/// Marker written in the summary when at least one image was found.
pub const SUCCESS_MARKER: &str = "✅";

/// Marker written in the summary when no image was found at all.
pub const WARNING_MARKER: &str = "⚠️";

/// Report title and generation timestamp.
pub fn title(timestamp: &str) -> String {
    format!("# PDF Image Extraction Report\n\n**Generated:** {timestamp}\n\n---\n\n")
}

/// Section header for a PDF that yielded images.
pub fn pdf_header(file_name: &str, image_count: usize) -> String {
    format!("## 📄 {file_name}\n\n**Images found:** {image_count}\n\n")
}

/// Section for a PDF with no images, optionally explaining why.
pub fn no_images(file_name: &str, error: Option<&str>) -> String {
    let mut out = format!("## 📄 {file_name}\n\n_No images were found in this PDF._\n\n");
    if let Some(err) = error {
        out.push_str(&format!("> {WARNING_MARKER} Extraction failed: {}\n\n", one_line(err)));
    }
    out
}

/// Relative link target for the `n`-th image of the run.
pub fn image_link(images_dir: &Path, n: usize, extension: &str) -> String {
    let dir = images_dir.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_end_matches('/');
    let name = ExtractedImage::file_name(n, extension);
    if dir.is_empty() {
        name
    } else {
        format!("{dir}/{name}")
    }
}

/// Metadata list shared by the success and error forms.
fn image_heading(n: usize, source: &str, img: &ExtractedImage, link: &str) -> String {
    let mut out = format!(
        "### Image {n}\n\n\
         - **Source:** {source}\n\
         - **Page:** {}\n\
         - **Image on page:** {}\n\
         - **Format:** {}\n",
        img.page,
        img.index,
        img.extension.to_uppercase(),
    );
    if img.width > 0 && img.height > 0 {
        out.push_str(&format!("- **Dimensions:** {} × {} px\n", img.width, img.height));
    }
    out.push_str(&format!("- **Saved file:** `{link}`\n\n"));
    out
}

/// Full subsection for one image. The embed's alt text is the file name.
///
/// `base64` is `None` when embedding is disabled; the sizes are still listed.
pub fn image_section(
    n: usize,
    source: &str,
    img: &ExtractedImage,
    link: &str,
    base64: Option<&str>,
    base64_len: usize,
) -> String {
    let mut out = image_heading(n, source, img, link);
    let alt = link.rsplit('/').next().unwrap_or(link);
    out.push_str(&format!("![{alt}]({link})\n\n"));
    if let Some(b64) = base64 {
        out.push_str("**Base64:**\n\n```base64\n");
        out.push_str(b64);
        out.push_str("\n```\n\n");
    }
    out.push_str(&format!(
        "- **Size:** {} bytes\n- **Base64 length:** {} characters\n\n",
        img.byte_len(),
        base64_len
    ));
    out
}

/// Subsection for an image whose encoding failed.
pub fn image_error(n: usize, source: &str, img: &ExtractedImage, link: &str, error: &str) -> String {
    let mut out = image_heading(n, source, img, link);
    out.push_str(&format!("> ❌ Error processing this image: {}\n\n", one_line(error)));
    out
}

/// Closing summary section.
pub fn summary(s: &ReportSummary) -> String {
    let mut out = format!(
        "---\n\n## Summary\n\n\
         - **PDFs processed:** {}\n\
         - **Total images:** {}\n\
         - **Images directory:** `{}`\n\
         - **Report file:** `{}`\n",
        s.pdf_count,
        s.total_images,
        s.images_dir.display(),
        s.report_path.display(),
    );
    if s.failed_pdfs > 0 {
        out.push_str(&format!("- **PDFs that failed:** {}\n", s.failed_pdfs));
    }
    if s.failed_images > 0 {
        out.push_str(&format!("- **Images that failed:** {}\n", s.failed_images));
    }
    out.push('\n');
    if s.has_images() {
        out.push_str(&format!("{SUCCESS_MARKER} Extraction completed successfully.\n"));
    } else {
        out.push_str(&format!("{WARNING_MARKER} No images were found in the processed PDFs.\n"));
    }
    out
}

/// Error messages may span lines; keep them inside one blockquote line.
fn one_line(s: &str) -> String {
    s.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample() -> ExtractedImage {
        ExtractedImage {
            data: vec![0; 10],
            extension: "jpeg".into(),
            page: 3,
            index: 1,
            width: 2,
            height: 1,
            saved_path: None,
        }
    }

    #[test]
    fn link_uses_forward_slashes() {
        assert_eq!(
            image_link(Path::new("imagenes_extraidas"), 4, "png"),
            "imagenes_extraidas/imagen_4.png"
        );
        assert_eq!(image_link(Path::new("out/"), 1, "jpeg"), "out/imagen_1.jpeg");
        assert_eq!(image_link(Path::new(""), 1, "jpeg"), "imagen_1.jpeg");
    }

    #[test]
    fn image_section_contents() {
        let md = image_section(7, "doc.pdf", &sample(), "imgs/imagen_7.jpeg", Some("AAAA"), 4);
        assert!(md.starts_with("### Image 7\n"));
        assert!(md.contains("- **Source:** doc.pdf\n"));
        assert!(md.contains("- **Page:** 3\n"));
        assert!(md.contains("- **Image on page:** 1\n"));
        assert!(md.contains("- **Format:** JPEG\n"));
        assert!(md.contains("- **Dimensions:** 2 × 1 px\n"));
        assert!(md.contains("- **Saved file:** `imgs/imagen_7.jpeg`\n"));
        assert!(md.contains("![imagen_7.jpeg](imgs/imagen_7.jpeg)"));
        assert!(md.contains("```base64\nAAAA\n```"));
        assert!(md.contains("- **Size:** 10 bytes\n"));
        assert!(md.contains("- **Base64 length:** 4 characters\n"));
    }

    #[test]
    fn image_section_without_base64() {
        let md = image_section(1, "doc.pdf", &sample(), "imagen_1.jpeg", None, 16);
        assert!(!md.contains("```"));
        assert!(md.contains("- **Base64 length:** 16 characters"));
    }

    #[test]
    fn error_note_is_single_line() {
        let md = image_error(2, "doc.pdf", &sample(), "imagen_2.jpeg", "first\nsecond");
        assert!(md.contains("- **Saved file:** `imagen_2.jpeg`\n"));
        assert!(md.contains("> ❌ Error processing this image: first second\n"));
        assert!(!md.contains("```"));
    }

    #[test]
    fn no_images_with_error() {
        let md = no_images("bad.pdf", Some("File not found: 'bad.pdf'\nCheck the path"));
        assert_eq!(
            md,
            "## 📄 bad.pdf\n\n_No images were found in this PDF._\n\n\
             > ⚠️ Extraction failed: File not found: 'bad.pdf' Check the path\n\n"
        );
    }

    #[test]
    fn summary_markers() {
        let mut s = ReportSummary {
            pdf_count: 2,
            total_images: 0,
            images_dir: PathBuf::from("imgs"),
            report_path: PathBuf::from("r.md"),
            ..Default::default()
        };
        let md = summary(&s);
        assert!(md.contains(WARNING_MARKER));
        assert!(!md.contains(SUCCESS_MARKER));
        assert!(md.contains("- **PDFs processed:** 2\n"));

        s.total_images = 3;
        let md = summary(&s);
        assert!(md.contains(SUCCESS_MARKER));
        assert!(md.contains("- **Total images:** 3\n"));
    }
}
