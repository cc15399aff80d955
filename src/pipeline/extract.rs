//! Image extraction: walk each page's image XObjects via lopdf.
//!
//! ## Which bytes are "the image"?
//!
//! A PDF image XObject is a stream plus a dictionary describing it. When the
//! stream ends in a complete image codec (`DCTDecode`, `JPXDecode`,
//! `JBIG2Decode`) the decoded stream *is* a standalone file and is returned
//! byte-for-byte. Otherwise the stream is a bare pixel array with no file
//! format of its own; the samples are decompressed, unpacked to 8 bits,
//! palette-expanded if needed and wrapped in a PNG so the result can be
//! opened, linked and embedded like any other image.
//!
//! Streams that cannot be turned into either (CCITT fax, Lab or DeviceN
//! colour, truncated samples, ...) still produce a record: the stored stream
//! bytes are kept as they are, under a `ccitt` or `bin` extension, and a
//! warning is logged.
//!
//! ## Which images belong to a page?
//!
//! Every image XObject reachable from the page's resources, including those
//! drawn by form XObjects, in resource-dictionary order. An image object
//! reached twice on the same page is listed once.
//!
//! ## Numbering
//!
//! Records carry a 1-based page number and a 1-based position within the
//! page. Files written to disk use a separate counter that runs across the
//! whole document (`imagen_1`, `imagen_2`, …) and, in batch mode, across
//! every PDF of the batch. The counter is an explicit argument so no state
//! survives between calls.

use crate::error::{ImageError, PdfImgError};
use crate::output::{ExtractedImage, PdfImages};
use crate::progress::{ExtractionProgressCallback, NoopProgressCallback};
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Guard against cyclic `Parent` links and runaway form nesting.
const MAX_NESTING_DEPTH: usize = 32;

/// Extract every embedded image of a PDF, in page-then-in-page order.
///
/// With `output_dir`, the directory is created if needed and each image is
/// written as `imagen_<n>.<ext>`, `n` counting from 1 across the document.
///
/// # Errors
/// * [`PdfImgError::FileNotFound`] if `pdf_path` does not exist
/// * [`PdfImgError::CorruptPdf`] / [`PdfImgError::Encrypted`] if lopdf
///   cannot open the document
/// * [`PdfImgError::OutputWriteFailed`] if the directory or an image file
///   cannot be written
pub fn extract(
    pdf_path: impl AsRef<Path>,
    output_dir: Option<&Path>,
) -> Result<Vec<ExtractedImage>, PdfImgError> {
    extract_from(pdf_path, output_dir, 1)
}

/// Same as [`extract`], with the file counter starting at `first_index`.
pub fn extract_from(
    pdf_path: impl AsRef<Path>,
    output_dir: Option<&Path>,
    first_index: usize,
) -> Result<Vec<ExtractedImage>, PdfImgError> {
    extract_document(pdf_path.as_ref(), output_dir, first_index, &NoopProgressCallback)
}

/// Extract from several PDFs; one failing PDF never stops the batch.
///
/// Results come back in input order. A failed PDF is logged and recorded
/// with an empty image list and its error message.
pub fn extract_many<P: AsRef<Path>>(pdf_paths: &[P], output_dir: Option<&Path>) -> Vec<PdfImages> {
    extract_many_with_progress(pdf_paths, output_dir, &NoopProgressCallback)
}

/// [`extract_many`] with progress events.
pub fn extract_many_with_progress<P: AsRef<Path>>(
    pdf_paths: &[P],
    output_dir: Option<&Path>,
    progress: &dyn ExtractionProgressCallback,
) -> Vec<PdfImages> {
    let total = pdf_paths.len();
    progress.on_batch_start(total);

    let mut next_index = 1;
    let mut results = Vec::with_capacity(total);

    for (i, p) in pdf_paths.iter().enumerate() {
        let path = p.as_ref();
        progress.on_pdf_start(path, i + 1, total);

        match extract_document(path, output_dir, next_index, progress) {
            Ok(images) => {
                next_index += images.len();
                progress.on_pdf_complete(path, images.len());
                results.push(PdfImages {
                    path: path.to_path_buf(),
                    images,
                    error: None,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                let message = e.to_string();
                progress.on_pdf_error(path, &message);
                results.push(PdfImages {
                    path: path.to_path_buf(),
                    images: Vec::new(),
                    error: Some(message),
                });
            }
        }
    }

    let total_images = results.iter().map(|r| r.images.len()).sum();
    progress.on_batch_complete(total, total_images);
    results
}

fn extract_document(
    pdf_path: &Path,
    output_dir: Option<&Path>,
    first_index: usize,
    progress: &dyn ExtractionProgressCallback,
) -> Result<Vec<ExtractedImage>, PdfImgError> {
    if !pdf_path.exists() {
        return Err(PdfImgError::FileNotFound {
            path: pdf_path.to_path_buf(),
        });
    }

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|source| PdfImgError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // Owned here and dropped on every return path below.
    let doc = open_document(pdf_path)?;
    let pages = doc.get_pages();
    info!("Extracting images from {} ({} pages)", pdf_path.display(), pages.len());

    let mut images = Vec::new();
    let mut counter = first_index;

    for (&page_num, &page_id) in pages.iter() {
        let page = page_num as usize;
        let streams = page_image_streams(&doc, page_id);
        if streams.is_empty() {
            continue;
        }
        debug!("Page {}: {} image XObjects", page, streams.len());
        progress.on_page(page, streams.len());

        for (i, stream) in streams.into_iter().enumerate() {
            let index = i + 1;
            let (data, extension) = image_bytes(&doc, stream, page, index);

            let saved_path = match output_dir {
                Some(dir) => {
                    let path = dir.join(ExtractedImage::file_name(counter, extension));
                    std::fs::write(&path, &data).map_err(|source| {
                        PdfImgError::OutputWriteFailed {
                            path: path.clone(),
                            source,
                        }
                    })?;
                    debug!("Saved {}", path.display());
                    Some(path)
                }
                None => None,
            };
            counter += 1;

            progress.on_image(page, index, extension, data.len());
            images.push(ExtractedImage {
                width: dimension(&stream.dict, b"Width"),
                height: dimension(&stream.dict, b"Height"),
                data,
                extension: extension.to_string(),
                page,
                index,
                saved_path,
            });
        }
    }

    info!("Found {} images in {}", images.len(), pdf_path.display());
    Ok(images)
}

fn open_document(path: &Path) -> Result<Document, PdfImgError> {
    let mut doc = Document::load(path).map_err(|source| PdfImgError::CorruptPdf {
        path: path.to_path_buf(),
        source,
    })?;

    if doc.is_encrypted() {
        doc.decrypt("").map_err(|_| PdfImgError::Encrypted {
            path: path.to_path_buf(),
        })?;
        debug!("Decrypted {} with empty password", path.display());
    }

    Ok(doc)
}

/// Resources dictionary of a page node, inherited through `Parent`.
fn page_resources(doc: &Document, node_id: ObjectId, depth: usize) -> Option<&Dictionary> {
    if depth > MAX_NESTING_DEPTH {
        return None;
    }
    let node = doc.get_object(node_id).ok()?.as_dict().ok()?;

    if let Some(resources) = resolve_dict(doc, node, b"Resources") {
        return Some(resources);
    }

    match node.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id, depth + 1),
        _ => None,
    }
}

fn resolve_dict<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    let (_, obj) = doc.dereference(dict.get(key).ok()?).ok()?;
    obj.as_dict().ok()
}

/// Image XObject streams drawn on a page, forms included.
fn page_image_streams(doc: &Document, page_id: ObjectId) -> Vec<&Stream> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    if let Some(resources) = page_resources(doc, page_id, 0) {
        collect_images(doc, resources, &mut seen, &mut found, 0);
    }
    found
}

fn collect_images<'a>(
    doc: &'a Document,
    resources: &'a Dictionary,
    seen: &mut HashSet<ObjectId>,
    found: &mut Vec<&'a Stream>,
    depth: usize,
) {
    if depth > MAX_NESTING_DEPTH {
        return;
    }
    let Some(xobjects) = resolve_dict(doc, resources, b"XObject") else {
        return;
    };

    for (_, entry) in xobjects.iter() {
        let Ok((id, Object::Stream(stream))) = doc.dereference(entry) else {
            continue;
        };
        if let Some(id) = id {
            if !seen.insert(id) {
                continue;
            }
        }
        match subtype(stream) {
            Some(b"Image") => found.push(stream),
            Some(b"Form") => {
                if let Some(inner) = resolve_dict(doc, &stream.dict, b"Resources") {
                    collect_images(doc, inner, seen, found, depth + 1);
                }
            }
            _ => {}
        }
    }
}

fn subtype(stream: &Stream) -> Option<&[u8]> {
    stream.dict.get(b"Subtype").and_then(Object::as_name).ok()
}

fn dimension(dict: &Dictionary, key: &[u8]) -> u32 {
    dict.get(key)
        .and_then(Object::as_i64)
        .ok()
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

fn stream_filters(doc: &Document, dict: &Dictionary) -> Vec<Vec<u8>> {
    let Ok(filter) = dict.get(b"Filter") else {
        return Vec::new();
    };
    match doc.dereference(filter) {
        Ok((_, Object::Name(name))) => vec![name.clone()],
        Ok((_, Object::Array(arr))) => arr
            .iter()
            .filter_map(|o| o.as_name().ok().map(<[u8]>::to_vec))
            .collect(),
        _ => Vec::new(),
    }
}

fn filter_names(filters: &[Vec<u8>]) -> String {
    filters
        .iter()
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extension for a filter whose output is a complete image file.
fn codec_extension(filter: &[u8]) -> Option<&'static str> {
    match filter {
        b"DCTDecode" => Some("jpeg"),
        b"JPXDecode" => Some("jpx"),
        b"JBIG2Decode" => Some("jb2"),
        _ => None,
    }
}

/// Filters lopdf can undo.
fn is_transport(filter: &[u8]) -> bool {
    matches!(filter, b"FlateDecode" | b"LZWDecode" | b"ASCII85Decode")
}

/// File bytes and extension for one image stream. Never drops the image.
fn image_bytes(doc: &Document, stream: &Stream, page: usize, index: usize) -> (Vec<u8>, &'static str) {
    match decode_image(doc, stream) {
        Ok(found) => found,
        Err(detail) => {
            warn!("{}", ImageError::Unsupported { page, index, detail });
            let extension = match stream_filters(doc, &stream.dict).as_slice() {
                [f] if f == b"CCITTFaxDecode" => "ccitt",
                _ => "bin",
            };
            (stream.content.clone(), extension)
        }
    }
}

fn decode_image(doc: &Document, stream: &Stream) -> Result<(Vec<u8>, &'static str), String> {
    let filters = stream_filters(doc, &stream.dict);

    if let Some((last, transport)) = filters.split_last() {
        if let Some(extension) = codec_extension(last) {
            if transport.is_empty() {
                return Ok((stream.content.clone(), extension));
            }
            if !transport.iter().all(|f| is_transport(f)) {
                return Err(format!("filters {}", filter_names(&filters)));
            }
            // Undo the transport filters only; the codec output is the file.
            let mut outer = stream.clone();
            outer.dict.set(
                "Filter",
                Object::Array(transport.iter().map(|f| Object::Name(f.clone())).collect()),
            );
            let data = outer
                .decompressed_content()
                .map_err(|e| format!("decompression failed: {e}"))?;
            return Ok((data, extension));
        }
    }

    if !filters.iter().all(|f| is_transport(f)) {
        return Err(format!("filters {}", filter_names(&filters)));
    }
    let samples = if filters.is_empty() {
        stream.content.clone()
    } else {
        stream
            .decompressed_content()
            .map_err(|e| format!("decompression failed: {e}"))?
    };

    Ok((samples_to_png(doc, &stream.dict, &samples)?, "png"))
}

/// Colour families that map onto PNG pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Gray,
    Rgb,
    Cmyk,
}

impl Family {
    fn components(self) -> usize {
        match self {
            Family::Gray => 1,
            Family::Rgb => 3,
            Family::Cmyk => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ColorSpace {
    Direct(Family),
    Indexed { base: Family, palette: Vec<u8> },
}

fn color_space(doc: &Document, obj: &Object) -> Option<ColorSpace> {
    let (_, obj) = doc.dereference(obj).ok()?;
    if let Object::Array(arr) = obj {
        if matches!(arr.first()?.as_name().ok()?, b"Indexed" | b"I") {
            let base = family(doc, arr.get(1)?)?;
            let palette = match doc.dereference(arr.get(3)?).ok()?.1 {
                Object::String(bytes, _) => bytes.clone(),
                Object::Stream(s) => s.get_plain_content().ok()?,
                _ => return None,
            };
            return Some(ColorSpace::Indexed { base, palette });
        }
    }
    family(doc, obj).map(ColorSpace::Direct)
}

fn family(doc: &Document, obj: &Object) -> Option<Family> {
    let (_, obj) = doc.dereference(obj).ok()?;
    match obj {
        Object::Name(name) => family_by_name(name),
        Object::Array(arr) => {
            let name = arr.first()?.as_name().ok()?;
            if name != b"ICCBased" {
                return family_by_name(name);
            }
            let (_, profile) = doc.dereference(arr.get(1)?).ok()?;
            let profile = profile.as_stream().ok()?;
            match profile.dict.get(b"N").and_then(Object::as_i64) {
                Ok(1) => Some(Family::Gray),
                Ok(3) => Some(Family::Rgb),
                Ok(4) => Some(Family::Cmyk),
                _ => family(doc, profile.dict.get(b"Alternate").ok()?),
            }
        }
        _ => None,
    }
}

fn family_by_name(name: &[u8]) -> Option<Family> {
    match name {
        b"DeviceGray" | b"G" | b"CalGray" => Some(Family::Gray),
        b"DeviceRGB" | b"RGB" | b"CalRGB" => Some(Family::Rgb),
        b"DeviceCMYK" | b"CMYK" => Some(Family::Cmyk),
        _ => None,
    }
}

/// Decode `samples` as described by the image dictionary and encode a PNG.
fn samples_to_png(doc: &Document, dict: &Dictionary, samples: &[u8]) -> Result<Vec<u8>, String> {
    let width = dimension(dict, b"Width");
    let height = dimension(dict, b"Height");
    if width == 0 || height == 0 {
        return Err(format!("image size {width}x{height}"));
    }

    let is_mask = dict
        .get(b"ImageMask")
        .and_then(Object::as_bool)
        .unwrap_or(false);
    let space = if is_mask {
        ColorSpace::Direct(Family::Gray)
    } else {
        let cs = dict
            .get(b"ColorSpace")
            .map_err(|_| "no colour space".to_string())?;
        color_space(doc, cs).ok_or_else(|| "unsupported colour space".to_string())?
    };
    let bits = match dict.get(b"BitsPerComponent").and_then(Object::as_i64) {
        _ if is_mask => 1,
        Ok(b @ (1 | 2 | 4 | 8 | 16)) => b as u8,
        Ok(b) => return Err(format!("{b} bits per component")),
        Err(_) => 8,
    };

    let img = match space {
        ColorSpace::Direct(family) => {
            let mut pixels = unpack_samples(samples, width, height, family.components(), bits, true)?;
            if family == Family::Gray && decode_inverted(dict) {
                pixels.iter_mut().for_each(|v| *v = 255 - *v);
            }
            to_image(family, width, height, pixels)?
        }
        ColorSpace::Indexed { base, palette } => {
            let indices = unpack_samples(samples, width, height, 1, bits, false)?;
            to_image(base, width, height, expand_palette(&indices, &palette, base.components()))?
        }
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| format!("PNG encoding failed: {e}"))?;
    Ok(buf)
}

/// `true` for a `/Decode [1 0]` array on a one-component image.
fn decode_inverted(dict: &Dictionary) -> bool {
    let Ok(decode) = dict.get(b"Decode").and_then(Object::as_array) else {
        return false;
    };
    match (decode.first().map(Object::as_float), decode.get(1).map(Object::as_float)) {
        (Some(Ok(lo)), Some(Ok(hi))) => lo > hi,
        _ => false,
    }
}

/// Unpack rows of `bits`-wide samples into one byte per sample.
///
/// With `scale`, values are stretched to 0..=255 (16-bit keeps the high
/// byte); without, they are kept as palette indices.
fn unpack_samples(
    data: &[u8],
    width: u32,
    height: u32,
    components: usize,
    bits: u8,
    scale: bool,
) -> Result<Vec<u8>, String> {
    let too_large = || format!("image size {width}x{height}x{components} is too large");
    let per_row = (width as usize)
        .checked_mul(components)
        .ok_or_else(too_large)?;
    let row_bytes = per_row
        .checked_mul(bits as usize)
        .ok_or_else(too_large)?
        .div_ceil(8);
    let needed = row_bytes
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    if row_bytes == 0 || data.len() < needed {
        return Err(format!("{} bytes of samples, {} expected", data.len(), needed));
    }

    let mut out = Vec::with_capacity(per_row * height as usize);
    for row in data[..needed].chunks_exact(row_bytes) {
        match bits {
            8 => out.extend_from_slice(&row[..per_row]),
            16 => out.extend(row.chunks_exact(2).map(|pair| pair[0])),
            _ => {
                let bits = bits as usize;
                let max = (1u8 << bits) - 1;
                for s in 0..per_row {
                    let offset = s * bits;
                    let v = (row[offset / 8] >> (8 - bits - offset % 8)) & max;
                    out.push(if scale { (v as u16 * 255 / max as u16) as u8 } else { v });
                }
            }
        }
    }
    Ok(out)
}

fn expand_palette(indices: &[u8], palette: &[u8], components: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len() * components);
    for &i in indices {
        let start = i as usize * components;
        match palette.get(start..start + components) {
            Some(entry) => out.extend_from_slice(entry),
            // Out-of-range indices render black.
            None => out.resize(out.len() + components, 0),
        }
    }
    out
}

fn to_image(family: Family, width: u32, height: u32, pixels: Vec<u8>) -> Result<DynamicImage, String> {
    let img = match family {
        Family::Gray => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        Family::Rgb => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        Family::Cmyk => {
            RgbImage::from_raw(width, height, cmyk_to_rgb(&pixels)).map(DynamicImage::ImageRgb8)
        }
    };
    img.ok_or_else(|| "sample buffer does not match dimensions".to_string())
}

fn cmyk_to_rgb(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - px[3] as u16;
            [0, 1, 2].map(|i| ((255 - px[i] as u16) * k / 255) as u8)
        })
        .collect()
}
