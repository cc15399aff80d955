//! Builds small PDFs on disk with lopdf for the integration tests.

#![allow(dead_code)]

use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::Path;

/// An image XObject to place on a page.
pub struct TestImage {
    pub filter: Option<&'static str>,
    pub color_space: &'static str,
    pub width: i64,
    pub height: i64,
    pub bits: i64,
    pub content: Vec<u8>,
}

impl TestImage {
    /// A JPEG-filtered stream; the bytes are copied out unchanged.
    pub fn jpeg(content: Vec<u8>) -> Self {
        Self {
            filter: Some("DCTDecode"),
            color_space: "DeviceRGB",
            width: 1,
            height: 1,
            bits: 8,
            content,
        }
    }

    /// A CCITT fax stream, which has no standard file form.
    pub fn ccitt(width: i64, height: i64, content: Vec<u8>) -> Self {
        Self {
            filter: Some("CCITTFaxDecode"),
            color_space: "DeviceGray",
            width,
            height,
            bits: 1,
            content,
        }
    }

    /// Unfiltered 8-bit grey samples.
    pub fn gray(width: i64, height: i64, content: Vec<u8>) -> Self {
        Self::gray_bits(width, height, 8, content)
    }

    /// Unfiltered grey samples packed at `bits` per pixel.
    pub fn gray_bits(width: i64, height: i64, bits: i64, content: Vec<u8>) -> Self {
        Self {
            filter: None,
            color_space: "DeviceGray",
            width,
            height,
            bits,
            content,
        }
    }
}

/// Write a PDF with one page per entry of `pages`.
///
/// Pages without images still get an (empty) resources dictionary.
pub fn write_pdf(path: &Path, pages: Vec<Vec<TestImage>>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    for images in pages {
        let mut xobjects = Dictionary::new();
        let mut ops = String::new();
        for (i, img) in images.into_iter().enumerate() {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => img.width,
                "Height" => img.height,
                "ColorSpace" => img.color_space,
                "BitsPerComponent" => img.bits,
            };
            if let Some(f) = img.filter {
                dict.set("Filter", Object::Name(f.as_bytes().to_vec()));
            }
            let id = doc.add_object(Stream::new(dict, img.content));
            let name = format!("Im{}", i + 1);
            ops.push_str(&format!("q 50 0 0 50 0 {} cm /{} Do Q\n", i * 50, name));
            xobjects.set(name, id);
        }

        let content_id = doc.add_object(Stream::new(Dictionary::new(), ops.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => xobjects },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save test PDF");
}

/// A 10-byte stand-in for a JPEG file, distinct per `seed`.
pub fn jpeg_bytes(seed: u8) -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, seed, seed, seed, seed, 0xFF, 0xD9]
}
