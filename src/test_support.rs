//! Shared fixtures for unit tests: generated documents and a fake
//! renderer, so no binary test assets are needed.

use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::codec::{PageRenderer, PixelMap};
use crate::error::StrategyError;
use crate::model::SourceDocument;
use crate::pdf::{self, DocumentBuilder};

/// Deterministic byte noise; essentially incompressible.
pub(crate) fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        data.push((state >> 24) as u8);
    }
    data
}

/// A document of letter-sized pages, each padded with a noise image of
/// roughly `noise_bytes`, so lossy strategies have something to win
/// against.
pub(crate) fn bloated_document(name: &str, pages: usize, noise_bytes: usize) -> SourceDocument {
    let mut builder = DocumentBuilder::new();
    for number in 1..=pages {
        builder
            .add_placeholder_page(612.0, 792.0, &[format!("Page {}", number)])
            .unwrap();
    }
    let mut doc = builder.finish().unwrap();

    let side = (((noise_bytes / 3) as f64).sqrt() as u32).max(8);
    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    for page_id in page_ids {
        let data = noise((side * side * 3) as usize);
        let length = data.len() as i64;
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => side as i64,
                "Height" => side as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Length" => length,
            },
            data,
        ));
        attach_image(&mut doc, page_id, image_id);
    }

    let bytes = pdf::serialize(&mut doc).unwrap();
    SourceDocument::new(name, bytes)
}

/// A small document with no images at all.
pub(crate) fn text_only_document(name: &str, pages: usize) -> SourceDocument {
    let mut builder = DocumentBuilder::new();
    for number in 1..=pages {
        builder
            .add_placeholder_page(400.0, 600.0, &[format!("Page {}", number)])
            .unwrap();
    }
    let mut doc = builder.finish().unwrap();
    let bytes = pdf::serialize(&mut doc).unwrap();
    SourceDocument::new(name, bytes)
}

fn attach_image(doc: &mut Document, page_id: ObjectId, image_id: ObjectId) {
    let mut resources = match doc
        .get_dictionary(page_id)
        .ok()
        .and_then(|dict| dict.get(b"Resources").ok().cloned())
    {
        Some(Object::Dictionary(dict)) => dict,
        _ => lopdf::Dictionary::new(),
    };
    resources.set("XObject", dictionary! { "Im1" => image_id });
    if let Ok(dict) = doc
        .get_object_mut(page_id)
        .and_then(|object| object.as_dict_mut())
    {
        dict.set("Resources", Object::Dictionary(resources));
    }
}

/// Renders a smooth gradient; compresses well as JPEG.
#[derive(Debug, Default)]
pub(crate) struct TestRenderer;

impl PageRenderer for TestRenderer {
    fn render_page(
        &self,
        doc: &Document,
        page_id: ObjectId,
        scale: f32,
    ) -> Result<PixelMap, StrategyError> {
        let (width_pt, height_pt) = pdf::page_size(doc, page_id);
        let width = ((width_pt * scale).round() as u32).clamp(1, 4_000);
        let height = ((height_pt * scale).round() as u32).clamp(1, 4_000);
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let shade = ((x + y) % 256) as u8;
                data.extend_from_slice(&[shade, shade.wrapping_add(64), 200]);
            }
        }
        Ok(PixelMap::new(width, height, data))
    }
}
