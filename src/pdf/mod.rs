//! lopdf-level helpers shared by the compression strategies.

pub mod build;
pub mod images;
pub mod metadata;
pub mod scale;

pub use build::DocumentBuilder;
pub use metadata::MetadataPolicy;

use lopdf::{Document, Object, ObjectId};

use crate::error::StrategyError;

/// US Letter, the fallback when a page carries no usable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Decode a PDF from memory.
pub fn load(bytes: &[u8]) -> Result<Document, StrategyError> {
    let doc = Document::load_mem(bytes).map_err(|e| StrategyError::Decode(e.to_string()))?;
    if doc.is_encrypted() {
        return Err(StrategyError::Encrypted);
    }
    Ok(doc)
}

/// Serialize in the most size-efficient mode lopdf supports: drop
/// unreachable objects, renumber, compress every stream.
pub fn serialize(doc: &mut Document) -> Result<Vec<u8>, StrategyError> {
    let _ = doc.prune_objects();
    doc.renumber_objects();
    doc.compress();
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| StrategyError::Serialize(e.to_string()))?;
    Ok(buffer)
}

pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Numeric value of a PDF object, if it is one.
pub(crate) fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

/// Width and height of a page in points.
pub fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    media_box(doc, page_id)
        .map(|[x0, y0, x1, y1]| ((x1 - x0).abs(), (y1 - y0).abs()))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// A page's MediaBox, following the Parent chain for inherited boxes.
pub(crate) fn media_box(doc: &Document, page_id: ObjectId) -> Option<[f32; 4]> {
    let mut current = page_id;
    // Parent chains are shallow; bound the walk against cycles.
    for _ in 0..8 {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(object) = dict.get(b"MediaBox") {
            let resolved = match object {
                Object::Reference(id) => doc.get_object(*id).ok()?,
                other => other,
            };
            if let Object::Array(values) = resolved {
                if values.len() == 4 {
                    let mut corners = [0.0f32; 4];
                    for (slot, value) in corners.iter_mut().zip(values) {
                        *slot = number(value)?;
                    }
                    return Some(corners);
                }
            }
            return None;
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage() {
        assert!(load(b"not a pdf at all").is_err());
    }

    #[test]
    fn test_build_and_reload_round_trip() {
        let mut builder = DocumentBuilder::new();
        builder
            .add_placeholder_page(200.0, 300.0, &["First page".to_string()])
            .unwrap();
        builder
            .add_placeholder_page(200.0, 300.0, &["Second page".to_string()])
            .unwrap();
        let mut doc = builder.finish().unwrap();
        let bytes = serialize(&mut doc).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let reloaded = load(&bytes).unwrap();
        assert_eq!(page_count(&reloaded), 2);

        let page_id = *reloaded.get_pages().values().next().unwrap();
        let (width, height) = page_size(&reloaded, page_id);
        assert!((width - 200.0).abs() < 0.5);
        assert!((height - 300.0).abs() < 0.5);
    }
}
