//! In-place geometric scaling and page pruning.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::StrategyError;

use super::media_box;

/// Wrap a page's content in a scaling transform and shrink its page box.
///
/// Existing content streams are left untouched (they may be shared between
/// pages); the transform comes from a prefix/suffix stream pair wrapped
/// around them. The page box never drops below `min_points` on a side.
pub fn scale_page(
    doc: &mut Document,
    page_id: ObjectId,
    scale: f32,
    min_points: f32,
) -> Result<(), StrategyError> {
    let corners = media_box(doc, page_id).unwrap_or([0.0, 0.0, 612.0, 792.0]);

    let prefix = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(scale),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(scale),
                    Object::Real(0.0),
                    Object::Real(0.0),
                ],
            ),
        ],
    };
    let suffix = Content {
        operations: vec![Operation::new("Q", vec![])],
    };
    let prefix_bytes = prefix
        .encode()
        .map_err(|e| StrategyError::Serialize(e.to_string()))?;
    let suffix_bytes = suffix
        .encode()
        .map_err(|e| StrategyError::Serialize(e.to_string()))?;
    let prefix_id = doc.add_object(Stream::new(dictionary! {}, prefix_bytes));
    let suffix_id = doc.add_object(Stream::new(dictionary! {}, suffix_bytes));

    let existing: Vec<Object> = {
        let dict = doc
            .get_dictionary(page_id)
            .map_err(|e| StrategyError::Decode(e.to_string()))?;
        match dict.get(b"Contents") {
            Ok(Object::Reference(id)) => vec![Object::Reference(*id)],
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    };

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(prefix_id));
    contents.extend(existing);
    contents.push(Object::Reference(suffix_id));

    let width = ((corners[2] - corners[0]) * scale).max(min_points);
    let height = ((corners[3] - corners[1]) * scale).max(min_points);
    let scaled_box = vec![
        Object::Real(corners[0] * scale),
        Object::Real(corners[1] * scale),
        Object::Real(corners[0] * scale + width),
        Object::Real(corners[1] * scale + height),
    ];

    let dict = doc
        .get_object_mut(page_id)
        .ok()
        .and_then(|object| object.as_dict_mut().ok())
        .ok_or_else(|| StrategyError::Decode("page is not a dictionary".to_string()))?;
    dict.set("Contents", Object::Array(contents));
    dict.set("MediaBox", Object::Array(scaled_box));
    // A stale CropBox would keep showing the old region.
    dict.remove(b"CropBox");
    Ok(())
}

/// Drop trailing pages so that `retention` of them survive, keeping at
/// least one. Returns how many pages were removed.
pub fn remove_trailing_pages(doc: &mut Document, retention: f32) -> usize {
    let total = doc.get_pages().len();
    if total == 0 {
        return 0;
    }
    let keep = ((total as f32 * retention).ceil() as usize).clamp(1, total);
    if keep == total {
        return 0;
    }
    let doomed: Vec<u32> = ((keep as u32 + 1)..=(total as u32)).collect();
    doc.delete_pages(&doomed);
    total - keep
}
