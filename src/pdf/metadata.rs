//! Document information dictionary handling.

use lopdf::{Dictionary, Document, Object};

/// What happens to document information entries on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataPolicy {
    /// Keep title/author/subject/keywords/producer/creator.
    Preserve,
    /// Clear all of them.
    StripAll,
}

const INFO_FIELDS: [&[u8]; 8] = [
    b"Title",
    b"Author",
    b"Subject",
    b"Keywords",
    b"Producer",
    b"Creator",
    b"CreationDate",
    b"ModDate",
];

/// Remove the information dictionary entirely.
pub fn strip_info(doc: &mut Document) {
    let info_ref = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };
    if let Some(id) = info_ref {
        doc.objects.remove(&id);
    }
    doc.trailer.remove(b"Info");
}

/// Copy the recognized information fields of `source` into `dest`.
pub fn copy_info(source: &Document, dest: &mut Document) {
    let Some(info) = source_info(source) else {
        return;
    };

    let mut copied = Dictionary::new();
    for field in INFO_FIELDS {
        if let Ok(value) = info.get(field) {
            copied.set(field, value.clone());
        }
    }
    if copied.iter().next().is_none() {
        return;
    }

    let info_id = dest.add_object(Object::Dictionary(copied));
    dest.trailer.set("Info", info_id);
}

fn source_info(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}
