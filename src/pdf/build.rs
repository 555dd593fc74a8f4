//! Construction of fresh output documents, page by page.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::StrategyError;

/// Incrementally builds a new PDF out of image pages and placeholder
/// pages. Pages appear in insertion order.
pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    font_id: Option<ObjectId>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            font_id: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    fn font_id(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        self.font_id = Some(id);
        id
    }

    fn add_page(&mut self, width_pt: f32, height_pt: f32, content_id: ObjectId, resources: lopdf::Dictionary) {
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.kids.push(page_id.into());
    }

    /// Append a page holding one full-bleed JPEG.
    pub fn add_image_page(
        &mut self,
        jpeg: Vec<u8>,
        px_width: u32,
        px_height: u32,
        width_pt: f32,
        height_pt: f32,
    ) -> Result<(), StrategyError> {
        if jpeg.is_empty() || px_width == 0 || px_height == 0 {
            return Err(StrategyError::Assemble("empty image for page".to_string()));
        }

        let length = jpeg.len() as i64;
        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => px_width as i64,
                "Height" => px_height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
                "Length" => length,
            },
            jpeg,
        ));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width_pt),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(height_pt),
                        Object::Real(0.0),
                        Object::Real(0.0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| StrategyError::Assemble(e.to_string()))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

        let resources = dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        };
        self.add_page(width_pt, height_pt, content_id, resources);
        Ok(())
    }

    /// Append a page of short diagnostic text with a light frame.
    pub fn add_placeholder_page(
        &mut self,
        width_pt: f32,
        height_pt: f32,
        lines: &[String],
    ) -> Result<(), StrategyError> {
        let font_id = self.font_id();

        let mut operations = Vec::new();
        if width_pt > 60.0 && height_pt > 100.0 {
            operations.extend([
                Operation::new(
                    "RG",
                    vec![Object::Real(0.8), Object::Real(0.8), Object::Real(0.8)],
                ),
                Operation::new(
                    "re",
                    vec![
                        Object::Real(20.0),
                        Object::Real(20.0),
                        Object::Real(width_pt - 40.0),
                        Object::Real(height_pt - 80.0),
                    ],
                ),
                Operation::new("S", vec![]),
            ]);
        }

        let mut y = height_pt - 40.0;
        for (index, line) in lines.iter().enumerate() {
            let size = if index == 0 { 12.0 } else { 10.0 };
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), Object::Real(size)]),
                Operation::new("Td", vec![Object::Real(20.0), Object::Real(y)]),
                Operation::new("Tj", vec![Object::string_literal(line.as_str())]),
                Operation::new("ET", vec![]),
            ]);
            y -= 22.0;
        }

        let encoded = Content { operations }
            .encode()
            .map_err(|e| StrategyError::Assemble(e.to_string()))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        self.add_page(width_pt, height_pt, content_id, resources);
        Ok(())
    }

    /// Close the page tree and hand back the finished document.
    pub fn finish(mut self) -> Result<Document, StrategyError> {
        if self.kids.is_empty() {
            return Err(StrategyError::Assemble("document has no pages".to_string()));
        }

        let kids = std::mem::take(&mut self.kids);
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        Ok(self.doc)
    }
}
