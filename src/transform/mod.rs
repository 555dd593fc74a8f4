//! Per-page transformation: rasterize through the injected renderer, or
//! scale geometry in place.

use lopdf::{Document, ObjectId};

use crate::codec::Capabilities;
use crate::error::StrategyError;
use crate::estimate::RenderParameters;
use crate::pdf;

/// The output of one page transformation, consumed exactly once by the
/// assembler and then discarded.
#[derive(Debug)]
pub enum TransformedPage {
    /// A rasterized page: encoded JPEG plus its pixel and point dimensions.
    Raster {
        jpeg: Vec<u8>,
        px_width: u32,
        px_height: u32,
        width_pt: f32,
        height_pt: f32,
    },
    /// A generated vector page carrying a short diagnostic label.
    Placeholder {
        width_pt: f32,
        height_pt: f32,
        label: String,
    },
}

pub struct PageTransformer<'a> {
    caps: Capabilities<'a>,
}

impl<'a> PageTransformer<'a> {
    pub fn new(caps: Capabilities<'a>) -> Self {
        Self { caps }
    }

    /// Render one page into a JPEG at the derived scale and quality.
    pub fn rasterize(
        &self,
        doc: &Document,
        page_id: ObjectId,
        index: usize,
        params: &RenderParameters,
    ) -> Result<TransformedPage, StrategyError> {
        let renderer = self
            .caps
            .renderer
            .ok_or(StrategyError::RendererUnavailable)?;

        let (width_pt, height_pt) = pdf::page_size(doc, page_id);
        let pixels = renderer
            .render_page(doc, page_id, params.scale)
            .map_err(|e| StrategyError::Render {
                page: index + 1,
                message: e.to_string(),
            })?;
        let jpeg = self.caps.images.encode_jpeg(&pixels, params.quality)?;

        Ok(TransformedPage::Raster {
            jpeg,
            px_width: pixels.width,
            px_height: pixels.height,
            width_pt: width_pt * params.scale,
            height_pt: height_pt * params.scale,
        })
    }

    /// Produce a placeholder page at the source page's scaled geometry.
    pub fn placeholder(
        &self,
        doc: &Document,
        page_id: ObjectId,
        index: usize,
        scale: f32,
    ) -> TransformedPage {
        let (width_pt, height_pt) = pdf::page_size(doc, page_id);
        TransformedPage::Placeholder {
            width_pt: (width_pt * scale).max(72.0),
            height_pt: (height_pt * scale).max(72.0),
            label: format!("Page {}", index + 1),
        }
    }

    /// Geometric variant: scale the page's content stream and box in place.
    pub fn scale_geometry(
        doc: &mut Document,
        page_id: ObjectId,
        scale: f32,
        min_points: f32,
    ) -> Result<(), StrategyError> {
        pdf::scale::scale_page(doc, page_id, scale, min_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{PageRenderer, PixelMap};
    use crate::pdf::DocumentBuilder;

    struct FlatRenderer;

    impl PageRenderer for FlatRenderer {
        fn render_page(
            &self,
            doc: &Document,
            page_id: ObjectId,
            scale: f32,
        ) -> Result<PixelMap, StrategyError> {
            let (width_pt, height_pt) = pdf::page_size(doc, page_id);
            let width = ((width_pt * scale) as u32).max(1);
            let height = ((height_pt * scale) as u32).max(1);
            Ok(PixelMap::new(
                width,
                height,
                vec![255; (width * height * 3) as usize],
            ))
        }
    }

    fn one_page_doc() -> Document {
        let mut builder = DocumentBuilder::new();
        builder
            .add_placeholder_page(400.0, 600.0, &["body".to_string()])
            .unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_rasterize_without_renderer_fails() {
        let doc = one_page_doc();
        let page_id = *doc.get_pages().values().next().unwrap();
        let transformer = PageTransformer::new(Capabilities::default());
        let params = RenderParameters {
            quality: 0.5,
            scale: 0.5,
            page_retention: 1.0,
        };
        assert!(matches!(
            transformer.rasterize(&doc, page_id, 0, &params),
            Err(StrategyError::RendererUnavailable)
        ));
    }

    #[test]
    fn test_rasterize_scales_point_dimensions() {
        let doc = one_page_doc();
        let page_id = *doc.get_pages().values().next().unwrap();
        let renderer = FlatRenderer;
        let transformer = PageTransformer::new(Capabilities::with_renderer(&renderer));
        let params = RenderParameters {
            quality: 0.5,
            scale: 0.5,
            page_retention: 1.0,
        };

        match transformer.rasterize(&doc, page_id, 0, &params).unwrap() {
            TransformedPage::Raster {
                jpeg,
                width_pt,
                height_pt,
                ..
            } => {
                assert!(jpeg.starts_with(&[0xFF, 0xD8]));
                assert!((width_pt - 200.0).abs() < 0.5);
                assert!((height_pt - 300.0).abs() < 0.5);
            }
            other => panic!("expected raster page, got {:?}", other),
        }
    }

    #[test]
    fn test_placeholder_carries_page_number() {
        let doc = one_page_doc();
        let page_id = *doc.get_pages().values().next().unwrap();
        let transformer = PageTransformer::new(Capabilities::default());
        match transformer.placeholder(&doc, page_id, 4, 0.5) {
            TransformedPage::Placeholder { label, .. } => assert_eq!(label, "Page 5"),
            other => panic!("expected placeholder, got {:?}", other),
        }
    }
}
