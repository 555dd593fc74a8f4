//! Strategy 1: render every page to a JPEG at derived quality and scale.
//!
//! Highest fidelity among the lossy options and the only one that needs a
//! rasterization capability; without an injected renderer it reports a
//! strategy error and the cascade moves on.

use lopdf::ObjectId;

use crate::assemble::{DocumentAssembler, ErrorTolerance};
use crate::codec::Capabilities;
use crate::config::Settings;
use crate::error::StrategyError;
use crate::estimate::{derive_parameters, StrategyFamily};
use crate::model::{CompressionIntent, SourceDocument};
use crate::pdf::{self, MetadataPolicy};
use crate::transform::PageTransformer;

use super::{accept_if_smaller, Attempt};

pub(crate) fn run(
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
    caps: &Capabilities,
) -> Result<Attempt, StrategyError> {
    if caps.renderer.is_none() {
        return Err(StrategyError::RendererUnavailable);
    }

    let doc = pdf::load(source.bytes())?;
    let params = derive_parameters(intent, source.size(), StrategyFamily::Raster);
    let transformer = PageTransformer::new(*caps);

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    let mut pages = Vec::with_capacity(page_ids.len());
    for (index, page_id) in page_ids.iter().enumerate() {
        match transformer.rasterize(&doc, *page_id, index, &params) {
            Ok(page) => pages.push(page),
            Err(error) if settings.allow_placeholder => {
                log::warn!(
                    "{}: page {} failed to rasterize ({}); using placeholder",
                    source.name(),
                    index + 1,
                    error
                );
                pages.push(transformer.placeholder(&doc, *page_id, index, params.scale));
            }
            Err(error) => return Err(error),
        }
    }

    let assembler = DocumentAssembler::new(
        MetadataPolicy::StripAll,
        if settings.allow_placeholder {
            ErrorTolerance::SubstitutePlaceholder
        } else {
            ErrorTolerance::FailFast
        },
    );
    let bytes = assembler.assemble(pages, Some(&doc))?;
    Ok(accept_if_smaller(bytes, source))
}
