//! Strategies 3 and 4: geometric scaling.
//!
//! Strategy 3 rebuilds the document as placeholder pages at scaled source
//! geometry (used when rasterization is unavailable or failed). Strategy 4
//! scales the existing vector content in place and strips metadata; the
//! fastest and least aggressive of the cascade.

use lopdf::ObjectId;

use crate::assemble::{DocumentAssembler, ErrorTolerance};
use crate::codec::Capabilities;
use crate::config::Settings;
use crate::error::StrategyError;
use crate::estimate::{derive_parameters, StrategyFamily};
use crate::model::{CompressionIntent, SourceDocument};
use crate::pdf::{self, metadata, MetadataPolicy};
use crate::transform::PageTransformer;

use super::{accept_if_smaller, Attempt};

/// Strategy 3: placeholder pages at the source's scaled page geometry.
pub(crate) fn run_placeholder(
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
    caps: &Capabilities,
) -> Result<Attempt, StrategyError> {
    if !settings.allow_placeholder {
        return Err(StrategyError::PlaceholderDisabled);
    }

    let doc = pdf::load(source.bytes())?;
    let params = derive_parameters(intent, source.size(), StrategyFamily::Placeholder);
    let transformer = PageTransformer::new(*caps);

    let pages: Vec<_> = doc
        .get_pages()
        .values()
        .enumerate()
        .map(|(index, page_id)| transformer.placeholder(&doc, *page_id, index, params.scale))
        .collect();

    let assembler = DocumentAssembler::new(
        MetadataPolicy::StripAll,
        ErrorTolerance::SubstitutePlaceholder,
    );
    let bytes = assembler.assemble(pages, Some(&doc))?;
    Ok(accept_if_smaller(bytes, source))
}

/// Strategy 4: wrap existing content in a scale transform, in place.
pub(crate) fn run_content_scale(
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
) -> Result<Attempt, StrategyError> {
    let mut doc = pdf::load(source.bytes())?;
    let params = derive_parameters(intent, source.size(), StrategyFamily::Geometric);

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    for page_id in page_ids {
        PageTransformer::scale_geometry(&mut doc, page_id, params.scale, settings.min_page_points)?;
    }
    metadata::strip_info(&mut doc);

    let bytes = pdf::serialize(&mut doc)?;
    Ok(accept_if_smaller(bytes, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CompressionLevel;
    use crate::test_support::bloated_document;

    #[test]
    fn test_placeholder_rebuild_preserves_page_count() {
        let source = bloated_document("slides.pdf", 4, 30_000);
        let intent = CompressionIntent::TargetBytes(20_000);

        match run_placeholder(
            &source,
            &intent,
            &Settings::default(),
            &Capabilities::default(),
        )
        .unwrap()
        {
            Attempt::Accepted(bytes) => {
                assert!((bytes.len() as u64) < source.size());
                let doc = pdf::load(&bytes).unwrap();
                assert_eq!(pdf::page_count(&doc), 4);
            }
            Attempt::NoImprovement => panic!("placeholder rebuild should shrink a bloated file"),
        }
    }

    #[test]
    fn test_placeholder_respects_disable_flag() {
        let source = bloated_document("slides.pdf", 2, 10_000);
        let intent = CompressionIntent::TargetBytes(20_000);
        let result = run_placeholder(
            &source,
            &intent,
            &Settings::content_preserving(),
            &Capabilities::default(),
        );
        assert!(matches!(result, Err(StrategyError::PlaceholderDisabled)));
    }

    #[test]
    fn test_content_scale_keeps_pages_and_strips_metadata() {
        let source = bloated_document("doc.pdf", 3, 10_000);
        let intent = CompressionIntent::Level(CompressionLevel::High);

        // Scaling wraps streams, so the output may or may not be smaller;
        // either way the document must stay well-formed.
        let attempt = run_content_scale(&source, &intent, &Settings::default()).unwrap();
        if let Attempt::Accepted(bytes) = attempt {
            let doc = pdf::load(&bytes).unwrap();
            assert_eq!(pdf::page_count(&doc), 3);
            assert!(doc.trailer.get(b"Info").is_err());
        }
    }
}
