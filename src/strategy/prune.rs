//! Strategies 5 and 6: page removal with scaling.
//!
//! Both derive a retention fraction from the target ratio, drop trailing
//! pages beyond it, and scale the survivors; the extreme variant uses a
//! harsher ladder and a steeper scale exponent. Neither runs without a
//! byte target.

use lopdf::ObjectId;

use crate::config::Settings;
use crate::error::StrategyError;
use crate::estimate::derive_parameters;
use crate::model::{CompressionIntent, SourceDocument};
use crate::pdf::{self, metadata, scale};
use crate::transform::PageTransformer;

use super::{accept_if_smaller, Attempt, StrategyKind};

pub(crate) fn run(
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
    kind: StrategyKind,
) -> Result<Attempt, StrategyError> {
    if intent.target_bytes().is_none() {
        return Err(StrategyError::TargetRequired);
    }
    let family = kind
        .family()
        .ok_or(StrategyError::TargetRequired)?;

    let mut doc = pdf::load(source.bytes())?;
    let params = derive_parameters(intent, source.size(), family);

    let removed = scale::remove_trailing_pages(&mut doc, params.page_retention);
    if removed > 0 {
        log::debug!(
            "{}: dropped {} trailing pages (retention {:.2})",
            source.name(),
            removed,
            params.page_retention
        );
    }

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
    fn test_requires_byte_target() {
        let source = bloated_document("doc.pdf", 4, 5_000);
        let intent = CompressionIntent::Level(CompressionLevel::High);
        let result = run(
            &source,
            &intent,
            &Settings::default(),
            StrategyKind::PagePrune,
        );
        assert!(matches!(result, Err(StrategyError::TargetRequired)));
    }

    #[test]
    fn test_aggressive_target_drops_trailing_pages() {
        let source = bloated_document("doc.pdf", 10, 8_000);
        // Roughly a 0.4 ratio: the ladder keeps 50% of pages.
        let target = source.size() * 2 / 5;
        let intent = CompressionIntent::TargetBytes(target);

        match run(
            &source,
            &intent,
            &Settings::default(),
            StrategyKind::PagePrune,
        )
        .unwrap()
        {
            Attempt::Accepted(bytes) => {
                assert!((bytes.len() as u64) < source.size());
                let doc = pdf::load(&bytes).unwrap();
                assert_eq!(pdf::page_count(&doc), 5);
            }
            Attempt::NoImprovement => {
                panic!("dropping half the pages should shrink a padded file")
            }
        }
    }

    #[test]
    fn test_extreme_variant_keeps_fewer_pages() {
        let source = bloated_document("doc.pdf", 10, 8_000);
        let target = source.size() * 2 / 5;
        let intent = CompressionIntent::TargetBytes(target);

        match run(
            &source,
            &intent,
            &Settings::default(),
            StrategyKind::ExtremePrune,
        )
        .unwrap()
        {
            Attempt::Accepted(bytes) => {
                let doc = pdf::load(&bytes).unwrap();
                // Extreme ladder at ratio 0.4 keeps 30% of pages.
                assert_eq!(pdf::page_count(&doc), 3);
            }
            Attempt::NoImprovement => panic!("extreme prune should shrink a padded file"),
        }
    }
}
