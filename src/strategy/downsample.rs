//! Strategy 2: requantize embedded images in place.
//!
//! The only strategy that is both lossy and fully content-preserving: page
//! geometry, text, and vector art are untouched, while raster assets are
//! shrunk and re-encoded as JPEG.

use crate::codec::Capabilities;
use crate::error::StrategyError;
use crate::estimate::{derive_parameters, StrategyFamily};
use crate::model::{CompressionIntent, SourceDocument};
use crate::pdf::{self, images};

use super::{accept_if_smaller, Attempt};

pub(crate) fn run(
    source: &SourceDocument,
    intent: &CompressionIntent,
    caps: &Capabilities,
) -> Result<Attempt, StrategyError> {
    let mut doc = pdf::load(source.bytes())?;
    let params = derive_parameters(intent, source.size(), StrategyFamily::Downsample);

    let stats = images::downsample_images(&mut doc, caps.images, params.quality, params.scale)?;
    log::debug!(
        "{}: rewrote {} of {} embedded images",
        source.name(),
        stats.rewritten,
        stats.examined
    );
    if stats.rewritten == 0 {
        return Ok(Attempt::NoImprovement);
    }

    let bytes = pdf::serialize(&mut doc)?;
    Ok(accept_if_smaller(bytes, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bloated_document, text_only_document};

    #[test]
    fn test_shrinks_image_heavy_source() {
        let source = bloated_document("scans.pdf", 2, 60_000);
        let intent = CompressionIntent::TargetBytes(40_000);

        match run(&source, &intent, &Capabilities::default()).unwrap() {
            Attempt::Accepted(bytes) => {
                assert!((bytes.len() as u64) < source.size());
                // Content-preserving: page count unchanged.
                let doc = pdf::load(&bytes).unwrap();
                assert_eq!(pdf::page_count(&doc), 2);
            }
            Attempt::NoImprovement => panic!("noise images should requantize smaller"),
        }
    }

    #[test]
    fn test_no_images_means_no_improvement() {
        let source = text_only_document("letter.pdf", 2);
        let intent = CompressionIntent::TargetBytes(1_000);
        assert!(matches!(
            run(&source, &intent, &Capabilities::default()).unwrap(),
            Attempt::NoImprovement
        ));
    }

    #[test]
    fn test_garbage_input_is_a_decode_error() {
        let source = SourceDocument::new("junk.pdf", b"%PDF-1.4 but not really".to_vec());
        let intent = CompressionIntent::TargetBytes(1_000);
        assert!(run(&source, &intent, &Capabilities::default()).is_err());
    }
}
