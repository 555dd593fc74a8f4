//! Strategy 7: minimal-document reconstruction.
//!
//! Last resort for an unmet byte target: synthesize a brand-new document
//! of small placeholder pages sized near the target. Starts from a
//! bytes-per-page estimate and re-measures, halving the page count while
//! the output overshoots.

use crate::config::defaults::{
    ESTIMATED_BYTES_PER_PAGE, MAX_MINIMAL_PAGES, MINIMAL_PAGE_HEIGHT, MINIMAL_PAGE_WIDTH,
    MINIMAL_REFIT_ROUNDS,
};
use crate::config::Settings;
use crate::error::StrategyError;
use crate::model::{CompressionIntent, SourceDocument};
use crate::pdf::{self, DocumentBuilder};

use super::{accept_if_smaller, Attempt};

pub(crate) fn run(
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
) -> Result<Attempt, StrategyError> {
    let target = intent.target_bytes().ok_or(StrategyError::TargetRequired)?;
    if !settings.allow_placeholder {
        return Err(StrategyError::PlaceholderDisabled);
    }

    let mut pages = ((target / ESTIMATED_BYTES_PER_PAGE) as usize).clamp(1, MAX_MINIMAL_PAGES);
    let mut bytes = build(source, target, pages)?;

    for _ in 0..MINIMAL_REFIT_ROUNDS {
        if bytes.len() as u64 <= target || pages == 1 {
            break;
        }
        pages = (pages / 2).max(1);
        bytes = build(source, target, pages)?;
    }

    log::debug!(
        "{}: minimal reconstruction with {} pages, {} bytes for a {} byte target",
        source.name(),
        pages,
        bytes.len(),
        target
    );
    Ok(accept_if_smaller(bytes, source))
}

fn build(source: &SourceDocument, target: u64, pages: usize) -> Result<Vec<u8>, StrategyError> {
    let mut builder = DocumentBuilder::new();
    for number in 1..=pages {
        builder.add_placeholder_page(
            MINIMAL_PAGE_WIDTH,
            MINIMAL_PAGE_HEIGHT,
            &[
                format!("Page {} of {}", number, pages),
                format!("Original: {}", source.name()),
                format!("Reduced to fit {} KB", target / 1024),
            ],
        )?;
    }
    let mut doc = builder.finish()?;
    pdf::serialize(&mut doc)
}
