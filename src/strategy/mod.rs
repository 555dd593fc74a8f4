//! The priority-ordered cascade of compression strategies.
//!
//! Each strategy composes the estimator, the page transformer, and the
//! assembler differently. Every one is independently fallible and reports
//! "no improvement" instead of erroring when its output is not smaller
//! than the input; the orchestrator treats both the same way.

pub mod downsample;
pub mod minimal;
pub mod prune;
pub mod raster;
pub mod scale;

use crate::codec::Capabilities;
use crate::config::Settings;
use crate::error::StrategyError;
use crate::estimate::StrategyFamily;
use crate::model::{CompressionIntent, SourceDocument};

/// The strategy variants, in cascade priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Render every page to a JPEG through the injected renderer.
    RasterRender,
    /// Requantize embedded images in place; content-preserving.
    ImageDownsample,
    /// Placeholder pages at scaled source geometry.
    ScaledPlaceholder,
    /// Wrap content streams in a scale transform.
    ContentScale,
    /// Drop trailing pages, scale survivors by sqrt(ratio).
    PagePrune,
    /// Harsher retention ladder and ratio^0.8 scaling.
    ExtremePrune,
    /// Synthesize a fresh minimal document near the byte target.
    MinimalDocument,
}

impl StrategyKind {
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::RasterRender => "raster-render",
            StrategyKind::ImageDownsample => "image-downsample",
            StrategyKind::ScaledPlaceholder => "scaled-placeholder",
            StrategyKind::ContentScale => "content-scale",
            StrategyKind::PagePrune => "page-prune",
            StrategyKind::ExtremePrune => "extreme-prune",
            StrategyKind::MinimalDocument => "minimal-document",
        }
    }

    pub fn family(&self) -> Option<StrategyFamily> {
        match self {
            StrategyKind::RasterRender => Some(StrategyFamily::Raster),
            StrategyKind::ImageDownsample => Some(StrategyFamily::Downsample),
            StrategyKind::ScaledPlaceholder => Some(StrategyFamily::Placeholder),
            StrategyKind::ContentScale => Some(StrategyFamily::Geometric),
            StrategyKind::PagePrune => Some(StrategyFamily::Prune),
            StrategyKind::ExtremePrune => Some(StrategyFamily::ExtremePrune),
            StrategyKind::MinimalDocument => None,
        }
    }
}

/// One attempt's outcome. Errors travel separately.
#[derive(Debug)]
pub enum Attempt {
    /// Output strictly smaller than the input.
    Accepted(Vec<u8>),
    /// The strategy ran but did not beat the input size.
    NoImprovement,
}

/// The cascade for one intent, in fixed priority order. Page-removing
/// strategies participate only when a byte target drives the retention
/// ladder; the minimal fallback is not part of the cascade proper.
pub fn cascade(intent: &CompressionIntent, settings: &Settings) -> Vec<StrategyKind> {
    let mut order = vec![StrategyKind::RasterRender, StrategyKind::ImageDownsample];
    if settings.allow_placeholder {
        order.push(StrategyKind::ScaledPlaceholder);
    }
    order.push(StrategyKind::ContentScale);
    if intent.may_remove_pages() {
        order.push(StrategyKind::PagePrune);
        order.push(StrategyKind::ExtremePrune);
    }
    order
}

/// Run a single strategy against one source document.
pub fn execute(
    kind: StrategyKind,
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
    caps: &Capabilities,
) -> Result<Attempt, StrategyError> {
    match kind {
        StrategyKind::RasterRender => raster::run(source, intent, settings, caps),
        StrategyKind::ImageDownsample => downsample::run(source, intent, caps),
        StrategyKind::ScaledPlaceholder => scale::run_placeholder(source, intent, settings, caps),
        StrategyKind::ContentScale => scale::run_content_scale(source, intent, settings),
        StrategyKind::PagePrune => prune::run(source, intent, settings, StrategyKind::PagePrune),
        StrategyKind::ExtremePrune => {
            prune::run(source, intent, settings, StrategyKind::ExtremePrune)
        }
        StrategyKind::MinimalDocument => minimal::run(source, intent, settings),
    }
}

/// The accept/reject decision every strategy shares: strictly smaller
/// than the input, or nothing.
pub(crate) fn accept_if_smaller(bytes: Vec<u8>, source: &SourceDocument) -> Attempt {
    if (bytes.len() as u64) < source.size() {
        Attempt::Accepted(bytes)
    } else {
        Attempt::NoImprovement
    }
}
