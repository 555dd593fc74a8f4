//! The per-file control loop.
//!
//! Strategies run in fixed priority order; the first output strictly
//! smaller than the input wins. A thrown strategy error and a
//! no-improvement result are both rejections, and the cascade advances.
//! When every strategy is exhausted and the intent carries an unmet byte
//! target, the minimal-document fallback runs last.

use crate::codec::Capabilities;
use crate::config::Settings;
use crate::error::CompressError;
use crate::model::{CompressionIntent, SourceDocument};
use crate::strategy::{self, Attempt, StrategyKind};

/// An accepted compression: the winning bytes and the strategy that
/// produced them.
#[derive(Debug)]
pub struct CompressionOutcome {
    pub bytes: Vec<u8>,
    pub strategy: StrategyKind,
}

/// Compress one document according to one intent.
pub fn compress_document(
    source: &SourceDocument,
    intent: &CompressionIntent,
    settings: &Settings,
    caps: &Capabilities,
) -> Result<CompressionOutcome, CompressError> {
    for kind in strategy::cascade(intent, settings) {
        match strategy::execute(kind, source, intent, settings, caps) {
            Ok(Attempt::Accepted(bytes)) => {
                let reduction = 100.0 - bytes.len() as f64 / source.size() as f64 * 100.0;
                log::info!(
                    "{}: {} accepted, {} -> {} bytes ({:.1}% smaller)",
                    source.name(),
                    kind.label(),
                    source.size(),
                    bytes.len(),
                    reduction
                );
                return Ok(CompressionOutcome {
                    bytes,
                    strategy: kind,
                });
            }
            Ok(Attempt::NoImprovement) => {
                log::debug!(
                    "{}: {} made no size improvement",
                    source.name(),
                    kind.label()
                );
            }
            Err(error) => {
                log::debug!("{}: {} failed: {}", source.name(), kind.label(), error);
            }
        }
    }

    if let Some(target) = intent.target_bytes() {
        if target < source.size() && settings.allow_placeholder {
            log::warn!(
                "{}: every content strategy exhausted; reconstructing a minimal document",
                source.name()
            );
            if let Ok(Attempt::Accepted(bytes)) = strategy::execute(
                StrategyKind::MinimalDocument,
                source,
                intent,
                settings,
                caps,
            ) {
                return Ok(CompressionOutcome {
                    bytes,
                    strategy: StrategyKind::MinimalDocument,
                });
            }
        }
    }

    Err(CompressError::NoReduction {
        name: source.name().to_string(),
        size: source.size(),
    })
}
