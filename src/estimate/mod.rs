//! Parameter derivation for the strategy cascade.
//!
//! Pure functions mapping a compression intent and a source size to the
//! concrete quality/scale/retention values a strategy attempt will use.
//! No I/O, deterministic given inputs.

use crate::cli::CompressionLevel;
use crate::model::CompressionIntent;

/// Derived, per-attempt rendering parameters. Computed fresh for every
/// strategy attempt and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    /// Lossy image quality in [0, 1].
    pub quality: f32,
    /// Linear shrink factor for page geometry and pixel dimensions.
    pub scale: f32,
    /// Fraction of pages kept by page-removing strategies; 1.0 otherwise.
    pub page_retention: f32,
}

/// Strategy families with distinct compression headroom. The lookup tables
/// and ratio bands differ slightly between families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyFamily {
    /// Full-page rasterization to JPEG.
    Raster,
    /// Requantization of embedded images only.
    Downsample,
    /// Placeholder pages at scaled geometry.
    Placeholder,
    /// In-place content-stream scaling.
    Geometric,
    /// Page removal plus sqrt-scaled survivors.
    Prune,
    /// Aggressive page removal plus ratio^0.8 scaling.
    ExtremePrune,
}

/// Quality floor. Anything below produces unreadable output.
pub const MIN_QUALITY: f32 = 0.02;
/// Quality ceiling; above this JPEG stops saving space.
pub const MAX_QUALITY: f32 = 0.9;
/// Scale floor. A page shrunk further than this is degenerate.
pub const MIN_SCALE: f32 = 0.05;
pub const MAX_SCALE: f32 = 1.0;

/// Map an intent to concrete rendering parameters for one strategy family.
pub fn derive_parameters(
    intent: &CompressionIntent,
    source_size: u64,
    family: StrategyFamily,
) -> RenderParameters {
    let raw = match intent {
        CompressionIntent::Level(level) => level_parameters(*level, family),
        CompressionIntent::TargetBytes(_) => {
            let ratio = intent.ratio_for(source_size).unwrap_or(1.0);
            ratio_parameters(ratio, family)
        }
    };

    RenderParameters {
        quality: raw.quality.clamp(MIN_QUALITY, MAX_QUALITY),
        scale: raw.scale.clamp(MIN_SCALE, MAX_SCALE),
        page_retention: raw.page_retention.clamp(MIN_SCALE, 1.0),
    }
}

fn level_parameters(level: CompressionLevel, family: StrategyFamily) -> RenderParameters {
    let (quality, scale) = match family {
        StrategyFamily::Raster | StrategyFamily::Placeholder => match level {
            CompressionLevel::Low => (0.8, 0.9),
            CompressionLevel::Medium => (0.5, 0.7),
            CompressionLevel::High => (0.3, 0.5),
        },
        // Requantizing existing images loses detail twice, so stay gentler.
        StrategyFamily::Downsample => match level {
            CompressionLevel::Low => (0.85, 0.9),
            CompressionLevel::Medium => (0.6, 0.75),
            CompressionLevel::High => (0.4, 0.6),
        },
        StrategyFamily::Geometric | StrategyFamily::Prune => match level {
            CompressionLevel::Low => (0.8, 0.9),
            CompressionLevel::Medium => (0.5, 0.7),
            CompressionLevel::High => (0.3, 0.5),
        },
        StrategyFamily::ExtremePrune => match level {
            CompressionLevel::Low => (0.7, 0.85),
            CompressionLevel::Medium => (0.45, 0.6),
            CompressionLevel::High => (0.25, 0.4),
        },
    };

    // Qualitative levels never remove pages.
    RenderParameters {
        quality,
        scale,
        page_retention: 1.0,
    }
}

fn ratio_parameters(ratio: f32, family: StrategyFamily) -> RenderParameters {
    let (quality, scale) = match family {
        StrategyFamily::Raster => {
            if ratio < 0.3 {
                (0.2, 0.4)
            } else if ratio < 0.6 {
                (0.4, 0.6)
            } else {
                (0.6, 0.8)
            }
        }
        StrategyFamily::Downsample => {
            if ratio < 0.2 {
                (0.3, 0.4)
            } else if ratio < 0.4 {
                (0.4, 0.55)
            } else if ratio < 0.6 {
                (0.5, 0.7)
            } else {
                (0.65, 0.85)
            }
        }
        StrategyFamily::Placeholder => {
            if ratio < 0.2 {
                (0.2, 0.3)
            } else if ratio < 0.4 {
                (0.3, 0.5)
            } else if ratio < 0.6 {
                (0.4, 0.6)
            } else {
                (0.5, 0.7)
            }
        }
        StrategyFamily::Geometric | StrategyFamily::Prune => {
            (banded_quality(ratio), ratio.sqrt())
        }
        StrategyFamily::ExtremePrune => (banded_quality(ratio), ratio.powf(0.8)),
    };

    RenderParameters {
        quality,
        scale,
        page_retention: retention_for(ratio, family),
    }
}

fn banded_quality(ratio: f32) -> f32 {
    if ratio < 0.3 {
        0.2
    } else if ratio < 0.6 {
        0.4
    } else {
        0.6
    }
}

/// Page-retention ladder. Only page-removing families keep less than all.
fn retention_for(ratio: f32, family: StrategyFamily) -> f32 {
    match family {
        StrategyFamily::Prune => {
            if ratio > 0.7 {
                1.0
            } else if ratio > 0.5 {
                0.7
            } else if ratio > 0.3 {
                0.5
            } else {
                0.3
            }
        }
        StrategyFamily::ExtremePrune => {
            if ratio > 0.5 {
                0.5
            } else if ratio > 0.3 {
                0.3
            } else {
                0.2
            }
        }
        _ => 1.0,
    }
}
