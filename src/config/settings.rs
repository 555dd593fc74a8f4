use crate::cli::Args;

use super::defaults::*;

/// Runtime settings for a compression run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Allow strategies that replace original content with generated
    /// placeholder pages (strategy 3 and the minimal-document fallback)
    pub allow_placeholder: bool,

    /// Input size ceiling in bytes
    pub max_input_bytes: u64,

    /// Smallest page box a scaling strategy may produce, in points
    pub min_page_points: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_placeholder: true,
            max_input_bytes: MAX_INPUT_BYTES,
            min_page_points: MIN_PAGE_POINTS,
        }
    }
}

impl Settings {
    /// Build settings from CLI args
    pub fn from_args(args: &Args) -> Self {
        Self {
            allow_placeholder: !args.no_placeholder,
            ..Self::default()
        }
    }

    /// Content-preserving mode: placeholder fallbacks disabled
    pub fn content_preserving() -> Self {
        Self {
            allow_placeholder: false,
            ..Self::default()
        }
    }
}
