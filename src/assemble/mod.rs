//! Output document assembly from transformed pages.

use lopdf::Document;

use crate::config::defaults::{PLACEHOLDER_PAGE_HEIGHT, PLACEHOLDER_PAGE_WIDTH};
use crate::error::StrategyError;
use crate::pdf::{self, metadata, DocumentBuilder, MetadataPolicy};
use crate::transform::TransformedPage;

/// What to do when one page cannot be assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTolerance {
    /// Substitute a minimal placeholder page carrying a diagnostic label.
    SubstitutePlaceholder,
    /// Fail the whole assembly.
    FailFast,
}

pub struct DocumentAssembler {
    pub policy: MetadataPolicy,
    pub tolerance: ErrorTolerance,
}

impl DocumentAssembler {
    pub fn new(policy: MetadataPolicy, tolerance: ErrorTolerance) -> Self {
        Self { policy, tolerance }
    }

    /// Build a serialized document from pages, in order. `source` provides
    /// the information dictionary when the policy is Preserve.
    pub fn assemble(
        &self,
        pages: Vec<TransformedPage>,
        source: Option<&Document>,
    ) -> Result<Vec<u8>, StrategyError> {
        let mut builder = DocumentBuilder::new();

        for (index, page) in pages.into_iter().enumerate() {
            let added = match page {
                TransformedPage::Raster {
                    jpeg,
                    px_width,
                    px_height,
                    width_pt,
                    height_pt,
                } => builder.add_image_page(jpeg, px_width, px_height, width_pt, height_pt),
                TransformedPage::Placeholder {
                    width_pt,
                    height_pt,
                    label,
                } => builder.add_placeholder_page(width_pt, height_pt, &[label]),
            };

            if let Err(error) = added {
                match self.tolerance {
                    ErrorTolerance::SubstitutePlaceholder => {
                        log::warn!("page {}: {}; substituting placeholder", index + 1, error);
                        builder.add_placeholder_page(
                            PLACEHOLDER_PAGE_WIDTH,
                            PLACEHOLDER_PAGE_HEIGHT,
                            &[format!("Page {} unavailable", index + 1)],
                        )?;
                    }
                    ErrorTolerance::FailFast => return Err(error),
                }
            }
        }

        let mut doc = builder.finish()?;
        match self.policy {
            MetadataPolicy::Preserve => {
                if let Some(source) = source {
                    metadata::copy_info(source, &mut doc);
                }
            }
            MetadataPolicy::StripAll => {}
        }
        pdf::serialize(&mut doc)
    }
}
