/// Input ceiling; larger files are rejected before processing
pub const MAX_INPUT_BYTES: u64 = 100 * 1024 * 1024;

/// Floor for scaled page boxes in points (1/2 inch)
pub const MIN_PAGE_POINTS: f32 = 36.0;

/// Placeholder page size in points when the source geometry is unknown
pub const PLACEHOLDER_PAGE_WIDTH: f32 = 300.0;
pub const PLACEHOLDER_PAGE_HEIGHT: f32 = 400.0;

/// Page size for minimal-document reconstruction, in points
pub const MINIMAL_PAGE_WIDTH: f32 = 200.0;
pub const MINIMAL_PAGE_HEIGHT: f32 = 300.0;

/// First guess at the serialized cost of one minimal page
pub const ESTIMATED_BYTES_PER_PAGE: u64 = 2_500;

/// How many times the minimal builder may halve its page count to fit
pub const MINIMAL_REFIT_ROUNDS: usize = 4;

/// Upper bound on generated minimal pages, whatever the target says
pub const MAX_MINIMAL_PAGES: usize = 400;

/// Delivery name for the multi-file bundle
pub const BUNDLE_NAME: &str = "compressed_pdfs.zip";
