pub mod assemble;
pub mod batch;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod estimate;
pub mod model;
pub mod orchestrator;
pub mod pdf;
pub mod strategy;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{run_batch, ProgressUpdate};
pub use cli::CompressionLevel;
pub use codec::Capabilities;
pub use config::Settings;
pub use error::{BatchError, CompressError, StrategyError, ValidationError};
pub use model::{BatchRequest, BatchResult, CompressionIntent, SourceDocument};
pub use orchestrator::{compress_document, CompressionOutcome};
pub use strategy::StrategyKind;

/// High-level API for compressing a set of PDFs.
///
/// This is the recommended entry point for library consumers. It runs the
/// whole batch with the default capabilities (no rasterizer, the built-in
/// JPEG codec) and no progress reporting. Callers that can render pages or
/// want progress callbacks should use [`run_batch`] directly.
///
/// # Example
///
/// ```no_run
/// use pdf_shrink::{compress_batch, BatchRequest, CompressionIntent, Settings, SourceDocument};
///
/// let bytes = std::fs::read("input.pdf").unwrap();
/// let request = BatchRequest {
///     files: vec![SourceDocument::new("input.pdf", bytes)],
///     intent: CompressionIntent::target_kilobytes(500).unwrap(),
///     settings: Settings::default(),
/// };
///
/// let result = compress_batch(&request).unwrap();
/// for record in &result.records {
///     std::fs::write(record.output_name(), &record.compressed_bytes).unwrap();
/// }
/// ```
pub fn compress_batch(request: &BatchRequest) -> Result<BatchResult, BatchError> {
    run_batch(request, &Capabilities::default(), None)
}
