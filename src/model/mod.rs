pub mod document;
pub mod intent;
pub mod record;

pub use document::SourceDocument;
pub use intent::CompressionIntent;
pub use record::{BatchMetrics, BatchRequest, BatchResult, CompressedFileRecord};
