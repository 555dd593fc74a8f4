use thiserror::Error;

/// Errors raised while checking inputs, before any compression work starts.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{name}: not recognized as a PDF file")]
    NotPdf { name: String },

    #[error("{name}: {size} bytes exceeds the {limit} byte input ceiling")]
    Oversized { name: String, size: u64, limit: u64 },

    #[error("{name}: file is empty")]
    Empty { name: String },
}

/// A failure inside a single strategy attempt. Recovered by the
/// orchestrator, which advances to the next strategy in the cascade.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("failed to decode PDF: {0}")]
    Decode(String),

    #[error("document is encrypted")]
    Encrypted,

    #[error("no page renderer available")]
    RendererUnavailable,

    #[error("failed to render page {page}: {message}")]
    Render { page: usize, message: String },

    #[error("failed to encode image: {0}")]
    ImageEncode(String),

    #[error("failed to assemble document: {0}")]
    Assemble(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("placeholder fallback is disabled")]
    PlaceholderDisabled,

    #[error("strategy requires a target size")]
    TargetRequired,
}

/// Terminal per-file outcome: every strategy rejected and no fallback
/// applied. The caller keeps the original file.
#[derive(Error, Debug)]
pub enum CompressError {
    #[error("no strategy reduced {name} below its original {size} bytes")]
    NoReduction { name: String, size: u64 },
}

/// Batch-level failures.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no files could be compressed")]
    NoFilesSucceeded,
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to build archive: {0}")]
    Build(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
