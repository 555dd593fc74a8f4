/// Immutable handle to one input file: its bytes and its name.
///
/// Owned by the caller for the duration of a compression call and never
/// mutated; strategies that need a mutable document reload their own copy
/// from these bytes.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    name: String,
    bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// True when the buffer carries the PDF magic header.
    pub fn looks_like_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF-")
    }
}
