use crate::cli::CompressionLevel;

/// What the caller wants from a compression run: a qualitative level, or an
/// explicit byte target. Exactly one is active per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionIntent {
    Level(CompressionLevel),
    TargetBytes(u64),
}

impl CompressionIntent {
    /// Build a target intent from a kilobyte count, rejecting zero.
    pub fn target_kilobytes(kb: u64) -> Option<Self> {
        (kb > 0).then(|| CompressionIntent::TargetBytes(kb * 1024))
    }

    pub fn target_bytes(&self) -> Option<u64> {
        match self {
            CompressionIntent::TargetBytes(bytes) => Some(*bytes),
            CompressionIntent::Level(_) => None,
        }
    }

    /// Desired output/input size ratio for a given source, capped at 1.0.
    /// Only target intents have one.
    pub fn ratio_for(&self, source_size: u64) -> Option<f32> {
        let target = self.target_bytes()?;
        if source_size == 0 {
            return None;
        }
        Some((target as f64 / source_size as f64).min(1.0) as f32)
    }

    /// Levels never remove pages; only target intents may.
    pub fn may_remove_pages(&self) -> bool {
        matches!(self, CompressionIntent::TargetBytes(_))
    }
}
