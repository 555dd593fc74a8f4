use crate::config::Settings;
use crate::model::{CompressionIntent, SourceDocument};
use crate::strategy::StrategyKind;

/// Everything a batch run needs, assembled up front. Immutable for the
/// duration of the run.
#[derive(Debug)]
pub struct BatchRequest {
    pub files: Vec<SourceDocument>,
    pub intent: CompressionIntent,
    pub settings: Settings,
}

/// One successfully compressed file.
#[derive(Debug)]
pub struct CompressedFileRecord {
    pub file_name: String,
    pub original_size: u64,
    pub compressed_bytes: Vec<u8>,
    pub strategy: StrategyKind,
    pub elapsed_millis: u64,
}

impl CompressedFileRecord {
    pub fn compressed_size(&self) -> u64 {
        self.compressed_bytes.len() as u64
    }

    /// Size reduction as a percentage of the original.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let saved = self.original_size.saturating_sub(self.compressed_size());
        saved as f64 / self.original_size as f64 * 100.0
    }

    /// Delivery name for the compressed variant.
    pub fn output_name(&self) -> String {
        format!("compressed_{}", self.file_name)
    }
}

/// Running aggregate over one batch. Reset at the start of each run.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchMetrics {
    pub total_original_bytes: u64,
    pub total_compressed_bytes: u64,
    pub files_processed: usize,
    pub total_elapsed_millis: u64,
}

impl BatchMetrics {
    pub fn record(&mut self, record: &CompressedFileRecord) {
        self.total_original_bytes += record.original_size;
        self.total_compressed_bytes += record.compressed_size();
        self.files_processed += 1;
        self.total_elapsed_millis += record.elapsed_millis;
    }

    pub fn total_saved_bytes(&self) -> u64 {
        self.total_original_bytes
            .saturating_sub(self.total_compressed_bytes)
    }

    pub fn average_reduction_percent(&self) -> f64 {
        if self.total_original_bytes == 0 {
            return 0.0;
        }
        self.total_saved_bytes() as f64 / self.total_original_bytes as f64 * 100.0
    }
}

/// Outcome of a batch run: successful records plus the names of files that
/// could not be reduced.
#[derive(Debug)]
pub struct BatchResult {
    pub records: Vec<CompressedFileRecord>,
    pub failures: Vec<String>,
    pub metrics: BatchMetrics,
}
