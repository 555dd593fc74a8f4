//! Sequential batch execution.
//!
//! Every file is validated before any file is processed; one file fully
//! completes before the next begins. Per-file failures accumulate and
//! never abort the batch.

use std::time::Instant;

use crate::codec::Capabilities;
use crate::config::Settings;
use crate::error::{BatchError, ValidationError};
use crate::model::{BatchMetrics, BatchRequest, BatchResult, CompressedFileRecord, SourceDocument};
use crate::orchestrator;

/// Per-file progress, reported as each file begins.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate<'a> {
    pub index: usize,
    pub total: usize,
    pub file_name: &'a str,
}

impl ProgressUpdate<'_> {
    pub fn percent(&self) -> f32 {
        (self.index + 1) as f32 / self.total.max(1) as f32 * 100.0
    }
}

/// Run one batch to completion.
pub fn run_batch(
    request: &BatchRequest,
    caps: &Capabilities,
    mut progress: Option<&mut dyn FnMut(ProgressUpdate)>,
) -> Result<BatchResult, BatchError> {
    validate(&request.files, &request.settings)?;

    let mut records = Vec::new();
    let mut failures = Vec::new();
    let mut metrics = BatchMetrics::default();

    let total = request.files.len();
    for (index, file) in request.files.iter().enumerate() {
        if let Some(report) = progress.as_deref_mut() {
            report(ProgressUpdate {
                index,
                total,
                file_name: file.name(),
            });
        }

        let started = Instant::now();
        match orchestrator::compress_document(file, &request.intent, &request.settings, caps) {
            Ok(outcome) => {
                let record = CompressedFileRecord {
                    file_name: file.name().to_string(),
                    original_size: file.size(),
                    compressed_bytes: outcome.bytes,
                    strategy: outcome.strategy,
                    elapsed_millis: started.elapsed().as_millis() as u64,
                };
                metrics.record(&record);
                records.push(record);
            }
            Err(error) => {
                log::warn!("{}; keeping the original file", error);
                failures.push(file.name().to_string());
            }
        }
    }

    if records.is_empty() {
        return Err(BatchError::NoFilesSucceeded);
    }
    Ok(BatchResult {
        records,
        failures,
        metrics,
    })
}

/// Check every file before any processing starts.
fn validate(files: &[SourceDocument], settings: &Settings) -> Result<(), ValidationError> {
    for file in files {
        if file.size() == 0 {
            return Err(ValidationError::Empty {
                name: file.name().to_string(),
            });
        }
        if !file.looks_like_pdf() {
            return Err(ValidationError::NotPdf {
                name: file.name().to_string(),
            });
        }
        if file.size() > settings.max_input_bytes {
            return Err(ValidationError::Oversized {
                name: file.name().to_string(),
                size: file.size(),
                limit: settings.max_input_bytes,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompressionIntent;
    use crate::test_support::bloated_document;

    fn corrupt_file(name: &str) -> SourceDocument {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.extend(vec![b'x'; 30_000]);
        SourceDocument::new(name, bytes)
    }

    #[test]
    fn test_one_corrupt_file_does_not_abort_the_batch() {
        let request = BatchRequest {
            files: vec![
                bloated_document("a.pdf", 2, 20_000),
                corrupt_file("broken.pdf"),
                bloated_document("c.pdf", 2, 20_000),
            ],
            // A level intent leaves the corrupt file with no fallback.
            intent: CompressionIntent::Level(crate::cli::CompressionLevel::High),
            settings: Settings::default(),
        };

        let result = run_batch(&request, &Capabilities::default(), None).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.failures, vec!["broken.pdf".to_string()]);
        assert_eq!(result.metrics.files_processed, 2);
    }

    #[test]
    fn test_wrong_file_type_stops_the_batch_before_processing() {
        let request = BatchRequest {
            files: vec![
                bloated_document("a.pdf", 2, 10_000),
                SourceDocument::new("notes.txt", b"just some text".to_vec()),
            ],
            intent: CompressionIntent::TargetBytes(10_000),
            settings: Settings::default(),
        };

        let mut announced = Vec::new();
        let mut progress = |update: ProgressUpdate| announced.push(update.file_name.to_string());
        let result = run_batch(&request, &Capabilities::default(), Some(&mut progress));

        assert!(matches!(
            result,
            Err(BatchError::Validation(ValidationError::NotPdf { .. }))
        ));
        // Validation failed before file one was announced.
        assert!(announced.is_empty());
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let settings = Settings {
            max_input_bytes: 1_000,
            ..Settings::default()
        };
        let request = BatchRequest {
            files: vec![bloated_document("a.pdf", 1, 20_000)],
            intent: CompressionIntent::TargetBytes(500),
            settings,
        };
        assert!(matches!(
            run_batch(&request, &Capabilities::default(), None),
            Err(BatchError::Validation(ValidationError::Oversized { .. }))
        ));
    }

    #[test]
    fn test_all_failures_is_a_batch_failure() {
        let request = BatchRequest {
            files: vec![corrupt_file("a.pdf"), corrupt_file("b.pdf")],
            intent: CompressionIntent::Level(crate::cli::CompressionLevel::Medium),
            settings: Settings::default(),
        };
        assert!(matches!(
            run_batch(&request, &Capabilities::default(), None),
            Err(BatchError::NoFilesSucceeded)
        ));
    }

    #[test]
    fn test_progress_reports_every_file_in_order() {
        let request = BatchRequest {
            files: vec![
                bloated_document("a.pdf", 1, 10_000),
                bloated_document("b.pdf", 1, 10_000),
                bloated_document("c.pdf", 1, 10_000),
            ],
            intent: CompressionIntent::TargetBytes(10_000),
            settings: Settings::default(),
        };

        let mut percents = Vec::new();
        let mut progress = |update: ProgressUpdate| percents.push(update.percent().round() as u32);
        run_batch(&request, &Capabilities::default(), Some(&mut progress)).unwrap();
        assert_eq!(percents, vec![33, 67, 100]);
    }
}
