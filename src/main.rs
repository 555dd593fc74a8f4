use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

use pdf_shrink::batch::{run_batch, ProgressUpdate};
use pdf_shrink::cli::Args;
use pdf_shrink::codec::{ArchiveBuilder, ArchiveEntry, Capabilities, ZipArchiveBuilder};
use pdf_shrink::config::defaults::BUNDLE_NAME;
use pdf_shrink::config::Settings;
use pdf_shrink::model::{BatchRequest, BatchResult, SourceDocument};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    // Read input files
    let mut files = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(SourceDocument::new(name, bytes));
    }

    log::info!("Compressing {} file(s)", files.len());

    let request = BatchRequest {
        files,
        intent: args.intent(),
        settings: Settings::from_args(&args),
    };

    let mut progress = |update: ProgressUpdate| {
        log::info!(
            "Compressing {} ({} of {}, {:.0}%)",
            update.file_name,
            update.index + 1,
            update.total,
            update.percent()
        );
    };
    let result = run_batch(&request, &Capabilities::default(), Some(&mut progress))
        .with_context(|| "Batch compression failed")?;

    // Deliver outputs
    let output_dir = args.output_dir();
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    if args.bundle && result.records.len() > 1 {
        deliver_bundle(&output_dir, &result)?;
    } else {
        deliver_individually(&output_dir, &result)?;
    }

    for failure in &result.failures {
        eprintln!("warning: {} could not be reduced; original kept", failure);
    }

    let metrics = &result.metrics;
    println!(
        "Compressed {} of {} file(s), saved {} ({:.1}% average reduction)",
        result.records.len(),
        request.files.len(),
        human_size(metrics.total_saved_bytes()),
        metrics.average_reduction_percent()
    );

    Ok(())
}

/// Write the multi-file ZIP bundle, falling back to individual files when
/// archive creation fails.
fn deliver_bundle(output_dir: &Path, result: &BatchResult) -> Result<()> {
    let entries: Vec<ArchiveEntry> = result
        .records
        .iter()
        .map(|record| ArchiveEntry {
            name: record.output_name(),
            bytes: record.compressed_bytes.clone(),
        })
        .collect();

    match ZipArchiveBuilder.build(&entries) {
        Ok(bytes) => {
            let path = output_dir.join(BUNDLE_NAME);
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write bundle: {}", path.display()))?;
            println!("Wrote bundle {}", path.display());
            Ok(())
        }
        Err(error) => {
            log::warn!("bundling failed ({}); delivering files individually", error);
            deliver_individually(output_dir, result)
        }
    }
}

fn deliver_individually(output_dir: &Path, result: &BatchResult) -> Result<()> {
    for record in &result.records {
        let path = output_dir.join(record.output_name());
        fs::write(&path, &record.compressed_bytes)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        println!(
            "Wrote {} ({} -> {}, {:.1}% smaller)",
            path.display(),
            human_size(record.original_size),
            human_size(record.compressed_size()),
            record.reduction_percent()
        );
    }
    Ok(())
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
