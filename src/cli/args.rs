use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::model::CompressionIntent;

#[derive(Parser, Debug)]
#[command(name = "pdf-shrink")]
#[command(
    author,
    version,
    about = "Shrink PDF files through a fallback cascade of compression strategies"
)]
pub struct Args {
    /// Input PDF file paths
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to the current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Compression level
    #[arg(short, long, value_enum, default_value = "medium", conflicts_with = "target_size")]
    pub level: CompressionLevel,

    /// Target output size in kilobytes (mutually exclusive with --level)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub target_size: Option<u64>,

    /// Bundle all outputs into a single ZIP archive
    #[arg(long)]
    pub bundle: bool,

    /// Never substitute generated placeholder pages for original content
    #[arg(long)]
    pub no_placeholder: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Qualitative compression level
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum CompressionLevel {
    /// Light compression, best fidelity
    Low,
    /// Balanced compression
    #[default]
    Medium,
    /// Aggressive compression, smallest output
    High,
}

impl Args {
    /// The compression intent selected by the caller. An explicit target
    /// size wins over the level.
    pub fn intent(&self) -> CompressionIntent {
        match self.target_size {
            Some(kb) => CompressionIntent::target_kilobytes(kb)
                .unwrap_or(CompressionIntent::Level(self.level)),
            None => CompressionIntent::Level(self.level),
        }
    }

    /// Get the output directory, defaulting to the current directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
