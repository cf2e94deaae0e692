pub mod report;

use crate::types::ExtractorOptions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dicommeta
#[derive(Parser, Debug)]
#[command(name = "dicommeta")]
#[command(about = "DICOM metadata extraction with ISO 2022 Japanese text support")]
#[command(version)]
pub struct Cli {
    /// Paths to DICOM files
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log raw bytes of fields decoded as ISO 2022 (needs --verbose)
    #[arg(long)]
    pub trace_bytes: bool,

    /// Read every file with the element-offset reader only
    #[arg(long)]
    pub force_fallback: bool,
}

impl Cli {
    pub fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions::default()
            .with_trace_raw_bytes(self.trace_bytes)
            .with_force_element_offset(self.force_fallback)
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}
