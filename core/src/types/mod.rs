//! Core type definitions for DICOM metadata records
//!
//! This module provides the data model produced by the extractor:
//! - [`ParsedMetadata`]: the normalized per-file record
//! - [`FullMetadata`]: keyword dump of the dataset (or the fallback marker)
//! - [`FileParseResult`]: per-file outcome of batch processing
//! - [`ExtractorOptions`]: extraction configuration
//! - [`MetadataSummary`]: display summary with placeholders
//! - [`parse_dicom_date`] / [`parse_dicom_time`]: DA/TM normalization

mod datetime;
mod metadata;
mod options;
mod result;
mod summary;

pub use datetime::{parse_dicom_date, parse_dicom_time};
pub use metadata::{FullMetadata, ParsedMetadata, FALLBACK_NOTE, FALLBACK_NOTE_KEY};
pub use options::ExtractorOptions;
pub use result::{DicomInput, FileParseResult, ParseStatus};
pub use summary::{
    InstanceSummary, MetadataSummary, PatientSummary, SeriesSummary, StudySummary,
};
