use crate::error::{DicomMetaError, Result};
use crate::extraction::{extract_element_offset, extract_full_dataset};
use crate::reader::Strategy;
use crate::types::{ExtractorOptions, ParsedMetadata};
use log::{debug, warn};

/// Main extractor for DICOM metadata
///
/// Reads a file with the full-dataset parser first. When that fails
/// (unsupported transfer syntax, a character set the parser cannot decode,
/// a corrupt dataset) the element-offset reader takes over, decoding
/// ISO 2022 Japanese text itself.
///
/// # Example
///
/// ```no_run
/// use dicommeta_core::MetadataExtractor;
///
/// let bytes = std::fs::read("image.dcm")?;
/// let metadata = MetadataExtractor::extract(&bytes)?;
///
/// println!("{:?} {:?}", metadata.patient_name, metadata.study_date);
/// if metadata.is_fallback() {
///     println!("read with the element-offset reader");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extracts metadata from an in-memory Part 10 file
    ///
    /// # Errors
    ///
    /// Returns [`DicomMetaError::ExtractionFailed`] carrying the full-dataset
    /// error when both strategies fail.
    ///
    /// ```
    /// use dicommeta_core::MetadataExtractor;
    ///
    /// let err = MetadataExtractor::extract(b"not a DICOM file").unwrap_err();
    /// assert!(err.to_string().starts_with("Failed to parse DICOM file:"));
    /// ```
    pub fn extract(bytes: &[u8]) -> Result<ParsedMetadata> {
        Self::extract_with_options(bytes, &ExtractorOptions::default())
    }

    /// Extracts metadata with explicit options
    ///
    /// With `force_element_offset` set, the full-dataset parse is skipped
    /// and its errors are reported directly.
    pub fn extract_with_options(
        bytes: &[u8],
        options: &ExtractorOptions,
    ) -> Result<ParsedMetadata> {
        if options.force_element_offset {
            return Self::extract_with(Strategy::ElementOffset, bytes, options);
        }

        let primary_err = match Self::extract_with(Strategy::FullDataset, bytes, options) {
            Ok(metadata) => return Ok(metadata),
            Err(e) => e,
        };
        warn!(
            "Full-dataset parse failed ({}), retrying with {} reader",
            primary_err,
            Strategy::ElementOffset
        );

        Self::extract_with(Strategy::ElementOffset, bytes, options).map_err(|fallback_err| {
            debug!("{} reader failed: {}", Strategy::ElementOffset, fallback_err);
            DicomMetaError::ExtractionFailed(primary_err.to_string())
        })
    }

    /// Runs a single strategy, without fallback
    pub fn extract_with(
        strategy: Strategy,
        bytes: &[u8],
        options: &ExtractorOptions,
    ) -> Result<ParsedMetadata> {
        match strategy {
            Strategy::FullDataset => extract_full_dataset(bytes),
            Strategy::ElementOffset => extract_element_offset(bytes, options),
        }
    }
}
