use super::ParsedMetadata;
use std::fmt;

/// Outcome of parsing one file in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum ParseStatus {
    Success,
    Error,
}

impl ParseStatus {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ParseStatus::Success => "success",
            ParseStatus::Error => "error",
        }
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// One input file: display name plus its full contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicomInput {
    pub name: String,
    pub data: Vec<u8>,
}

impl DicomInput {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Size of the file in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Per-file result of batch processing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct FileParseResult {
    /// Display name of the input file
    pub file_name: String,

    /// Size of the input in bytes (0 when it could not be read)
    pub file_size: usize,

    /// Extracted metadata, present on success
    pub metadata: Option<ParsedMetadata>,

    pub status: ParseStatus,

    /// Failure message, present on error
    pub error: Option<String>,
}

impl FileParseResult {
    pub fn success(
        file_name: impl Into<String>,
        file_size: usize,
        metadata: ParsedMetadata,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            metadata: Some(metadata),
            status: ParseStatus::Success,
            error: None,
        }
    }

    pub fn failure(
        file_name: impl Into<String>,
        file_size: usize,
        error: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            metadata: None,
            status: ParseStatus::Error,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }
}
