use thiserror::Error;

/// Result type for dicommeta operations
pub type Result<T> = std::result::Result<T, DicomMetaError>;

/// Error types for dicommeta operations
#[derive(Error, Debug)]
pub enum DicomMetaError {
    /// DICOM reading error from the full-dataset parser
    #[error("DICOM error: {0}")]
    Dicom(String),

    /// Declared character set the full-dataset parser cannot decode
    #[error("Unsupported character set: {0}")]
    UnsupportedCharacterSet(String),

    /// Transfer syntax the element-offset reader cannot walk
    #[error("Unsupported transfer syntax: {0}")]
    UnsupportedTransferSyntax(String),

    /// Malformed or truncated data element
    #[error("Invalid element: {0}")]
    InvalidElement(String),

    /// Both parsing strategies failed; carries the primary cause
    #[error("Failed to parse DICOM file: {0}")]
    ExtractionFailed(String),

    /// Edit requested on a field outside the allow-list
    #[error("Field {0} is not editable")]
    FieldNotEditable(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for DicomMetaError {
    fn from(e: dicom_object::ReadError) -> Self {
        DicomMetaError::Dicom(format!("{}", e))
    }
}
