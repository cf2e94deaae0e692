//! Editing of user-correctable fields
//!
//! Only a short allow-list of descriptive fields may be changed; UIDs,
//! dates and acquisition parameters stay as read from the file.

use crate::error::{DicomMetaError, Result};
use crate::types::ParsedMetadata;
use std::fmt;
use std::str::FromStr;

/// Fields that may be edited after extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    PatientName,
    PatientId,
    StudyDescription,
    SeriesDescription,
    BodyPartExamined,
}

impl EditableField {
    pub const ALL: [EditableField; 5] = [
        EditableField::PatientName,
        EditableField::PatientId,
        EditableField::StudyDescription,
        EditableField::SeriesDescription,
        EditableField::BodyPartExamined,
    ];

    /// Dictionary keyword, also the key in `full_metadata`
    pub fn keyword(&self) -> &'static str {
        match self {
            EditableField::PatientName => "PatientName",
            EditableField::PatientId => "PatientID",
            EditableField::StudyDescription => "StudyDescription",
            EditableField::SeriesDescription => "SeriesDescription",
            EditableField::BodyPartExamined => "BodyPartExamined",
        }
    }

    /// camelCase name of the record field
    pub fn field_name(&self) -> &'static str {
        match self {
            EditableField::PatientName => "patientName",
            EditableField::PatientId => "patientId",
            EditableField::StudyDescription => "studyDescription",
            EditableField::SeriesDescription => "seriesDescription",
            EditableField::BodyPartExamined => "bodyPartExamined",
        }
    }

    fn slot<'m>(&self, metadata: &'m mut ParsedMetadata) -> &'m mut Option<String> {
        match self {
            EditableField::PatientName => &mut metadata.patient_name,
            EditableField::PatientId => &mut metadata.patient_id,
            EditableField::StudyDescription => &mut metadata.study_description,
            EditableField::SeriesDescription => &mut metadata.series_description,
            EditableField::BodyPartExamined => &mut metadata.body_part_examined,
        }
    }
}

impl FromStr for EditableField {
    type Err = DicomMetaError;

    /// Accepts the dictionary keyword or the camelCase field name
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.keyword() == s || field.field_name() == s)
            .ok_or_else(|| DicomMetaError::FieldNotEditable(s.to_string()))
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Whether `name` refers to an editable field
pub fn is_editable_field(name: &str) -> bool {
    name.parse::<EditableField>().is_ok()
}

/// Returns a copy of `metadata` with one field replaced
///
/// Both the record field and its `full_metadata` entry are overwritten; the
/// input is left untouched.
///
/// # Errors
///
/// Returns [`DicomMetaError::FieldNotEditable`] for fields outside the
/// allow-list.
///
/// # Example
///
/// ```
/// use dicommeta_core::{edit_metadata, ParsedMetadata};
///
/// let original = ParsedMetadata::default();
/// let edited = edit_metadata(&original, "patientName", "DOE^JANE").unwrap();
///
/// assert_eq!(edited.patient_name.as_deref(), Some("DOE^JANE"));
/// assert_eq!(original.patient_name, None);
/// assert!(edit_metadata(&original, "modality", "CT").is_err());
/// ```
pub fn edit_metadata(
    metadata: &ParsedMetadata,
    field: &str,
    value: impl Into<String>,
) -> Result<ParsedMetadata> {
    let field: EditableField = field.parse()?;
    let value = value.into();

    let mut edited = metadata.clone();
    *field.slot(&mut edited) = Some(value.clone());
    edited.full_metadata.insert(field.keyword(), Some(value));
    Ok(edited)
}
