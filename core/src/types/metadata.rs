use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Key under which the fallback marker stores its note
pub const FALLBACK_NOTE_KEY: &str = "note";

/// Note stored when the element-offset reader produced the record
pub const FALLBACK_NOTE: &str = "Parsed with element-offset reader (fallback)";

/// Keyword-indexed dump of a file's data elements
///
/// Keys are standard dictionary keywords (e.g. `PatientName`). A `None`
/// value marks an element that is empty or absent but was consulted
/// during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct FullMetadata(BTreeMap<String, Option<String>>);

impl FullMetadata {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker used in place of a full dump by the fallback path
    pub fn fallback_marker() -> Self {
        let mut map = BTreeMap::new();
        map.insert(
            FALLBACK_NOTE_KEY.to_string(),
            Some(FALLBACK_NOTE.to_string()),
        );
        Self(map)
    }

    /// Whether this mapping came from the fallback path
    pub fn is_fallback_marker(&self) -> bool {
        self.0
            .get(FALLBACK_NOTE_KEY)
            .and_then(|v| v.as_deref())
            .is_some_and(|note| note == FALLBACK_NOTE)
    }

    /// Looks up a value by keyword
    ///
    /// The outer `Option` tells whether the keyword is present at all.
    pub fn get(&self, keyword: &str) -> Option<Option<&str>> {
        self.0.get(keyword).map(|v| v.as_deref())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains_key(keyword)
    }

    pub fn insert(&mut self, keyword: impl Into<String>, value: Option<String>) {
        self.0.insert(keyword.into(), value);
    }

    /// Inserts `None` for a keyword unless already present
    pub fn insert_absent(&mut self, keyword: &str) {
        self.0.entry(keyword.to_string()).or_insert(None);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// Metadata extracted from a single DICOM file
///
/// The three UIDs are never invented: an absent UID is an empty string.
/// Date fields are `None` unless the file holds a real calendar date.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct ParsedMetadata {
    // Identity
    pub study_instance_uid: String,
    pub series_instance_uid: String,
    pub sop_instance_uid: String,

    // Patient
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub patient_birth_date: Option<NaiveDate>,
    pub patient_sex: Option<String>,

    // Study
    pub study_date: Option<NaiveDate>,
    pub study_time: Option<String>,
    pub study_description: Option<String>,
    pub accession_number: Option<String>,

    // Series
    pub modality: Option<String>,
    pub series_number: Option<i32>,
    pub series_description: Option<String>,

    // Instance
    pub instance_number: Option<i32>,
    pub rows: Option<i32>,
    pub columns: Option<i32>,
    pub number_of_frames: Option<i32>,

    // Device
    pub manufacturer: Option<String>,
    pub manufacturer_model_name: Option<String>,
    pub body_part_examined: Option<String>,

    /// ImageType values joined with `\`
    pub image_type: Option<String>,
    pub content_date: Option<NaiveDate>,
    pub content_time: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_time: Option<String>,

    /// Keyword dump of the dataset, or the fallback marker
    pub full_metadata: FullMetadata,
}

impl ParsedMetadata {
    /// Whether the record was produced by the element-offset fallback
    pub fn is_fallback(&self) -> bool {
        self.full_metadata.is_fallback_marker()
    }
}
