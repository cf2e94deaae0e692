//! Field extraction for both reader layouts
//!
//! Each layout is wrapped in a [`FieldSource`]; [`assemble_metadata`] turns
//! any source into a [`ParsedMetadata`] record so both strategies normalize
//! dates, UIDs and numbers the same way.

pub mod fields;
pub mod tags;

pub use fields::{Field, METADATA_FIELDS};

use crate::charset::{decode_iso2022, requires_iso2022_decoding, DecodeOptions};
use crate::error::Result;
use crate::reader::{trim_value, ElementIndex, FullDataset, TagReader};
use crate::types::{parse_dicom_date, ExtractorOptions, FullMetadata, ParsedMetadata};
use log::debug;

/// Reads field values out of one parsed file
pub trait FieldSource {
    fn text(&self, field: &Field) -> Option<String>;
    fn integer(&self, field: &Field) -> Option<i32>;
}

/// Field values looked up by dictionary keyword on a full parse
struct KeywordSource<'a> {
    dataset: &'a FullDataset,
}

impl FieldSource for KeywordSource<'_> {
    fn text(&self, field: &Field) -> Option<String> {
        self.dataset.read_string_by_name(field.keyword)
    }

    fn integer(&self, field: &Field) -> Option<i32> {
        self.dataset.read_int_by_name(field.keyword)
    }
}

/// Field values read by tag from the element-offset index
///
/// When the file declares an ISO 2022 or `ISO_IR` character set, text goes
/// through [`decode_iso2022`] over the raw value bytes.
struct OffsetSource<'a, 'b> {
    index: &'a ElementIndex<'b>,
    iso2022: bool,
    trace_raw_bytes: bool,
}

impl FieldSource for OffsetSource<'_, '_> {
    fn text(&self, field: &Field) -> Option<String> {
        if !self.iso2022 {
            return self.index.read_string(field.tag);
        }

        let raw = self.index.read_raw_bytes(field.tag)?;
        let options = DecodeOptions {
            trace_raw_bytes: self.trace_raw_bytes,
            label: Some(field.keyword),
        };
        decode_iso2022(&raw, options)
            .map(|text| trim_value(&text).to_string())
            .filter(|text| !text.is_empty())
    }

    fn integer(&self, field: &Field) -> Option<i32> {
        self.index.read_int(field.tag)
    }
}

/// Builds a record from a field source
///
/// Absent UIDs become empty strings; dates that are not real calendar
/// dates become `None`.
pub fn assemble_metadata<S: FieldSource>(
    source: &S,
    full_metadata: FullMetadata,
) -> ParsedMetadata {
    let date = |field: &Field| source.text(field).as_deref().and_then(parse_dicom_date);

    ParsedMetadata {
        study_instance_uid: source.text(&fields::STUDY_INSTANCE_UID).unwrap_or_default(),
        series_instance_uid: source.text(&fields::SERIES_INSTANCE_UID).unwrap_or_default(),
        sop_instance_uid: source.text(&fields::SOP_INSTANCE_UID).unwrap_or_default(),

        patient_id: source.text(&fields::PATIENT_ID),
        patient_name: source.text(&fields::PATIENT_NAME),
        patient_birth_date: date(&fields::PATIENT_BIRTH_DATE),
        patient_sex: source.text(&fields::PATIENT_SEX),

        study_date: date(&fields::STUDY_DATE),
        study_time: source.text(&fields::STUDY_TIME),
        study_description: source.text(&fields::STUDY_DESCRIPTION),
        accession_number: source.text(&fields::ACCESSION_NUMBER),

        modality: source.text(&fields::MODALITY),
        series_number: source.integer(&fields::SERIES_NUMBER),
        series_description: source.text(&fields::SERIES_DESCRIPTION),

        instance_number: source.integer(&fields::INSTANCE_NUMBER),
        rows: source.integer(&fields::ROWS),
        columns: source.integer(&fields::COLUMNS),
        number_of_frames: source.integer(&fields::NUMBER_OF_FRAMES),

        manufacturer: source.text(&fields::MANUFACTURER),
        manufacturer_model_name: source.text(&fields::MANUFACTURER_MODEL_NAME),
        body_part_examined: source.text(&fields::BODY_PART_EXAMINED),

        image_type: source.text(&fields::IMAGE_TYPE),
        content_date: date(&fields::CONTENT_DATE),
        content_time: source.text(&fields::CONTENT_TIME),
        acquisition_date: date(&fields::ACQUISITION_DATE),
        acquisition_time: source.text(&fields::ACQUISITION_TIME),

        full_metadata,
    }
}

/// Extracts a record through the full-dataset layout
///
/// `full_metadata` holds the naturalized dataset plus an entry for every
/// consulted keyword, `None` where the file has no value.
pub fn extract_full_dataset(bytes: &[u8]) -> Result<ParsedMetadata> {
    let dataset = FullDataset::parse(bytes)?;

    let mut full_metadata = dataset.naturalized();
    for field in METADATA_FIELDS {
        full_metadata.insert_absent(field.keyword);
    }

    let source = KeywordSource { dataset: &dataset };
    Ok(assemble_metadata(&source, full_metadata))
}

/// Extracts a record through the element-offset layout
///
/// `full_metadata` is the fallback marker.
pub fn extract_element_offset(
    bytes: &[u8],
    options: &ExtractorOptions,
) -> Result<ParsedMetadata> {
    let index = ElementIndex::parse(bytes)?;

    let charset = index
        .read_string(tags::SPECIFIC_CHARACTER_SET)
        .unwrap_or_default();
    let iso2022 = requires_iso2022_decoding(&charset);
    debug!(
        "Indexed {} elements (transfer syntax {}, character set {:?}, ISO 2022: {})",
        index.len(),
        index.transfer_syntax(),
        charset,
        iso2022
    );

    let source = OffsetSource {
        index: &index,
        iso2022,
        trace_raw_bytes: options.trace_raw_bytes,
    };
    Ok(assemble_metadata(&source, FullMetadata::fallback_marker()))
}
