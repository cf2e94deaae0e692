use super::{locate_magic, parse_int_string, trim_value, TagReader};
use crate::charset::is_supported_by_full_parser;
use crate::error::{DicomMetaError, Result};
use crate::extraction::tags::{PIXEL_DATA, SPECIFIC_CHARACTER_SET};
use crate::types::FullMetadata;
use dicom_core::dictionary::DataDictionary;
use dicom_core::header::Header;
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::{DefaultDicomObject, OpenFileOptions};
use std::borrow::Cow;
use std::io::Cursor;

/// Fully parsed dataset backed by `dicom-object`
///
/// Parsing stops before Pixel Data. Values are addressable by tag or by
/// standard dictionary keyword.
pub struct FullDataset {
    object: DefaultDicomObject,
}

impl FullDataset {
    /// Parses a Part 10 buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `DICM` magic code is missing
    /// - `dicom-object` rejects the file meta group or the dataset
    /// - The Specific Character Set names a repertoire this layout cannot
    ///   decode (e.g. `ISO 2022 IR 87`, `ISO_IR 13`)
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let magic = locate_magic(bytes)
            .ok_or_else(|| DicomMetaError::Dicom("missing DICM magic code".to_string()))?;

        let object = OpenFileOptions::new()
            .read_until(PIXEL_DATA)
            .from_reader(Cursor::new(bytes[magic..].to_vec()))?;

        let dataset = Self { object };
        if let Some(charset) = dataset.read_string(SPECIFIC_CHARACTER_SET) {
            if !is_supported_by_full_parser(&charset) {
                return Err(DicomMetaError::UnsupportedCharacterSet(charset));
            }
        }

        Ok(dataset)
    }

    /// Transfer syntax UID declared in the file meta group
    pub fn transfer_syntax(&self) -> &str {
        self.object.meta().transfer_syntax()
    }

    /// Reads a value by dictionary keyword (e.g. `PatientName`)
    ///
    /// Multiple values are joined with `\`.
    pub fn read_string_by_name(&self, keyword: &str) -> Option<String> {
        self.object
            .element_by_name(keyword)
            .ok()
            .and_then(|element| element.to_str().ok())
            .map(|value| trim_value(&value).to_string())
            .filter(|value| !value.is_empty())
    }

    /// Reads an integer value by dictionary keyword
    pub fn read_int_by_name(&self, keyword: &str) -> Option<i32> {
        self.read_string_by_name(keyword)
            .as_deref()
            .and_then(parse_int_string)
    }

    /// Keyword-indexed dump of the top-level text elements
    ///
    /// Sequences and binary values are left out. Tags missing from the
    /// standard dictionary are keyed as `GGGG,EEEE`.
    pub fn naturalized(&self) -> FullMetadata {
        let mut full = FullMetadata::new();
        for element in self.object.iter() {
            let vr = element.vr();
            if vr == VR::SQ || is_binary_vr(vr) {
                continue;
            }

            let tag = element.tag();
            let value = element
                .to_str()
                .ok()
                .map(|value| trim_value(&value).to_string())
                .filter(|value| !value.is_empty());
            full.insert(keyword_for(tag), value);
        }
        full
    }
}

impl TagReader for FullDataset {
    fn read_string(&self, tag: Tag) -> Option<String> {
        self.object
            .element(tag)
            .ok()
            .and_then(|element| element.to_str().ok())
            .map(|value| trim_value(&value).to_string())
            .filter(|value| !value.is_empty())
    }

    fn read_int(&self, tag: Tag) -> Option<i32> {
        self.read_string(tag).as_deref().and_then(parse_int_string)
    }

    fn read_raw_bytes(&self, tag: Tag) -> Option<Cow<'_, [u8]>> {
        self.object
            .element(tag)
            .ok()
            .and_then(|element| element.to_bytes().ok())
    }
}

fn is_binary_vr(vr: VR) -> bool {
    matches!(vr, VR::OB | VR::OD | VR::OF | VR::OL | VR::OW | VR::UN)
}

/// Dictionary keyword for a tag, or `GGGG,EEEE` when unknown
fn keyword_for(tag: Tag) -> String {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias.to_string())
        .unwrap_or_else(|| format!("{:04X},{:04X}", tag.group(), tag.element()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags;
    use crate::test_support::{DicomBuilder, Encoding};

    fn sample() -> Vec<u8> {
        DicomBuilder::new(Encoding::ExplicitLittle)
            .string(tags::SPECIFIC_CHARACTER_SET, "CS", "ISO_IR 192")
            .string(tags::IMAGE_TYPE, "CS", "ORIGINAL\\PRIMARY")
            .string(tags::SOP_INSTANCE_UID, "UI", "1.2.3.4")
            .string(tags::MODALITY, "CS", "CT")
            .string(tags::PATIENT_NAME, "PN", "山田^太郎")
            .string(tags::PATIENT_ID, "LO", "PID-7")
            .string(tags::SERIES_NUMBER, "IS", "3")
            .us(tags::ROWS, 512)
            .build()
    }

    #[test]
    fn test_parse_reads_by_keyword_and_tag() {
        let dataset = FullDataset::parse(&sample()).unwrap();

        assert_eq!(
            dataset.read_string_by_name("PatientName").as_deref(),
            Some("山田^太郎")
        );
        assert_eq!(dataset.read_string(tags::PATIENT_ID).as_deref(), Some("PID-7"));
        assert_eq!(dataset.read_int_by_name("SeriesNumber"), Some(3));
        assert_eq!(dataset.read_int(tags::ROWS), Some(512));
        assert_eq!(
            dataset.read_string(tags::SOP_INSTANCE_UID).as_deref(),
            Some("1.2.3.4")
        );
        assert_eq!(dataset.transfer_syntax(), "1.2.840.10008.1.2.1");
    }

    #[test]
    fn test_absent_values_are_none() {
        let dataset = FullDataset::parse(&sample()).unwrap();
        assert_eq!(dataset.read_string_by_name("StudyDescription"), None);
        assert_eq!(dataset.read_int_by_name("InstanceNumber"), None);
        assert_eq!(dataset.read_int(tags::MODALITY), None);
        assert_eq!(dataset.read_string_by_name("NotAKeyword"), None);
        assert!(dataset.read_raw_bytes(tags::ACCESSION_NUMBER).is_none());
    }

    #[test]
    fn test_multi_valued_string_is_joined() {
        let dataset = FullDataset::parse(&sample()).unwrap();
        assert_eq!(
            dataset.read_string_by_name("ImageType").as_deref(),
            Some("ORIGINAL\\PRIMARY")
        );
    }

    #[test]
    fn test_naturalized_uses_dictionary_keywords() {
        let dataset = FullDataset::parse(&sample()).unwrap();
        let full = dataset.naturalized();

        assert_eq!(full.get("Modality"), Some(Some("CT")));
        assert_eq!(full.get("PatientID"), Some(Some("PID-7")));
        assert_eq!(full.get("Rows"), Some(Some("512")));
        assert!(!full.is_fallback_marker());
    }

    #[test]
    fn test_rejects_unsupported_character_set() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .string(tags::SPECIFIC_CHARACTER_SET, "CS", "ISO 2022 IR 87")
            .string(tags::PATIENT_NAME, "PN", "YAMADA")
            .build();

        match FullDataset::parse(&bytes) {
            Err(DicomMetaError::UnsupportedCharacterSet(term)) => {
                assert_eq!(term, "ISO 2022 IR 87");
            }
            other => panic!("expected UnsupportedCharacterSet, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_rejects_missing_magic() {
        let result = FullDataset::parse(b"definitely not dicom");
        assert!(matches!(result, Err(DicomMetaError::Dicom(_))));
    }
}
