use super::{locate_magic, parse_int_string, trim_value, TagReader};
use crate::error::{DicomMetaError, Result};
use crate::extraction::tags::{
    is_implicit_us, ITEM, ITEM_DELIMITATION_ITEM, SEQUENCE_DELIMITATION_ITEM, TRANSFER_SYNTAX_UID,
};
use dicom_core::{Tag, VR};
use std::borrow::Cow;
use std::collections::BTreeMap;

const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";
const EXPLICIT_VR_BIG_ENDIAN: &str = "1.2.840.10008.1.2.2";
const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1.99";

const UNDEFINED_LENGTH: u32 = 0xFFFF_FFFF;
const META_GROUP: u16 = 0x0002;
const DELIMITER_GROUP: u16 = 0xFFFE;

/// Byte layout of the data elements following the meta group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetEncoding {
    ExplicitLittle,
    ImplicitLittle,
    ExplicitBig,
}

impl DatasetEncoding {
    fn from_transfer_syntax(uid: &str) -> Result<Self> {
        match uid {
            IMPLICIT_VR_LITTLE_ENDIAN => Ok(DatasetEncoding::ImplicitLittle),
            EXPLICIT_VR_BIG_ENDIAN => Ok(DatasetEncoding::ExplicitBig),
            DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN => {
                Err(DicomMetaError::UnsupportedTransferSyntax(uid.to_string()))
            }
            // Compressed pixel data still comes with an explicit LE dataset
            _ => Ok(DatasetEncoding::ExplicitLittle),
        }
    }

    fn is_explicit(self) -> bool {
        !matches!(self, DatasetEncoding::ImplicitLittle)
    }

    fn is_big_endian(self) -> bool {
        matches!(self, DatasetEncoding::ExplicitBig)
    }
}

/// Location of one element's value within the original buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRange {
    /// Value representation, `None` when the dataset is implicit VR
    pub vr: Option<VR>,

    /// Offset of the first value byte
    pub offset: usize,

    /// Value length in bytes (for undefined-length elements, the span up
    /// to and including the sequence delimiter)
    pub length: usize,
}

impl ElementRange {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Open undefined-length container while skipping nested values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Sequence,
    Item,
}

/// Decoded element header
struct ElementHeader {
    tag: Tag,
    vr: Option<VR>,
    /// `None` for undefined length
    length: Option<usize>,
    value_offset: usize,
}

/// Tag → byte-range index over a Part 10 buffer
///
/// Built by walking the element headers once; values are only decoded when
/// read. Only top-level elements are indexed: sequences and encapsulated
/// pixel data are stepped over, and the first occurrence of a tag wins.
///
/// # Example
///
/// ```
/// use dicommeta_core::reader::ElementIndex;
///
/// // No DICM magic code at offset 128 or 0
/// assert!(ElementIndex::parse(&[0u8; 256]).is_err());
/// ```
#[derive(Debug)]
pub struct ElementIndex<'a> {
    bytes: &'a [u8],
    transfer_syntax: String,
    encoding: DatasetEncoding,
    elements: BTreeMap<Tag, ElementRange>,
}

impl<'a> ElementIndex<'a> {
    /// Indexes the meta group and top-level dataset of a Part 10 buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `DICM` magic code is missing
    /// - The meta group declares no transfer syntax, or a deflated one
    /// - An element header or value runs past the end of the buffer
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let magic = locate_magic(bytes)
            .ok_or_else(|| DicomMetaError::InvalidElement("missing DICM magic code".to_string()))?;

        let mut index = Self {
            bytes,
            transfer_syntax: String::new(),
            encoding: DatasetEncoding::ExplicitLittle,
            elements: BTreeMap::new(),
        };

        // File meta group, always explicit VR little endian
        let mut pos = magic + 4;
        while pos < bytes.len() && index.peek_group(pos)? == META_GROUP {
            pos = index.index_element(pos, DatasetEncoding::ExplicitLittle)?;
        }

        index.transfer_syntax = index
            .read_string(TRANSFER_SYNTAX_UID)
            .ok_or_else(|| DicomMetaError::InvalidElement("missing transfer syntax".to_string()))?;
        index.encoding = DatasetEncoding::from_transfer_syntax(&index.transfer_syntax)?;

        while pos < bytes.len() {
            pos = index.index_element(pos, index.encoding)?;
        }

        Ok(index)
    }

    /// Transfer syntax UID declared in the file meta group
    pub fn transfer_syntax(&self) -> &str {
        &self.transfer_syntax
    }

    pub fn get(&self, tag: Tag) -> Option<&ElementRange> {
        self.elements.get(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.elements.contains_key(&tag)
    }

    /// Indexed tags in ascending order
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.elements.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn value(&self, tag: Tag) -> Option<&'a [u8]> {
        let range = self.elements.get(&tag)?;
        self.bytes.get(range.offset..range.end())
    }

    /// Binary integer VR of an element, if it has one
    fn binary_int_vr(&self, tag: Tag) -> Option<VR> {
        match self.elements.get(&tag)?.vr {
            Some(vr @ (VR::US | VR::SS | VR::UL | VR::SL)) => Some(vr),
            Some(_) => None,
            None if is_implicit_us(tag) => Some(VR::US),
            None => None,
        }
    }

    /// Records the element at `pos` and returns the offset of the next one
    fn index_element(&mut self, pos: usize, encoding: DatasetEncoding) -> Result<usize> {
        let header = self.read_header(pos, encoding)?;
        let end = self.value_end(&header, encoding)?;

        self.elements.entry(header.tag).or_insert(ElementRange {
            vr: header.vr,
            offset: header.value_offset,
            length: end - header.value_offset,
        });
        Ok(end)
    }

    /// End offset of an element's value, stepping over undefined lengths
    fn value_end(&self, header: &ElementHeader, encoding: DatasetEncoding) -> Result<usize> {
        match header.length {
            Some(length) => self.defined_end(header, length),
            None => self.skip_undefined(header.value_offset, encoding),
        }
    }

    fn defined_end(&self, header: &ElementHeader, length: usize) -> Result<usize> {
        let end = header.value_offset + length;
        if end > self.bytes.len() {
            return Err(overrun(header.tag, header.value_offset, self.bytes.len()));
        }
        Ok(end)
    }

    /// Walks an undefined-length value up to its sequence delimiter
    ///
    /// Nested sequences and items are tracked on an explicit stack, so the
    /// nesting depth is bounded by the buffer size rather than the call
    /// stack. Returns the offset just past the delimiter.
    fn skip_undefined(&self, mut pos: usize, encoding: DatasetEncoding) -> Result<usize> {
        let mut open = vec![Container::Sequence];

        while let Some(&container) = open.last() {
            let start = pos;
            let header = self.read_header(pos, encoding)?;
            pos = header.value_offset;

            match (container, header.tag) {
                (Container::Sequence, SEQUENCE_DELIMITATION_ITEM)
                | (Container::Item, ITEM_DELIMITATION_ITEM) => {
                    open.pop();
                }
                (Container::Sequence, ITEM) => match header.length {
                    Some(length) => pos = self.defined_end(&header, length)?,
                    None => open.push(Container::Item),
                },
                (Container::Sequence, tag) => {
                    return Err(DicomMetaError::InvalidElement(format!(
                        "unexpected element ({:04X},{:04X}) at offset {} inside a sequence",
                        tag.group(),
                        tag.element(),
                        start
                    )))
                }
                (Container::Item, _) => match header.length {
                    Some(length) => pos = self.defined_end(&header, length)?,
                    None => open.push(Container::Sequence),
                },
            }
        }

        Ok(pos)
    }

    fn read_header(&self, pos: usize, encoding: DatasetEncoding) -> Result<ElementHeader> {
        let big = encoding.is_big_endian();
        let group = read_u16(self.bytes, pos, big)?;
        let element = read_u16(self.bytes, pos + 2, big)?;
        let tag = Tag(group, element);

        // Item and delimiter headers never carry a VR
        if group == DELIMITER_GROUP || !encoding.is_explicit() {
            let length = read_u32(self.bytes, pos + 4, big)?;
            return Ok(ElementHeader {
                tag,
                vr: None,
                length: defined(length),
                value_offset: pos + 8,
            });
        }

        let vr_bytes: [u8; 2] = self
            .bytes
            .get(pos + 4..pos + 6)
            .and_then(|raw| raw.try_into().ok())
            .ok_or_else(|| overrun(tag, pos + 4, self.bytes.len()))?;
        let vr = VR::from_binary(vr_bytes);

        if has_long_length(vr_bytes) {
            let length = read_u32(self.bytes, pos + 8, big)?;
            Ok(ElementHeader {
                tag,
                vr,
                length: defined(length),
                value_offset: pos + 12,
            })
        } else {
            let length = read_u16(self.bytes, pos + 6, big)?;
            Ok(ElementHeader {
                tag,
                vr,
                length: Some(length as usize),
                value_offset: pos + 8,
            })
        }
    }

    fn peek_group(&self, pos: usize) -> Result<u16> {
        read_u16(self.bytes, pos, false)
    }
}

impl TagReader for ElementIndex<'_> {
    /// Latin-1 text up to the first NUL, trimmed
    fn read_string(&self, tag: Tag) -> Option<String> {
        if self.binary_int_vr(tag).is_some() {
            return self.read_int(tag).map(|value| value.to_string());
        }

        let value = self.value(tag)?;
        let text = match value.iter().position(|&b| b == 0) {
            Some(nul) => &value[..nul],
            None => value,
        };
        let decoded = encoding_rs::mem::decode_latin1(text);
        let trimmed = trim_value(&decoded);
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn read_int(&self, tag: Tag) -> Option<i32> {
        let big = self.encoding.is_big_endian() && tag.group() != META_GROUP;
        match self.binary_int_vr(tag) {
            Some(VR::US) => read_u16(self.value(tag)?, 0, big).ok().map(i32::from),
            Some(VR::SS) => read_u16(self.value(tag)?, 0, big)
                .ok()
                .map(|v| i32::from(v as i16)),
            Some(VR::UL) => read_u32(self.value(tag)?, 0, big)
                .ok()
                .and_then(|v| i32::try_from(v).ok()),
            Some(_) => read_u32(self.value(tag)?, 0, big).ok().map(|v| v as i32),
            None => self.read_string(tag).as_deref().and_then(parse_int_string),
        }
    }

    fn read_raw_bytes(&self, tag: Tag) -> Option<Cow<'_, [u8]>> {
        self.value(tag).map(Cow::Borrowed)
    }
}

/// VRs encoded with 2 reserved bytes and a 32-bit length in explicit VR
fn has_long_length(vr: [u8; 2]) -> bool {
    matches!(
        &vr,
        b"OB" | b"OD" | b"OF" | b"OL" | b"OV" | b"OW" | b"SQ" | b"SV" | b"UC" | b"UN" | b"UR"
            | b"UT" | b"UV"
    )
}

fn defined(length: u32) -> Option<usize> {
    (length != UNDEFINED_LENGTH).then_some(length as usize)
}

fn read_u16(bytes: &[u8], pos: usize, big_endian: bool) -> Result<u16> {
    let raw: [u8; 2] = bytes
        .get(pos..pos + 2)
        .and_then(|raw| raw.try_into().ok())
        .ok_or_else(|| truncated(pos, bytes.len()))?;
    Ok(if big_endian {
        u16::from_be_bytes(raw)
    } else {
        u16::from_le_bytes(raw)
    })
}

fn read_u32(bytes: &[u8], pos: usize, big_endian: bool) -> Result<u32> {
    let raw: [u8; 4] = bytes
        .get(pos..pos + 4)
        .and_then(|raw| raw.try_into().ok())
        .ok_or_else(|| truncated(pos, bytes.len()))?;
    Ok(if big_endian {
        u32::from_be_bytes(raw)
    } else {
        u32::from_le_bytes(raw)
    })
}

fn truncated(pos: usize, len: usize) -> DicomMetaError {
    DicomMetaError::InvalidElement(format!(
        "truncated element header at offset {} (buffer is {} bytes)",
        pos, len
    ))
}

fn overrun(tag: Tag, pos: usize, len: usize) -> DicomMetaError {
    DicomMetaError::InvalidElement(format!(
        "element ({:04X},{:04X}) at offset {} overruns buffer of {} bytes",
        tag.group(),
        tag.element(),
        pos,
        len
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags;
    use crate::test_support::{DicomBuilder, Encoding};
    use rstest::rstest;

    fn sample(encoding: Encoding) -> Vec<u8> {
        DicomBuilder::new(encoding)
            .string(tags::SPECIFIC_CHARACTER_SET, "CS", "ISO_IR 100")
            .string(tags::SOP_INSTANCE_UID, "UI", "1.2.3.4.5")
            .string(tags::MODALITY, "CS", "MR")
            .string(tags::PATIENT_NAME, "PN", "DOE^JOHN")
            .string(tags::STUDY_DATE, "DA", "20240131")
            .string(tags::INSTANCE_NUMBER, "IS", "42")
            .us(tags::ROWS, 256)
            .us(tags::COLUMNS, 320)
            .build()
    }

    #[rstest]
    #[case(Encoding::ExplicitLittle)]
    #[case(Encoding::ImplicitLittle)]
    #[case(Encoding::ExplicitBig)]
    fn test_reads_top_level_elements(#[case] encoding: Encoding) {
        let bytes = sample(encoding);
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.transfer_syntax(), encoding.transfer_syntax());
        assert_eq!(index.read_string(tags::PATIENT_NAME).as_deref(), Some("DOE^JOHN"));
        assert_eq!(index.read_string(tags::MODALITY).as_deref(), Some("MR"));
        assert_eq!(
            index.read_string(tags::SOP_INSTANCE_UID).as_deref(),
            Some("1.2.3.4.5")
        );
        assert_eq!(index.read_int(tags::INSTANCE_NUMBER), Some(42));
        assert_eq!(index.read_int(tags::ROWS), Some(256));
        assert_eq!(index.read_int(tags::COLUMNS), Some(320));
        assert_eq!(index.read_string(tags::ROWS).as_deref(), Some("256"));
    }

    #[test]
    fn test_absent_and_non_numeric_values() {
        let bytes = sample(Encoding::ExplicitLittle);
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.read_string(tags::STUDY_DESCRIPTION), None);
        assert_eq!(index.read_int(tags::SERIES_NUMBER), None);
        assert_eq!(index.read_int(tags::MODALITY), None);
        assert!(index.read_raw_bytes(tags::ACCESSION_NUMBER).is_none());
    }

    #[test]
    fn test_raw_bytes_keep_padding() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .string(tags::MODALITY, "CS", "CT")
            .string(tags::PATIENT_ID, "LO", "ABC")
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(
            index.read_raw_bytes(tags::PATIENT_ID).as_deref(),
            Some(b"ABC ".as_slice())
        );
        assert_eq!(index.read_string(tags::PATIENT_ID).as_deref(), Some("ABC"));
    }

    #[test]
    fn test_string_stops_at_nul_and_decodes_latin1() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .bytes(tags::PATIENT_NAME, "PN", vec![b'M', 0xFC, b'L', b'L', 0x00, b'X'])
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.read_string(tags::PATIENT_NAME).as_deref(), Some("MüLL"));
    }

    #[test]
    fn test_meta_group_is_indexed() {
        let bytes = sample(Encoding::ImplicitLittle);
        let index = ElementIndex::parse(&bytes).unwrap();

        assert!(index.contains(TRANSFER_SYNTAX_UID));
        assert_eq!(
            index.get(TRANSFER_SYNTAX_UID).and_then(|range| range.vr),
            Some(VR::UI)
        );
        assert!(index.tags().next().is_some_and(|tag| tag.group() == 0x0002));
    }

    #[test]
    fn test_skips_undefined_length_sequence() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .string(tags::MODALITY, "CS", "CT")
            .undefined_sequence(
                Tag(0x0008, 0x1140),
                &[(tags::SOP_INSTANCE_UID, "UI", "9.9.9")],
            )
            .string(tags::PATIENT_NAME, "PN", "AFTER^SEQ")
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.read_string(tags::PATIENT_NAME).as_deref(), Some("AFTER^SEQ"));
        // Nested elements are not indexed
        assert_eq!(index.read_string(tags::SOP_INSTANCE_UID), None);
        assert!(index.contains(Tag(0x0008, 0x1140)));
    }

    #[test]
    fn test_skips_sequence_in_implicit_vr() {
        let bytes = DicomBuilder::new(Encoding::ImplicitLittle)
            .undefined_sequence(Tag(0x0008, 0x1140), &[(tags::MODALITY, "CS", "XA")])
            .string(tags::PATIENT_ID, "LO", "P1")
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.read_string(tags::PATIENT_ID).as_deref(), Some("P1"));
        assert_eq!(index.read_string(tags::MODALITY), None);
    }

    #[test]
    fn test_skips_deeply_nested_sequences() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .transfer_syntax("1.2.3.999.1")
            .nested_sequences(Tag(0x0008, 0x1140), 10_000)
            .string(tags::PATIENT_NAME, "PN", "DEEP^NEST")
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.read_string(tags::PATIENT_NAME).as_deref(), Some("DEEP^NEST"));
        assert!(index.contains(Tag(0x0008, 0x1140)));
    }

    #[test]
    fn test_unterminated_deep_nesting_is_an_error() {
        let mut bytes = DicomBuilder::new(Encoding::ImplicitLittle)
            .nested_sequences(Tag(0x0008, 0x1140), 10_000)
            .build();
        bytes.truncate(bytes.len() / 2);

        let err = ElementIndex::parse(&bytes).unwrap_err();
        assert!(matches!(err, DicomMetaError::InvalidElement(_)));
    }

    #[test]
    fn test_skips_encapsulated_pixel_data() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .string(tags::MODALITY, "CS", "US")
            .encapsulated_pixel_data(&[0xFF, 0xD8, 0xFF, 0xD9])
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.read_string(tags::MODALITY).as_deref(), Some("US"));
        let range = index.get(tags::PIXEL_DATA).unwrap();
        assert_eq!(range.end(), bytes.len());
    }

    #[test]
    fn test_truncated_value_is_an_error() {
        let mut bytes = sample(Encoding::ExplicitLittle);
        bytes.truncate(bytes.len() - 1);

        let err = ElementIndex::parse(&bytes).unwrap_err();
        assert!(matches!(err, DicomMetaError::InvalidElement(_)));
    }

    #[test]
    fn test_rejects_deflated_transfer_syntax() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .transfer_syntax(DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN)
            .string(tags::MODALITY, "CS", "CT")
            .build();

        let err = ElementIndex::parse(&bytes).unwrap_err();
        assert!(matches!(err, DicomMetaError::UnsupportedTransferSyntax(_)));
    }

    #[test]
    fn test_unknown_transfer_syntax_reads_as_explicit_little_endian() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .transfer_syntax("1.2.3.999.1")
            .string(tags::MODALITY, "CS", "OT")
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();

        assert_eq!(index.transfer_syntax(), "1.2.3.999.1");
        assert_eq!(index.read_string(tags::MODALITY).as_deref(), Some("OT"));
    }

    #[test]
    fn test_file_without_preamble() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle)
            .without_preamble()
            .string(tags::MODALITY, "CS", "DX")
            .build();
        let index = ElementIndex::parse(&bytes).unwrap();
        assert_eq!(index.read_string(tags::MODALITY).as_deref(), Some("DX"));
    }

    #[test]
    fn test_missing_magic_is_an_error() {
        let err = ElementIndex::parse(b"plain text, not DICOM").unwrap_err();
        assert!(err.to_string().contains("DICM"));
    }

    #[test]
    fn test_long_length_vrs() {
        assert!(has_long_length(*b"OB"));
        assert!(has_long_length(*b"UT"));
        assert!(has_long_length(*b"SQ"));
        assert!(!has_long_length(*b"PN"));
        assert!(!has_long_length(*b"US"));
    }
}
