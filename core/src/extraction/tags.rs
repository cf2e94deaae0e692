use dicom_core::Tag;

// File Meta Tags
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);

// Character Set
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);

// Study/Series/Instance Identification Tags
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);

// Study Tags
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);

// Series Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// Instance / Image Geometry Tags
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);

// Device/Manufacturer Tags
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);

// Image Tags
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
pub const CONTENT_DATE: Tag = Tag(0x0008, 0x0023);
pub const CONTENT_TIME: Tag = Tag(0x0008, 0x0033);
pub const ACQUISITION_DATE: Tag = Tag(0x0008, 0x0022);
pub const ACQUISITION_TIME: Tag = Tag(0x0008, 0x0032);

pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

// Item and delimiter tags (group FFFE)
pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
pub const ITEM_DELIMITATION_ITEM: Tag = Tag(0xFFFE, 0xE00D);
pub const SEQUENCE_DELIMITATION_ITEM: Tag = Tag(0xFFFE, 0xE0DD);

/// Tags whose value is a binary unsigned short in implicit VR datasets
///
/// Implicit VR carries no type information, so integer reads need to know
/// which attributes are binary rather than integer strings.
pub fn is_implicit_us(tag: Tag) -> bool {
    matches!(
        tag,
        ROWS | COLUMNS
            | SAMPLES_PER_PIXEL
            | BITS_ALLOCATED
            | BITS_STORED
            | HIGH_BIT
            | PIXEL_REPRESENTATION
    )
}
