use super::tags;
use dicom_core::Tag;

/// A metadata field: its dictionary keyword and tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub keyword: &'static str,
    pub tag: Tag,
}

impl Field {
    pub const fn new(keyword: &'static str, tag: Tag) -> Self {
        Self { keyword, tag }
    }
}

pub const STUDY_INSTANCE_UID: Field = Field::new("StudyInstanceUID", tags::STUDY_INSTANCE_UID);
pub const SERIES_INSTANCE_UID: Field =
    Field::new("SeriesInstanceUID", tags::SERIES_INSTANCE_UID);
pub const SOP_INSTANCE_UID: Field = Field::new("SOPInstanceUID", tags::SOP_INSTANCE_UID);

pub const PATIENT_ID: Field = Field::new("PatientID", tags::PATIENT_ID);
pub const PATIENT_NAME: Field = Field::new("PatientName", tags::PATIENT_NAME);
pub const PATIENT_BIRTH_DATE: Field = Field::new("PatientBirthDate", tags::PATIENT_BIRTH_DATE);
pub const PATIENT_SEX: Field = Field::new("PatientSex", tags::PATIENT_SEX);

pub const STUDY_DATE: Field = Field::new("StudyDate", tags::STUDY_DATE);
pub const STUDY_TIME: Field = Field::new("StudyTime", tags::STUDY_TIME);
pub const STUDY_DESCRIPTION: Field = Field::new("StudyDescription", tags::STUDY_DESCRIPTION);
pub const ACCESSION_NUMBER: Field = Field::new("AccessionNumber", tags::ACCESSION_NUMBER);

pub const MODALITY: Field = Field::new("Modality", tags::MODALITY);
pub const SERIES_NUMBER: Field = Field::new("SeriesNumber", tags::SERIES_NUMBER);
pub const SERIES_DESCRIPTION: Field = Field::new("SeriesDescription", tags::SERIES_DESCRIPTION);

pub const INSTANCE_NUMBER: Field = Field::new("InstanceNumber", tags::INSTANCE_NUMBER);
pub const ROWS: Field = Field::new("Rows", tags::ROWS);
pub const COLUMNS: Field = Field::new("Columns", tags::COLUMNS);
pub const NUMBER_OF_FRAMES: Field = Field::new("NumberOfFrames", tags::NUMBER_OF_FRAMES);

pub const MANUFACTURER: Field = Field::new("Manufacturer", tags::MANUFACTURER);
pub const MANUFACTURER_MODEL_NAME: Field =
    Field::new("ManufacturerModelName", tags::MANUFACTURER_MODEL_NAME);
pub const BODY_PART_EXAMINED: Field = Field::new("BodyPartExamined", tags::BODY_PART_EXAMINED);

pub const IMAGE_TYPE: Field = Field::new("ImageType", tags::IMAGE_TYPE);
pub const CONTENT_DATE: Field = Field::new("ContentDate", tags::CONTENT_DATE);
pub const CONTENT_TIME: Field = Field::new("ContentTime", tags::CONTENT_TIME);
pub const ACQUISITION_DATE: Field = Field::new("AcquisitionDate", tags::ACQUISITION_DATE);
pub const ACQUISITION_TIME: Field = Field::new("AcquisitionTime", tags::ACQUISITION_TIME);

/// Every field the extractor consults, in record order
pub const METADATA_FIELDS: [Field; 26] = [
    STUDY_INSTANCE_UID,
    SERIES_INSTANCE_UID,
    SOP_INSTANCE_UID,
    PATIENT_ID,
    PATIENT_NAME,
    PATIENT_BIRTH_DATE,
    PATIENT_SEX,
    STUDY_DATE,
    STUDY_TIME,
    STUDY_DESCRIPTION,
    ACCESSION_NUMBER,
    MODALITY,
    SERIES_NUMBER,
    SERIES_DESCRIPTION,
    INSTANCE_NUMBER,
    ROWS,
    COLUMNS,
    NUMBER_OF_FRAMES,
    MANUFACTURER,
    MANUFACTURER_MODEL_NAME,
    BODY_PART_EXAMINED,
    IMAGE_TYPE,
    CONTENT_DATE,
    CONTENT_TIME,
    ACQUISITION_DATE,
    ACQUISITION_TIME,
];
