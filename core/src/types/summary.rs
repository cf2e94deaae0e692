use super::ParsedMetadata;
use chrono::NaiveDate;

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_PATIENT: &str = "Unknown";

/// Display-oriented summary of a parsed record
///
/// Missing values are replaced with placeholders so views can render
/// every row without branching.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetadataSummary {
    pub patient: PatientSummary,
    pub study: StudySummary,
    pub series: SeriesSummary,
    pub instance: InstanceSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct PatientSummary {
    pub name: String,
    pub id: String,
    pub sex: String,
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StudySummary {
    pub description: String,
    pub date: String,
    pub time: String,
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SeriesSummary {
    pub modality: String,
    pub description: String,
    pub number: String,
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InstanceSummary {
    pub number: String,
    pub uid: String,
}

fn text_or_na(value: &Option<String>) -> String {
    value.as_deref().unwrap_or(NOT_AVAILABLE).to_string()
}

fn date_or_na(value: &Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn number_or_na(value: &Option<i32>) -> String {
    value
        .map(|n| n.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl From<&ParsedMetadata> for MetadataSummary {
    fn from(metadata: &ParsedMetadata) -> Self {
        Self {
            patient: PatientSummary {
                name: metadata
                    .patient_name
                    .as_deref()
                    .unwrap_or(UNKNOWN_PATIENT)
                    .to_string(),
                id: text_or_na(&metadata.patient_id),
                sex: text_or_na(&metadata.patient_sex),
                birth_date: date_or_na(&metadata.patient_birth_date),
            },
            study: StudySummary {
                description: text_or_na(&metadata.study_description),
                date: date_or_na(&metadata.study_date),
                time: text_or_na(&metadata.study_time),
                uid: metadata.study_instance_uid.clone(),
            },
            series: SeriesSummary {
                modality: text_or_na(&metadata.modality),
                description: text_or_na(&metadata.series_description),
                number: number_or_na(&metadata.series_number),
                uid: metadata.series_instance_uid.clone(),
            },
            instance: InstanceSummary {
                number: number_or_na(&metadata.instance_number),
                uid: metadata.sop_instance_uid.clone(),
            },
        }
    }
}
