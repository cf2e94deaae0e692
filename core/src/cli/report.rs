use crate::types::{parse_dicom_time, FileParseResult, MetadataSummary};
use std::fmt;

/// Text report for one file's parse result
pub struct TextReport<'a> {
    result: &'a FileParseResult,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(result: &'a FileParseResult) -> Self {
        Self { result }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.result.file_name)?;
        writeln!(f, "{}", "=".repeat(self.result.file_name.chars().count()))?;
        writeln!(f, "Size:           {} bytes", self.result.file_size)?;
        writeln!(f, "Status:         {}", self.result.status)?;

        let Some(metadata) = &self.result.metadata else {
            let error = self.result.error.as_deref().unwrap_or("unknown error");
            return writeln!(f, "Error:          {}", error);
        };
        if metadata.is_fallback() {
            writeln!(f, "Reader:         element-offset (fallback)")?;
        }
        writeln!(f)?;

        let summary = MetadataSummary::from(metadata);
        let study_time = metadata
            .study_time
            .as_deref()
            .and_then(parse_dicom_time)
            .unwrap_or_else(|| summary.study.time.clone());

        writeln!(f, "Patient")?;
        writeln!(f, "-------")?;
        writeln!(f, "Name:           {}", summary.patient.name)?;
        writeln!(f, "ID:             {}", summary.patient.id)?;
        writeln!(f, "Sex:            {}", summary.patient.sex)?;
        writeln!(f, "Birth Date:     {}", summary.patient.birth_date)?;
        writeln!(f)?;

        writeln!(f, "Study")?;
        writeln!(f, "-----")?;
        writeln!(f, "Description:    {}", summary.study.description)?;
        writeln!(f, "Date:           {}", summary.study.date)?;
        writeln!(f, "Time:           {}", study_time)?;
        writeln!(f, "UID:            {}", summary.study.uid)?;
        writeln!(f)?;

        writeln!(f, "Series")?;
        writeln!(f, "------")?;
        writeln!(f, "Modality:       {}", summary.series.modality)?;
        writeln!(f, "Description:    {}", summary.series.description)?;
        writeln!(f, "Number:         {}", summary.series.number)?;
        writeln!(f, "UID:            {}", summary.series.uid)?;
        writeln!(f)?;

        writeln!(f, "Instance")?;
        writeln!(f, "--------")?;
        writeln!(f, "Number:         {}", summary.instance.number)?;
        writeln!(f, "UID:            {}", summary.instance.uid)?;
        if let (Some(rows), Some(columns)) = (metadata.rows, metadata.columns) {
            writeln!(f, "Matrix:         {}x{}", columns, rows)?;
        }

        Ok(())
    }
}
