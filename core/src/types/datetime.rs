use chrono::NaiveDate;

/// Parses a DICOM date (`YYYYMMDD`) into a calendar date
///
/// Only the first 8 characters are considered, so trailing content such as
/// a DT time component is ignored. Returns `None` for short input,
/// non-digit characters or dates that do not exist on the calendar
/// (e.g. `20230230` or month 13).
///
/// # Example
///
/// ```
/// use dicommeta_core::parse_dicom_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_dicom_date("20240131"), NaiveDate::from_ymd_opt(2024, 1, 31));
/// assert_eq!(parse_dicom_date("20231301"), None);
/// ```
pub fn parse_dicom_date(dicom_date: &str) -> Option<NaiveDate> {
    let digits = dicom_date.trim().get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a DICOM time (`HHMMSS.FFFFFF`) as `HH:MM:SS`
///
/// Takes the first six characters without range validation, mirroring
/// what the upload views display. Empty input yields `None`.
pub fn parse_dicom_time(dicom_time: &str) -> Option<String> {
    if dicom_time.is_empty() {
        return None;
    }

    let hours = segment(dicom_time, 0, 2);
    let minutes = segment(dicom_time, 2, 4);
    let seconds = segment(dicom_time, 4, 6);

    Some(format!("{}:{}:{}", hours, minutes, seconds))
}

/// Char-based substring clamped to the input length
fn segment(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}
