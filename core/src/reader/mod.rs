//! Tag readers over an in-memory DICOM buffer
//!
//! Two layouts back the [`TagReader`] trait:
//! - [`FullDataset`]: a full parse by `dicom-object`, values addressable by
//!   dictionary keyword
//! - [`ElementIndex`]: a tag → byte-range index over the original buffer,
//!   giving access to the raw bytes of every top-level element

mod dataset;
mod offsets;

pub use dataset::FullDataset;
pub use offsets::{ElementIndex, ElementRange};

use dicom_core::Tag;
use std::borrow::Cow;
use std::fmt;

/// Magic code following the 128-byte preamble of a Part 10 file
pub const DICM_MAGIC: &[u8; 4] = b"DICM";

const PREAMBLE_LEN: usize = 128;

/// Read access to the elements of one parsed file
///
/// Absent tags and unconvertible values yield `None`; readers never fail
/// after construction.
pub trait TagReader {
    /// Value as trimmed text, `None` if absent or empty
    fn read_string(&self, tag: Tag) -> Option<String>;

    /// Value as a base-10 integer, `None` if absent or non-numeric
    fn read_int(&self, tag: Tag) -> Option<i32>;

    /// Bytes backing the value
    fn read_raw_bytes(&self, tag: Tag) -> Option<Cow<'_, [u8]>>;
}

/// Parsing strategy used to read a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Full dataset parse with naturalized keywords (primary)
    FullDataset,
    /// Element-offset index over the raw buffer (fallback)
    ElementOffset,
}

impl Strategy {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Strategy::FullDataset => "full-dataset",
            Strategy::ElementOffset => "element-offset",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Offset of the `DICM` magic code
///
/// Looks after the standard preamble first, then at the very start of the
/// buffer for files written without one.
pub(crate) fn locate_magic(bytes: &[u8]) -> Option<usize> {
    if bytes.get(PREAMBLE_LEN..PREAMBLE_LEN + 4) == Some(DICM_MAGIC.as_slice()) {
        Some(PREAMBLE_LEN)
    } else if bytes.starts_with(DICM_MAGIC) {
        Some(0)
    } else {
        None
    }
}

/// Parses the first value of an integer string (IS) as `i32`
pub(crate) fn parse_int_string(value: &str) -> Option<i32> {
    value.split('\\').next()?.trim().parse::<i32>().ok()
}

/// Trims padding (spaces and NULs) from a decoded value
pub(crate) fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}
