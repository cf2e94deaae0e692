//! DICOM metadata extraction with ISO 2022 Japanese text decoding
//!
//! [`MetadataExtractor`] reads a Part 10 buffer with a full dataset parse
//! and falls back to an element-offset reader when that parse fails,
//! decoding ISO 2022 text (JIS X 0208 kanji, JIS X 0201 katakana) on its
//! own. [`BatchParser`] runs many files in order; [`edit_metadata`]
//! corrects a few descriptive fields afterwards.

pub mod api;
pub mod batch;
pub mod charset;
pub mod cli;
pub mod edit;
pub mod error;
pub mod extraction;
pub mod reader;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::MetadataExtractor;
pub use batch::{parse_batch, BatchParser};
pub use charset::{decode_iso2022, DecodeOptions};
pub use cli::report::TextReport;
pub use edit::{edit_metadata, is_editable_field, EditableField};
pub use error::{DicomMetaError, Result};
pub use reader::Strategy;
pub use types::*;
