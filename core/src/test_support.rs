//! Synthetic Part 10 buffers for unit tests

use dicom_core::Tag;
use std::collections::BTreeMap;

const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";
const EXPLICIT_VR_BIG_ENDIAN: &str = "1.2.840.10008.1.2.2";
const SECONDARY_CAPTURE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.7";

/// Dataset encoding written after the meta group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    ExplicitLittle,
    ImplicitLittle,
    ExplicitBig,
}

impl Encoding {
    pub(crate) fn transfer_syntax(self) -> &'static str {
        match self {
            Encoding::ExplicitLittle => EXPLICIT_VR_LITTLE_ENDIAN,
            Encoding::ImplicitLittle => IMPLICIT_VR_LITTLE_ENDIAN,
            Encoding::ExplicitBig => EXPLICIT_VR_BIG_ENDIAN,
        }
    }

    fn is_explicit(self) -> bool {
        self != Encoding::ImplicitLittle
    }

    fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            Encoding::ExplicitBig => value.to_be_bytes(),
            _ => value.to_le_bytes(),
        }
    }

    fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Encoding::ExplicitBig => value.to_be_bytes(),
            _ => value.to_le_bytes(),
        }
    }
}

/// Builds a Part 10 file: preamble, `DICM`, meta group, dataset
pub(crate) struct DicomBuilder {
    encoding: Encoding,
    transfer_syntax: String,
    preamble: bool,
    elements: BTreeMap<Tag, Vec<u8>>,
}

impl DicomBuilder {
    pub(crate) fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            transfer_syntax: encoding.transfer_syntax().to_string(),
            preamble: true,
            elements: BTreeMap::new(),
        }
    }

    /// Declares a different transfer syntax UID without changing how the
    /// dataset bytes are written
    pub(crate) fn transfer_syntax(mut self, uid: &str) -> Self {
        self.transfer_syntax = uid.to_string();
        self
    }

    pub(crate) fn without_preamble(mut self) -> Self {
        self.preamble = false;
        self
    }

    pub(crate) fn string(self, tag: Tag, vr: &str, value: &str) -> Self {
        self.bytes(tag, vr, value.as_bytes().to_vec())
    }

    /// Adds an element with raw value bytes, padded to even length
    pub(crate) fn bytes(mut self, tag: Tag, vr: &str, mut value: Vec<u8>) -> Self {
        pad(&mut value, vr);
        let encoded = encode_element(self.encoding, tag, vr, &value);
        self.elements.insert(tag, encoded);
        self
    }

    pub(crate) fn us(mut self, tag: Tag, value: u16) -> Self {
        let raw = self.encoding.u16_bytes(value).to_vec();
        let encoded = encode_element(self.encoding, tag, "US", &raw);
        self.elements.insert(tag, encoded);
        self
    }

    /// Adds an undefined-length sequence holding one undefined-length item
    pub(crate) fn undefined_sequence(mut self, tag: Tag, items: &[(Tag, &str, &str)]) -> Self {
        let enc = self.encoding;
        let mut out = header(enc, tag, "SQ", None);

        out.extend(delimiter(enc, 0xE000, u32::MAX));
        for (item_tag, vr, value) in items {
            let mut raw = value.as_bytes().to_vec();
            pad(&mut raw, vr);
            out.extend(encode_element(enc, *item_tag, vr, &raw));
        }
        out.extend(delimiter(enc, 0xE00D, 0));
        out.extend(delimiter(enc, 0xE0DD, 0));

        self.elements.insert(tag, out);
        self
    }

    /// Adds `depth` undefined-length sequences, each nested in an
    /// undefined-length item of the enclosing one
    pub(crate) fn nested_sequences(mut self, tag: Tag, depth: usize) -> Self {
        let enc = self.encoding;
        let mut out = Vec::new();

        for _ in 0..depth {
            out.extend(header(enc, tag, "SQ", None));
            out.extend(delimiter(enc, 0xE000, u32::MAX));
        }
        out.extend(header(enc, tag, "SQ", None));
        out.extend(delimiter(enc, 0xE0DD, 0));
        for _ in 0..depth {
            out.extend(delimiter(enc, 0xE00D, 0));
            out.extend(delimiter(enc, 0xE0DD, 0));
        }

        self.elements.insert(tag, out);
        self
    }

    /// Adds encapsulated Pixel Data: empty offset table and one fragment
    pub(crate) fn encapsulated_pixel_data(mut self, fragment: &[u8]) -> Self {
        let enc = self.encoding;
        let tag = Tag(0x7FE0, 0x0010);
        let mut out = header(enc, tag, "OB", None);

        out.extend(delimiter(enc, 0xE000, 0));
        out.extend(delimiter(enc, 0xE000, fragment.len() as u32));
        out.extend_from_slice(fragment);
        out.extend(delimiter(enc, 0xE0DD, 0));

        self.elements.insert(tag, out);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let meta_enc = Encoding::ExplicitLittle;
        let mut meta = Vec::new();
        let mut meta_element = |tag: Tag, vr: &str, value: &[u8]| {
            let mut raw = value.to_vec();
            pad(&mut raw, vr);
            meta.extend(encode_element(meta_enc, tag, vr, &raw));
        };
        meta_element(Tag(0x0002, 0x0001), "OB", &[0x00, 0x01]);
        meta_element(Tag(0x0002, 0x0002), "UI", SECONDARY_CAPTURE_STORAGE.as_bytes());
        meta_element(Tag(0x0002, 0x0003), "UI", b"2.25.1001");
        meta_element(Tag(0x0002, 0x0010), "UI", self.transfer_syntax.as_bytes());
        meta_element(Tag(0x0002, 0x0012), "UI", b"2.25.2002");

        let mut out = Vec::new();
        if self.preamble {
            out.extend_from_slice(&[0u8; 128]);
        }
        out.extend_from_slice(b"DICM");
        out.extend(encode_element(
            meta_enc,
            Tag(0x0002, 0x0000),
            "UL",
            &(meta.len() as u32).to_le_bytes(),
        ));
        out.extend(meta);
        for encoded in self.elements.into_values() {
            out.extend(encoded);
        }
        out
    }
}

fn pad(value: &mut Vec<u8>, vr: &str) {
    if value.len() % 2 == 1 {
        let filler = match vr {
            "UI" | "OB" | "UN" => 0x00,
            _ => b' ',
        };
        value.push(filler);
    }
}

fn encode_element(enc: Encoding, tag: Tag, vr: &str, value: &[u8]) -> Vec<u8> {
    let mut out = header(enc, tag, vr, Some(value.len() as u32));
    out.extend_from_slice(value);
    out
}

/// Element header; `None` length writes the undefined-length marker
fn header(enc: Encoding, tag: Tag, vr: &str, length: Option<u32>) -> Vec<u8> {
    let length = length.unwrap_or(u32::MAX);
    let mut out = Vec::with_capacity(12);
    out.extend(enc.u16_bytes(tag.group()));
    out.extend(enc.u16_bytes(tag.element()));

    if enc.is_explicit() {
        out.extend_from_slice(vr.as_bytes());
        if matches!(vr, "OB" | "OW" | "OF" | "SQ" | "UC" | "UN" | "UR" | "UT") {
            out.extend_from_slice(&[0, 0]);
            out.extend(enc.u32_bytes(length));
        } else {
            out.extend(enc.u16_bytes(length as u16));
        }
    } else {
        out.extend(enc.u32_bytes(length));
    }
    out
}

fn delimiter(enc: Encoding, element: u16, length: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(8);
    out.extend(enc.u16_bytes(0xFFFE));
    out.extend(enc.u16_bytes(element));
    out.extend(enc.u32_bytes(length));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_starts_with_preamble_and_magic() {
        let bytes = DicomBuilder::new(Encoding::ExplicitLittle).build();
        assert_eq!(&bytes[128..132], b"DICM");
        assert_eq!(&bytes[132..134], &[0x02, 0x00]);
    }

    #[test]
    fn test_values_are_padded_to_even_length() {
        let bytes = DicomBuilder::new(Encoding::ImplicitLittle)
            .string(Tag(0x0008, 0x0060), "CS", "MRI")
            .build();
        assert!(bytes.ends_with(b"MRI "));
    }
}
