//! Character-set handling for string values read from raw element bytes
//!
//! [`decode_iso2022`] converts ISO 2022 escape-sequence text (JIS X 0208
//! kanji, JIS X 0201 katakana, ASCII) to Unicode. When the state machine
//! rejects the input, a fallback ladder tries whole-buffer conversions
//! before giving up on the field.

mod iso2022;

pub use iso2022::MalformedKanjiRun;

use encoding_rs::{ISO_2022_JP, SHIFT_JIS, UTF_8};
use iso2022::Iso2022Decoder;
use log::debug;

/// Specific Character Set terms the full-dataset parser can decode
const FULL_PARSER_CHARACTER_SETS: &[&str] = &[
    "ISO_IR 6",
    "ISO_IR_6",
    "ISO 2022 IR 6",
    "ISO_IR 100",
    "ISO_IR_100",
    "ISO 2022 IR 100",
    "ISO_IR 101",
    "ISO_IR_101",
    "ISO 2022 IR 101",
    "ISO_IR 109",
    "ISO_IR_109",
    "ISO 2022 IR 109",
    "ISO_IR 110",
    "ISO_IR_110",
    "ISO 2022 IR 110",
    "ISO_IR 144",
    "ISO_IR_144",
    "ISO 2022 IR 144",
    "ISO_IR 192",
    "ISO_IR_192",
    "GB18030",
];

/// Options for [`decode_iso2022`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions<'a> {
    /// Log the raw bytes and the decoded text at debug level
    pub trace_raw_bytes: bool,

    /// Name shown in trace output (usually the element keyword)
    pub label: Option<&'a str>,
}

impl<'a> DecodeOptions<'a> {
    pub fn traced(label: &'a str) -> Self {
        Self {
            trace_raw_bytes: true,
            label: Some(label),
        }
    }
}

/// Whether a declared Specific Character Set routes string fields through
/// the ISO 2022 decoder on the fallback path
///
/// ```
/// use dicommeta_core::charset::requires_iso2022_decoding;
///
/// assert!(requires_iso2022_decoding("ISO 2022 IR 13\\ISO 2022 IR 87"));
/// assert!(requires_iso2022_decoding("ISO_IR 13"));
/// assert!(!requires_iso2022_decoding("GB18030"));
/// ```
pub fn requires_iso2022_decoding(specific_character_set: &str) -> bool {
    specific_character_set.contains("ISO 2022") || specific_character_set.contains("ISO_IR")
}

/// Whether every term of a Specific Character Set value is decodable by the
/// full-dataset parser
///
/// Empty terms (the default repertoire in a multi-valued declaration) are
/// accepted.
pub fn is_supported_by_full_parser(specific_character_set: &str) -> bool {
    specific_character_set
        .split('\\')
        .map(|term| term.trim_matches(|c: char| c == '\0' || c.is_whitespace()))
        .all(|term| term.is_empty() || FULL_PARSER_CHARACTER_SETS.contains(&term))
}

/// Decodes ISO 2022 Japanese text to a Unicode string
///
/// Returns `None` for empty input, for input that decodes to nothing, and
/// when every fallback fails. Never panics on malformed input.
///
/// # Example
///
/// ```
/// use dicommeta_core::charset::{decode_iso2022, DecodeOptions};
///
/// // ESC ) I SO <0x31 0x32> SI  →  half-width katakana "ｱｲ"
/// let bytes = [0x1B, b')', b'I', 0x0E, 0x31, 0x32, 0x0F];
/// assert_eq!(decode_iso2022(&bytes, DecodeOptions::default()).as_deref(), Some("ｱｲ"));
/// assert_eq!(decode_iso2022(&[], DecodeOptions::default()), None);
/// ```
pub fn decode_iso2022(bytes: &[u8], options: DecodeOptions<'_>) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    let label = options.label.unwrap_or("value");
    if options.trace_raw_bytes {
        debug!("{} raw bytes: {}", label, hex_dump(bytes));
    }

    let decoded = match Iso2022Decoder::new(bytes).decode() {
        Ok(text) => Some(text).filter(|t| !t.is_empty()),
        Err(MalformedKanjiRun { offset }) => {
            debug!(
                "{}: malformed JIS X 0208 run at byte {}, trying fallback decoders",
                label, offset
            );
            decode_fallback(bytes)
        }
    };

    if options.trace_raw_bytes {
        debug!("{} decoded: {:?}", label, decoded);
    }

    decoded
}

/// Whole-buffer fallback ladder: Japanese converters, UTF-8, then Latin-1
fn decode_fallback(bytes: &[u8]) -> Option<String> {
    let japanese = [ISO_2022_JP, SHIFT_JIS];
    for encoding in japanese {
        if let Some(text) = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .and_then(|t| non_blank(&t))
        {
            return Some(text);
        }
    }

    if let Some(text) = UTF_8
        .decode_without_bom_handling_and_without_replacement(bytes)
        .and_then(|t| non_blank(&t))
    {
        return Some(text);
    }

    non_blank(&encoding_rs::mem::decode_latin1(bytes))
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
