//! Stateful decoder for ISO 2022 Japanese text (JIS X 0208 / JIS X 0201)
//!
//! The decoder walks the byte stream with a cursor and a `Mode`. Escape
//! sequences switch the mode; each mode has its own byte-consumption rule:
//!
//! | Sequence          | Mode              | Consumes                          |
//! |-------------------|-------------------|-----------------------------------|
//! | `ESC $ B`         | `Kanji`           | whole run up to the next ESC      |
//! | `ESC ) I` + SO    | `ShiftedKatakana` | 0x21-0x5F until SI or ESC         |
//! | `ESC ) I`         | `Katakana`        | 0xA1-0xDF and 0x21-0x5F until ESC |
//! | `ESC ( B`/`ESC ( J` | `Ascii`         | printable ASCII                   |
//!
//! Unrecognized escape sequences are skipped (3 bytes) and decoding
//! continues in `Ascii` mode.

use encoding_rs::ISO_2022_JP;

const ESC: u8 = 0x1B;
const SO: u8 = 0x0E;
const SI: u8 = 0x0F;

/// First code point of the Unicode half-width katakana block (U+FF61)
const HALFWIDTH_KATAKANA_BASE: u32 = 0xFF61;

/// Escape sequence wrapped around a kanji run before conversion
const KANJI_DESIGNATION: [u8; 3] = [ESC, b'$', b'B'];
const ASCII_DESIGNATION: [u8; 3] = [ESC, b'(', b'B'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Default G0 set, also used outside of any escape sequence
    Ascii,
    /// JIS X 0208 (kanji, hiragana)
    Kanji,
    /// JIS X 0201 katakana designated to G1 without shift-out
    Katakana,
    /// JIS X 0201 katakana after a shift-out byte
    ShiftedKatakana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Designation {
    Kanji,
    Katakana,
    Ascii,
    Unknown,
}

impl Designation {
    fn from_bytes(intermediate: u8, final_byte: u8) -> Self {
        match (intermediate, final_byte) {
            (b'$', b'B') => Designation::Kanji,
            (b')', b'I') => Designation::Katakana,
            (b'(', b'B') | (b'(', b'J') => Designation::Ascii,
            _ => Designation::Unknown,
        }
    }
}

/// A kanji run the ISO-2022-JP converter rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedKanjiRun {
    /// Offset of the first byte of the run
    pub offset: usize,
}

pub(crate) struct Iso2022Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    mode: Mode,
    out: String,
}

impl<'a> Iso2022Decoder<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            mode: Mode::Ascii,
            out: String::with_capacity(bytes.len()),
        }
    }

    /// Runs the state machine to the end of the input
    pub(crate) fn decode(mut self) -> Result<String, MalformedKanjiRun> {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == ESC {
                self.escape();
                continue;
            }

            match self.mode {
                Mode::Ascii => self.ascii_byte(),
                Mode::Kanji => self.kanji_run()?,
                Mode::Katakana => self.katakana_byte(),
                Mode::ShiftedKatakana => self.shifted_katakana_byte(),
            }
        }

        Ok(self.out)
    }

    /// Handles an ESC byte at the cursor
    ///
    /// Every ESC ends the current run. An ESC without two following bytes
    /// is dropped as a stray byte.
    fn escape(&mut self) {
        if self.pos + 2 >= self.bytes.len() {
            self.pos += 1;
            self.mode = Mode::Ascii;
            return;
        }

        let designation =
            Designation::from_bytes(self.bytes[self.pos + 1], self.bytes[self.pos + 2]);
        self.pos += 3;

        self.mode = match designation {
            Designation::Kanji => Mode::Kanji,
            Designation::Katakana => {
                self.skip_repeated_katakana_designations();
                if self.bytes.get(self.pos) == Some(&SO) {
                    self.pos += 1;
                    Mode::ShiftedKatakana
                } else {
                    Mode::Katakana
                }
            }
            Designation::Ascii | Designation::Unknown => Mode::Ascii,
        };
    }

    fn skip_repeated_katakana_designations(&mut self) {
        while self.pos + 2 < self.bytes.len()
            && self.bytes[self.pos] == ESC
            && self.bytes[self.pos + 1] == b')'
            && self.bytes[self.pos + 2] == b'I'
        {
            self.pos += 3;
        }
    }

    fn ascii_byte(&mut self) {
        let byte = self.bytes[self.pos];
        // bare SO/SI are no-ops here, other control and 8-bit bytes are dropped
        if is_printable_ascii(byte) {
            self.out.push(byte as char);
        }
        self.pos += 1;
    }

    /// Converts every byte up to the next ESC as one JIS X 0208 run
    fn kanji_run(&mut self) -> Result<(), MalformedKanjiRun> {
        let start = self.pos;
        let end = self.bytes[start..]
            .iter()
            .position(|&b| b == ESC)
            .map_or(self.bytes.len(), |p| start + p);
        self.pos = end;

        let run = &self.bytes[start..end];
        if run.is_empty() {
            return Ok(());
        }

        let mut wrapped = Vec::with_capacity(run.len() + 6);
        wrapped.extend_from_slice(&KANJI_DESIGNATION);
        wrapped.extend_from_slice(run);
        wrapped.extend_from_slice(&ASCII_DESIGNATION);

        match ISO_2022_JP.decode_without_bom_handling_and_without_replacement(&wrapped) {
            Some(text) => {
                self.out.push_str(&text);
                Ok(())
            }
            None => Err(MalformedKanjiRun { offset: start }),
        }
    }

    fn katakana_byte(&mut self) {
        let byte = self.bytes[self.pos];
        match byte {
            0xA1..=0xDF => self.push_katakana(byte - 0xA1),
            0x21..=0x5F => self.push_katakana(byte - 0x21),
            _ => {}
        }
        self.pos += 1;
    }

    fn shifted_katakana_byte(&mut self) {
        let byte = self.bytes[self.pos];
        self.pos += 1;
        match byte {
            SI => self.mode = Mode::Ascii,
            0x21..=0x5F => self.push_katakana(byte - 0x21),
            _ => {}
        }
    }

    fn push_katakana(&mut self, offset: u8) {
        if let Some(c) = char::from_u32(HALFWIDTH_KATAKANA_BASE + u32::from(offset)) {
            self.out.push(c);
        }
    }
}

fn is_printable_ascii(byte: u8) -> bool {
    (0x20..0x7F).contains(&byte)
}
