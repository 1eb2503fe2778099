//! High-level decoding of PDF417 data codewords into bytes
//!
//! Text, byte and numeric compaction are supported. Unreadable codewords are
//! passed in as `None` and come out as zero-filled erased byte ranges. The
//! text sub-mode after an erased value is unknown, so decoding resumes under
//! a caller-chosen [`TextResume`].

use std::ops::Range;

use crate::error::DecodeError;

const TEXT_LATCH: u16 = 900;
const BYTE_LATCH: u16 = 901;
const NUMERIC_LATCH: u16 = 902;
const BYTE_SHIFT: u16 = 913;
const MACRO_OPTIONAL_FIELD: u16 = 923;
const MACRO_TERMINATOR: u16 = 922;
const BYTE_LATCH_SIX: u16 = 924;
const ECI_USER_DEFINED: u16 = 925;
const ECI_GENERAL_PURPOSE: u16 = 926;
const ECI_CHARSET: u16 = 927;
const MACRO_CONTROL_BLOCK: u16 = 928;

const MIXED_CHARS: &[u8; 25] = b"0123456789&\r\t,:#-.$/+%*=^";
const PUNCT_CHARS: &[u8; 29] = b";<>@[\\]_`~!\r\t,:\n-.$/\"|*()?{}'";

/// Bytes produced from the data codewords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Output bytes; erased ranges are zero-filled
    pub bytes: Vec<u8>,
    /// Byte ranges derived from unreadable codewords
    pub erasures: Vec<Range<usize>>,
    /// Character set ECI, if one was signalled
    pub eci: Option<u32>,
    /// A text compaction value was erased; other resume modes may read differently
    pub text_erased: bool,
}

impl Decoded {
    fn push(&mut self, b: u8) {
        self.bytes.push(b);
    }

    fn push_erased(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let start = self.bytes.len();
        self.bytes.resize(start + n, 0);
        match self.erasures.last_mut() {
            Some(last) if last.end == start => last.end = start + n,
            _ => self.erasures.push(start..start + n),
        }
    }
}

/// Text sub-mode assumed after an erased text compaction value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextResume {
    /// Upper-case letters, the sub-mode every text segment starts in
    #[default]
    Alpha,
    /// Lower-case letters
    Lower,
    /// Digits and common punctuation
    Mixed,
    /// Punctuation latch
    Punct,
}

impl TextResume {
    /// Every resume mode, latch target of a segment start first
    pub const ALL: [TextResume; 4] = [
        TextResume::Alpha,
        TextResume::Lower,
        TextResume::Mixed,
        TextResume::Punct,
    ];

    fn sub_mode(self) -> SubMode {
        match self {
            TextResume::Alpha => SubMode::Alpha,
            TextResume::Lower => SubMode::Lower,
            TextResume::Mixed => SubMode::Mixed,
            TextResume::Punct => SubMode::Punct,
        }
    }
}

/// Decode data codewords, length descriptor excluded
pub fn decode(codewords: &[Option<u16>]) -> Result<Decoded, DecodeError> {
    decode_resuming(codewords, TextResume::Alpha)
}

/// Decode data codewords, continuing text after an erasure under `resume`
pub fn decode_resuming(
    codewords: &[Option<u16>],
    resume: TextResume,
) -> Result<Decoded, DecodeError> {
    let mut out = Decoded::default();
    let mut pos = 0;
    // text compaction is the initial mode
    let mut mode = TEXT_LATCH;

    while pos < codewords.len() {
        pos = match mode {
            TEXT_LATCH => text(codewords, pos, resume, &mut out)?,
            BYTE_LATCH | BYTE_LATCH_SIX => bytes(codewords, pos, mode, &mut out)?,
            NUMERIC_LATCH => numeric(codewords, pos, &mut out)?,
            _ => return Err(DecodeError::Codewords),
        };
        let Some(next) = codewords.get(pos) else {
            break;
        };
        match *next {
            Some(cw @ (TEXT_LATCH | BYTE_LATCH | BYTE_LATCH_SIX | NUMERIC_LATCH)) => {
                mode = cw;
                pos += 1;
            }
            Some(ECI_CHARSET) => {
                out.eci = codewords.get(pos + 1).copied().flatten().map(u32::from);
                pos += 2;
            }
            Some(ECI_USER_DEFINED) => pos += 2,
            Some(ECI_GENERAL_PURPOSE) => pos += 3,
            Some(MACRO_CONTROL_BLOCK | MACRO_OPTIONAL_FIELD | MACRO_TERMINATOR) => break,
            Some(other) if other >= 900 => {
                tracing::trace!(codeword = other, "unexpected PDF417 mode codeword");
                return Err(DecodeError::Codewords);
            }
            // the segment decoders stop only at mode codewords
            _ => return Err(DecodeError::Codewords),
        }
    }
    Ok(out)
}

fn is_data(cw: Option<u16>) -> bool {
    cw.is_none_or(|c| c < 900 || c == BYTE_SHIFT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubMode {
    Alpha,
    Lower,
    Mixed,
    Punct,
    AlphaShift,
    PunctShift,
}

/// One text compaction value, or a shifted raw byte
#[derive(Debug, Clone, Copy)]
enum TextValue {
    Value(u8),
    Byte(u8),
    Erased,
}

fn text(
    codewords: &[Option<u16>],
    start: usize,
    resume: TextResume,
    out: &mut Decoded,
) -> Result<usize, DecodeError> {
    let mut values = Vec::new();
    let mut pos = start;
    while pos < codewords.len() && is_data(codewords[pos]) {
        match codewords[pos] {
            Some(BYTE_SHIFT) => {
                pos += 1;
                match codewords.get(pos).copied() {
                    Some(Some(b)) if b < 256 => values.push(TextValue::Byte(b as u8)),
                    Some(None) => values.push(TextValue::Erased),
                    _ => return Err(DecodeError::Codewords),
                }
            }
            Some(cw) => {
                values.push(TextValue::Value((cw / 30) as u8));
                values.push(TextValue::Value((cw % 30) as u8));
            }
            None => {
                values.push(TextValue::Erased);
                values.push(TextValue::Erased);
            }
        }
        pos += 1;
    }

    let mut sub = SubMode::Alpha;
    let mut prior = SubMode::Alpha;
    for value in &values {
        let v = match *value {
            TextValue::Value(v) => v,
            TextValue::Byte(b) => {
                out.push(b);
                continue;
            }
            TextValue::Erased => {
                // a lost value may have been a latch
                out.push_erased(1);
                out.text_erased = true;
                sub = resume.sub_mode();
                prior = sub;
                continue;
            }
        };
        let ch = match sub {
            SubMode::Alpha | SubMode::AlphaShift => {
                let shifted = sub == SubMode::AlphaShift;
                if shifted {
                    sub = prior;
                }
                match v {
                    0..=25 => Some(b'A' + v),
                    26 => Some(b' '),
                    _ if shifted => None,
                    27 => {
                        sub = SubMode::Lower;
                        None
                    }
                    28 => {
                        sub = SubMode::Mixed;
                        None
                    }
                    _ => {
                        prior = sub;
                        sub = SubMode::PunctShift;
                        None
                    }
                }
            }
            SubMode::Lower => match v {
                0..=25 => Some(b'a' + v),
                26 => Some(b' '),
                27 => {
                    prior = sub;
                    sub = SubMode::AlphaShift;
                    None
                }
                28 => {
                    sub = SubMode::Mixed;
                    None
                }
                _ => {
                    prior = sub;
                    sub = SubMode::PunctShift;
                    None
                }
            },
            SubMode::Mixed => match v {
                0..=24 => Some(MIXED_CHARS[v as usize]),
                25 => {
                    sub = SubMode::Punct;
                    None
                }
                26 => Some(b' '),
                27 => {
                    sub = SubMode::Lower;
                    None
                }
                28 => {
                    sub = SubMode::Alpha;
                    None
                }
                _ => {
                    prior = sub;
                    sub = SubMode::PunctShift;
                    None
                }
            },
            SubMode::Punct => match v {
                0..=28 => Some(PUNCT_CHARS[v as usize]),
                _ => {
                    sub = SubMode::Alpha;
                    None
                }
            },
            SubMode::PunctShift => {
                sub = prior;
                match v {
                    0..=28 => Some(PUNCT_CHARS[v as usize]),
                    _ => {
                        sub = SubMode::Alpha;
                        None
                    }
                }
            }
        };
        if let Some(ch) = ch {
            out.push(ch);
        }
    }
    Ok(pos)
}

fn bytes(
    codewords: &[Option<u16>],
    start: usize,
    mode: u16,
    out: &mut Decoded,
) -> Result<usize, DecodeError> {
    let mut end = start;
    while end < codewords.len() && codewords[end].is_none_or(|c| c < 900) {
        end += 1;
    }
    let segment = &codewords[start..end];

    let mut chunks = segment.chunks(5).peekable();
    while let Some(chunk) = chunks.next() {
        let last = chunks.peek().is_none();
        // 901 packs a final group of five as single bytes
        let packed = chunk.len() == 5 && (mode == BYTE_LATCH_SIX || !last);
        if packed {
            if chunk.iter().any(Option::is_none) {
                out.push_erased(6);
                continue;
            }
            let value = chunk
                .iter()
                .flatten()
                .fold(0u64, |acc, &c| acc * 900 + c as u64);
            for i in (0..6).rev() {
                out.push((value >> (8 * i)) as u8);
            }
        } else if mode == BYTE_LATCH_SIX {
            return Err(DecodeError::Codewords);
        } else {
            for cw in chunk {
                match cw {
                    Some(c) if *c < 256 => out.push(*c as u8),
                    Some(_) => return Err(DecodeError::Codewords),
                    None => out.push_erased(1),
                }
            }
        }
    }
    Ok(end)
}

fn numeric(codewords: &[Option<u16>], start: usize, out: &mut Decoded) -> Result<usize, DecodeError> {
    let mut end = start;
    while end < codewords.len() && codewords[end].is_none_or(|c| c < 900) {
        end += 1;
    }

    for group in codewords[start..end].chunks(15) {
        if group.iter().any(Option::is_none) {
            // 900^n spans just under three decimal digits per codeword
            out.push_erased(group.len() * 3 - 1);
            continue;
        }
        let digits = base900_to_decimal(group.iter().flatten().copied());
        match digits.split_first() {
            Some((b'1', rest)) => rest.iter().for_each(|&d| out.push(d)),
            _ => return Err(DecodeError::Codewords),
        }
    }
    Ok(end)
}

/// Decimal ASCII digits of a base-900 number, most significant first
fn base900_to_decimal(codewords: impl Iterator<Item = u16>) -> Vec<u8> {
    // little-endian decimal digits
    let mut digits: Vec<u8> = Vec::new();
    for cw in codewords {
        let mut carry = cw as u32;
        for d in digits.iter_mut() {
            let v = *d as u32 * 900 + carry;
            *d = (v % 10) as u8;
            carry = v / 10;
        }
        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }
    digits.iter().rev().map(|d| b'0' + d).collect()
}
