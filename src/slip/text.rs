//! Character set handling for payload text
//!
//! Slips are printed in UTF-8 or ISO-8859-2. A QR ECI designator settles the
//! choice; otherwise UTF-8 is assumed when the intact bytes are valid UTF-8.

use encoding_rs::{Encoding, ISO_8859_2, UTF_8};

use crate::models::RawPayload;

const ECI_ISO_8859_2: u32 = 4;
const ECI_UTF8: u32 = 26;

/// Text encoding of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// UTF-8
    Utf8,
    /// ISO-8859-2 (Latin-2)
    Latin2,
}

impl Charset {
    /// Charset named by an ECI designator
    pub fn from_eci(eci: u32) -> Option<Self> {
        match eci {
            ECI_UTF8 => Some(Charset::Utf8),
            ECI_ISO_8859_2 => Some(Charset::Latin2),
            _ => None,
        }
    }

    /// Charset of `payload`, from its ECI or from the intact bytes
    pub fn detect(payload: &RawPayload) -> Self {
        if let Some(eci) = payload.eci() {
            match Self::from_eci(eci) {
                Some(charset) => return charset,
                None => tracing::trace!(eci, "unsupported ECI, detecting charset"),
            }
        }
        let utf8 = payload
            .lines()
            .into_iter()
            .filter(|line| !line.damaged)
            .all(|line| !UTF_8.decode_without_bom_handling(line.bytes).1);
        if utf8 { Charset::Utf8 } else { Charset::Latin2 }
    }

    /// Underlying encoding
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Charset::Utf8 => UTF_8,
            Charset::Latin2 => ISO_8859_2,
        }
    }

    /// Decode `bytes`, replacing malformed sequences
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, had_errors) = self.encoding().decode_without_bom_handling(bytes);
        if had_errors {
            tracing::trace!(charset = ?self, "malformed text replaced");
        }
        text.into_owned()
    }
}

/// Field text with trailing whitespace and carriage returns removed
pub fn clean(text: &str) -> &str {
    text.trim_end()
}
