use std::ops::Range;

/// Barcode symbology handled by a recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    /// Stacked PDF417 (HUB3A slips)
    Pdf417,
    /// QR code
    Qr,
}

/// Bytes recovered from a symbol, before any slip parsing
///
/// Erased ranges mark bytes lost with unreadable codewords; their content is
/// zero-filled and must not be interpreted. `verified` is true only when error
/// correction confirmed every byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    symbology: Symbology,
    bytes: Vec<u8>,
    erasures: Vec<Range<usize>>,
    eci: Option<u32>,
    verified: bool,
}

impl RawPayload {
    /// Error-corrected payload with no losses
    pub fn verified(symbology: Symbology, bytes: Vec<u8>) -> Self {
        Self {
            symbology,
            bytes,
            erasures: Vec::new(),
            eci: None,
            verified: true,
        }
    }

    /// Payload whose bytes error correction could not confirm
    pub fn unverified(symbology: Symbology, bytes: Vec<u8>, erasures: Vec<Range<usize>>) -> Self {
        Self {
            symbology,
            bytes,
            erasures,
            eci: None,
            verified: false,
        }
    }

    /// Attach the ECI character-set designator read from the symbol
    pub fn with_eci(mut self, eci: Option<u32>) -> Self {
        self.eci = eci;
        self
    }

    /// Symbology the payload was read from
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Raw bytes; erased ranges are zero-filled
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte ranges lost to unreadable codewords
    pub fn erasures(&self) -> &[Range<usize>] {
        &self.erasures
    }

    /// ECI designator, if the symbol carried one
    pub fn eci(&self) -> Option<u32> {
        self.eci
    }

    /// Whether error correction confirmed the payload
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// No bytes were lost, whether or not they were verified
    pub fn is_complete(&self) -> bool {
        self.erasures.is_empty()
    }

    /// Whether byte `index` falls into an erased range
    pub fn is_erased(&self, index: usize) -> bool {
        self.erasures.iter().any(|r| r.contains(&index))
    }

    /// Split into LF-separated lines, flagging lines that touch erased bytes
    pub fn lines(&self) -> Vec<PayloadLine<'_>> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, &b) in self.bytes.iter().enumerate() {
            if b == b'\n' && !self.is_erased(i) {
                lines.push(self.line(start, i));
                start = i + 1;
            }
        }
        if start < self.bytes.len() {
            lines.push(self.line(start, self.bytes.len()));
        }
        lines
    }

    fn line(&self, start: usize, end: usize) -> PayloadLine<'_> {
        let damaged = self
            .erasures
            .iter()
            .any(|r| r.start < end && r.end > start);
        PayloadLine {
            bytes: &self.bytes[start..end],
            damaged,
        }
    }
}

/// One LF-delimited line of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLine<'a> {
    /// Line content without the delimiter
    pub bytes: &'a [u8],
    /// The line overlaps an erased byte range
    pub damaged: bool,
}
