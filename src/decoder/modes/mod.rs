//! QR segment decoders
//!
//! Numeric and alphanumeric segments are unpacked here; byte, kanji and ECI
//! segments are simple enough to read inline in the payload decoder.

/// Alphanumeric segments (45-character set)
pub mod alphanumeric;
/// Numeric segments (three digits per ten bits)
pub mod numeric;

/// MSB-first reader over data codewords
pub struct BitReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    /// Reader positioned at the first bit of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bits left to read
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.offset
    }

    /// Read `n` (at most 32) bits as an unsigned value
    pub fn read_bits(&mut self, n: usize) -> Option<u32> {
        if n > 32 || n > self.remaining() {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..n {
            let byte = self.bytes[self.offset / 8];
            let bit = (byte >> (7 - self.offset % 8)) & 1;
            value = (value << 1) | bit as u32;
            self.offset += 1;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_reader() {
        let mut reader = BitReader::new(&[0b1010_1100, 0xFF]);
        assert_eq!(reader.read_bits(4), Some(0b1010));
        assert_eq!(reader.read_bits(6), Some(0b1100_11));
        assert_eq!(reader.remaining(), 6);
        assert_eq!(reader.read_bits(7), None);
        assert_eq!(reader.read_bits(6), Some(0b11_1111));
    }
}
