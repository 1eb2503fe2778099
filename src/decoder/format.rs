//! Format information: EC level and mask pattern, BCH(15,5) protected

use crate::models::{BitMatrix, ECLevel, MaskPattern};

const GENERATOR: u32 = 0x537;
const XOR_MASK: u16 = 0x5412;
/// BCH(15,5) corrects up to three flipped bits
const MAX_DISTANCE: u32 = 3;

/// Decoded format information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Every EC level and mask combination, for brute-force decoding
    pub fn all() -> impl Iterator<Item = FormatInfo> {
        ECLevel::ALL.into_iter().flat_map(|ec_level| {
            (0..8u8).map(move |m| FormatInfo {
                ec_level,
                mask_pattern: MaskPattern::from_bits(m),
            })
        })
    }

    /// 15-bit masked codeword as drawn in the symbol
    pub fn encode(self) -> u16 {
        let data = ((self.ec_level.format_bits() as u32) << 3) | self.mask_pattern as u32;
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * GENERATOR);
        }
        (((data << 10) | rem) as u16) ^ XOR_MASK
    }

    /// Read both copies and decode the one closest to a valid codeword
    pub fn extract(matrix: &BitMatrix) -> Option<Self> {
        if matrix.width() < 21 {
            return None;
        }
        let [first, second] = Self::read_copies(matrix);
        let (info, distance) = [first, second]
            .into_iter()
            .filter_map(Self::nearest)
            .min_by_key(|&(_, d)| d)?;
        if distance > MAX_DISTANCE {
            tracing::trace!(first, second, distance, "format information unreadable");
            return None;
        }
        Some(info)
    }

    /// Raw 15-bit words of the copy around the top-left finder and the split copy
    pub fn read_copies(matrix: &BitMatrix) -> [u16; 2] {
        let size = matrix.width();
        let bit = |x: usize, y: usize, i: usize| (matrix.get(x, y) as u16) << i;

        let mut first = 0u16;
        for i in 0..6 {
            first |= bit(8, i, i);
        }
        first |= bit(8, 7, 6);
        first |= bit(8, 8, 7);
        first |= bit(7, 8, 8);
        for i in 9..15 {
            first |= bit(14 - i, 8, i);
        }

        let mut second = 0u16;
        for i in 0..8 {
            second |= bit(size - 1 - i, 8, i);
        }
        for i in 8..15 {
            second |= bit(8, size - 15 + i, i);
        }
        [first, second]
    }

    /// Closest valid format and its Hamming distance to `bits`
    fn nearest(bits: u16) -> Option<(Self, u32)> {
        Self::all()
            .map(|info| (info, (info.encode() ^ bits).count_ones()))
            .min_by_key(|&(_, d)| d)
    }
}
