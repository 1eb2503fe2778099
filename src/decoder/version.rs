//! Version information for QR codes v7+, BCH(18,6) protected

use crate::models::BitMatrix;

const GENERATOR: u32 = 0x1f25;
const MAX_DISTANCE: u32 = 3;

/// Version information block
pub struct VersionInfo;

impl VersionInfo {
    /// 18-bit codeword for `version`
    pub fn encode(version: u8) -> u32 {
        let data = version as u32;
        let mut rem = data;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * GENERATOR);
        }
        (data << 12) | rem
    }

    /// Decode the version from either copy; `None` below 45 modules
    pub fn extract(matrix: &BitMatrix) -> Option<u8> {
        let size = matrix.width();
        if size < 45 {
            return None;
        }
        let mut top_right = 0u32;
        let mut bottom_left = 0u32;
        for i in 0..18 {
            let a = size - 11 + i % 3;
            let b = i / 3;
            top_right |= (matrix.get(a, b) as u32) << i;
            bottom_left |= (matrix.get(b, a) as u32) << i;
        }

        let (version, distance) = [top_right, bottom_left]
            .into_iter()
            .filter_map(Self::nearest)
            .min_by_key(|&(_, d)| d)?;
        (distance <= MAX_DISTANCE).then_some(version)
    }

    fn nearest(bits: u32) -> Option<(u8, u32)> {
        (7..=40u8)
            .map(|v| (v, (Self::encode(v) ^ bits).count_ones()))
            .min_by_key(|&(_, d)| d)
    }
}
