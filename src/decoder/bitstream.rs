/// Codeword extraction from an unmasked QR matrix
use crate::decoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Reads data modules in the zig-zag placement order
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Data bits in placement order, remainder bits included
    pub fn extract(matrix: &BitMatrix, func: &FunctionMask) -> Vec<bool> {
        let dimension = func.size();
        let mut bits = Vec::with_capacity(func.data_modules_count());

        let mut upward = true;
        let mut col = dimension as isize - 1;
        while col > 0 {
            if col == 6 {
                col -= 1;
            }
            let right = col as usize;
            for step in 0..dimension {
                let row = if upward { dimension - 1 - step } else { step };
                for x in [right, right - 1] {
                    if !func.is_function(x, row) {
                        bits.push(matrix.get(x, row));
                    }
                }
            }
            upward = !upward;
            col -= 2;
        }
        bits
    }

    /// Whole codewords, most significant bit first; remainder bits are dropped
    pub fn codewords(matrix: &BitMatrix, func: &FunctionMask) -> Vec<u8> {
        Self::extract(matrix, func)
            .chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
            .collect()
    }
}
