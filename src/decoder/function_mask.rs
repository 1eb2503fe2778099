use crate::models::BitMatrix;

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    /// Mask for a symbol of `version` (1-40)
    pub fn new(version: u8) -> Self {
        let size = 17 + 4 * version as usize;
        let mut mask = BitMatrix::new(size, size);

        // finder patterns with separators, format copies and the dark module
        Self::mark_area(&mut mask, 0, 0, 9, 9);
        Self::mark_area(&mut mask, size - 8, 0, 8, 9);
        Self::mark_area(&mut mask, 0, size - 8, 9, 8);

        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                let finder_corner =
                    (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !finder_corner {
                    Self::mark_area(&mut mask, cx - 2, cy - 2, 5, 5);
                }
            }
        }

        if version >= 7 {
            Self::mark_area(&mut mask, size - 11, 0, 3, 6);
            Self::mark_area(&mut mask, 0, size - 11, 6, 3);
        }

        Self { mask }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Whether (x, y) holds a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Number of modules left for data and check bits
    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|&(x, y)| !self.mask.get(x, y))
            .count()
    }

    fn mark_area(mask: &mut BitMatrix, x: usize, y: usize, w: usize, h: usize) {
        for yy in y..y + h {
            for xx in x..x + w {
                mask.set(xx, yy, true);
            }
        }
    }
}

/// Alignment pattern centers for a given version.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version <= 1 {
        return Vec::new();
    }
    let v = version as usize;
    let count = v / 7 + 2;
    let size = 17 + 4 * v;
    let step = (v * 8 + count * 3 + 5) / (count * 4 - 4) * 2;

    let mut positions: Vec<usize> = (0..count - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::tables::raw_data_modules;

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(1).is_empty());
        assert_eq!(alignment_pattern_positions(2), vec![6, 18]);
        assert_eq!(alignment_pattern_positions(7), vec![6, 22, 38]);
        assert_eq!(alignment_pattern_positions(32), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_pattern_positions(40),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_data_modules_match_capacity() {
        for version in [1u8, 2, 6, 7, 14, 21, 40] {
            let mask = FunctionMask::new(version);
            assert_eq!(mask.data_modules_count(), raw_data_modules(version));
        }
    }
}
