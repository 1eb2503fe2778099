use crate::models::BitMatrix;

/// Diagnostic cells of a finder pattern relative to its top-left corner
const FINDER_CHECKS: [(usize, usize, bool); 9] = [
    (0, 0, true),
    (6, 0, true),
    (0, 6, true),
    (6, 6, true),
    (3, 3, true),
    (2, 2, true),
    (4, 4, true),
    (1, 1, false),
    (5, 5, false),
];

/// Mismatching finder cells tolerated on the fast path
const STRICT_TOLERANCE: usize = 3;

/// Count finder cells that disagree with a correctly oriented symbol
pub(super) fn finder_mismatches(matrix: &BitMatrix) -> Option<usize> {
    let dim = matrix.width();
    if dim < 21 || matrix.height() != dim {
        return None;
    }

    let origins = [(0, 0), (dim - 7, 0), (0, dim - 7)];
    let mismatches = origins
        .iter()
        .flat_map(|&(ox, oy)| {
            FINDER_CHECKS
                .iter()
                .map(move |&(dx, dy, expected)| matrix.get(ox + dx, oy + dy) != expected)
        })
        .filter(|&m| m)
        .count();
    Some(mismatches)
}

/// The eight rotations and mirror images of a square matrix
pub(super) fn all_orientations(matrix: &BitMatrix) -> Vec<BitMatrix> {
    let mut out = Vec::with_capacity(8);
    for base in [matrix.clone(), matrix.flip_horizontal()] {
        let mut current = base;
        for _ in 0..4 {
            let next = current.rotate90();
            out.push(current);
            current = next;
        }
    }
    out
}

/// Orientations whose finder corners look right, best first
pub(super) fn candidate_orientations(matrix: &BitMatrix) -> Vec<BitMatrix> {
    let mut scored: Vec<(usize, BitMatrix)> = all_orientations(matrix)
        .into_iter()
        .filter_map(|m| finder_mismatches(&m).map(|s| (s, m)))
        .filter(|&(s, _)| s <= STRICT_TOLERANCE)
        .collect();
    scored.sort_by_key(|&(s, _)| s);
    scored.into_iter().map(|(_, m)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_finders(dim: usize) -> BitMatrix {
        let mut m = BitMatrix::new(dim, dim);
        for &(ox, oy) in &[(0, 0), (dim - 7, 0), (0, dim - 7)] {
            for dy in 0..7 {
                for dx in 0..7 {
                    let ring = dx == 0 || dy == 0 || dx == 6 || dy == 6;
                    let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                    m.set(ox + dx, oy + dy, ring || core);
                }
            }
        }
        m
    }

    #[test]
    fn test_upright_symbol_is_only_candidate() {
        let upright = with_finders(21);
        assert_eq!(finder_mismatches(&upright), Some(0));
        let candidates = candidate_orientations(&upright);
        // the main diagonal mirror also keeps three corners in place
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0], upright);
    }

    #[test]
    fn test_rotated_symbol_is_recovered() {
        let upright = with_finders(25);
        let rotated = upright.rotate90();
        assert!(finder_mismatches(&rotated).unwrap() > STRICT_TOLERANCE);
        assert!(candidate_orientations(&rotated).contains(&upright));
    }

    #[test]
    fn test_eight_distinct_orientations() {
        let mut m = BitMatrix::new(21, 21);
        m.set(1, 0, true);
        let all = all_orientations(&m);
        assert_eq!(all.len(), 8);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
