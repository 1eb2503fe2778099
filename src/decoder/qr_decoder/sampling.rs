//! Module grid sampling from a binarized, axis-aligned symbol image

use crate::models::BitMatrix;

/// Pixel bounds of the dark content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Bounds {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Bounds {
    /// Bounding box of all dark pixels
    pub fn of_dark(binary: &BitMatrix) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for y in 0..binary.height() {
            for x in 0..binary.width() {
                if !binary.get(x, y) {
                    continue;
                }
                let b = bounds.get_or_insert(Bounds {
                    left: x,
                    top: y,
                    right: x,
                    bottom: y,
                });
                b.left = b.left.min(x);
                b.right = b.right.max(x);
                b.top = b.top.min(y);
                b.bottom = b.bottom.max(y);
            }
        }
        bounds
    }

    fn width(&self) -> usize {
        self.right - self.left + 1
    }

    fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

/// Symbol side length in modules implied by the corner finder runs
pub(super) fn estimate_dimension(binary: &BitMatrix, bounds: &Bounds) -> Option<usize> {
    let corners = [
        (bounds.left, bounds.top, 1isize, 1isize),
        (bounds.right, bounds.top, -1, 1),
        (bounds.left, bounds.bottom, 1, -1),
        (bounds.right, bounds.bottom, -1, -1),
    ];
    let mut runs: Vec<usize> = corners
        .iter()
        .map(|&(x, y, dx, dy)| {
            let horizontal = dark_run(binary, x, y, dx, 0);
            let vertical = dark_run(binary, x, y, 0, dy);
            horizontal.min(vertical)
        })
        .collect();
    runs.sort_unstable();

    let finder = (runs[1] + runs[2]) as f64 / 2.0;
    if finder < 7.0 {
        return None;
    }
    let module = finder / 7.0;
    let side = (bounds.width() + bounds.height()) as f64 / 2.0;
    Some(snap_dimension(side / module))
}

/// Nearest valid symbol size (17 + 4v)
pub(super) fn snap_dimension(modules: f64) -> usize {
    let version = ((modules - 17.0) / 4.0).round().clamp(1.0, 40.0) as usize;
    17 + 4 * version
}

fn dark_run(binary: &BitMatrix, x: usize, y: usize, dx: isize, dy: isize) -> usize {
    let (mut cx, mut cy) = (x as isize, y as isize);
    let mut run = 0;
    while cx >= 0
        && cy >= 0
        && (cx as usize) < binary.width()
        && (cy as usize) < binary.height()
        && binary.get(cx as usize, cy as usize)
    {
        run += 1;
        cx += dx;
        cy += dy;
    }
    run
}

/// Sample a `dimension`-sized grid by majority vote around each module center
pub(super) fn sample_grid(binary: &BitMatrix, bounds: &Bounds, dimension: usize) -> BitMatrix {
    let module_w = bounds.width() as f64 / dimension as f64;
    let module_h = bounds.height() as f64 / dimension as f64;
    let reach_x = (module_w / 4.0).floor() as isize;
    let reach_y = (module_h / 4.0).floor() as isize;

    BitMatrix::from_fn(dimension, dimension, |mx, my| {
        let cx = (bounds.left as f64 + (mx as f64 + 0.5) * module_w) as isize;
        let cy = (bounds.top as f64 + (my as f64 + 0.5) * module_h) as isize;
        let mut dark = 0;
        let mut total = 0;
        for y in cy - reach_y..=cy + reach_y {
            for x in cx - reach_x..=cx + reach_x {
                if x < 0 || y < 0 {
                    continue;
                }
                total += 1;
                if binary.get(x as usize, y as usize) {
                    dark += 1;
                }
            }
        }
        dark * 2 > total
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(grid: &BitMatrix, scale: usize, margin: usize) -> BitMatrix {
        let n = grid.width() * scale + 2 * margin;
        BitMatrix::from_fn(n, n, |x, y| {
            if x < margin || y < margin || x >= n - margin || y >= n - margin {
                return false;
            }
            grid.get((x - margin) / scale, (y - margin) / scale)
        })
    }

    fn finders(dim: usize) -> BitMatrix {
        BitMatrix::from_fn(dim, dim, |x, y| {
            [(0, 0), (dim - 7, 0), (0, dim - 7)].iter().any(|&(ox, oy)| {
                if x < ox || y < oy || x >= ox + 7 || y >= oy + 7 {
                    return false;
                }
                let (dx, dy) = (x - ox, y - oy);
                let ring = dx == 0 || dy == 0 || dx == 6 || dy == 6;
                ring || ((2..=4).contains(&dx) && (2..=4).contains(&dy))
            })
        })
    }

    #[test]
    fn test_snap_dimension() {
        assert_eq!(snap_dimension(20.6), 21);
        assert_eq!(snap_dimension(26.9), 25);
        assert_eq!(snap_dimension(3.0), 21);
        assert_eq!(snap_dimension(500.0), 177);
    }

    #[test]
    fn test_resample_scaled_grid() {
        let grid = finders(29);
        let image = scaled(&grid, 5, 12);
        let bounds = Bounds::of_dark(&image).unwrap();
        assert_eq!(bounds.left, 12);
        assert_eq!(estimate_dimension(&image, &bounds), Some(29));
        assert_eq!(sample_grid(&image, &bounds, 29), grid);
    }

    #[test]
    fn test_blank_image_has_no_bounds() {
        assert!(Bounds::of_dark(&BitMatrix::new(30, 30)).is_none());
    }
}
