use super::*;
use crate::decoder::format::FormatInfo;
use crate::models::{ECLevel, MaskPattern};
use image::Luma;

/// Version 1-M symbol for "4376471154038", mask 7
const GOLDEN: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

fn golden() -> BitMatrix {
    BitMatrix::from_fn(21, 21, |x, y| GOLDEN[y].as_bytes()[x] == b'#')
}

fn render(grid: &BitMatrix, scale: u32, quiet: u32, dark: u8, light: u8) -> GrayImage {
    let n = grid.width() as u32;
    let side = n * scale + 2 * quiet;
    GrayImage::from_fn(side, side, |x, y| {
        let inside = x >= quiet && y >= quiet && x < quiet + n * scale && y < quiet + n * scale;
        let on = inside
            && grid.get(((x - quiet) / scale) as usize, ((y - quiet) / scale) as usize);
        Luma([if on { dark } else { light }])
    })
}

#[test]
fn test_golden_matrix_decode() {
    let qr = QrDecoder::decode_grid(&golden(), false).unwrap();
    assert_eq!(qr.data, b"4376471154038");
    assert_eq!(qr.version, 1);
    assert_eq!(qr.error_correction, ECLevel::M);
    assert_eq!(qr.mask_pattern, MaskPattern::Pattern7);
    assert_eq!(qr.eci, None);
}

#[test]
fn test_golden_format_bits() {
    let format = FormatInfo::extract(&golden()).unwrap();
    assert_eq!(format.ec_level, ECLevel::M);
    assert_eq!(format.mask_pattern, MaskPattern::Pattern7);
}

#[test]
fn test_orientations_decode() {
    let upright = golden();
    let mut rotated = upright.clone();
    for _ in 0..3 {
        rotated = rotated.rotate90();
        let qr = QrDecoder::decode_grid(&rotated, false).unwrap();
        assert_eq!(qr.data, b"4376471154038");
    }
    let mirrored = upright.flip_horizontal();
    let qr = QrDecoder::decode_grid(&mirrored, false).unwrap();
    assert_eq!(qr.data, b"4376471154038");
}

#[test]
fn test_wiped_format_needs_thorough_scan() {
    let mut damaged = golden();
    for i in 0..9 {
        damaged.set(8, i, false);
        damaged.set(i, 8, false);
    }
    for i in 0..8 {
        damaged.set(20 - i, 8, false);
        damaged.set(8, 20 - i, false);
    }
    // timing cells and the dark module are not format bits
    damaged.set(8, 6, GOLDEN[6].as_bytes()[8] == b'#');
    damaged.set(6, 8, GOLDEN[8].as_bytes()[6] == b'#');
    damaged.set(8, 13, true);

    assert!(QrDecoder::decode_grid(&damaged, false).is_err());
    let qr = QrDecoder::decode_grid(&damaged, true).unwrap();
    assert_eq!(qr.data, b"4376471154038");
}

#[test]
fn test_image_decode() {
    let image = render(&golden(), 4, 16, 20, 235);
    let qr = QrDecoder::decode(&image, false).unwrap();
    assert_eq!(qr.data, b"4376471154038");
}

#[test]
fn test_inverted_image_needs_thorough_scan() {
    let image = render(&golden().inverted(), 4, 0, 20, 235);
    let padded = GrayImage::from_fn(image.width() + 32, image.height() + 32, |x, y| {
        if x < 16 || y < 16 || x >= image.width() + 16 || y >= image.height() + 16 {
            Luma([20])
        } else {
            *image.get_pixel(x - 16, y - 16)
        }
    });
    assert!(QrDecoder::decode(&padded, false).is_err());
    let qr = QrDecoder::decode(&padded, true).unwrap();
    assert_eq!(qr.data, b"4376471154038");
}

#[test]
fn test_blank_image_has_no_symbol() {
    let image = GrayImage::from_pixel(64, 64, Luma([255]));
    assert_eq!(QrDecoder::decode(&image, true), Err(DecodeError::NoSymbol));
}
