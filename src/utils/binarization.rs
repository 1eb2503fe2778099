use image::GrayImage;

use crate::models::BitMatrix;

/// Otsu's optimal global threshold
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total = pixel_count(gray) as f64;
    let total_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as u64 * c)
        .sum();

    let mut best_variance = 0.0;
    let mut best_threshold = 128u8;
    let mut below_count = 0u64;
    let mut below_sum = 0u64;

    for threshold in 1..=255usize {
        below_count += histogram[threshold - 1];
        below_sum += (threshold as u64 - 1) * histogram[threshold - 1];
        let above_count = total as u64 - below_count;
        if below_count == 0 || above_count == 0 {
            continue;
        }

        let below_mean = below_sum as f64 / below_count as f64;
        let above_mean = (total_sum - below_sum) as f64 / above_count as f64;
        let w1 = below_count as f64 / total;
        let w2 = above_count as f64 / total;
        let variance = w1 * w2 * (below_mean - above_mean).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = threshold as u8;
        }
    }

    best_threshold
}

/// Mean intensity, used as a second-opinion threshold
pub fn mean_threshold(gray: &GrayImage) -> u8 {
    let count = pixel_count(gray);
    if count == 0 {
        return 128;
    }
    let sum: u64 = gray.pixels().map(|p| p.0[0] as u64).sum();
    (sum / count) as u8
}

fn pixel_count(gray: &GrayImage) -> u64 {
    gray.width() as u64 * gray.height() as u64
}

/// Pixels darker than `threshold` become dark modules
pub fn threshold_binarize(gray: &GrayImage, threshold: u8) -> BitMatrix {
    let (width, height) = gray.dimensions();
    BitMatrix::from_fn(width as usize, height as usize, |x, y| {
        gray.get_pixel(x as u32, y as u32).0[0] < threshold
    })
}
