use image::GrayImage;
use rayon::prelude::*;

use crate::decoder::config::{qr_dimension_slack, qr_threshold_spread};
use crate::error::DecodeError;
use crate::models::{BitMatrix, QRCode};
use crate::utils::binarization::{mean_threshold, otsu_threshold, threshold_binarize};

mod matrix_decode;
mod orientation;
pub(crate) mod payload;
mod sampling;

#[cfg(test)]
mod tests;

use sampling::Bounds;

/// QR decoder for an isolated, axis-aligned symbol image
pub struct QrDecoder;

impl QrDecoder {
    /// Decode the symbol in `image`
    ///
    /// With `thorough` set, a failed single pass is followed by recovery passes
    /// over alternative thresholds, polarities, grid sizes, orientations and
    /// format hypotheses. The first success in pass order wins.
    pub fn decode(image: &GrayImage, thorough: bool) -> Result<QRCode, DecodeError> {
        let otsu = otsu_threshold(image);
        let error = match Self::single_pass(image, otsu) {
            Ok(qr) => return Ok(qr),
            Err(err) if !thorough => return Err(err),
            Err(err) => err,
        };
        tracing::debug!(%error, "fast QR pass failed, starting thorough scan");

        let binaries = Self::thorough_binaries(image, otsu);
        let slack = qr_dimension_slack() as isize;
        let steps = std::iter::once(0).chain((1..=slack).flat_map(|k| [-k, k]));
        let candidates = &binaries;
        let attempts: Vec<(usize, usize)> = steps
            .flat_map(move |k| {
                candidates.iter().enumerate().filter_map(move |(i, candidate)| {
                    let dimension = candidate.estimate as isize + 4 * k;
                    (21..=177).contains(&dimension).then_some((i, dimension as usize))
                })
            })
            .collect();
        tracing::trace!(attempts = attempts.len(), "thorough QR attempts");

        attempts
            .par_iter()
            .find_map_first(|&(i, dimension)| {
                let candidate = &binaries[i];
                let grid = sampling::sample_grid(&candidate.binary, &candidate.bounds, dimension);
                matrix_decode::decode_grid(&grid, true).ok()
            })
            .ok_or(error)
    }

    /// Decode an already sampled module grid (one module per cell)
    pub fn decode_grid(grid: &BitMatrix, thorough: bool) -> Result<QRCode, DecodeError> {
        matrix_decode::decode_grid(grid, thorough)
    }

    fn single_pass(image: &GrayImage, threshold: u8) -> Result<QRCode, DecodeError> {
        let binary = threshold_binarize(image, threshold);
        let bounds = Bounds::of_dark(&binary).ok_or(DecodeError::NoSymbol)?;
        let dimension =
            sampling::estimate_dimension(&binary, &bounds).ok_or(DecodeError::NoSymbol)?;
        let grid = sampling::sample_grid(&binary, &bounds, dimension);
        matrix_decode::decode_grid(&grid, false)
    }

    fn thorough_binaries(image: &GrayImage, otsu: u8) -> Vec<Binarized> {
        let spread = qr_threshold_spread();
        let mut thresholds = vec![
            otsu,
            otsu.saturating_sub(spread).max(1),
            otsu.saturating_add(spread),
            mean_threshold(image).max(1),
        ];
        thresholds.dedup();

        let mut out = Vec::new();
        for threshold in thresholds {
            let binary = threshold_binarize(image, threshold);
            for binary in [binary.inverted(), binary].into_iter().rev() {
                let Some(bounds) = Bounds::of_dark(&binary) else {
                    continue;
                };
                if let Some(estimate) = sampling::estimate_dimension(&binary, &bounds) {
                    out.push(Binarized {
                        binary,
                        bounds,
                        estimate,
                    });
                }
            }
        }
        out
    }
}

/// One threshold and polarity of the input with its grid estimate
struct Binarized {
    binary: BitMatrix,
    bounds: Bounds,
    estimate: usize,
}
