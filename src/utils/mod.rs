//! Image helpers for symbol sampling

/// Global thresholds and binarization
pub mod binarization;
