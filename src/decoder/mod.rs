//! Symbol decoding modules
//!
//! This module turns an isolated symbol sample into a raw byte payload:
//! - QR: grid sampling, format and version information, unmasking,
//!   bitstream extraction, Reed-Solomon over GF(256), segment decoding
//! - PDF417: row indicator analysis, codeword grid assembly,
//!   Reed-Solomon over GF(929), high-level compaction decoding

/// Bitstream extraction from QR matrix
pub mod bitstream;
/// Decoder tuning read from the environment
pub mod config;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Data mode decoders (numeric, alphanumeric)
pub mod modes;
/// PDF417 decoding from row scans
pub mod pdf417;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// QR block structure tables (ECC codewords/blocks)
pub mod tables;
/// QR code unmasking (removes mask patterns)
pub mod unmask;
/// Version information extraction (versions 7-40)
pub mod version;
