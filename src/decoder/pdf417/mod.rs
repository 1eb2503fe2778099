//! PDF417 decoding from classified row scans
//!
//! Rows are placed by their indicators into the codeword matrix, unreadable
//! cells become erasures and Reed-Solomon correction runs over the whole
//! symbol. When correction fails the raw codewords are still decoded so that
//! a later stage can attempt reconstruction from what survived, once for each
//! plausible reading of erased text.

pub mod compaction;
pub mod galois;
pub mod metadata;

use crate::error::DecodeError;
use crate::models::{Pdf417Symbol, RawPayload, Symbology};
use compaction::TextResume;

pub use metadata::SymbolMetadata;

/// Padding codeword between data and check codewords
const PAD: u16 = 900;

/// PDF417 decoder
pub struct Pdf417Decoder;

impl Pdf417Decoder {
    /// Decode a symbol into a verified or, if correction fails, unverified payload
    pub fn decode(symbol: &Pdf417Symbol) -> Result<RawPayload, DecodeError> {
        Self::readings(symbol)?
            .into_iter()
            .next()
            .ok_or(DecodeError::Codewords)
    }

    /// Every distinct reading of a symbol, most likely first
    ///
    /// A verified payload is the only reading. When correction fails and a
    /// text compaction value was erased, the payload is also read under each
    /// other text sub-mode the lost value may have latched to.
    pub fn readings(symbol: &Pdf417Symbol) -> Result<Vec<RawPayload>, DecodeError> {
        if symbol.rows.is_empty() {
            return Err(DecodeError::NoSymbol);
        }
        let meta = metadata::read_metadata(&symbol.rows)?;
        let mut codewords = Self::codeword_matrix(symbol, &meta);
        let ecc = galois::ecc_count(meta.ec_level);
        if codewords.len() <= ecc + 1 {
            return Err(DecodeError::Metadata);
        }

        let erasures: Vec<usize> = codewords
            .iter()
            .enumerate()
            .filter_map(|(i, cw)| cw.is_none().then_some(i))
            .collect();

        let mut corrected: Vec<u16> = codewords.iter().map(|cw| cw.unwrap_or(0)).collect();
        match galois::correct(&mut corrected, ecc, &erasures) {
            Ok(fixed) => {
                tracing::debug!(fixed, erased = erasures.len(), "PDF417 error correction succeeded");
                let data = Self::data_region(&corrected, ecc)?;
                let data: Vec<Option<u16>> = data.iter().copied().map(Some).collect();
                let decoded = compaction::decode(&data)?;
                Ok(vec![
                    RawPayload::verified(Symbology::Pdf417, decoded.bytes).with_eci(decoded.eci),
                ])
            }
            Err(err) => {
                tracing::debug!(%err, erased = erasures.len(), "PDF417 error correction failed");
                codewords.truncate(codewords.len() - ecc);
                let data = Self::unverified_data_region(&codewords);
                let primary = compaction::decode(data)?;
                let alternates: &[TextResume] = if primary.text_erased {
                    &TextResume::ALL[1..]
                } else {
                    &[]
                };

                let mut readings = vec![primary];
                for &resume in alternates {
                    match compaction::decode_resuming(data, resume) {
                        Ok(decoded) if readings.iter().all(|r| r.bytes != decoded.bytes) => {
                            readings.push(decoded)
                        }
                        Ok(_) => {}
                        Err(err) => tracing::trace!(?resume, %err, "no reading under resume mode"),
                    }
                }
                tracing::trace!(readings = readings.len(), "unverified PDF417 readings");
                Ok(readings
                    .into_iter()
                    .map(|decoded| {
                        RawPayload::unverified(Symbology::Pdf417, decoded.bytes, decoded.erasures)
                            .with_eci(decoded.eci)
                    })
                    .collect())
            }
        }
    }

    /// Codewords in reading order with `None` for missing rows and unreadable cells
    fn codeword_matrix(symbol: &Pdf417Symbol, meta: &SymbolMetadata) -> Vec<Option<u16>> {
        let mut matrix = vec![None; meta.rows * meta.columns];
        let mut placed = vec![false; meta.rows];
        for row in &symbol.rows {
            let Some(number) = metadata::scanned_row_number(row) else {
                continue;
            };
            // a row's cluster is fixed by its position
            if number >= meta.rows
                || row.cluster as usize != number % 3 * 3
                || row.codewords.len() != meta.columns
                || placed[number]
            {
                tracing::trace!(number, "unreadable PDF417 row");
                continue;
            }
            placed[number] = true;
            let cells = &mut matrix[number * meta.columns..(number + 1) * meta.columns];
            for (cell, cw) in cells.iter_mut().zip(&row.codewords) {
                *cell = cw.filter(|&c| c < 929);
            }
        }
        matrix
    }

    /// Data codewords after the length descriptor, padding excluded
    fn data_region(corrected: &[u16], ecc: usize) -> Result<&[u16], DecodeError> {
        let available = corrected.len() - ecc;
        let length = corrected[0] as usize;
        if length == 0 || length > available {
            return Err(DecodeError::Codewords);
        }
        Ok(&corrected[1..length])
    }

    /// Best guess at the data codewords when correction failed
    fn unverified_data_region(data: &[Option<u16>]) -> &[Option<u16>] {
        let length = match data.first().copied().flatten() {
            Some(len) if (1..=data.len()).contains(&(len as usize)) => len as usize,
            _ => {
                // fall back to trimming trailing padding
                data.iter()
                    .rposition(|cw| *cw != Some(PAD))
                    .map_or(1, |last| last + 1)
            }
        };
        &data[1.min(length)..length]
    }
}
