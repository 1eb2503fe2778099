use crate::decoder::bitstream::BitstreamExtractor;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::qr_decoder::{orientation, payload};
use crate::decoder::unmask::unmask;
use crate::decoder::version::VersionInfo;
use crate::error::DecodeError;
use crate::models::{BitMatrix, QRCode};

/// Decode an upright module grid under one format hypothesis
pub(super) fn decode_with_format(
    oriented: &BitMatrix,
    version: u8,
    format: FormatInfo,
) -> Result<QRCode, DecodeError> {
    let func = FunctionMask::new(version);
    let mut unmasked = oriented.clone();
    unmask(&mut unmasked, format.mask_pattern, &func);

    let codewords = BitstreamExtractor::codewords(&unmasked, &func);
    let data = payload::deinterleave_and_correct(&codewords, version, format.ec_level)?;
    let segments = payload::decode_segments(&data, version)?;
    if segments.bytes.is_empty() {
        return Err(DecodeError::Codewords);
    }

    Ok(QRCode {
        data: segments.bytes,
        eci: segments.eci,
        version,
        error_correction: format.ec_level,
        mask_pattern: format.mask_pattern,
    })
}

/// Decode a module grid, trying orientations and format hypotheses
///
/// The fast path only tries orientations with recognizable finders and the
/// format read from the symbol. The thorough path tries all eight orientations
/// and falls back to every EC level and mask when the format is unreadable.
pub(super) fn decode_grid(grid: &BitMatrix, thorough: bool) -> Result<QRCode, DecodeError> {
    let dim = grid.width();
    if dim < 21 || dim != grid.height() || (dim - 17) % 4 != 0 {
        return Err(DecodeError::NoSymbol);
    }
    let version = ((dim - 17) / 4) as u8;

    let orientations = if thorough {
        orientation::all_orientations(grid)
    } else {
        orientation::candidate_orientations(grid)
    };
    if orientations.is_empty() {
        return Err(DecodeError::NoSymbol);
    }

    let mut last_error = DecodeError::Format;
    for oriented in &orientations {
        if dim >= 45
            && VersionInfo::extract(oriented).is_some_and(|v| v != version)
        {
            continue;
        }

        match FormatInfo::extract(oriented) {
            Some(format) => match decode_with_format(oriented, version, format) {
                Ok(qr) => return Ok(qr),
                Err(err) => last_error = err,
            },
            None => last_error = DecodeError::Format,
        }

        if thorough {
            for format in FormatInfo::all() {
                if let Ok(qr) = decode_with_format(oriented, version, format) {
                    tracing::debug!(?format, "QR decoded with brute-forced format");
                    return Ok(qr);
                }
            }
        }
    }
    Err(last_error)
}
