use crate::decoder::modes::{
    BitReader, alphanumeric::AlphanumericDecoder, numeric::NumericDecoder,
};
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::decoder::tables::ec_block_info;
use crate::error::DecodeError;
use crate::models::ECLevel;

const MODE_TERMINATOR: u32 = 0;
const MODE_NUMERIC: u32 = 1;
const MODE_ALPHANUMERIC: u32 = 2;
const MODE_BYTE: u32 = 4;
const MODE_ECI: u32 = 7;
const MODE_KANJI: u32 = 8;

/// Segment bytes and the last ECI designator of a decoded symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SegmentData {
    pub bytes: Vec<u8>,
    pub eci: Option<u32>,
}

/// Split interleaved codewords into blocks, correct each and concatenate the data parts
pub(crate) fn deinterleave_and_correct(
    codewords: &[u8],
    version: u8,
    ec_level: ECLevel,
) -> Result<Vec<u8>, DecodeError> {
    let info = ec_block_info(version, ec_level).ok_or(DecodeError::Metadata)?;
    if codewords.len() != info.total_codewords {
        return Err(DecodeError::Codewords);
    }

    let short_blocks = info.short_blocks();
    let short_data = info.short_block_len() - info.ecc_per_block;
    let data_len = |b: usize| short_data + usize::from(b >= short_blocks);

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|b| Vec::with_capacity(data_len(b) + info.ecc_per_block))
        .collect();

    let mut source = codewords.iter().copied();
    for i in 0..=short_data {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < data_len(b) {
                block.push(source.next().ok_or(DecodeError::Codewords)?);
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(source.next().ok_or(DecodeError::Codewords)?);
        }
    }

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data = Vec::with_capacity(info.data_codewords());
    for (b, block) in blocks.iter_mut().enumerate() {
        let corrected = rs.decode(block)?;
        if corrected > 0 {
            tracing::trace!(block = b, corrected, "corrected QR block");
        }
        data.extend_from_slice(&block[..data_len(b)]);
    }
    Ok(data)
}

/// Walk the segment stream of corrected data codewords
pub(crate) fn decode_segments(data: &[u8], version: u8) -> Result<SegmentData, DecodeError> {
    let mut reader = BitReader::new(data);
    let mut bytes = Vec::new();
    let mut eci = None;

    while reader.remaining() >= 4 {
        let mode = reader.read_bits(4).ok_or(DecodeError::Codewords)?;
        match mode {
            MODE_TERMINATOR => break,
            MODE_NUMERIC => {
                let count = read_count(&mut reader, mode, version)?;
                NumericDecoder::decode(&mut reader, count, &mut bytes)
                    .ok_or(DecodeError::Codewords)?;
            }
            MODE_ALPHANUMERIC => {
                let count = read_count(&mut reader, mode, version)?;
                AlphanumericDecoder::decode(&mut reader, count, &mut bytes)
                    .ok_or(DecodeError::Codewords)?;
            }
            MODE_BYTE => {
                let count = read_count(&mut reader, mode, version)?;
                for _ in 0..count {
                    bytes.push(reader.read_bits(8).ok_or(DecodeError::Codewords)? as u8);
                }
            }
            MODE_ECI => {
                eci = Some(read_eci(&mut reader)?);
            }
            MODE_KANJI => {
                // kept as Shift-JIS byte pairs
                let count = read_count(&mut reader, mode, version)?;
                for _ in 0..count {
                    let value = reader.read_bits(13).ok_or(DecodeError::Codewords)?;
                    let mut code = ((value / 0xC0) << 8) | (value % 0xC0);
                    code += if code < 0x1F00 { 0x8140 } else { 0xC140 };
                    bytes.push((code >> 8) as u8);
                    bytes.push(code as u8);
                }
            }
            other => {
                tracing::trace!(mode = other, "unsupported QR segment mode");
                return Err(DecodeError::Codewords);
            }
        }
    }

    Ok(SegmentData { bytes, eci })
}

fn read_count(reader: &mut BitReader<'_>, mode: u32, version: u8) -> Result<usize, DecodeError> {
    reader
        .read_bits(char_count_bits(mode, version))
        .map(|c| c as usize)
        .ok_or(DecodeError::Codewords)
}

fn read_eci(reader: &mut BitReader<'_>) -> Result<u32, DecodeError> {
    let first = reader.read_bits(8).ok_or(DecodeError::Codewords)?;
    let value = if first & 0x80 == 0 {
        first
    } else if first & 0xC0 == 0x80 {
        ((first & 0x3F) << 8) | reader.read_bits(8).ok_or(DecodeError::Codewords)?
    } else if first & 0xE0 == 0xC0 {
        ((first & 0x1F) << 16) | reader.read_bits(16).ok_or(DecodeError::Codewords)?
    } else {
        return Err(DecodeError::Codewords);
    };
    Ok(value)
}

fn char_count_bits(mode: u32, version: u8) -> usize {
    let tier = match version {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        MODE_NUMERIC => [10, 12, 14][tier],
        MODE_ALPHANUMERIC => [9, 11, 13][tier],
        MODE_BYTE => [8, 16, 16][tier],
        _ => [8, 10, 12][tier],
    }
}
