//! Shared fixtures: sample slips and symbol encoders for QR and PDF417
#![allow(dead_code)]

use std::sync::Once;

use croatia_payment::decoder::format::FormatInfo;
use croatia_payment::decoder::function_mask::{FunctionMask, alignment_pattern_positions};
use croatia_payment::decoder::pdf417::{SymbolMetadata, galois, metadata};
use croatia_payment::decoder::reed_solomon::Gf256;
use croatia_payment::decoder::tables::ec_block_info;
use croatia_payment::decoder::version::VersionInfo;
use croatia_payment::models::{ECLevel, MaskPattern};
use croatia_payment::{BitMatrix, Pdf417Row, Pdf417Symbol};
use image::{GrayImage, Luma};

pub const IBAN: &str = "HR1210010051863000160";

pub const HUB3_HRK: &str = "HRVHUB30\nHRK\n000000000012345\nIvan Horvat\nIlica 1\n10000 Zagreb\n\
    Tvrtka d.o.o.\nSavska cesta 2\n10000 Zagreb\nHR1210010051863000160\nHR01\n1234-5678-9\nCOST\n\
    Placanje racuna 42\n31122024\n";

pub const HUB3_EUR: &str = "HRVHUB30\nEUR\n000000000002500\nAna Kovac\nVukovarska 5\n21000 Split\n\
    Komunalac d.o.o.\nObala 1\n21000 Split\nHR1210010051863000160\nHR00\n42\nOTHR\nVoda\n\n";

pub const HUB1_HRK: &str = "HRVHUB10\nHRK\n000000000012345\nIvan Horvat\nIlica 1\nTvrtka d.o.o.\n\
    Savska cesta 2\n1001005-1863000160\nHR01\n1234-5678-9\nCOST\n\nPlacanje racuna 42\n";

pub const UNKNOWN_FORMAT: &str = "HRVHUB99\nHRK\n000000000012345\n";

static TRACING: Once = Once::new();

/// Route library logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    fn push(&mut self, value: u32, count: usize) {
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|c| c.iter().enumerate().fold(0u8, |acc, (i, &b)| acc | (b as u8) << (7 - i)))
            .collect()
    }
}

/// Check codewords for one QR block, generator roots alpha^0..
fn qr_check_codewords(data: &[u8], ecc: usize) -> Vec<u8> {
    let mut generator = vec![1u8];
    for i in 0..ecc {
        let root = Gf256::alpha(i);
        let mut next = vec![0u8; generator.len() + 1];
        for (j, &c) in generator.iter().enumerate() {
            next[j] ^= c;
            next[j + 1] ^= Gf256::mul(c, root);
        }
        generator = next;
    }
    let mut rem = vec![0u8; ecc];
    for &d in data {
        let factor = d ^ rem[0];
        rem.rotate_left(1);
        rem[ecc - 1] = 0;
        for j in 0..ecc {
            rem[j] ^= Gf256::mul(generator[j + 1], factor);
        }
    }
    rem
}

/// Module grid of a byte-mode QR symbol, optionally preceded by an ECI segment
pub fn qr_symbol(data: &[u8], eci: Option<u32>, ec: ECLevel, mask: MaskPattern) -> BitMatrix {
    let header_bits = if eci.is_some() { 12 } else { 0 };
    let version = (1..=40u8)
        .find(|&v| {
            let count_bits = if v < 10 { 8 } else { 16 };
            let capacity = ec_block_info(v, ec).unwrap().data_codewords() * 8;
            header_bits + 4 + count_bits + 8 * data.len() <= capacity
        })
        .expect("payload fits a QR symbol");
    let info = ec_block_info(version, ec).unwrap();

    let mut bits = BitWriter::default();
    if let Some(eci) = eci {
        bits.push(0b0111, 4);
        bits.push(eci, 8);
    }
    bits.push(0b0100, 4);
    bits.push(data.len() as u32, if version < 10 { 8 } else { 16 });
    for &b in data {
        bits.push(b as u32, 8);
    }
    let capacity = info.data_codewords() * 8;
    let terminator = (capacity - bits.bits.len()).min(4);
    bits.push(0, terminator);
    while bits.bits.len() % 8 != 0 {
        bits.push(0, 1);
    }
    let mut codewords = bits.into_bytes();
    for pad in [0xEC, 0x11].into_iter().cycle() {
        if codewords.len() >= info.data_codewords() {
            break;
        }
        codewords.push(pad);
    }

    let short_data = info.short_block_len() - info.ecc_per_block;
    let mut blocks = Vec::new();
    let mut offset = 0;
    for b in 0..info.num_blocks {
        let len = short_data + usize::from(b >= info.short_blocks());
        blocks.push(codewords[offset..offset + len].to_vec());
        offset += len;
    }
    let checks: Vec<Vec<u8>> = blocks
        .iter()
        .map(|b| qr_check_codewords(b, info.ecc_per_block))
        .collect();
    let mut stream = Vec::with_capacity(info.total_codewords);
    for i in 0..=short_data {
        for block in &blocks {
            if let Some(&c) = block.get(i) {
                stream.push(c);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for check in &checks {
            stream.push(check[i]);
        }
    }

    let size = 17 + 4 * version as usize;
    let func = FunctionMask::new(version);
    let mut m = BitMatrix::new(size, size);

    for (ox, oy) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        for dy in 0..7usize {
            for dx in 0..7usize {
                let ring = dx.abs_diff(3).max(dy.abs_diff(3));
                m.set(ox + dx, oy + dy, ring != 2);
            }
        }
    }
    for i in 8..size - 8 {
        m.set(i, 6, i % 2 == 0);
        m.set(6, i, i % 2 == 0);
    }
    let centers = alignment_pattern_positions(version);
    let last = centers.len().saturating_sub(1);
    for (i, &cx) in centers.iter().enumerate() {
        for (j, &cy) in centers.iter().enumerate() {
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            for dy in 0..5usize {
                for dx in 0..5usize {
                    let ring = dx.abs_diff(2).max(dy.abs_diff(2));
                    m.set(cx - 2 + dx, cy - 2 + dy, ring != 1);
                }
            }
        }
    }
    m.set(8, size - 8, true);

    let format = FormatInfo {
        ec_level: ec,
        mask_pattern: mask,
    }
    .encode();
    let bit = |i: usize| (format >> i) & 1 == 1;
    for i in 0..6 {
        m.set(8, i, bit(i));
    }
    m.set(8, 7, bit(6));
    m.set(8, 8, bit(7));
    m.set(7, 8, bit(8));
    for i in 9..15 {
        m.set(14 - i, 8, bit(i));
    }
    for i in 0..8 {
        m.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        m.set(8, size - 15 + i, bit(i));
    }

    if version >= 7 {
        let word = VersionInfo::encode(version);
        for i in 0..18 {
            let on = (word >> i) & 1 == 1;
            m.set(size - 11 + i % 3, i / 3, on);
            m.set(i / 3, size - 11 + i % 3, on);
        }
    }

    let mut k = 0;
    let mut upward = true;
    let mut col = size as isize - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        let right = col as usize;
        for step in 0..size {
            let y = if upward { size - 1 - step } else { step };
            for x in [right, right - 1] {
                if func.is_function(x, y) {
                    continue;
                }
                let on = stream.get(k / 8).is_some_and(|&c| (c >> (7 - k % 8)) & 1 == 1);
                m.set(x, y, on ^ mask.is_masked(y, x));
                k += 1;
            }
        }
        upward = !upward;
        col -= 2;
    }
    m
}

/// Render a module grid with `scale` pixels per module and a light quiet zone
pub fn render(grid: &BitMatrix, scale: u32, quiet: u32) -> GrayImage {
    let n = grid.width() as u32;
    let side = n * scale + 2 * quiet;
    GrayImage::from_fn(side, side, |x, y| {
        let inside = x >= quiet && y >= quiet && x < quiet + n * scale && y < quiet + n * scale;
        let dark =
            inside && grid.get(((x - quiet) / scale) as usize, ((y - quiet) / scale) as usize);
        Luma([if dark { 24 } else { 232 }])
    })
}

/// QR slip image at EC level M, mask 2
pub fn qr_image(payload: &str) -> GrayImage {
    let grid = qr_symbol(payload.as_bytes(), None, ECLevel::M, MaskPattern::Pattern2);
    render(&grid, 4, 16)
}

/// Byte compaction: six bytes to five base-900 codewords, leftovers one per codeword
pub fn byte_compact(bytes: &[u8]) -> Vec<u16> {
    let mut out = vec![if bytes.len() % 6 == 0 { 924 } else { 901 }];
    let mut chunks = bytes.chunks_exact(6);
    for chunk in &mut chunks {
        let mut value = chunk.iter().fold(0u64, |acc, &b| acc << 8 | b as u64);
        let mut group = [0u16; 5];
        for slot in group.iter_mut().rev() {
            *slot = (value % 900) as u16;
            value /= 900;
        }
        out.extend(group);
    }
    out.extend(chunks.remainder().iter().map(|&b| b as u16));
    out
}

const MIXED: &[u8] = b"0123456789&\r\t,:#-.$/+%*=^";
const PUNCT: &[u8] = b";<>@[\\]_`~!\r\t,:\n-.$/\"|*()?{}'";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMode {
    Alpha,
    Lower,
    Mixed,
}

fn text_value(mode: TextMode, c: u8) -> Option<u16> {
    let value = match (mode, c) {
        (_, b' ') => 26,
        (TextMode::Alpha, b'A'..=b'Z') => c - b'A',
        (TextMode::Lower, b'a'..=b'z') => c - b'a',
        (TextMode::Mixed, _) => MIXED.iter().position(|&m| m == c)? as u8,
        _ => return None,
    };
    Some(value as u16)
}

/// Text compaction: latches between alpha, lower and mixed, punctuation by shift
pub fn text_compact(text: &str) -> Vec<u16> {
    let mut values = Vec::new();
    let mut mode = TextMode::Alpha;
    for c in text.bytes() {
        if let Some(v) = text_value(mode, c) {
            values.push(v);
            continue;
        }
        if let Some(p) = PUNCT.iter().position(|&p| p == c) {
            values.extend([29, p as u16]);
            continue;
        }
        let (latch, next): (&[u16], TextMode) = match (mode, c) {
            (TextMode::Lower, b'A'..=b'Z') => (&[28, 28], TextMode::Alpha),
            (_, b'A'..=b'Z') => (&[28], TextMode::Alpha),
            (_, b'a'..=b'z') => (&[27], TextMode::Lower),
            _ => (&[28], TextMode::Mixed),
        };
        values.extend_from_slice(latch);
        mode = next;
        values.push(text_value(mode, c).expect("character has a text compaction value"));
    }
    if values.len() % 2 == 1 {
        values.push(29);
    }
    values.chunks(2).map(|pair| pair[0] * 30 + pair[1]).collect()
}

/// Row scans of a byte-compacted PDF417 symbol
pub fn pdf417_symbol(payload: &[u8], columns: usize, ec_level: u8) -> Pdf417Symbol {
    pdf417_rows(&byte_compact(payload), columns, ec_level)
}

/// Row scans of a text-compacted PDF417 symbol
pub fn pdf417_text_symbol(text: &str, columns: usize, ec_level: u8) -> Pdf417Symbol {
    pdf417_rows(&text_compact(text), columns, ec_level)
}

/// Row scans carrying `codewords` after the length descriptor
fn pdf417_rows(codewords: &[u16], columns: usize, ec_level: u8) -> Pdf417Symbol {
    let mut data = vec![0u16];
    data.extend_from_slice(codewords);
    let ecc = galois::ecc_count(ec_level);
    let rows = (data.len() + ecc).div_ceil(columns).max(3);
    let length = data.len();
    data.resize(rows * columns - ecc, 900);
    data[0] = length as u16;
    let check = galois::generate(&data, ec_level);
    data.extend(check);

    let meta = SymbolMetadata {
        rows,
        columns,
        ec_level,
    };
    let scans = data
        .chunks(columns)
        .enumerate()
        .map(|(r, codewords)| {
            let (left, right) = metadata::row_indicators(r, &meta);
            Pdf417Row::new((r % 3 * 3) as u8, left, codewords.to_vec(), right)
        })
        .collect();
    Pdf417Symbol::new(scans)
}

/// The same symbol with row `row` never scanned
pub fn without_row(symbol: &Pdf417Symbol, row: usize) -> Pdf417Symbol {
    let mut rows = symbol.rows.clone();
    rows.remove(row);
    Pdf417Symbol::new(rows)
}
