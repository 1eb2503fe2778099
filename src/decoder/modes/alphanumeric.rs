use super::BitReader;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
const ALPHANUMERIC_TABLE: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Alphanumeric mode decoder (mode 0010)
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Append `count` characters to `out`
    pub fn decode(reader: &mut BitReader<'_>, count: usize, out: &mut Vec<u8>) -> Option<()> {
        let mut remaining = count;
        while remaining >= 2 {
            let value = reader.read_bits(11)? as usize;
            out.push(*ALPHANUMERIC_TABLE.get(value / 45)?);
            out.push(ALPHANUMERIC_TABLE[value % 45]);
            remaining -= 2;
        }
        if remaining == 1 {
            let value = reader.read_bits(6)? as usize;
            out.push(*ALPHANUMERIC_TABLE.get(value)?);
        }
        Some(())
    }
}
