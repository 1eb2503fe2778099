use super::BitReader;

/// Numeric mode decoder (mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
pub struct NumericDecoder;

impl NumericDecoder {
    /// Append `count` ASCII digits to `out`
    pub fn decode(reader: &mut BitReader<'_>, count: usize, out: &mut Vec<u8>) -> Option<()> {
        let mut remaining = count;
        while remaining > 0 {
            let group = remaining.min(3);
            let bits = match group {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            let value = reader.read_bits(bits)?;
            if value >= 10u32.pow(group as u32) {
                return None;
            }
            out.extend_from_slice(format!("{value:0group$}").as_bytes());
            remaining -= group;
        }
        Some(())
    }
}
