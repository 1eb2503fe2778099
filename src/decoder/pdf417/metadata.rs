//! Symbol dimensions and EC level from row indicator codewords

use std::collections::HashMap;

use crate::error::DecodeError;
use crate::models::Pdf417Row;

/// Dimensions and error correction level agreed on by the row indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMetadata {
    /// Rows in the symbol (3-90)
    pub rows: usize,
    /// Data columns per row (1-30)
    pub columns: usize,
    /// Error correction level (0-8)
    pub ec_level: u8,
}

/// Which quantity an indicator value carries, by cluster and side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    RowGroups,
    LevelAndRemainder,
    Columns,
}

fn field_for(cluster: u8, left: bool) -> Option<Field> {
    match (cluster, left) {
        (0, true) | (3, false) => Some(Field::RowGroups),
        (3, true) | (6, false) => Some(Field::LevelAndRemainder),
        (6, true) | (0, false) => Some(Field::Columns),
        _ => None,
    }
}

/// Left and right indicator values for row `row` of a symbol
pub fn row_indicators(row: usize, meta: &SymbolMetadata) -> (u16, u16) {
    let base = 30 * (row / 3);
    let groups = (meta.rows - 1) / 3;
    let level = meta.ec_level as usize * 3 + (meta.rows - 1) % 3;
    let columns = meta.columns - 1;
    let (left, right) = match row % 3 {
        0 => (groups, columns),
        1 => (level, groups),
        _ => (columns, level),
    };
    ((base + left) as u16, (base + right) as u16)
}

/// Row number encoded by an indicator of a row in `cluster`
pub fn row_number(indicator: u16, cluster: u8) -> usize {
    3 * (indicator as usize / 30) + cluster as usize / 3
}

/// Row number of a scanned row, from whichever indicator agrees
pub fn scanned_row_number(row: &Pdf417Row) -> Option<usize> {
    let left = row.left_indicator.map(|i| row_number(i, row.cluster));
    let right = row.right_indicator.map(|i| row_number(i, row.cluster));
    match (left, right) {
        (Some(l), Some(r)) if l != r => None,
        (l, r) => l.or(r),
    }
}

/// Vote on the symbol metadata across every readable indicator
pub fn read_metadata(rows: &[Pdf417Row]) -> Result<SymbolMetadata, DecodeError> {
    let mut votes: HashMap<Field, HashMap<usize, usize>> = HashMap::new();
    for row in rows {
        if !matches!(row.cluster, 0 | 3 | 6) {
            continue;
        }
        for (indicator, left) in [(row.left_indicator, true), (row.right_indicator, false)] {
            let (Some(value), Some(field)) = (indicator, field_for(row.cluster, left)) else {
                continue;
            };
            if value >= 900 {
                continue;
            }
            *votes
                .entry(field)
                .or_default()
                .entry(value as usize % 30)
                .or_default() += 1;
        }
    }

    let winner = |field: Field| {
        votes
            .get(&field)
            .and_then(|counts| {
                counts
                    .iter()
                    .max_by_key(|&(value, count)| (*count, std::cmp::Reverse(*value)))
            })
            .map(|(&value, _)| value)
            .ok_or(DecodeError::Metadata)
    };

    let groups = winner(Field::RowGroups)?;
    let level_and_remainder = winner(Field::LevelAndRemainder)?;
    let columns = winner(Field::Columns)? + 1;
    let rows = groups * 3 + level_and_remainder % 3 + 1;
    let ec_level = (level_and_remainder / 3) as u8;

    if !(3..=90).contains(&rows) || !(1..=30).contains(&columns) || ec_level > 8 {
        return Err(DecodeError::Metadata);
    }
    tracing::trace!(rows, columns, ec_level, "PDF417 metadata");
    Ok(SymbolMetadata {
        rows,
        columns,
        ec_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned(meta: &SymbolMetadata) -> Vec<Pdf417Row> {
        (0..meta.rows)
            .map(|r| {
                let (left, right) = row_indicators(r, meta);
                Pdf417Row::new((r % 3 * 3) as u8, left, vec![0; meta.columns], right)
            })
            .collect()
    }

    #[test]
    fn test_indicator_round_trip() {
        let meta = SymbolMetadata {
            rows: 13,
            columns: 5,
            ec_level: 2,
        };
        let rows = scanned(&meta);
        assert_eq!(read_metadata(&rows), Ok(meta));
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(scanned_row_number(row), Some(r));
        }
    }

    #[test]
    fn test_majority_outvotes_damaged_indicators() {
        let meta = SymbolMetadata {
            rows: 9,
            columns: 4,
            ec_level: 1,
        };
        let mut rows = scanned(&meta);
        rows[0].left_indicator = Some(29);
        rows[3].left_indicator = None;
        rows[5].right_indicator = None;
        assert_eq!(read_metadata(&rows), Ok(meta));
        assert_eq!(scanned_row_number(&rows[3]), Some(3));
    }

    #[test]
    fn test_missing_field_is_metadata_error() {
        let meta = SymbolMetadata {
            rows: 6,
            columns: 2,
            ec_level: 0,
        };
        // only cluster 0 rows survive: no level votes
        let rows: Vec<_> = scanned(&meta).into_iter().step_by(3).collect();
        assert_eq!(read_metadata(&rows), Err(DecodeError::Metadata));
    }
}
