//! FILENAME: core/engine/src/coord.rs
//! PURPOSE: Conversions between cell names and 0-based (col, row) indices.
//! CONTEXT: Cells are stored and referenced by canonical uppercase names such as
//! "A1" or "AB12". Column "A" = 0, "B" = 1, ..., "Z" = 25, "AA" = 26, etc.
//! Row 1 in a cell name = row 0 internally.

use crate::config::MAX_DIMENSION;
use crate::error::CellNameError;

/// A cell position as (col, row) with 0-based indices.
pub type CellPosition = (u32, u32);

/// Converts a column string (e.g., "A", "aa", "ABC") to a 0-based column index.
/// "A" -> 0, "B" -> 1, ..., "Z" -> 25, "AA" -> 26, "AB" -> 27, etc.
pub fn col_to_index(col_str: &str) -> Result<u32, CellNameError> {
    if col_str.is_empty() {
        return Err(CellNameError::Empty);
    }

    let mut result: u32 = 0;
    for c in col_str.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(CellNameError::InvalidColumnCharacter(c));
        }
        let digit = (upper as u32) - ('A' as u32) + 1;
        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(digit))
            .ok_or_else(|| CellNameError::InvalidFormat(col_str.to_string()))?;
    }
    Ok(result - 1) // Convert to 0-based
}

/// Converts a 0-based column index to a column string.
/// 0 -> "A", 1 -> "B", ..., 25 -> "Z", 26 -> "AA", 27 -> "AB", etc.
pub fn index_to_col(mut col_index: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col_index % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    result
}

/// (0, 0) -> "A1", (1, 1) -> "B2", (26, 99) -> "AA100"
pub fn cell_name(col: u32, row: u32) -> String {
    format!("{}{}", index_to_col(col), row + 1)
}

/// Splits a name into letters and a 1-based row and returns 0-based (col, row).
/// Column letters may be lowercase.
pub fn parse_cell_name(name: &str) -> Result<CellPosition, CellNameError> {
    if name.is_empty() {
        return Err(CellNameError::Empty);
    }

    let split = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    let (col_part, row_part) = name.split_at(split);

    if col_part.is_empty() || row_part.is_empty() {
        return Err(CellNameError::InvalidFormat(name.to_string()));
    }

    let col = col_to_index(col_part)?;
    let row = row_to_index(row_part)?;
    Ok((col, row))
}

fn row_to_index(row_part: &str) -> Result<u32, CellNameError> {
    if !row_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(CellNameError::InvalidRow(row_part.to_string()));
    }
    match row_part.parse::<u32>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(CellNameError::InvalidRow(row_part.to_string())),
    }
}

pub fn is_valid_cell_name(name: &str) -> bool {
    parse_cell_name(name).is_ok()
}

/// Uppercase form used as the storage key.
pub fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Expands "A1:B2" into every cell name of the rectangle, row by row.
pub fn parse_cell_range(range: &str) -> Result<Vec<String>, CellNameError> {
    let parts: Vec<&str> = range.split(':').collect();
    if parts.len() != 2 {
        return Err(CellNameError::InvalidRange(range.to_string()));
    }
    expand_range(parts[0].trim(), parts[1].trim())
}

/// Expands the rectangle between two corner cells, row by row.
/// The start corner must be above and left of (or equal to) the end corner,
/// and neither corner may lie beyond `MAX_DIMENSION`.
pub fn expand_range(start: &str, end: &str) -> Result<Vec<String>, CellNameError> {
    expand_range_within(start, end, MAX_DIMENSION, MAX_DIMENSION)
}

/// Like `expand_range`, but only the part inside a `columns` x `rows` grid.
pub fn expand_range_within(
    start: &str,
    end: &str,
    columns: u32,
    rows: u32,
) -> Result<Vec<String>, CellNameError> {
    let ((start_col, start_row), (end_col, end_row)) = range_corners(start, end)?;

    let last_col = end_col.min(columns.saturating_sub(1));
    let last_row = end_row.min(rows.saturating_sub(1));
    if columns == 0 || rows == 0 || start_col > last_col || start_row > last_row {
        return Ok(Vec::new());
    }

    let mut cells = Vec::new();
    for row in start_row..=last_row {
        for col in start_col..=last_col {
            cells.push(cell_name(col, row));
        }
    }
    Ok(cells)
}

fn range_corners(start: &str, end: &str) -> Result<(CellPosition, CellPosition), CellNameError> {
    let (start_col, start_row) = parse_cell_name(start)?;
    let (end_col, end_row) = parse_cell_name(end)?;
    let range = || format!("{}:{}", start, end);

    if start_col > end_col || start_row > end_row {
        return Err(CellNameError::InvalidRange(range()));
    }
    if end_col >= MAX_DIMENSION || end_row >= MAX_DIMENSION {
        return Err(CellNameError::RangeTooLarge {
            range: range(),
            max: MAX_DIMENSION,
        });
    }
    Ok(((start_col, start_row), (end_col, end_row)))
}

/// Every cell name of a `columns` x `rows` grid, row by row.
pub fn cell_names(columns: u32, rows: u32) -> impl Iterator<Item = String> {
    (0..rows).flat_map(move |row| (0..columns).map(move |col| cell_name(col, row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_index() {
        assert_eq!(col_to_index("A"), Ok(0));
        assert_eq!(col_to_index("z"), Ok(25));
        assert_eq!(col_to_index("AA"), Ok(26));
        assert_eq!(col_to_index("AB"), Ok(27));
        assert_eq!(col_to_index("A1"), Err(CellNameError::InvalidColumnCharacter('1')));
        assert_eq!(col_to_index(""), Err(CellNameError::Empty));
    }

    #[test]
    fn test_index_to_col() {
        assert_eq!(index_to_col(0), "A");
        assert_eq!(index_to_col(25), "Z");
        assert_eq!(index_to_col(26), "AA");
        assert_eq!(index_to_col(701), "ZZ");
        assert_eq!(index_to_col(702), "AAA");
    }

    #[test]
    fn test_column_conversion_is_bijective() {
        for i in 0..2000 {
            assert_eq!(col_to_index(&index_to_col(i)), Ok(i));
        }
    }

    #[test]
    fn test_parse_cell_name() {
        assert_eq!(parse_cell_name("A1"), Ok((0, 0)));
        assert_eq!(parse_cell_name("b2"), Ok((1, 1)));
        assert_eq!(parse_cell_name("AA100"), Ok((26, 99)));
        assert_eq!(cell_name(26, 99), "AA100");
    }

    #[test]
    fn test_parse_cell_name_errors() {
        assert_eq!(parse_cell_name(""), Err(CellNameError::Empty));
        assert!(matches!(parse_cell_name("A"), Err(CellNameError::InvalidFormat(_))));
        assert!(matches!(parse_cell_name("12"), Err(CellNameError::InvalidFormat(_))));
        assert!(matches!(parse_cell_name("A0"), Err(CellNameError::InvalidRow(_))));
        assert!(matches!(parse_cell_name("A1B"), Err(CellNameError::InvalidRow(_))));
        assert!(!is_valid_cell_name("A-1"));
        assert!(is_valid_cell_name("ZZ9"));
    }

    #[test]
    fn test_parse_cell_range() {
        assert_eq!(
            parse_cell_range("A1:B2").unwrap(),
            vec!["A1", "B1", "A2", "B2"]
        );
        assert_eq!(parse_cell_range("C3:C3").unwrap(), vec!["C3"]);
        assert!(matches!(parse_cell_range("A1"), Err(CellNameError::InvalidRange(_))));
        assert!(matches!(parse_cell_range("B2:A1"), Err(CellNameError::InvalidRange(_))));
        assert!(parse_cell_range("A1:?").is_err());
    }

    #[test]
    fn test_range_beyond_max_dimension() {
        assert!(matches!(
            expand_range("A1", "ZZ20000"),
            Err(CellNameError::RangeTooLarge { max: 1000, .. })
        ));
        assert!(matches!(
            expand_range("A1", "ALM1"),
            Err(CellNameError::RangeTooLarge { .. })
        ));
        assert_eq!(expand_range("ALL1000", "ALL1000").unwrap(), vec!["ALL1000"]);
    }

    #[test]
    fn test_expand_range_within_clips_to_grid() {
        assert_eq!(
            expand_range_within("A1", "Z50", 2, 2).unwrap(),
            vec!["A1", "B1", "A2", "B2"]
        );
        assert_eq!(expand_range_within("B2", "C3", 2, 3).unwrap(), vec!["B2", "B3"]);
        assert!(expand_range_within("C3", "D4", 2, 2).unwrap().is_empty());
        assert!(expand_range_within("A1", "A1", 0, 0).unwrap().is_empty());
        assert!(expand_range_within("B2", "A1", 5, 5).is_err());
        assert!(expand_range_within("A1", "A5000", 5, 5).is_err());
    }

    #[test]
    fn test_cell_names_row_major() {
        let names: Vec<String> = cell_names(2, 2).collect();
        assert_eq!(names, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(cell_names(10, 20).count(), 200);
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name(" ab12 "), "AB12");
    }
}
