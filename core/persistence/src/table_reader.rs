//! FILENAME: core/persistence/src/table_reader.rs

use crate::PersistenceError;
use engine::config::validate_dimensions;
use engine::{cell_name, CellStorageWriter, Grid};
use std::fs;
use std::path::Path;

/// Builds a grid from `.table` text. Cell values are not evaluated here.
pub fn from_table_format(content: &str) -> Result<Grid, PersistenceError> {
    let mut lines = content.lines();
    let header = lines.next().ok_or(PersistenceError::EmptyFile)?;
    let (columns, rows) = parse_header(header)?;
    validate_dimensions(columns, rows)?;

    let mut grid = Grid::new(columns, rows);
    let total = columns as usize * rows as usize;

    // Line i holds the cell at col = i / rows, row = i % rows
    for (i, line) in lines.take(total).enumerate() {
        if line.is_empty() {
            continue;
        }
        let col = (i / rows as usize) as u32;
        let row = (i % rows as usize) as u32;
        grid.set_cell_formula(&cell_name(col, row), line);
    }

    Ok(grid)
}

fn parse_header(header: &str) -> Result<(u32, u32), PersistenceError> {
    let invalid = || PersistenceError::InvalidHeader(header.to_string());

    let parts: Vec<&str> = header.split_whitespace().collect();
    match parts.as_slice() {
        [columns, rows] => {
            let columns = columns.parse::<u32>().map_err(|_| invalid())?;
            let rows = rows.parse::<u32>().map_err(|_| invalid())?;
            Ok((columns, rows))
        }
        _ => Err(invalid()),
    }
}

pub fn load_table(path: &Path) -> Result<Grid, PersistenceError> {
    let content = fs::read_to_string(path)?;
    from_table_format(&content)
}
