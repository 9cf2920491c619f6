//! FILENAME: core/persistence/src/table_writer.rs

use crate::PersistenceError;
use engine::CellStorageReader;
use std::fs;
use std::path::Path;

/// Serializes every cell formula, column by column.
/// Line breaks inside a formula would shift every later cell, so they are
/// written as spaces.
pub fn to_table_format(reader: &dyn CellStorageReader) -> String {
    let columns = reader.columns();
    let rows = reader.rows();

    // Header
    let mut result = format!("{} {}\n", columns, rows);

    for col in 0..columns {
        for row in 0..rows {
            let name = reader.cell_name(col, row);
            let formula = reader.cell_formula(&name);
            if formula.contains(['\n', '\r']) {
                result.push_str(&formula.replace(['\n', '\r'], " "));
            } else {
                result.push_str(&formula);
            }
            result.push('\n');
        }
    }

    result
}

pub fn save_table(path: &Path, reader: &dyn CellStorageReader) -> Result<(), PersistenceError> {
    fs::write(path, to_table_format(reader))?;
    Ok(())
}
