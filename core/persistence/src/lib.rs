//! FILENAME: core/persistence/src/lib.rs
//! Spreadsheet Persistence Module
//!
//! Handles saving and loading spreadsheets in the `.table` text format:
//!
//! ```text
//! {columns} {rows}
//! <formula of A1>
//! <formula of A2>
//! ...
//! ```
//!
//! Cells are listed column by column (`col = i / rows`, `row = i % rows`).
//! A blank line is an empty cell. Missing trailing lines are empty cells and
//! lines beyond `columns * rows` are ignored.

mod error;
mod table_reader;
mod table_writer;

pub use error::PersistenceError;
pub use table_reader::{from_table_format, load_table};
pub use table_writer::{save_table, to_table_format};

use engine::{Spreadsheet, SpreadsheetConfig};
use std::path::Path;

/// File name suggested when the user has not picked one.
pub const DEFAULT_FILE_NAME: &str = "result.table";

/// Loads a table file into a spreadsheet and recalculates every cell.
/// The file's dimensions override those of `config`.
pub fn load_spreadsheet(path: &Path, config: SpreadsheetConfig) -> Result<Spreadsheet, PersistenceError> {
    let grid = load_table(path)?;
    Ok(Spreadsheet::with_grid(grid, config))
}

/// Parses `.table` text into a recalculated spreadsheet.
pub fn spreadsheet_from_table_format(content: &str, config: SpreadsheetConfig) -> Result<Spreadsheet, PersistenceError> {
    let grid = from_table_format(content)?;
    Ok(Spreadsheet::with_grid(grid, config))
}
