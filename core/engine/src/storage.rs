//! FILENAME: core/engine/src/storage.rs
//! PURPOSE: Narrow read/write interfaces over cell storage.
//! CONTEXT: The evaluator only ever sees a `CellStorageReader`, so formulas
//! cannot write to the grid while they are being computed. The spreadsheet
//! service is the single writer and goes through `CellStorageWriter`.

use crate::coord;
use crate::error::FormulaError;
use crate::value::{CellKind, CellValue};
use std::collections::HashSet;

/// Read access to cells by canonical name.
pub trait CellStorageReader {
    fn columns(&self) -> u32;

    fn rows(&self) -> u32;

    fn cell_name(&self, col: u32, row: u32) -> String {
        coord::cell_name(col, row)
    }

    /// None if the cell does not exist.
    fn cell_value(&self, name: &str) -> Option<CellValue>;

    /// Display text of the value; "#REF" if the cell does not exist.
    fn cell_display_value(&self, name: &str) -> String;

    /// Raw formula text; empty if the cell does not exist.
    fn cell_formula(&self, name: &str) -> String;
}

/// Write access to cells. Every method is a no-op on unknown names and says so.
pub trait CellStorageWriter {
    /// Stores formula text verbatim. Returns false if the cell does not exist.
    fn set_cell_formula(&mut self, name: &str, formula: &str) -> bool;

    /// Forces an error value. Returns false if the cell does not exist or the
    /// kind is not an error kind.
    fn set_cell_error_value(&mut self, name: &str, kind: CellKind) -> bool;

    /// Re-evaluates the stored formula and stores the resulting value.
    fn update_cell_value(&mut self, name: &str, evaluator: &dyn FormulaEvaluator) -> Option<Evaluation>;
}

/// Outcome of evaluating one formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: CellValue,
    /// Every cell the formula text references, ranges expanded.
    pub dependencies: HashSet<String>,
    /// Set when the value is GeneralError because something failed.
    pub error: Option<FormulaError>,
}

impl Evaluation {
    pub fn success(value: CellValue, dependencies: HashSet<String>) -> Self {
        Evaluation {
            value,
            dependencies,
            error: None,
        }
    }

    pub fn failure(error: FormulaError, dependencies: HashSet<String>) -> Self {
        Evaluation {
            value: CellValue::GeneralError,
            dependencies,
            error: Some(error),
        }
    }
}

/// Turns formula text into a value, reading other cells through `reader`.
pub trait FormulaEvaluator {
    fn evaluate(&self, formula: &str, reader: &dyn CellStorageReader) -> Evaluation;
}
