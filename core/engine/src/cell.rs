//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the data structure for a single spreadsheet cell.
//! CONTEXT: This file contains the `Cell` struct.
//! It separates the user's input (formula) from the calculated result (value).
//! The value is only written by evaluation, never directly from user input.

use crate::value::{CellKind, CellValue, FORMULA_PREFIX};
use serde::{Deserialize, Serialize};

/// The atomic unit of the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Raw user input, possibly empty. Formulas start with '='.
    pub formula: String,
    /// Result of the last evaluation of `formula`.
    pub value: CellValue,
}

impl Cell {
    pub fn new() -> Self {
        Cell {
            formula: String::new(),
            value: CellValue::empty(),
        }
    }

    /// A cell whose value has not been computed yet.
    pub fn with_formula(formula: impl Into<String>) -> Self {
        Cell {
            formula: formula.into(),
            value: CellValue::empty(),
        }
    }

    pub fn is_formula(&self) -> bool {
        self.formula.starts_with(FORMULA_PREFIX)
    }

    /// Forces an error value. Returns false for non-error kinds.
    pub fn set_error_value(&mut self, kind: CellKind) -> bool {
        match CellValue::error_of_kind(kind) {
            Some(value) => {
                self.value = value;
                true
            }
            None => false,
        }
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        self.value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_empty() {
        let cell = Cell::new();
        assert_eq!(cell.formula, "");
        assert_eq!(cell.display_value(), "");
        assert!(!cell.is_formula());
    }

    #[test]
    fn test_set_error_value_only_accepts_errors() {
        let mut cell = Cell::with_formula("=1");
        assert!(cell.is_formula());
        assert!(cell.set_error_value(CellKind::RefError));
        assert_eq!(cell.display_value(), "#REF");
        assert!(!cell.set_error_value(CellKind::Number));
        assert_eq!(cell.value, CellValue::RefError);
    }
}
