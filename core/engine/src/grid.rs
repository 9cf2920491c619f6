//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: Manages the collection of cells (The Spreadsheet Grid).
//! CONTEXT: This file defines the `Grid` struct which acts as the container
//! for all cell data. Every position of the `columns` x `rows` rectangle has a
//! cell, keyed by its canonical uppercase name. Names outside the rectangle do
//! not exist and read as "#REF".

use crate::cell::Cell;
use crate::coord::{canonical_name, cell_name, cell_names};
use crate::logging::{log_debug, log_info};
use crate::storage::{CellStorageReader, CellStorageWriter, Evaluation, FormulaEvaluator};
use crate::value::{CellKind, CellValue, REF_ERROR};
use std::collections::HashMap;

/// The Grid struct holds the state of the spreadsheet data.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Keys are canonical cell names ("A1").
    cells: HashMap<String, Cell>,
    columns: u32,
    rows: u32,
}

impl Grid {
    /// Creates a grid with an empty cell at every position.
    pub fn new(columns: u32, rows: u32) -> Self {
        let cells = cell_names(columns, rows)
            .map(|name| (name, Cell::new()))
            .collect();
        Grid {
            cells,
            columns,
            rows,
        }
    }

    /// Changes the dimensions. Cells inside both the old and the new rectangle
    /// keep their formula and value; new positions start empty.
    pub fn resize(&mut self, columns: u32, rows: u32) {
        log_info!(
            "GRID",
            "resize {}x{} -> {}x{}",
            self.columns,
            self.rows,
            columns,
            rows
        );

        let mut old = std::mem::take(&mut self.cells);
        self.cells = cell_names(columns, rows)
            .map(|name| {
                let cell = old.remove(&name).unwrap_or_default();
                (name, cell)
            })
            .collect();
        self.columns = columns;
        self.rows = rows;
    }

    pub fn cell_exists(&self, name: &str) -> bool {
        self.cells.contains_key(&canonical_name(name))
    }

    pub fn get_cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(&canonical_name(name))
    }

    /// Cell names in file order: column by column, top to bottom.
    pub fn cell_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.cells.len());
        for col in 0..self.columns {
            for row in 0..self.rows {
                names.push(cell_name(col, row));
            }
        }
        names
    }

    /// Number of cells holding a formula (text starting with '=').
    pub fn formula_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.is_formula()).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl CellStorageReader for Grid {
    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn cell_value(&self, name: &str) -> Option<CellValue> {
        self.get_cell(name).map(|cell| cell.value.clone())
    }

    fn cell_display_value(&self, name: &str) -> String {
        self.get_cell(name)
            .map(Cell::display_value)
            .unwrap_or_else(|| REF_ERROR.to_string())
    }

    fn cell_formula(&self, name: &str) -> String {
        self.get_cell(name)
            .map(|cell| cell.formula.clone())
            .unwrap_or_default()
    }
}

impl CellStorageWriter for Grid {
    fn set_cell_formula(&mut self, name: &str, formula: &str) -> bool {
        match self.cells.get_mut(&canonical_name(name)) {
            Some(cell) => {
                cell.formula = formula.to_string();
                true
            }
            None => false,
        }
    }

    fn set_cell_error_value(&mut self, name: &str, kind: CellKind) -> bool {
        let updated = self
            .cells
            .get_mut(&canonical_name(name))
            .is_some_and(|cell| cell.set_error_value(kind));
        if updated {
            log_debug!("GRID", "{} forced to {:?}", name, kind);
        }
        updated
    }

    fn update_cell_value(&mut self, name: &str, evaluator: &dyn FormulaEvaluator) -> Option<Evaluation> {
        let key = canonical_name(name);
        let formula = self.cells.get(&key)?.formula.clone();

        // Evaluate against the current state, then store
        let evaluation = evaluator.evaluate(&formula, &*self);

        if let Some(cell) = self.cells.get_mut(&key) {
            cell.value = evaluation.value.clone();
        }
        Some(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::FormulaEngine;

    #[test]
    fn test_new_grid_has_every_cell() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.cell_exists("A1"));
        assert!(grid.cell_exists("c2"));
        assert!(!grid.cell_exists("D1"));
        assert!(!grid.cell_exists("A3"));
    }

    #[test]
    fn test_missing_cell_reads() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.cell_value("B7"), None);
        assert_eq!(grid.cell_display_value("B7"), "#REF");
        assert_eq!(grid.cell_formula("B7"), "");
    }

    #[test]
    fn test_set_formula_is_case_insensitive() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.set_cell_formula("b2", "hello"));
        assert_eq!(grid.cell_formula("B2"), "hello");
        assert!(!grid.set_cell_formula("Z9", "x"));
    }

    #[test]
    fn test_update_cell_value_evaluates_formula() {
        let mut grid = Grid::new(2, 2);
        let engine = FormulaEngine::new();
        grid.set_cell_formula("A1", "4");
        grid.set_cell_formula("B1", "=A1*2");

        grid.update_cell_value("A1", &engine);
        let evaluation = grid.update_cell_value("B1", &engine).unwrap();

        assert_eq!(evaluation.value, CellValue::Number(8.0));
        assert!(evaluation.dependencies.contains("A1"));
        assert_eq!(grid.cell_display_value("B1"), "8");
        assert!(grid.update_cell_value("C9", &engine).is_none());
    }

    #[test]
    fn test_set_error_value() {
        let mut grid = Grid::new(1, 1);
        assert!(grid.set_cell_error_value("A1", CellKind::GeneralError));
        assert_eq!(grid.cell_display_value("A1"), "#ERROR");
        assert!(!grid.set_cell_error_value("A1", CellKind::Text));
        assert!(!grid.set_cell_error_value("B1", CellKind::RefError));
    }

    #[test]
    fn test_resize_keeps_overlap() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell_formula("A1", "keep");
        grid.set_cell_formula("C3", "drop");
        grid.set_cell_formula("B2", "keep too");

        grid.resize(2, 4);

        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.cell_formula("A1"), "keep");
        assert_eq!(grid.cell_formula("B2"), "keep too");
        assert!(!grid.cell_exists("C3"));
        assert_eq!(grid.cell_formula("B4"), "");
    }

    #[test]
    fn test_cell_names_file_order() {
        let grid = Grid::new(2, 3);
        assert_eq!(
            grid.cell_names(),
            vec!["A1", "A2", "A3", "B1", "B2", "B3"]
        );
    }

    #[test]
    fn test_formula_count() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell_formula("A1", "=1");
        grid.set_cell_formula("A2", "1");
        assert_eq!(grid.formula_count(), 1);
    }
}
