//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the spreadsheet engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

mod logging;

pub mod cell;
pub mod config;
pub mod coord;
pub mod dependency_extractor;
pub mod dependency_graph;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod grid;
pub mod spreadsheet;
pub mod storage;
pub mod value;

// Re-export commonly used types at the crate root
pub use cell::Cell;
pub use config::{CalculationMode, SpreadsheetConfig, MAX_DIMENSION};
pub use coord::{
    canonical_name, cell_name, cell_names, col_to_index, expand_range, expand_range_within, index_to_col,
    is_valid_cell_name, parse_cell_name, parse_cell_range, CellPosition,
};
pub use dependency_extractor::extract_dependencies;
pub use dependency_graph::{CycleError, DependencyGraph, RecalcPlan};
pub use error::{CellNameError, ConfigError, EvalError, FormulaError, RecalcError};
pub use evaluator::{Evaluator, FormulaEngine};
pub use functions::{apply_infix, apply_prefix, negate};
pub use grid::Grid;
pub use spreadsheet::Spreadsheet;
pub use storage::{CellStorageReader, CellStorageWriter, Evaluation, FormulaEvaluator};
pub use value::{
    approx_eq, CellKind, CellValue, FALSE_LITERAL, FORMULA_PREFIX, GENERAL_ERROR, REF_ERROR,
    TOLERANCE, TRUE_LITERAL,
};
