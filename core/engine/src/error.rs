//! FILENAME: core/engine/src/error.rs
//! PURPOSE: Error types for evaluation, naming, recalculation and configuration.

use parser::ParseError;
use thiserror::Error;

/// Failures raised while folding an expression into a value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Operator {operator} is only valid for numbers")]
    OperatorType { operator: String },

    #[error("Cannot divide by 0")]
    DivideByZero,

    #[error("Function {function} received an argument of the wrong type")]
    FunctionType { function: String },

    #[error("Function {function} cannot take {actual} argument(s)")]
    ArgumentCount { function: String, actual: usize },

    #[error("Function {function} needs at least one numeric argument")]
    NoNumericArguments { function: String },

    #[error("Operator {operator} produced a result that is not a finite number")]
    NonFiniteResult { operator: String },

    #[error("Range {0} is only allowed as a function argument")]
    RangeOutsideFunction(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

/// Anything that can go wrong between formula text and a value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellNameError {
    #[error("Cell name cannot be empty")]
    Empty,

    #[error("Invalid cell name format: {0}")]
    InvalidFormat(String),

    #[error("Invalid character '{0}' in column name")]
    InvalidColumnCharacter(char),

    #[error("Invalid row name: {0}")]
    InvalidRow(String),

    #[error("Range must be in the format A1:B2, got {0}")]
    InvalidRange(String),

    #[error("Range {range} reaches beyond {max} columns or rows")]
    RangeTooLarge { range: String, max: u32 },
}

/// Result of a formula update that did not go cleanly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecalcError {
    #[error("Cell {0} does not exist")]
    UnknownCell(String),

    #[error("Error in cell {cell}: {source}")]
    Formula { cell: String, source: FormulaError },

    #[error("Circular dependency detected at {cell}: {}", .cycle.join(" -> "))]
    CircularDependency { cell: String, cycle: Vec<String> },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dimensions {columns}x{rows}: both must be between 1 and {max}")]
    InvalidDimensions { columns: u32, rows: u32, max: u32 },
}
