//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates AST expressions to compute cell values.
//! CONTEXT: After a formula is parsed into an AST, this module traverses
//! the tree and computes the final result. Cell lookups go through a
//! `CellStorageReader`; operators and functions live in `functions.rs`.
//!
//! REFERENCE RESOLUTION:
//! - missing cell                 -> RefError (a value, not a failure)
//! - cell whose value is an error -> GeneralError
//! - anything else                -> the stored value
//!
//! `FormulaEngine` wraps the whole pipeline (literal check, tokenize,
//! dependency extraction, parse, evaluate) behind `FormulaEvaluator`.

use crate::coord::expand_range_within;
use crate::dependency_extractor::extract_dependencies;
use crate::error::{EvalError, FormulaError};
use crate::functions::{apply_infix, apply_prefix, negate};
use crate::logging::log_debug;
use crate::storage::{CellStorageReader, Evaluation, FormulaEvaluator};
use crate::value::{CellValue, FORMULA_PREFIX};
use parser::{parse, tokenize, Expression};
use std::collections::HashSet;

/// The formula evaluator.
/// Holds a reference to the cell storage for lookups.
pub struct Evaluator<'a> {
    reader: &'a dyn CellStorageReader,
}

impl<'a> Evaluator<'a> {
    pub fn new(reader: &'a dyn CellStorageReader) -> Self {
        Evaluator { reader }
    }

    /// Evaluates an expression and returns the result.
    pub fn evaluate(&self, expr: &Expression) -> Result<CellValue, EvalError> {
        match expr {
            Expression::Number(n) => Ok(CellValue::Number(*n)),
            Expression::Text(s) => Ok(CellValue::Text(s.clone())),
            Expression::CellRef(name) => Ok(self.resolve(name)),
            Expression::Range { start, end } => {
                Err(EvalError::RangeOutsideFunction(format!("{}:{}", start, end)))
            }
            Expression::Negate(operand) => negate(&self.evaluate(operand)?),
            Expression::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                apply_infix(*op, &left, &right)
            }
            Expression::Call { function, args } => {
                let values = self.eval_args(args)?;
                apply_prefix(*function, &values)
            }
        }
    }

    fn resolve(&self, name: &str) -> CellValue {
        match self.reader.cell_value(name) {
            None => CellValue::RefError,
            Some(value) if value.is_error() => CellValue::GeneralError,
            Some(value) => value,
        }
    }

    /// Evaluates call arguments, expanding ranges in place (row by row).
    /// Only the part of a range inside the grid contributes values.
    fn eval_args(&self, args: &[Expression]) -> Result<Vec<CellValue>, EvalError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Expression::Range { start, end } => {
                    let (columns, rows) = (self.reader.columns(), self.reader.rows());
                    let cells = expand_range_within(start, end, columns, rows)
                        .map_err(|e| EvalError::InvalidRange(e.to_string()))?;
                    values.extend(cells.iter().map(|name| self.resolve(name)));
                }
                other => values.push(self.evaluate(other)?),
            }
        }
        Ok(values)
    }
}

/// The default `FormulaEvaluator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaEngine;

impl FormulaEngine {
    pub fn new() -> Self {
        FormulaEngine
    }

    /// Cells referenced by `formula`, without evaluating it. Ranges are
    /// clipped to the grid behind `reader`. Literals and formulas that fail
    /// to tokenize have none.
    pub fn dependencies(&self, formula: &str, reader: &dyn CellStorageReader) -> HashSet<String> {
        formula
            .strip_prefix(FORMULA_PREFIX)
            .and_then(|body| tokenize(body).ok())
            .map(|tokens| extract_dependencies(&tokens, reader.columns(), reader.rows()))
            .unwrap_or_default()
    }
}

impl FormulaEvaluator for FormulaEngine {
    fn evaluate(&self, formula: &str, reader: &dyn CellStorageReader) -> Evaluation {
        let Some(body) = formula.strip_prefix(FORMULA_PREFIX) else {
            return Evaluation::success(CellValue::from_literal(formula), HashSet::new());
        };

        let tokens = match tokenize(body) {
            Ok(tokens) => tokens,
            Err(e) => return Evaluation::failure(e.into(), HashSet::new()),
        };
        let dependencies = extract_dependencies(&tokens, reader.columns(), reader.rows());

        let result = parse(&tokens)
            .map_err(FormulaError::from)
            .and_then(|expr| Evaluator::new(reader).evaluate(&expr).map_err(FormulaError::from));

        match result {
            Ok(value) => Evaluation::success(value, dependencies),
            Err(e) => {
                log_debug!("CALC", "{:?} failed: {}", formula, e);
                Evaluation::failure(e, dependencies)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::storage::CellStorageWriter;

    fn eval(formula: &str) -> Evaluation {
        let grid = Grid::new(3, 3);
        FormulaEngine::new().evaluate(formula, &grid)
    }

    fn display(formula: &str) -> String {
        eval(formula).value.to_string()
    }

    #[test]
    fn test_literals_are_not_parsed() {
        assert_eq!(display(""), "");
        assert_eq!(display("123"), "123");
        assert_eq!(display("1+1"), "1+1");
        assert_eq!(eval("1+1").value, CellValue::Text("1+1".to_string()));
        assert_eq!(eval("TRUE").value, CellValue::Boolean(true));
    }

    #[test]
    fn test_formula_results() {
        assert_eq!(display("=1++1"), "2");
        assert_eq!(display("=1+-1"), "0");
        assert_eq!(display("=min(12+2,3)"), "3");
        assert_eq!(display("=1=1"), "TRUE");
        assert_eq!(display("=1<>1"), "FALSE");
        assert_eq!(display("=mmin(12+2, 3 ,max(2^.0,4 mod 2))"), "1");
        assert_eq!(display("=2^3^2"), "512");
        assert_eq!(display("=7 div 2"), "3");
        assert_eq!(display("=\"abc\" < \"abd\""), "TRUE");
        assert_eq!(display("=not(1 and 0)"), "TRUE");
        assert_eq!(display("=1 <= 2 eqv 2 >= 1"), "TRUE");
    }

    #[test]
    fn test_formula_errors() {
        for formula in [
            "=",
            "=2+",
            "=3^^3",
            "=(3 <> 2) + 1",
            "=min(1,2,3)",
            "=min(1,2)(",
            "=1/0",
            "=5 mod 0",
            "=A",
            "=1 # 2",
            "=A1:B2",
        ] {
            let evaluation = eval(formula);
            assert_eq!(evaluation.value, CellValue::GeneralError, "formula {}", formula);
            assert!(evaluation.error.is_some(), "formula {}", formula);
        }
    }

    #[test]
    fn test_overflow_is_an_error_value() {
        let evaluation = eval("=999999999999 * 999999999999 ^ 30");
        assert_eq!(evaluation.value, CellValue::GeneralError);
        assert!(matches!(
            evaluation.error,
            Some(FormulaError::Eval(EvalError::NonFiniteResult { .. }))
        ));

        let literal = format!("={}", "9".repeat(400));
        assert!(matches!(eval(&literal).error, Some(FormulaError::Parse(_))));
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(eval("=").error, Some(FormulaError::Parse(_))));
        assert_eq!(
            eval("=1/0").error,
            Some(FormulaError::Eval(EvalError::DivideByZero))
        );
        assert!(matches!(
            eval("=A1:B2").error,
            Some(FormulaError::Eval(EvalError::RangeOutsideFunction(_)))
        ));
    }

    #[test]
    fn test_missing_reference_is_ref_error() {
        let evaluation = eval("=Z99");
        assert_eq!(evaluation.value, CellValue::RefError);
        assert!(evaluation.error.is_none());
        assert!(evaluation.dependencies.contains("Z99"));
        assert_eq!(evaluation.value.to_string(), "#REF");
    }

    #[test]
    fn test_reference_to_error_cell_is_general_error() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell_formula("A1", "=1/0");
        grid.update_cell_value("A1", &FormulaEngine::new());

        let evaluation = FormulaEngine::new().evaluate("=A1", &grid);
        assert_eq!(evaluation.value, CellValue::GeneralError);
    }

    #[test]
    fn test_range_arguments() {
        let mut grid = Grid::new(2, 3);
        let engine = FormulaEngine::new();
        for (name, formula) in [("A1", "1"), ("B1", "2"), ("A2", "x"), ("B2", "4")] {
            grid.set_cell_formula(name, formula);
            grid.update_cell_value(name, &engine);
        }

        assert_eq!(engine.evaluate("=SUM(A1:B2)", &grid).value, CellValue::Number(7.0));
        assert_eq!(engine.evaluate("=MMAX(A1:B2, 3)", &grid).value, CellValue::Number(4.0));
        assert_eq!(engine.evaluate("=SUM(B2:A1)", &grid).value, CellValue::GeneralError);
    }

    #[test]
    fn test_dependencies_without_evaluation() {
        let engine = FormulaEngine::new();
        let grid = Grid::new(3, 3);
        let deps = engine.dependencies("=A1+B2", &grid);
        assert_eq!(deps.len(), 2);
        assert!(engine.dependencies("A1+B2", &grid).is_empty());
        assert!(engine.dependencies("=A1 # B2", &grid).is_empty());
    }

    #[test]
    fn test_oversized_range_is_rejected() {
        let grid = Grid::new(2, 2);
        let evaluation = FormulaEngine::new().evaluate("=SUM(A1:ZZ20000)", &grid);

        assert_eq!(evaluation.value, CellValue::GeneralError);
        assert!(matches!(
            evaluation.error,
            Some(FormulaError::Eval(EvalError::InvalidRange(_)))
        ));
        assert_eq!(evaluation.dependencies.len(), 2);
    }

    #[test]
    fn test_range_is_clipped_to_grid() {
        let mut grid = Grid::new(2, 2);
        let engine = FormulaEngine::new();
        for (name, formula) in [("A1", "1"), ("B2", "2")] {
            grid.set_cell_formula(name, formula);
            grid.update_cell_value(name, &engine);
        }

        let evaluation = engine.evaluate("=SUM(A1:ALL1000)", &grid);
        assert_eq!(evaluation.value, CellValue::Number(3.0));
        assert_eq!(evaluation.dependencies.len(), 4);
        assert_eq!(engine.evaluate("=MMIN(A1:Z50)", &grid).value, CellValue::Number(1.0));
    }
}
