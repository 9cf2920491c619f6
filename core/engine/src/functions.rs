//! FILENAME: core/engine/src/functions.rs
//! PURPOSE: Implementations of the infix operators and prefix functions.
//! CONTEXT: The parser resolves every operator and function name to an enum
//! from `parser::ast`; the evaluator folds the tree by calling into here with
//! already evaluated operands.
//!
//! RULES:
//! - Arithmetic (^ * / + - MOD DIV) accepts Number operands only and must
//!   produce a finite number.
//! - Comparisons are total over all kinds (see `CellValue::compare`).
//! - AND, OR, EQV and NOT work on the boolean coercion; errors have none.
//! - MIN, MAX, INC, DEC require Number arguments. MMIN, MMAX and SUM skip
//!   anything that is not a Number.

use crate::error::EvalError;
use crate::value::{approx_eq, CellValue};
use parser::{InfixOperator, PrefixFunction};
use std::cmp::Ordering;

/// Applies a binary operator to two evaluated operands.
pub fn apply_infix(
    op: InfixOperator,
    left: &CellValue,
    right: &CellValue,
) -> Result<CellValue, EvalError> {
    let result = match op {
        InfixOperator::Power
        | InfixOperator::Multiply
        | InfixOperator::Divide
        | InfixOperator::Add
        | InfixOperator::Subtract
        | InfixOperator::Mod
        | InfixOperator::Div => {
            let (a, b) = numbers(op, left, right)?;
            finite(op.symbol(), arithmetic(op, a, b)?)?
        }

        InfixOperator::LessThan => CellValue::Boolean(left.compare(right) == Ordering::Less),
        InfixOperator::GreaterThan => CellValue::Boolean(left.compare(right) == Ordering::Greater),
        InfixOperator::LessEqual => CellValue::Boolean(left.compare(right) != Ordering::Greater),
        InfixOperator::GreaterEqual => CellValue::Boolean(left.compare(right) != Ordering::Less),
        InfixOperator::Equal => CellValue::Boolean(left == right),
        InfixOperator::NotEqual => CellValue::Boolean(left != right),

        InfixOperator::And => {
            let (a, b) = booleans(op, left, right)?;
            CellValue::Boolean(a && b)
        }
        InfixOperator::Or => {
            let (a, b) = booleans(op, left, right)?;
            CellValue::Boolean(a || b)
        }
        InfixOperator::Eqv => {
            let (a, b) = booleans(op, left, right)?;
            CellValue::Boolean(a == b)
        }
    };

    Ok(result)
}

fn arithmetic(op: InfixOperator, a: f64, b: f64) -> Result<f64, EvalError> {
    let result = match op {
        InfixOperator::Power => a.powf(b),
        InfixOperator::Multiply => a * b,
        InfixOperator::Divide => {
            check_divisor(b)?;
            a / b
        }
        InfixOperator::Add => a + b,
        InfixOperator::Subtract => a - b,
        // f64 remainder keeps the sign of the dividend
        InfixOperator::Mod => {
            check_divisor(b)?;
            a % b
        }
        InfixOperator::Div => {
            check_divisor(b)?;
            (a / b).trunc()
        }
        _ => {
            return Err(EvalError::OperatorType {
                operator: op.symbol().to_string(),
            })
        }
    };
    Ok(result)
}

/// Overflow and NaN become errors.
fn finite(operator: &str, n: f64) -> Result<CellValue, EvalError> {
    if n.is_finite() {
        Ok(CellValue::Number(n))
    } else {
        Err(EvalError::NonFiniteResult {
            operator: operator.to_string(),
        })
    }
}

/// Unary minus.
pub fn negate(value: &CellValue) -> Result<CellValue, EvalError> {
    match value {
        CellValue::Number(n) => Ok(CellValue::Number(-n)),
        _ => Err(EvalError::OperatorType {
            operator: InfixOperator::Subtract.symbol().to_string(),
        }),
    }
}

/// Applies a prefix function to its evaluated (and range-expanded) arguments.
pub fn apply_prefix(function: PrefixFunction, args: &[CellValue]) -> Result<CellValue, EvalError> {
    if !function.arity().accepts(args.len()) {
        return Err(EvalError::ArgumentCount {
            function: function.name().to_string(),
            actual: args.len(),
        });
    }

    match function {
        PrefixFunction::Min => {
            let numbers = strict_numbers(function, args)?;
            Ok(CellValue::Number(numbers.into_iter().fold(f64::INFINITY, f64::min)))
        }
        PrefixFunction::Max => {
            let numbers = strict_numbers(function, args)?;
            Ok(CellValue::Number(numbers.into_iter().fold(f64::NEG_INFINITY, f64::max)))
        }
        PrefixFunction::MMin => {
            let numbers = numeric_only(function, args)?;
            Ok(CellValue::Number(numbers.into_iter().fold(f64::INFINITY, f64::min)))
        }
        PrefixFunction::MMax => {
            let numbers = numeric_only(function, args)?;
            Ok(CellValue::Number(numbers.into_iter().fold(f64::NEG_INFINITY, f64::max)))
        }
        PrefixFunction::Inc => {
            let numbers = strict_numbers(function, args)?;
            Ok(CellValue::Number(numbers[0] + 1.0))
        }
        PrefixFunction::Dec => {
            let numbers = strict_numbers(function, args)?;
            Ok(CellValue::Number(numbers[0] - 1.0))
        }
        PrefixFunction::Not => match args[0].as_boolean() {
            Some(b) => Ok(CellValue::Boolean(!b)),
            None => Err(function_type(function)),
        },
        PrefixFunction::Sum => finite(
            function.name(),
            args.iter().filter_map(CellValue::as_number).sum(),
        ),
    }
}

fn numbers(op: InfixOperator, left: &CellValue, right: &CellValue) -> Result<(f64, f64), EvalError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(EvalError::OperatorType {
            operator: op.symbol().to_string(),
        }),
    }
}

fn booleans(op: InfixOperator, left: &CellValue, right: &CellValue) -> Result<(bool, bool), EvalError> {
    match (left.as_boolean(), right.as_boolean()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(EvalError::OperatorType {
            operator: op.symbol().to_string(),
        }),
    }
}

fn check_divisor(divisor: f64) -> Result<(), EvalError> {
    if approx_eq(divisor, 0.0) {
        return Err(EvalError::DivideByZero);
    }
    Ok(())
}

/// Every argument must be a Number.
fn strict_numbers(function: PrefixFunction, args: &[CellValue]) -> Result<Vec<f64>, EvalError> {
    args.iter()
        .map(|arg| arg.as_number().ok_or_else(|| function_type(function)))
        .collect()
}

/// The Number arguments; at least one is required.
fn numeric_only(function: PrefixFunction, args: &[CellValue]) -> Result<Vec<f64>, EvalError> {
    let numbers: Vec<f64> = args.iter().filter_map(CellValue::as_number).collect();
    if numbers.is_empty() {
        return Err(EvalError::NoNumericArguments {
            function: function.name().to_string(),
        });
    }
    Ok(numbers)
}

fn function_type(function: PrefixFunction) -> EvalError {
    EvalError::FunctionType {
        function: function.name().to_string(),
    }
}
