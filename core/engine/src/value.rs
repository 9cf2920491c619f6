//! FILENAME: core/engine/src/value.rs
//! PURPOSE: The typed value a cell evaluates to, with its coercion rules.
//! CONTEXT: Every literal a user types and every evaluation result is a
//! `CellValue`. The canonical string form (`Display`) is what the grid shows
//! and what `from_literal` reads back, so the two are kept inverse to each other.
//!
//! LITERAL CLASSIFICATION (first match wins):
//!   "FALSE" / "TRUE" -> Boolean
//!   "#REF"           -> RefError
//!   "#ERROR"         -> GeneralError
//!   signed number    -> Number
//!   anything else    -> Text

use parser::parse_number;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Two numbers closer than this are equal.
pub const TOLERANCE: f64 = 1e-13;

/// Digits kept after the decimal point when rendering numbers.
pub const DECIMAL_DIGITS: usize = 12;

pub const REF_ERROR: &str = "#REF";
pub const GENERAL_ERROR: &str = "#ERROR";
pub const TRUE_LITERAL: &str = "TRUE";
pub const FALSE_LITERAL: &str = "FALSE";

/// Cell input starting with this is a formula.
pub const FORMULA_PREFIX: &str = "=";

/// Tolerant float equality.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Renders a number with up to 12 decimals, trailing zeros removed.
/// Integers have no decimal point and negative zero renders as "0".
pub fn format_number(n: f64) -> String {
    let fixed = format!("{:.*}", DECIMAL_DIGITS, n);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Tag of a CellValue. The declaration order is the tie-break order used by `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Text,
    Number,
    Boolean,
    RefError,
    GeneralError,
}

/// Represents the calculated result or raw data within a cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    /// A reference to a cell that does not exist, or a cell on a dependency cycle.
    RefError,
    /// Any other failure, including reading a cell that holds an error.
    GeneralError,
}

impl CellValue {
    /// Classifies raw text.
    pub fn from_literal(text: &str) -> Self {
        match text {
            FALSE_LITERAL => CellValue::Boolean(false),
            TRUE_LITERAL => CellValue::Boolean(true),
            REF_ERROR => CellValue::RefError,
            GENERAL_ERROR => CellValue::GeneralError,
            _ => match parse_number(text) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(text.to_string()),
            },
        }
    }

    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Text(_) => CellKind::Text,
            CellValue::Number(_) => CellKind::Number,
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::RefError => CellKind::RefError,
            CellValue::GeneralError => CellKind::GeneralError,
        }
    }

    /// Error value for a kind, if the kind is one of the two error kinds.
    pub fn error_of_kind(kind: CellKind) -> Option<Self> {
        match kind {
            CellKind::RefError => Some(CellValue::RefError),
            CellKind::GeneralError => Some(CellValue::GeneralError),
            _ => None,
        }
    }

    /// The payload when this is a Number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric payload: the number itself, 1/0 for booleans, 0 otherwise.
    pub fn numeric(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Boolean(true) => 1.0,
            _ => 0.0,
        }
    }

    /// Truth value used by AND, OR, EQV and NOT. Errors have none.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            CellValue::Number(n) => Some(!approx_eq(*n, 0.0)),
            CellValue::Text(s) => Some(!s.is_empty()),
            CellValue::RefError | CellValue::GeneralError => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::RefError | CellValue::GeneralError)
    }

    /// Total order: numbers numerically (within tolerance), everything else by
    /// canonical text, then by kind.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        if let (CellValue::Number(a), CellValue::Number(b)) = (self, other) {
            if approx_eq(*a, *b) {
                return Ordering::Equal;
            }
            return if a < b { Ordering::Less } else { Ordering::Greater };
        }

        self.to_string()
            .cmp(&other.to_string())
            .then_with(|| self.kind().cmp(&other.kind()))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => approx_eq(*a, *b),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a == b,
            (CellValue::RefError, CellValue::RefError) => true,
            (CellValue::GeneralError, CellValue::GeneralError) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Boolean(true) => write!(f, "{}", TRUE_LITERAL),
            CellValue::Boolean(false) => write!(f, "{}", FALSE_LITERAL),
            CellValue::RefError => write!(f, "{}", REF_ERROR),
            CellValue::GeneralError => write!(f, "{}", GENERAL_ERROR),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}
