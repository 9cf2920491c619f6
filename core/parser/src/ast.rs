//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions and the
//! static operator/function registry.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. The engine's Evaluator then folds
//! the tree into a cell value.
//!
//! REGISTRY:
//! - Infix operators with precedence and associativity:
//!     ^ (16, right) | * / (15) | + - MOD DIV (14) | < > <= >= = (13) | <> (12)
//!     | AND (11) | OR (10) | EQV (9)       -- all left-associative except ^
//! - Prefix functions with fixed arity: MIN MAX MMIN MMAX INC DEC NOT SUM

/// Represents a parsed formula expression.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A numeric literal.
    Number(f64),

    /// A quoted text literal.
    Text(String),

    /// A single cell reference in canonical uppercase form, e.g. "A1".
    CellRef(String),

    /// A rectangular range like A1:B3. Only valid as a function argument.
    Range { start: String, end: String },

    /// Unary minus.
    Negate(Box<Expression>),

    /// A binary operation: left op right.
    Binary {
        left: Box<Expression>,
        op: InfixOperator,
        right: Box<Expression>,
    },

    /// A prefix function call like MMAX(1, A2, 3).
    Call {
        function: PrefixFunction,
        args: Vec<Expression>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary operators, including the word operators MOD, DIV, AND, OR and EQV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Power,
    Multiply,
    Divide,
    Add,
    Subtract,
    Mod,
    Div,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
    Eqv,
}

impl InfixOperator {
    pub const ALL: [InfixOperator; 16] = [
        InfixOperator::Power,
        InfixOperator::Multiply,
        InfixOperator::Divide,
        InfixOperator::Add,
        InfixOperator::Subtract,
        InfixOperator::Mod,
        InfixOperator::Div,
        InfixOperator::LessThan,
        InfixOperator::GreaterThan,
        InfixOperator::LessEqual,
        InfixOperator::GreaterEqual,
        InfixOperator::Equal,
        InfixOperator::NotEqual,
        InfixOperator::And,
        InfixOperator::Or,
        InfixOperator::Eqv,
    ];

    /// Looks up an operator by symbol or word, case-insensitively.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let upper = symbol.to_ascii_uppercase();
        Self::ALL.into_iter().find(|op| op.symbol() == upper)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            InfixOperator::Power => "^",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Mod => "MOD",
            InfixOperator::Div => "DIV",
            InfixOperator::LessThan => "<",
            InfixOperator::GreaterThan => ">",
            InfixOperator::LessEqual => "<=",
            InfixOperator::GreaterEqual => ">=",
            InfixOperator::Equal => "=",
            InfixOperator::NotEqual => "<>",
            InfixOperator::And => "AND",
            InfixOperator::Or => "OR",
            InfixOperator::Eqv => "EQV",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            InfixOperator::Power => 16,
            InfixOperator::Multiply | InfixOperator::Divide => 15,
            InfixOperator::Add | InfixOperator::Subtract | InfixOperator::Mod | InfixOperator::Div => 14,
            InfixOperator::LessThan
            | InfixOperator::GreaterThan
            | InfixOperator::LessEqual
            | InfixOperator::GreaterEqual
            | InfixOperator::Equal => 13,
            InfixOperator::NotEqual => 12,
            InfixOperator::And => 11,
            InfixOperator::Or => 10,
            InfixOperator::Eqv => 9,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            InfixOperator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// How many arguments a prefix function takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => write!(f, "any number of"),
        }
    }
}

/// Built-in prefix functions resolved at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixFunction {
    /// Smaller of exactly two numbers.
    Min,
    /// Larger of exactly two numbers.
    Max,
    /// Smallest of one or more values.
    MMin,
    /// Largest of one or more values.
    MMax,
    Inc,
    Dec,
    Not,
    Sum,
}

impl PrefixFunction {
    pub const ALL: [PrefixFunction; 8] = [
        PrefixFunction::Min,
        PrefixFunction::Max,
        PrefixFunction::MMin,
        PrefixFunction::MMax,
        PrefixFunction::Inc,
        PrefixFunction::Dec,
        PrefixFunction::Not,
        PrefixFunction::Sum,
    ];

    /// Looks up a function by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::ALL.into_iter().find(|func| func.name() == upper)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrefixFunction::Min => "MIN",
            PrefixFunction::Max => "MAX",
            PrefixFunction::MMin => "MMIN",
            PrefixFunction::MMax => "MMAX",
            PrefixFunction::Inc => "INC",
            PrefixFunction::Dec => "DEC",
            PrefixFunction::Not => "NOT",
            PrefixFunction::Sum => "SUM",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            PrefixFunction::Min | PrefixFunction::Max => Arity::Exactly(2),
            PrefixFunction::MMin | PrefixFunction::MMax => Arity::AtLeast(1),
            PrefixFunction::Inc | PrefixFunction::Dec | PrefixFunction::Not => Arity::Exactly(1),
            PrefixFunction::Sum => Arity::Any,
        }
    }
}

impl std::fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for PrefixFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
