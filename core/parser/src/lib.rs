//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the formula parser.
//! CONTEXT: This module exposes the automatons, lexer, parser, and AST components
//! needed to convert formula strings into evaluatable expression trees.
//!
//! PIPELINE: Formula String --> Lexer (automatons) --> Tokens --> Parser --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /, ^ (power), MOD, DIV
//! - Comparison: =, <>, <, >, <=, >=
//! - Logic: AND, OR, EQV, NOT(x)
//! - Cell references: A1, AA100
//! - Ranges inside function arguments: SUM(A1:B10)
//! - Prefix functions: MIN, MAX, MMIN, MMAX, INC, DEC, NOT, SUM
//! - Quoted text literals: "abc"
//! - Parentheses for grouping
//! - Unary plus and minus: +5, -5

pub mod ast;
pub mod automaton;
pub mod lexer;
pub mod parser;
pub mod token;


// Re-export commonly used types for convenience
pub use ast::{Arity, Associativity, Expression, InfixOperator, PrefixFunction};
pub use automaton::{
    Automaton, AutomatonState, CellNameAutomaton, FunctionNameAutomaton, NumberAutomaton,
    is_signed_number, parse_number,
};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, ParseResult, Parser, parse, parse_formula};
pub use token::{Token, TokenKind};
