//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the formula lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by the parser.
//! Every token keeps its raw (uppercased where relevant) text so the parser can
//! match operators and function names by value.

/// The class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    /// Quoted text, without the quotes.
    Text,
    /// A cell name such as A1 or AB12.
    CellReference,
    /// An identifier: prefix function, infix word operator (MOD, AND, ...) or unknown name.
    Function,
    Operator,
    Parenthesis,
    Comma,
    Colon,
}

/// A token with its raw value and the char offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Returns true if this token has the given kind and value.
    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value.eq_ignore_ascii_case(value)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Text => write!(f, "\"{}\"", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}
