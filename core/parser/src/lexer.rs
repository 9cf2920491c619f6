//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. The caller strips the
//! leading '=' before handing the text over. Runs of characters are classified by
//! the automatons in `automaton.rs`; single characters cover the rest.
//!
//! DISPATCH ORDER (first match wins):
//!   whitespace (skipped) -> number -> cell name -> function name
//!   -> quoted text -> operator -> parenthesis -> comma -> colon
//!
//! A run read by the cell-name automaton becomes a Function token when the run
//! is not a complete cell name (e.g. "MOD", "A" in "A0") or when '(' follows it.

use crate::automaton::{
    Automaton, AutomatonState, CellNameAutomaton, FunctionNameAutomaton, NumberAutomaton,
};
use crate::parser::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// Single-character operators.
pub const OPERATOR_CHARS: &str = "+-*/^<=>";

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    position: usize,
    number: NumberAutomaton,
    cell_name: CellNameAutomaton,
    function_name: FunctionNameAutomaton,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            position: 0,
            number: NumberAutomaton::new(),
            cell_name: CellNameAutomaton::new(),
            function_name: FunctionNameAutomaton::new(),
        }
    }

    /// Consumes the whole input and returns every token in order.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Advances the lexer and returns the next token, or None at end of input.
    pub fn next_token(&mut self) -> ParseResult<Option<Token>> {
        self.skip_whitespace();

        let Some(&ch) = self.input.peek() else {
            return Ok(None);
        };
        let start = self.position;

        let token = if self.number.test_char(ch) {
            let raw = read_while(&mut self.input, &mut self.position, &mut self.number);
            Token::new(TokenKind::Number, raw, start)
        } else if self.cell_name.test_char(ch) {
            self.read_cell_reference(start)
        } else if self.function_name.test_char(ch) {
            let raw = read_while(&mut self.input, &mut self.position, &mut self.function_name);
            Token::new(TokenKind::Function, raw.to_uppercase(), start)
        } else if ch == '"' {
            self.advance();
            let text = self.read_text();
            Token::new(TokenKind::Text, text, start)
        } else {
            self.advance();
            let kind = match ch {
                c if OPERATOR_CHARS.contains(c) => TokenKind::Operator,
                '(' | ')' => TokenKind::Parenthesis,
                ',' => TokenKind::Comma,
                ':' => TokenKind::Colon,
                _ => {
                    return Err(ParseError::UnexpectedCharacter {
                        ch,
                        position: start,
                    });
                }
            };
            Token::new(kind, ch.to_string(), start)
        };

        Ok(Some(token))
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.next()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn read_cell_reference(&mut self, start: usize) -> Token {
        let raw = read_while(&mut self.input, &mut self.position, &mut self.cell_name);
        let value = raw.to_uppercase();

        let is_call = self.input.peek() == Some(&'(');
        if is_call || !self.cell_name.test_string(&raw) {
            Token::new(TokenKind::Function, value, start)
        } else {
            Token::new(TokenKind::CellReference, value, start)
        }
    }

    /// Reads up to the closing quote. An unterminated quote takes the rest of the input.
    fn read_text(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.advance() {
            if ch == '"' {
                break;
            }
            result.push(ch);
        }
        result
    }
}

/// Consumes the longest run the automaton does not reject, then resets it.
fn read_while(
    input: &mut Peekable<Chars<'_>>,
    position: &mut usize,
    automaton: &mut dyn Automaton,
) -> String {
    let mut run = String::new();
    while let Some(&ch) = input.peek() {
        if automaton.insert(ch) == AutomatonState::Rejecting {
            break;
        }
        run.push(ch);
        input.next();
        *position += 1;
    }
    automaton.reset();
    run
}

/// Convenience function to tokenize a formula body (without the leading '=').
pub fn tokenize(input: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(input).tokenize()
}
