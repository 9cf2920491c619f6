//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Operator-precedence (Pratt) parser that converts a stream of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes the tokens
//! produced by the Lexer and builds an Expression tree that the engine evaluates.
//!
//! GRAMMAR:
//!   expression  --> binary(0)
//!   binary(p)   --> unary ( INFIX[prec >= p] binary(prec + 1 | prec if right-assoc) )*
//!   unary       --> ("+" | "-") unary | primary
//!   primary     --> NUMBER | TEXT | CELL (":" CELL)? | "(" expression ")" | call
//!   call        --> PREFIX_FUNCTION "(" ( expression ("," expression)* )? ")"
//!
//! Two-character comparators (<=, >=, <>) arrive as two operator tokens and are
//! joined here by peeking one token ahead.

use crate::ast::{Arity, Associativity, Expression, InfixOperator, PrefixFunction};
use crate::automaton::parse_number;
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};
use thiserror::Error;

/// Lexical and syntax errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("Unexpected end of expression")]
    UnexpectedEndOfExpression,

    #[error("Unexpected token '{0}' at the end of expression")]
    UnexpectedTokenAtEndOfExpression(String),

    #[error("Expected '{expected}', found '{found}'")]
    Expected { expected: String, found: String },

    #[error("{function} expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: String,
        expected: Arity,
        actual: usize,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// The Parser walks a borrowed token slice.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parses one complete expression. Trailing tokens are an error.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(ParseError::UnexpectedTokenAtEndOfExpression(
                token.value.clone(),
            ));
        }

        Ok(expr)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn match_token(&mut self, kind: TokenKind, value: &str) -> bool {
        match self.current() {
            Some(token) if token.is(kind, value) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, kind: TokenKind, value: &str) -> ParseResult<()> {
        match self.current() {
            Some(token) if token.is(kind, value) => {
                self.advance();
                Ok(())
            }
            Some(token) => Err(ParseError::Expected {
                expected: value.to_string(),
                found: token.value.clone(),
            }),
            None => Err(ParseError::UnexpectedEndOfExpression),
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary(0)
    }

    /// https://en.wikipedia.org/wiki/Operator-precedence_parser
    fn parse_binary(&mut self, min_precedence: u8) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        while let Some((op, width)) = self.peek_operator() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.pos += width;

            let next_min = match op.associativity() {
                Associativity::Left => precedence + 1,
                Associativity::Right => precedence,
            };
            let right = self.parse_binary(next_min)?;

            left = Expression::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Returns the infix operator at the cursor and how many tokens it spans.
    /// Nothing is consumed.
    fn peek_operator(&self) -> Option<(InfixOperator, usize)> {
        let token = self.current()?;
        match token.kind {
            TokenKind::Operator => {
                if token.value == "<" || token.value == ">" {
                    if let Some(next) = self.peek_at(1) {
                        if next.kind == TokenKind::Operator {
                            let joined = format!("{}{}", token.value, next.value);
                            if matches!(joined.as_str(), "<=" | ">=" | "<>") {
                                return InfixOperator::from_symbol(&joined).map(|op| (op, 2));
                            }
                        }
                    }
                }
                InfixOperator::from_symbol(&token.value).map(|op| (op, 1))
            }
            TokenKind::Function => InfixOperator::from_symbol(&token.value).map(|op| (op, 1)),
            _ => None,
        }
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.match_token(TokenKind::Operator, "+") {
            return self.parse_unary();
        }
        if self.match_token(TokenKind::Operator, "-") {
            let operand = self.parse_unary()?;
            return Ok(Expression::Negate(Box::new(operand)));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let token = self
            .current()
            .ok_or(ParseError::UnexpectedEndOfExpression)?;

        match token.kind {
            TokenKind::Number => {
                self.advance();
                parse_number(&token.value)
                    .map(Expression::Number)
                    .ok_or_else(|| ParseError::UnexpectedToken(token.value.clone()))
            }

            TokenKind::Text => {
                self.advance();
                Ok(Expression::Text(token.value.clone()))
            }

            TokenKind::CellReference => {
                self.advance();
                if self.match_token(TokenKind::Colon, ":") {
                    return self.parse_range_end(token.value.clone());
                }
                Ok(Expression::CellRef(token.value.clone()))
            }

            TokenKind::Parenthesis if token.value == "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Parenthesis, ")")?;
                Ok(expr)
            }

            TokenKind::Function => match PrefixFunction::from_name(&token.value) {
                Some(function) => {
                    self.advance();
                    self.parse_call(function)
                }
                None => Err(ParseError::UnexpectedToken(token.value.clone())),
            },

            _ => Err(ParseError::UnexpectedToken(token.value.clone())),
        }
    }

    /// Parses the cell after "CELL :".
    fn parse_range_end(&mut self, start: String) -> ParseResult<Expression> {
        match self.current() {
            Some(token) if token.kind == TokenKind::CellReference => {
                self.advance();
                Ok(Expression::Range {
                    start,
                    end: token.value.clone(),
                })
            }
            Some(token) => Err(ParseError::UnexpectedToken(token.value.clone())),
            None => Err(ParseError::UnexpectedEndOfExpression),
        }
    }

    /// Parses a prefix function call like SUM(1, 2), checking the argument count.
    fn parse_call(&mut self, function: PrefixFunction) -> ParseResult<Expression> {
        self.expect(TokenKind::Parenthesis, "(")?;

        let mut args = Vec::new();
        if !self.match_token(TokenKind::Parenthesis, ")") {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma, ",") {
                    break;
                }
            }
            self.expect(TokenKind::Parenthesis, ")")?;
        }

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(ParseError::ArgumentCount {
                function: function.name().to_string(),
                expected: arity,
                actual: args.len(),
            });
        }

        Ok(Expression::Call { function, args })
    }
}

/// Parses a token stream into an expression.
pub fn parse(tokens: &[Token]) -> ParseResult<Expression> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses formula text. A leading '=' is skipped if present.
pub fn parse_formula(input: &str) -> ParseResult<Expression> {
    let body = input.strip_prefix('=').unwrap_or(input);
    let tokens = tokenize(body)?;
    parse(&tokens)
}
