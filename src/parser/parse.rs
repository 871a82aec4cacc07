//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: `fun`, `class`, `val`/`var` and parameter lists
//! - `statements`: statement dispatch, blocks, `if`, `while`, jumps
//! - `expressions`: expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Parsing is fail-fast: the first grammar violation aborts the whole parse
//! with a [`ParseError`] naming the offending token. Nesting of statements
//! and expressions is capped at [`MAX_NESTING_DEPTH`] levels.

use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use std::fmt;

/// Category of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token did not match what the grammar expects here
    UnexpectedToken,
    /// The left side of `=` (or a compound form) is not a variable
    InvalidAssignmentTarget,
    /// A number lexeme does not fit the literal type
    InvalidNumber,
    /// Statements or expressions nest deeper than [`MAX_NESTING_DEPTH`]
    NestingTooDeep,
}

/// Deepest nesting of statements and expressions the parser accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub token: Token,
}

impl ParseError {
    pub fn line(&self) -> usize {
        self.token.line
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at line {}: {}", self.token.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for Chourse
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over a complete token stream. A missing trailing
    /// `Eof` is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (top-level statements)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                program.statements.push(stmt);
            }
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// First token at or after the cursor that is not a `NewLine`.
    pub(crate) fn peek_past_newlines(&self) -> &Token {
        self.tokens[self.position..]
            .iter()
            .find(|t| t.kind != TokenKind::NewLine)
            .unwrap_or_else(|| self.peek())
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::NewLine) {}
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            token: self.peek().clone(),
        }
    }

    pub(crate) fn unexpected(&self, message: &str) -> ParseError {
        self.error(
            ParseErrorKind::UnexpectedToken,
            format!("{}, found {}", message, self.peek()),
        )
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(message))
        }
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        let message = format!("Expected {what}");
        Ok(self
            .expect_token(TokenKind::Identifier, &message)?
            .lexeme
            .clone())
    }

    /// Enter one level of nesting. Paired with [`Parser::leave`]; an error
    /// aborts the parse, so a failed branch never needs to leave.
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(
                ParseErrorKind::NestingTooDeep,
                format!("Nesting deeper than {} levels", MAX_NESTING_DEPTH),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// True if the next token ends a statement: a line break, a closing
    /// brace, or the end of input.
    pub(crate) fn at_terminator(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::NewLine | TokenKind::RBrace | TokenKind::Eof
        )
    }

    /// Consume a statement terminator. A line break is consumed; `}` and end
    /// of input are left for the enclosing rule.
    pub(crate) fn expect_terminator(&mut self, ctx: &str) -> Result<(), ParseError> {
        if self.match_token(TokenKind::NewLine) || self.at_terminator() {
            Ok(())
        } else {
            Err(self.unexpected(&format!("Expected end of line {ctx}")))
        }
    }
}

/// Scan and parse `source` in one go. Lexer diagnostics are dropped; use
/// [`Lexer`] directly to inspect them.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_function() {
        let source = "fun main() {\n  return 0\n}\n";
        let program = parse_source(source).unwrap();

        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::FuncDecl(FuncDecl {
                name,
                parameters,
                body,
            }) => {
                assert_eq!(name, "main");
                assert!(parameters.is_empty());
                assert_eq!(body.statements.len(), 1);
            }
            other => panic!("Expected function declaration, found {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_yield_no_statements() {
        let program = parse_source("\n\n\nx\n\n").unwrap();
        assert_eq!(program.statements, vec![Stmt::Expr(Expr::variable("x"))]);

        let program = parse_source("").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_missing_eof_is_supplied() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "x", 1),
            Token::simple(TokenKind::NewLine, 1),
        ];
        let program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_error_carries_offending_token() {
        let err = parse_source("fun (a: Int) {}\n").unwrap_err();

        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.token.kind, TokenKind::LParen);
        assert_eq!(err.line(), 1);
        assert_eq!(
            err.to_string(),
            "Parse error at line 1: Expected function name, found '('"
        );
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        for source in [
            "(".repeat(10_000),
            format!("{}x\n", "-".repeat(10_000)),
            format!("{}1\n", "a = ".repeat(10_000)),
            "{".repeat(10_000),
            format!("{}x\n", "if (c) ".repeat(10_000)),
            format!("{}x\n", "f(".repeat(10_000)),
        ] {
            let err = parse_source(&source).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
            assert_eq!(err.line(), 1);
        }
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let depth = MAX_NESTING_DEPTH / 4;
        let source = format!("{}x{}\n", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(
            parse_source(&source).unwrap().statements,
            vec![Stmt::Expr(Expr::variable("x"))]
        );

        let source = format!("{}{}\n", "{\n".repeat(depth), "}\n".repeat(depth));
        assert_eq!(parse_source(&source).unwrap().statements.len(), 1);
    }

    #[test]
    fn test_first_error_aborts() {
        let err = parse_source("x = \ny = )\n").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::NewLine);
        assert_eq!(err.line(), 1);
    }
}
