//! Lexer (tokenizer) for Chourse source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Line breaks are significant in Chourse (they terminate statements), so every
//! `\n` outside a string literal becomes a [`TokenKind::NewLine`] token.
//!
//! Scanning never fails outright. Unrecognized characters and unterminated
//! string literals are recorded as [`LexError`]s, the offending text produces
//! no token, and scanning carries on.

use super::token::{keyword, Token, TokenKind};
use std::fmt;

/// What went wrong at a soft scanning failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
}

/// Lexer diagnostic. Never aborts the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter(c) => write!(
                f,
                "Lexer error at line {}: Unexpected character: {:?}",
                self.line, c
            ),
            LexErrorKind::UnterminatedString => write!(
                f,
                "Lexer error at line {}: Unterminated string literal",
                self.line
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Lexer for Chourse source code
pub struct Lexer {
    input: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    errors: Vec<LexError>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire input. The result always ends with one `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            if let Some(token) = self.next_token() {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line));
        tokens
    }

    /// Diagnostics collected by the last [`tokenize`](Self::tokenize) call.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Scan one lexeme starting at `self.start`; `None` if it yields no token.
    fn next_token(&mut self) -> Option<Token> {
        let ch = self.advance()?;

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,

            '+' => self.either('=', TokenKind::PlusEq, TokenKind::Plus),
            '-' => self.either('=', TokenKind::MinusEq, TokenKind::Minus),
            '*' => self.either('=', TokenKind::StarEq, TokenKind::Star),
            '%' => self.either('=', TokenKind::PercentEq, TokenKind::Percent),
            '^' => self.either('=', TokenKind::CaretEq, TokenKind::Caret),
            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.either('=', TokenKind::NotEq, TokenKind::Bang),
            '/' => {
                if self.peek() == Some('/') {
                    self.skip_line_comment();
                    return None;
                }
                self.either('=', TokenKind::SlashEq, TokenKind::Slash)
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::AndAnd
                } else {
                    self.either('=', TokenKind::AmpEq, TokenKind::Amp)
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::OrOr
                } else {
                    self.either('=', TokenKind::PipeEq, TokenKind::Pipe)
                }
            }
            '<' => {
                if self.match_char('<') {
                    self.either('=', TokenKind::LtLtEq, TokenKind::LtLt)
                } else {
                    self.either('=', TokenKind::Le, TokenKind::Lt)
                }
            }
            '>' => {
                if self.match_char('>') {
                    self.either('=', TokenKind::GtGtEq, TokenKind::GtGt)
                } else {
                    self.either('=', TokenKind::Ge, TokenKind::Gt)
                }
            }

            '\n' => {
                // Tagged with the line it ends, then the counter moves on
                let token = Token::simple(TokenKind::NewLine, self.line);
                self.line += 1;
                return Some(token);
            }
            ' ' | '\t' | '\r' => return None,

            '"' => return self.string_literal(),
            '@' => return Some(self.label()),
            c if c.is_ascii_digit() => return Some(self.number_literal()),
            c if is_identifier_start(c) => return Some(self.identifier_or_keyword()),

            other => {
                self.errors.push(LexError {
                    kind: LexErrorKind::UnexpectedCharacter(other),
                    line: self.line,
                });
                return None;
            }
        };

        Some(Token::simple(kind, self.line))
    }

    /// Parse string literal. The lexeme is the raw text between the quotes;
    /// no escape sequences are interpreted here.
    fn string_literal(&mut self) -> Option<Token> {
        let start_line = self.line;

        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.errors.push(LexError {
                kind: LexErrorKind::UnterminatedString,
                line: start_line,
            });
            return None;
        }

        self.advance(); // consume closing quote
        let value = self.slice(self.start + 1, self.current - 1);
        Some(Token::new(TokenKind::String, value, start_line))
    }

    /// Parse numeric literal. Integer vs. floating interpretation is left to
    /// the parser; only the shape `digits ('.' digits)?` is checked here.
    fn number_literal(&mut self) -> Token {
        self.consume_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.consume_while(|c| c.is_ascii_digit());
        }

        Token::new(TokenKind::Number, self.current_lexeme(), self.line)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        self.consume_while(is_identifier_part);

        let text = self.current_lexeme();
        let kind = keyword(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, self.line)
    }

    /// Parse label: `@` followed by identifier characters. The lexeme keeps
    /// the `@`.
    fn label(&mut self) -> Token {
        self.consume_while(is_identifier_part);
        Token::new(TokenKind::Label, self.current_lexeme(), self.line)
    }

    /// Skip single-line comment (// ...). The newline itself is left for the
    /// main loop so the statement before the comment is still terminated.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Consume `expected` if it is next and pick `matched`, else `otherwise`.
    fn either(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.match_char(expected) {
            matched
        } else {
            otherwise
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn current_lexeme(&self) -> String {
        self.slice(self.start, self.current)
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.input[from..to].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.current + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += 1;
        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scan `source` into tokens, returning the diagnostics alongside.
pub fn scan(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    (tokens, lexer.into_errors())
}
