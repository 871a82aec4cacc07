//! Token kinds, the keyword table and the operator precedence table
//!
//! Both the [`Lexer`](super::lexer::Lexer) and the
//! [`Parser`](super::parse::Parser) read from this catalog. The tables are
//! process-wide constants: the keyword map is built once on first use and the
//! precedence table is a plain `match`.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

/// Every token kind the scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Fun,
    Class,
    If,
    Else,
    While,
    For,
    Val,
    Var,
    Return,
    Break,
    Continue,
    Null,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Bitwise
    Amp,   // &
    Pipe,  // |
    Caret, // ^
    Tilde, // ~
    LtLt,  // <<
    GtGt,  // >>

    // Assignment
    Eq,        // =
    PlusEq,    // +=
    MinusEq,   // -=
    StarEq,    // *=
    SlashEq,   // /=
    PercentEq, // %=
    AmpEq,     // &=
    PipeEq,    // |=
    CaretEq,   // ^=
    LtLtEq,    // <<=
    GtGtEq,    // >>=

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    Bang,   // !
    AndAnd, // &&
    OrOr,   // ||

    // Punctuation
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Dot,      // .
    Colon,    // :

    // Literals
    Identifier,
    Number,
    String,
    Label,

    // Structure
    NewLine,
    Eof,
}

/// Associativity of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Binding strength of the assignment operators, the loosest binary form.
pub const ASSIGNMENT_PRECEDENCE: u8 = 1;

static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    [
        TokenKind::Fun,
        TokenKind::Class,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::For,
        TokenKind::Val,
        TokenKind::Var,
        TokenKind::Return,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::Null,
    ]
    .into_iter()
    .filter_map(|kind| kind.lexeme().map(|text| (text, kind)))
    .collect()
});

/// Look up a reserved word.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

impl TokenKind {
    /// Canonical source text of a non-literal kind.
    ///
    /// Literal kinds (`Identifier`, `Number`, `String`, `Label`) and `Eof`
    /// have no fixed spelling and return `None`.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Fun => "fun",
            TokenKind::Class => "class",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Val => "val",
            TokenKind::Var => "var",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Null => "null",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::LtLt => "<<",
            TokenKind::GtGt => ">>",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::LtLtEq => "<<=",
            TokenKind::GtGtEq => ">>=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Bang => "!",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::NewLine => "\n",
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Label
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Precedence and associativity when this kind appears as a binary
    /// operator, or `None` if it never does.
    ///
    /// Lowest to highest: assignment < `||` < `&&` < `|` < `^` < `&` <
    /// equality < relational < shift < additive < multiplicative. Unary
    /// operators bind tighter than all of these and are handled by the
    /// parser directly.
    pub fn binary_precedence(self) -> Option<(u8, Assoc)> {
        let entry = match self {
            TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::AmpEq
            | TokenKind::PipeEq
            | TokenKind::CaretEq
            | TokenKind::LtLtEq
            | TokenKind::GtGtEq => (ASSIGNMENT_PRECEDENCE, Assoc::Right),
            TokenKind::OrOr => (2, Assoc::Left),
            TokenKind::AndAnd => (3, Assoc::Left),
            TokenKind::Pipe => (4, Assoc::Left),
            TokenKind::Caret => (5, Assoc::Left),
            TokenKind::Amp => (6, Assoc::Left),
            TokenKind::EqEq | TokenKind::NotEq => (7, Assoc::Left),
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => (8, Assoc::Left),
            TokenKind::LtLt | TokenKind::GtGt => (9, Assoc::Left),
            TokenKind::Plus | TokenKind::Minus => (10, Assoc::Left),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => (11, Assoc::Left),
            _ => return None,
        };
        Some(entry)
    }

    pub fn is_keyword(self) -> bool {
        self.lexeme().is_some_and(|text| keyword(text) == Some(self))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

/// A classified, located lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// Token of a fixed-spelling kind, using its canonical lexeme.
    pub fn simple(kind: TokenKind, line: usize) -> Self {
        Self::new(kind, kind.lexeme().unwrap_or(""), line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::String => write!(f, "string \"{}\"", self.lexeme),
            TokenKind::Label => write!(f, "label '{}'", self.lexeme),
            TokenKind::NewLine => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Render a token stream back into an approximation of its source.
///
/// Diagnostics only: lexemes are joined with a single space and string
/// lexemes are re-quoted, so the result rescans to the same kinds but is not
/// byte-identical to the scanned text.
pub fn tokens_to_source(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.kind == TokenKind::String {
            out.push('"');
            out.push_str(&token.lexeme);
            out.push('"');
        } else {
            out.push_str(&token.lexeme);
        }
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table() {
        assert_eq!(keyword("fun"), Some(TokenKind::Fun));
        assert_eq!(keyword("continue"), Some(TokenKind::Continue));
        assert_eq!(keyword("null"), Some(TokenKind::Null));
        assert_eq!(keyword("Fun"), None);
        assert_eq!(keyword("print"), None);
        assert!(TokenKind::Val.is_keyword());
        assert!(!TokenKind::Plus.is_keyword());
    }

    #[test]
    fn test_literal_kinds_have_no_lexeme() {
        assert_eq!(TokenKind::Identifier.lexeme(), None);
        assert_eq!(TokenKind::Label.lexeme(), None);
        assert_eq!(TokenKind::Eof.lexeme(), None);
        assert_eq!(TokenKind::LtLtEq.lexeme(), Some("<<="));
        assert_eq!(TokenKind::NewLine.lexeme(), Some("\n"));
    }

    #[test]
    fn test_precedence_ordering() {
        let prec = |kind: TokenKind| kind.binary_precedence().unwrap().0;

        assert!(prec(TokenKind::PipeEq) < prec(TokenKind::OrOr));
        assert!(prec(TokenKind::OrOr) < prec(TokenKind::AndAnd));
        assert!(prec(TokenKind::AndAnd) < prec(TokenKind::Pipe));
        assert!(prec(TokenKind::Pipe) < prec(TokenKind::Caret));
        assert!(prec(TokenKind::Caret) < prec(TokenKind::Amp));
        assert!(prec(TokenKind::Amp) < prec(TokenKind::NotEq));
        assert!(prec(TokenKind::NotEq) < prec(TokenKind::Ge));
        assert!(prec(TokenKind::Ge) < prec(TokenKind::GtGt));
        assert!(prec(TokenKind::GtGt) < prec(TokenKind::Minus));
        assert!(prec(TokenKind::Minus) < prec(TokenKind::Percent));

        assert_eq!(TokenKind::Eq.binary_precedence().unwrap().1, Assoc::Right);
        assert_eq!(TokenKind::Plus.binary_precedence().unwrap().1, Assoc::Left);
        assert_eq!(TokenKind::Bang.binary_precedence(), None);
        assert_eq!(TokenKind::Tilde.binary_precedence(), None);
    }

    #[test]
    fn test_tokens_to_source_requotes_strings() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "print", 1),
            Token::simple(TokenKind::LParen, 1),
            Token::new(TokenKind::String, "hi", 1),
            Token::simple(TokenKind::RParen, 1),
            Token::new(TokenKind::Eof, "", 1),
        ];

        assert_eq!(tokens_to_source(&tokens), "print ( \"hi\" )  ");
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(TokenKind::Identifier, "x", 1).to_string(), "identifier 'x'");
        assert_eq!(Token::simple(TokenKind::PlusEq, 1).to_string(), "'+='");
        assert_eq!(Token::new(TokenKind::Eof, "", 3).to_string(), "end of file");
    }
}
