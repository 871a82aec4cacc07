//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Supported Expressions
//!
//! - Literals: integers, doubles, strings, `null`
//! - Identifiers and calls: `name`, `name(arg, ...)`
//! - Binary operators: arithmetic, comparison, logical, bitwise, shifts
//! - Unary operators: `-`, `!`, `~`
//! - Assignment: `=` and the compound forms, right-associative, variables only
//! - Grouping: `( expr )`
//!
//! # Precedence
//!
//! Binding strengths come from [`TokenKind::binary_precedence`], so one
//! loop covers every binary level instead of one function per level.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
use crate::parser::token::{Assoc, TokenKind};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }

    /// Precedence climbing: fold every operator binding tighter than
    /// `min_precedence` into the left operand.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        self.enter()?;
        let mut left = self.parse_unary()?;

        loop {
            let kind = self.peek().kind;
            let Some((precedence, assoc)) = kind.binary_precedence() else {
                break;
            };
            if precedence <= min_precedence {
                break;
            }

            self.advance(); // consume operator
            let operator = self.previous().clone();
            let next_min = match assoc {
                Assoc::Left => precedence,
                Assoc::Right => precedence - 1,
            };

            left = if let Some(op) = assign_op(kind) {
                let target = match left {
                    Expr::Variable(name) => name,
                    _ => {
                        return Err(ParseError {
                            kind: ParseErrorKind::InvalidAssignmentTarget,
                            message: "Invalid assignment target".to_string(),
                            token: operator,
                        });
                    }
                };
                let value = self.parse_binary(next_min)?;
                Expr::assign(target, op, value)
            } else {
                let right = self.parse_binary(next_min)?;
                match bin_op(kind) {
                    Some(op) => Expr::binary(left, op, right),
                    None => unreachable!("{kind} has a precedence but no operator"),
                }
            };
        }

        self.leave();
        Ok(left)
    }

    /// Parse unary (- ! ~)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            TokenKind::Tilde => UnOp::BitNot,
            _ => return self.parse_primary(),
        };

        self.advance();
        self.enter()?;
        let right = self.parse_unary()?;
        self.leave();
        Ok(Expr::unary(op, right))
    }

    /// Parse primary (literals, variables, calls, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::Number => self.parse_number(),
            TokenKind::String => {
                let value = self.advance().lexeme.clone();
                Ok(Expr::StringLiteral(value))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::NullLiteral)
            }
            TokenKind::Identifier => {
                let name = self.advance().lexeme.clone();
                if self.match_token(TokenKind::LParen) {
                    let arguments = self.parse_argument_list()?;
                    self.expect_token(TokenKind::RParen, "Expected ')' after function arguments")?;
                    Ok(Expr::call(name, arguments))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("Expected expression")),
        }
    }

    /// Integer literals are base-10 `i64`; a fractional part makes a finite
    /// double.
    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let lexeme = self.peek().lexeme.clone();

        let expr = if lexeme.contains('.') {
            lexeme
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Expr::DoubleLiteral)
        } else {
            lexeme.parse::<i64>().ok().map(Expr::IntegerLiteral)
        };

        match expr {
            Some(expr) => {
                self.advance();
                Ok(expr)
            }
            None => Err(self.error(
                ParseErrorKind::InvalidNumber,
                format!("Invalid number literal: {}", lexeme),
            )),
        }
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        TokenKind::PercentEq => AssignOp::ModAssign,
        TokenKind::AmpEq => AssignOp::BitAndAssign,
        TokenKind::PipeEq => AssignOp::BitOrAssign,
        TokenKind::CaretEq => AssignOp::BitXorAssign,
        TokenKind::LtLtEq => AssignOp::ShlAssign,
        TokenKind::GtGtEq => AssignOp::ShrAssign,
        _ => return None,
    };
    Some(op)
}

fn bin_op(kind: TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Mod,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::Ne,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Le => BinOp::Le,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::Ge => BinOp::Ge,
        TokenKind::AndAnd => BinOp::And,
        TokenKind::OrOr => BinOp::Or,
        TokenKind::Amp => BinOp::BitAnd,
        TokenKind::Pipe => BinOp::BitOr,
        TokenKind::Caret => BinOp::BitXor,
        TokenKind::LtLt => BinOp::BitShl,
        TokenKind::GtGt => BinOp::BitShr,
        _ => return None,
    };
    Some(op)
}
