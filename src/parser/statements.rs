//! Statement parsing implementation
//!
//! This module handles parsing of statements, dispatching on a single token
//! of lookahead:
//!
//! | Lookahead                        | Production                          |
//! |----------------------------------|-------------------------------------|
//! | newline                          | blank line, no statement            |
//! | `fun` / `class` / `val` / `var`  | declarations (see `declarations`)   |
//! | `if` / `while`                   | control flow                        |
//! | `{`                              | block                               |
//! | `return` / `break` / `continue`  | jumps with optional `@label`        |
//! | anything else                    | expression statement                |
//!
//! A statement ends at a line break, or right before a `}` or end of input.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse a statement. Returns `None` for a blank line.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        if self.check(TokenKind::NewLine) {
            self.advance();
            return Ok(None);
        }

        self.enter()?;
        let stmt = match self.peek().kind {
            TokenKind::Fun => self.parse_function_declaration()?,
            TokenKind::Class => self.parse_class_declaration()?,
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::While => self.parse_while_statement()?,
            TokenKind::Val | TokenKind::Var => self.parse_variable_declaration()?,
            TokenKind::LBrace => Stmt::Block(self.parse_block()?),
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::Break => Stmt::Break(self.parse_jump(TokenKind::Break, "'break'")?),
            TokenKind::Continue => {
                Stmt::Continue(self.parse_jump(TokenKind::Continue, "'continue'")?)
            }
            _ => self.parse_expression_statement()?,
        };
        self.leave();

        Ok(Some(stmt))
    }

    /// Parse the single statement that forms an `if`/`while` body. Blank
    /// lines before it are skipped.
    fn parse_body(&mut self, ctx: &str) -> Result<Stmt, ParseError> {
        self.skip_newlines();
        if self.check(TokenKind::RBrace) || self.is_at_end() {
            return Err(self.unexpected(&format!("Expected statement {ctx}")));
        }
        match self.parse_statement()? {
            Some(stmt) => Ok(stmt),
            None => Err(self.unexpected(&format!("Expected statement {ctx}"))),
        }
    }

    /// Parse block: { statements }
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect_token(TokenKind::LBrace, "Expected '{'")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
        }

        self.expect_token(TokenKind::RBrace, "Expected '}' after block")?;
        Ok(Block::new(statements))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::If, "Expected 'if'")?;
        self.expect_token(TokenKind::LParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "Expected ')' after if condition")?;

        let then_branch = Box::new(self.parse_body("after if condition")?);

        // `else` may sit on a later line than the then-branch
        let else_branch = if self.peek_past_newlines().kind == TokenKind::Else {
            self.skip_newlines();
            self.advance(); // consume 'else'
            Some(Box::new(self.parse_body("after 'else'")?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::While, "Expected 'while'")?;
        self.expect_token(TokenKind::LParen, "Expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "Expected ')' after while condition")?;

        let body = Box::new(self.parse_body("after while condition")?);

        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    /// Parse return statement: return (@label)? expr?
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::Return, "Expected 'return'")?;
        let label = self.parse_label();

        let expr = if self.at_terminator() {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect_terminator("after return")?;

        Ok(Stmt::Return(ReturnStmt { label, expr }))
    }

    /// Parse break/continue: keyword (@label)?
    fn parse_jump(&mut self, keyword: TokenKind, name: &str) -> Result<JumpStmt, ParseError> {
        self.expect_token(keyword, &format!("Expected {name}"))?;
        let label = self.parse_label();
        self.expect_terminator(&format!("after {name}"))?;
        Ok(JumpStmt { label })
    }

    fn parse_label(&mut self) -> Option<String> {
        if self.match_token(TokenKind::Label) {
            let lexeme = &self.previous().lexeme;
            Some(lexeme.strip_prefix('@').unwrap_or(lexeme.as_str()).to_string())
        } else {
            None
        }
    }

    /// Parse expression statement
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        self.expect_terminator("after expression")?;
        Ok(Stmt::Expr(expr))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse_source;
    use crate::parser::token::TokenKind;

    fn single(source: &str) -> Stmt {
        let mut program = parse_source(source).unwrap();
        assert_eq!(program.statements.len(), 1, "{:?}", program.statements);
        program.statements.remove(0)
    }

    fn ret(expr: Option<Expr>) -> Stmt {
        Stmt::Return(ReturnStmt { label: None, expr })
    }

    #[test]
    fn test_if_else_on_one_line() {
        let stmt = single("if (a > 0) { return 1 } else { return 0 }\n");

        assert_eq!(
            stmt,
            Stmt::If(IfStmt {
                condition: Expr::binary(Expr::variable("a"), BinOp::Gt, Expr::IntegerLiteral(0)),
                then_branch: Box::new(Stmt::Block(Block::new(vec![ret(Some(
                    Expr::IntegerLiteral(1)
                ))]))),
                else_branch: Some(Box::new(Stmt::Block(Block::new(vec![ret(Some(
                    Expr::IntegerLiteral(0)
                ))])))),
            })
        );
    }

    #[test]
    fn test_else_on_next_line() {
        let stmt = single("if (a) return 1\nelse return 0\n");
        match stmt {
            Stmt::If(IfStmt {
                then_branch,
                else_branch: Some(else_branch),
                ..
            }) => {
                assert_eq!(*then_branch, ret(Some(Expr::IntegerLiteral(1))));
                assert_eq!(*else_branch, ret(Some(Expr::IntegerLiteral(0))));
            }
            other => panic!("Expected if/else, found {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else_keeps_following_statement() {
        let program = parse_source("if (a) b()\n\nc()\n").unwrap();
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            &program.statements[0],
            Stmt::If(IfStmt {
                else_branch: None,
                ..
            })
        ));
    }

    #[test]
    fn test_body_is_not_wrapped_in_block() {
        let stmt = single("while (x)\n  x -= 1\n");
        match stmt {
            Stmt::While(WhileStmt { body, .. }) => {
                assert_eq!(
                    *body,
                    Stmt::Expr(Expr::assign("x", AssignOp::SubAssign, Expr::IntegerLiteral(1)))
                );
            }
            other => panic!("Expected while, found {:?}", other),
        }
    }

    #[test]
    fn test_missing_body() {
        let err = parse_source("while (x)\n").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Eof);
        assert!(err.message.starts_with("Expected statement after while condition"));
    }

    #[test]
    fn test_jumps_with_labels() {
        let program =
            parse_source("break\ncontinue@outer\nreturn\nreturn@f x + 1\n").unwrap();

        assert_eq!(
            program.statements,
            vec![
                Stmt::Break(JumpStmt { label: None }),
                Stmt::Continue(JumpStmt {
                    label: Some("outer".to_string())
                }),
                ret(None),
                Stmt::Return(ReturnStmt {
                    label: Some("f".to_string()),
                    expr: Some(Expr::binary(
                        Expr::variable("x"),
                        BinOp::Add,
                        Expr::IntegerLiteral(1)
                    )),
                }),
            ]
        );
    }

    #[test]
    fn test_return_before_closing_brace() {
        let stmt = single("{ return }\n");
        assert_eq!(stmt, Stmt::Block(Block::new(vec![ret(None)])));
    }

    #[test]
    fn test_nested_blocks_preserve_order() {
        let stmt = single("{\n  a\n  {\n    b\n  }\n  c\n}\n");
        assert_eq!(
            stmt,
            Stmt::Block(Block::new(vec![
                Stmt::Expr(Expr::variable("a")),
                Stmt::Block(Block::new(vec![Stmt::Expr(Expr::variable("b"))])),
                Stmt::Expr(Expr::variable("c")),
            ]))
        );
    }

    #[test]
    fn test_expression_statement_needs_terminator() {
        let err = parse_source("a b\n").unwrap_err();
        assert_eq!(err.token.lexeme, "b");
        assert!(err.message.starts_with("Expected end of line after expression"));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_source("fun f() {\n  x\n").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Eof);
        assert_eq!(err.message, "Expected '}' after block, found end of file");
    }

    #[test]
    fn test_for_is_reserved() {
        let err = parse_source("for (x) {}\n").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::For);
    }
}
