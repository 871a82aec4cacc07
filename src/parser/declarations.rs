//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//! - Function declarations: `fun name(a: Int, b: Int) { ... }`
//! - Class declarations: `class Name : Base { ... }`
//! - Variable declarations: `val name = expr` / `var name`
//!
//! Parameter and member names are not checked for duplicates here.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse function declaration: fun name(params) { body }
    pub(crate) fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::Fun, "Expected 'fun'")?;
        let name = self.expect_identifier("function name")?;

        self.expect_token(TokenKind::LParen, "Expected '(' after function name")?;
        let parameters = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RParen, "Expected ')' after parameters")?;

        let body = self.parse_block()?;

        Ok(Stmt::FuncDecl(FuncDecl {
            name,
            parameters,
            body,
        }))
    }

    /// Parse parameter list: name: Type, name: Type, ...
    fn parse_parameter_list(&mut self) -> Result<Vec<ParameterDef>, ParseError> {
        let mut parameters = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(parameters);
        }

        loop {
            let name = self.expect_identifier("parameter name")?;
            self.expect_token(TokenKind::Colon, "Expected ':' between a parameter and its type")?;
            let type_name = self.expect_identifier("parameter type")?;
            parameters.push(ParameterDef { name, type_name });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(parameters)
    }

    /// Parse class declaration: class Name (: Super)? { body }
    pub(crate) fn parse_class_declaration(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::Class, "Expected 'class'")?;
        let name = self.expect_identifier("class name")?;

        let superclass = if self.match_token(TokenKind::Colon) {
            Some(self.expect_identifier("superclass name after ':'")?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(Stmt::ClassDecl(ClassDecl {
            name,
            superclass,
            body,
        }))
    }

    /// Parse variable declaration: (val | var) name (= init)?
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let mutable = if self.match_token(TokenKind::Var) {
            true
        } else {
            self.expect_token(TokenKind::Val, "Expected 'val' or 'var'")?;
            false
        };

        let name = self.expect_identifier("variable name")?;

        let initializer = if self.match_token(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_terminator("after variable declaration")?;

        Ok(Stmt::VarDecl(VarDecl {
            name,
            mutable,
            initializer,
        }))
    }
}
