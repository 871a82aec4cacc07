//! Chourse source code parser
//!
//! This module transforms Chourse source text into an Abstract Syntax Tree (AST):
//! - [`token`]: Token catalog, keyword table and operator precedence
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`visitor`]: Double-dispatch traversal used by every back end
//!
//! # Language
//!
//! A small Kotlin-flavoured language:
//! - Declarations: `fun`, `class` with an optional superclass, `val`/`var`
//! - Statements: blocks, `if`/`else`, `while`, `return`, `break`, `continue`
//!   (jumps may carry an `@label`)
//! - Expressions: arithmetic, comparison, logical, bitwise, shifts,
//!   assignment and compound assignment, calls
//! - Statements end at a line break; there are no semicolons
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod token;
pub mod visitor;

mod declarations;
mod expressions;
mod statements;
