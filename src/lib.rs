//! # Introduction
//!
//! Chourse is a small Kotlin-flavoured language. This crate is its front
//! end: it scans source text into tokens, parses the tokens into a syntax
//! tree, and renders the tree through visitor back ends. A terminal
//! explorer built with [ratatui](https://docs.rs/ratatui) shows every stage
//! side by side.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Visitor → Source / C / Outline
//! ```
//!
//! 1. [`parser`]: token catalog, scanner, AST, visitor protocol and the
//!    recursive descent parser.
//! 2. [`transpiler`]: back ends implemented as visitors: a pretty-printer,
//!    a C transpiler and a tree outline.
//! 3. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use chourse::parser::parse::parse_source;
//! use chourse::transpiler::render_source;
//!
//! let program = parse_source("fun add(a: Int, b: Int) {\n  return a+b\n}\n").unwrap();
//! assert_eq!(
//!     render_source(&program),
//!     "fun add(a: Int, b: Int) {\n  return a + b\n}\n"
//! );
//! ```

pub mod parser;
pub mod transpiler;
pub mod ui;
