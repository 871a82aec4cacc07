//! Back ends over the syntax tree
//!
//! Each back end is a [`Visitor`](crate::parser::visitor::Visitor)
//! implementation that renders an already-built [`Program`](crate::parser::ast::Program):
//!
//! - [`source`]: pretty-printer back to Chourse source
//! - [`c`]: C89-flavoured transpiler
//! - [`tree`]: indented outline of the tree for the CLI and the explorer

pub mod c;
pub mod source;
pub mod tree;

pub use c::{render_c, CTranspiler};
pub use source::{render_source, SourcePrinter};
pub use tree::{program_tree, render_tree, TreeNode, TreePrinter};

use crate::parser::ast::{BinOp, Expr};

/// Binding strength of a binary operator, matching the parser's table.
pub(crate) fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Or => 2,
        BinOp::And => 3,
        BinOp::BitOr => 4,
        BinOp::BitXor => 5,
        BinOp::BitAnd => 6,
        BinOp::Eq | BinOp::Ne => 7,
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 8,
        BinOp::BitShl | BinOp::BitShr => 9,
        BinOp::Add | BinOp::Sub => 10,
        BinOp::Mul | BinOp::Div | BinOp::Mod => 11,
    }
}

/// Whether `child` must be parenthesized as an operand of a binary operator
/// with precedence `parent`. Operators are left-associative, so an equal
/// precedence only needs parentheses on the right.
pub(crate) fn needs_parens(child: &Expr, parent: u8, is_right: bool) -> bool {
    match child {
        Expr::Binary(b) => {
            let p = precedence(b.op);
            p < parent || (is_right && p == parent)
        }
        Expr::Assignment(_) => true,
        _ => false,
    }
}

/// Escape control characters for single-line display.
pub fn escape_control(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{C}' => out.push_str("\\f"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a double so that it lexes back as a double literal.
pub(crate) fn format_double(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// `depth` levels of two-space indentation
pub(crate) fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
