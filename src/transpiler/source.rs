//! Pretty-printer back to Chourse source
//!
//! Output re-parses to an equal tree: parentheses are inserted only where
//! precedence or associativity requires them, string contents are written
//! as scanned, and every statement ends at a line break.

use crate::parser::ast::*;
use crate::parser::visitor::Visitor;
use crate::transpiler::{format_double, indent, needs_parens, precedence};

/// Renders nodes as Chourse source with two-space indentation
#[derive(Debug, Default)]
pub struct SourcePrinter {
    depth: usize,
}

impl SourcePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn operand(&mut self, expr: &Expr, parent: u8, is_right: bool) -> String {
        let text = expr.accept(self);
        if needs_parens(expr, parent, is_right) {
            format!("({text})")
        } else {
            text
        }
    }

    fn label(label: &Option<String>) -> String {
        label
            .as_ref()
            .map(|l| format!("@{l}"))
            .unwrap_or_default()
    }
}

impl Visitor for SourcePrinter {
    type Output = String;

    fn visit_binary(&mut self, expr: &BinaryExpr) -> String {
        let prec = precedence(expr.op);
        let left = self.operand(&expr.left, prec, false);
        let right = self.operand(&expr.right, prec, true);
        format!("{} {} {}", left, expr.op.symbol(), right)
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) -> String {
        let operand = expr.right.accept(self);
        match *expr.right {
            Expr::Binary(_) | Expr::Assignment(_) => format!("{}({})", expr.op.symbol(), operand),
            _ => format!("{}{}", expr.op.symbol(), operand),
        }
    }

    fn visit_integer(&mut self, value: i64) -> String {
        value.to_string()
    }

    fn visit_double(&mut self, value: f64) -> String {
        format_double(value)
    }

    fn visit_string(&mut self, value: &str) -> String {
        format!("\"{value}\"")
    }

    fn visit_null(&mut self) -> String {
        "null".to_string()
    }

    fn visit_variable(&mut self, name: &str) -> String {
        name.to_string()
    }

    fn visit_call(&mut self, expr: &CallExpr) -> String {
        let args: Vec<String> = expr.arguments.iter().map(|a| a.accept(self)).collect();
        format!("{}({})", expr.name, args.join(", "))
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> String {
        // right-associative and lowest precedence: the value never needs parens
        format!("{} {} {}", expr.target, expr.op.symbol(), expr.value.accept(self))
    }

    fn visit_expr_stmt(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn visit_block(&mut self, block: &Block) -> String {
        if block.statements.is_empty() {
            return "{}".to_string();
        }

        self.depth += 1;
        let mut out = String::from("{\n");
        for stmt in &block.statements {
            out.push_str(&indent(self.depth));
            out.push_str(&stmt.accept(self));
            out.push('\n');
        }
        self.depth -= 1;
        out.push_str(&indent(self.depth));
        out.push('}');
        out
    }

    fn visit_if(&mut self, stmt: &IfStmt) -> String {
        let mut out = format!(
            "if ({}) {}",
            stmt.condition.accept(self),
            stmt.then_branch.accept(self)
        );
        if let Some(else_branch) = &stmt.else_branch {
            if matches!(*stmt.then_branch, Stmt::Block(_)) {
                out.push_str(" else ");
            } else {
                out.push('\n');
                out.push_str(&indent(self.depth));
                out.push_str("else ");
            }
            out.push_str(&else_branch.accept(self));
        }
        out
    }

    fn visit_while(&mut self, stmt: &WhileStmt) -> String {
        format!(
            "while ({}) {}",
            stmt.condition.accept(self),
            stmt.body.accept(self)
        )
    }

    fn visit_break(&mut self, stmt: &JumpStmt) -> String {
        format!("break{}", Self::label(&stmt.label))
    }

    fn visit_continue(&mut self, stmt: &JumpStmt) -> String {
        format!("continue{}", Self::label(&stmt.label))
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) -> String {
        let mut out = format!("return{}", Self::label(&stmt.label));
        if let Some(expr) = &stmt.expr {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> String {
        let keyword = if decl.mutable { "var" } else { "val" };
        match &decl.initializer {
            Some(init) => format!("{} {} = {}", keyword, decl.name, init.accept(self)),
            None => format!("{} {}", keyword, decl.name),
        }
    }

    fn visit_parameter(&mut self, param: &ParameterDef) -> String {
        format!("{}: {}", param.name, param.type_name)
    }

    fn visit_func_decl(&mut self, decl: &FuncDecl) -> String {
        let params: Vec<String> = decl.parameters.iter().map(|p| p.accept(self)).collect();
        format!(
            "fun {}({}) {}",
            decl.name,
            params.join(", "),
            decl.body.accept(self)
        )
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) -> String {
        match &decl.superclass {
            Some(superclass) => format!(
                "class {} : {} {}",
                decl.name,
                superclass,
                decl.body.accept(self)
            ),
            None => format!("class {} {}", decl.name, decl.body.accept(self)),
        }
    }
}

/// Render a whole program, one top-level statement per line.
pub fn render_source(program: &Program) -> String {
    let mut printer = SourcePrinter::new();
    program
        .statements
        .iter()
        .map(|stmt| stmt.accept(&mut printer) + "\n")
        .collect()
}
