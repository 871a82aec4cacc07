//! Indented outline of the syntax tree
//!
//! ```text
//! Program
//! └── FuncDecl add
//!     ├── Param a: Int
//!     └── Block
//!         └── Return
//!             └── Binary +
//!                 ├── Variable a
//!                 └── Integer 1
//! ```

use crate::parser::ast::*;
use crate::parser::visitor::Visitor;
use crate::transpiler::{escape_control, format_double};

/// One node of the outline: a label and its children
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }

    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Flatten into display lines with box-drawing connectors.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![self.label.clone()];
        self.push_children(String::new(), &mut out);
        out
    }

    fn push_children(&self, prefix: String, out: &mut Vec<String>) {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            let connector = if last { "└── " } else { "├── " };
            out.push(format!("{prefix}{connector}{}", child.label));

            let extension = if last { "    " } else { "│   " };
            child.push_children(format!("{prefix}{extension}"), out);
        }
    }
}

/// Builds a [`TreeNode`] per syntax node
#[derive(Debug, Default)]
pub struct TreePrinter;

fn with_label(name: &str, label: &Option<String>) -> String {
    match label {
        Some(label) => format!("{name} @{label}"),
        None => name.to_string(),
    }
}

impl Visitor for TreePrinter {
    type Output = TreeNode;

    fn visit_binary(&mut self, expr: &BinaryExpr) -> TreeNode {
        TreeNode::new(
            format!("Binary {}", expr.op.symbol()),
            vec![expr.left.accept(self), expr.right.accept(self)],
        )
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) -> TreeNode {
        TreeNode::new(
            format!("Unary {}", expr.op.symbol()),
            vec![expr.right.accept(self)],
        )
    }

    fn visit_integer(&mut self, value: i64) -> TreeNode {
        TreeNode::leaf(format!("Integer {value}"))
    }

    fn visit_double(&mut self, value: f64) -> TreeNode {
        TreeNode::leaf(format!("Double {}", format_double(value)))
    }

    fn visit_string(&mut self, value: &str) -> TreeNode {
        TreeNode::leaf(format!("String \"{}\"", escape_control(value)))
    }

    fn visit_null(&mut self) -> TreeNode {
        TreeNode::leaf("Null")
    }

    fn visit_variable(&mut self, name: &str) -> TreeNode {
        TreeNode::leaf(format!("Variable {name}"))
    }

    fn visit_call(&mut self, expr: &CallExpr) -> TreeNode {
        let args = expr.arguments.iter().map(|a| a.accept(self)).collect();
        TreeNode::new(format!("Call {}", expr.name), args)
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> TreeNode {
        TreeNode::new(
            format!("Assign {} {}", expr.target, expr.op.symbol()),
            vec![expr.value.accept(self)],
        )
    }

    fn visit_expr_stmt(&mut self, expr: &Expr) -> TreeNode {
        TreeNode::new("ExprStmt", vec![expr.accept(self)])
    }

    fn visit_block(&mut self, block: &Block) -> TreeNode {
        let statements = block.statements.iter().map(|s| s.accept(self)).collect();
        TreeNode::new("Block", statements)
    }

    fn visit_if(&mut self, stmt: &IfStmt) -> TreeNode {
        let mut children = vec![
            TreeNode::new("Condition", vec![stmt.condition.accept(self)]),
            TreeNode::new("Then", vec![stmt.then_branch.accept(self)]),
        ];
        if let Some(else_branch) = &stmt.else_branch {
            children.push(TreeNode::new("Else", vec![else_branch.accept(self)]));
        }
        TreeNode::new("If", children)
    }

    fn visit_while(&mut self, stmt: &WhileStmt) -> TreeNode {
        TreeNode::new(
            "While",
            vec![
                TreeNode::new("Condition", vec![stmt.condition.accept(self)]),
                stmt.body.accept(self),
            ],
        )
    }

    fn visit_break(&mut self, stmt: &JumpStmt) -> TreeNode {
        TreeNode::leaf(with_label("Break", &stmt.label))
    }

    fn visit_continue(&mut self, stmt: &JumpStmt) -> TreeNode {
        TreeNode::leaf(with_label("Continue", &stmt.label))
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) -> TreeNode {
        let children = stmt.expr.iter().map(|e| e.accept(self)).collect();
        TreeNode::new(with_label("Return", &stmt.label), children)
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> TreeNode {
        let keyword = if decl.mutable { "Var" } else { "Val" };
        let children = decl.initializer.iter().map(|e| e.accept(self)).collect();
        TreeNode::new(format!("{} {}", keyword, decl.name), children)
    }

    fn visit_parameter(&mut self, param: &ParameterDef) -> TreeNode {
        TreeNode::leaf(format!("Param {}: {}", param.name, param.type_name))
    }

    fn visit_func_decl(&mut self, decl: &FuncDecl) -> TreeNode {
        let mut children: Vec<TreeNode> =
            decl.parameters.iter().map(|p| p.accept(self)).collect();
        children.push(decl.body.accept(self));
        TreeNode::new(format!("FuncDecl {}", decl.name), children)
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) -> TreeNode {
        let label = match &decl.superclass {
            Some(superclass) => format!("ClassDecl {} : {}", decl.name, superclass),
            None => format!("ClassDecl {}", decl.name),
        };
        TreeNode::new(label, vec![decl.body.accept(self)])
    }
}

/// Outline of a whole program, rooted at `Program`.
pub fn program_tree(program: &Program) -> TreeNode {
    let mut printer = TreePrinter;
    let statements = program
        .statements
        .iter()
        .map(|s| s.accept(&mut printer))
        .collect();
    TreeNode::new("Program", statements)
}

/// Render the outline as text, one node per line.
pub fn render_tree(program: &Program) -> String {
    program_tree(program)
        .lines()
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}
