//! Double-dispatch traversal over the syntax tree
//!
//! A back end implements [`Visitor`] once, with one method per node kind, and
//! hands itself to [`Expr::accept`] / [`Stmt::accept`]. Adding a new traversal
//! never touches the node definitions in [`ast`](super::ast).
//!
//! No method has a default body, so every visitor handles every node kind.

use super::ast::*;

pub trait Visitor {
    type Output;

    // Expressions
    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output;
    fn visit_integer(&mut self, value: i64) -> Self::Output;
    fn visit_double(&mut self, value: f64) -> Self::Output;
    fn visit_string(&mut self, value: &str) -> Self::Output;
    fn visit_null(&mut self) -> Self::Output;
    fn visit_variable(&mut self, name: &str) -> Self::Output;
    fn visit_call(&mut self, expr: &CallExpr) -> Self::Output;
    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> Self::Output;

    // Statements and declarations
    fn visit_expr_stmt(&mut self, expr: &Expr) -> Self::Output;
    fn visit_block(&mut self, block: &Block) -> Self::Output;
    fn visit_if(&mut self, stmt: &IfStmt) -> Self::Output;
    fn visit_while(&mut self, stmt: &WhileStmt) -> Self::Output;
    fn visit_break(&mut self, stmt: &JumpStmt) -> Self::Output;
    fn visit_continue(&mut self, stmt: &JumpStmt) -> Self::Output;
    fn visit_return(&mut self, stmt: &ReturnStmt) -> Self::Output;
    fn visit_var_decl(&mut self, decl: &VarDecl) -> Self::Output;
    fn visit_parameter(&mut self, param: &ParameterDef) -> Self::Output;
    fn visit_func_decl(&mut self, decl: &FuncDecl) -> Self::Output;
    fn visit_class_decl(&mut self, decl: &ClassDecl) -> Self::Output;
}

impl Expr {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Binary(expr) => visitor.visit_binary(expr),
            Expr::Unary(expr) => visitor.visit_unary(expr),
            Expr::IntegerLiteral(value) => visitor.visit_integer(*value),
            Expr::DoubleLiteral(value) => visitor.visit_double(*value),
            Expr::StringLiteral(value) => visitor.visit_string(value),
            Expr::NullLiteral => visitor.visit_null(),
            Expr::Variable(name) => visitor.visit_variable(name),
            Expr::Call(expr) => visitor.visit_call(expr),
            Expr::Assignment(expr) => visitor.visit_assignment(expr),
        }
    }
}

impl Stmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Expr(expr) => visitor.visit_expr_stmt(expr),
            Stmt::Block(block) => visitor.visit_block(block),
            Stmt::If(stmt) => visitor.visit_if(stmt),
            Stmt::While(stmt) => visitor.visit_while(stmt),
            Stmt::Break(stmt) => visitor.visit_break(stmt),
            Stmt::Continue(stmt) => visitor.visit_continue(stmt),
            Stmt::Return(stmt) => visitor.visit_return(stmt),
            Stmt::VarDecl(decl) => visitor.visit_var_decl(decl),
            Stmt::FuncDecl(decl) => visitor.visit_func_decl(decl),
            Stmt::ClassDecl(decl) => visitor.visit_class_decl(decl),
        }
    }
}

impl Block {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_block(self)
    }
}

impl ParameterDef {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_parameter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_source;

    /// Counts nodes by family, to check every child is reached.
    #[derive(Default)]
    struct NodeCounter {
        exprs: usize,
        stmts: usize,
        params: usize,
    }

    impl Visitor for NodeCounter {
        type Output = ();

        fn visit_binary(&mut self, expr: &BinaryExpr) {
            self.exprs += 1;
            expr.left.accept(self);
            expr.right.accept(self);
        }
        fn visit_unary(&mut self, expr: &UnaryExpr) {
            self.exprs += 1;
            expr.right.accept(self);
        }
        fn visit_integer(&mut self, _: i64) {
            self.exprs += 1;
        }
        fn visit_double(&mut self, _: f64) {
            self.exprs += 1;
        }
        fn visit_string(&mut self, _: &str) {
            self.exprs += 1;
        }
        fn visit_null(&mut self) {
            self.exprs += 1;
        }
        fn visit_variable(&mut self, _: &str) {
            self.exprs += 1;
        }
        fn visit_call(&mut self, expr: &CallExpr) {
            self.exprs += 1;
            for arg in &expr.arguments {
                arg.accept(self);
            }
        }
        fn visit_assignment(&mut self, expr: &AssignmentExpr) {
            self.exprs += 1;
            expr.value.accept(self);
        }
        fn visit_expr_stmt(&mut self, expr: &Expr) {
            self.stmts += 1;
            expr.accept(self);
        }
        fn visit_block(&mut self, block: &Block) {
            self.stmts += 1;
            for stmt in &block.statements {
                stmt.accept(self);
            }
        }
        fn visit_if(&mut self, stmt: &IfStmt) {
            self.stmts += 1;
            stmt.condition.accept(self);
            stmt.then_branch.accept(self);
            if let Some(else_branch) = &stmt.else_branch {
                else_branch.accept(self);
            }
        }
        fn visit_while(&mut self, stmt: &WhileStmt) {
            self.stmts += 1;
            stmt.condition.accept(self);
            stmt.body.accept(self);
        }
        fn visit_break(&mut self, _: &JumpStmt) {
            self.stmts += 1;
        }
        fn visit_continue(&mut self, _: &JumpStmt) {
            self.stmts += 1;
        }
        fn visit_return(&mut self, stmt: &ReturnStmt) {
            self.stmts += 1;
            if let Some(expr) = &stmt.expr {
                expr.accept(self);
            }
        }
        fn visit_var_decl(&mut self, decl: &VarDecl) {
            self.stmts += 1;
            if let Some(init) = &decl.initializer {
                init.accept(self);
            }
        }
        fn visit_parameter(&mut self, _: &ParameterDef) {
            self.params += 1;
        }
        fn visit_func_decl(&mut self, decl: &FuncDecl) {
            self.stmts += 1;
            for param in &decl.parameters {
                param.accept(self);
            }
            decl.body.accept(self);
        }
        fn visit_class_decl(&mut self, decl: &ClassDecl) {
            self.stmts += 1;
            decl.body.accept(self);
        }
    }

    #[test]
    fn test_visitor_reaches_every_node() {
        let source = "class A : B {\n  fun f(x: Int, y: Int) {\n    var z = -x + 2.5\n    while (z) { break@l }\n    if (null) continue\n    else return g(\"s\", y = 1)\n  }\n}\n";
        let program = parse_source(source).unwrap();

        let mut counter = NodeCounter::default();
        for stmt in &program.statements {
            stmt.accept(&mut counter);
        }

        // class, class body, fun, fun body, var, while, while body, break, if,
        // continue, return
        assert_eq!(counter.stmts, 11);
        // `-x + 2.5` is four nodes, `z` and `null` one each, and the call is
        // call + string + assignment + integer (the target is a name, not a node)
        assert_eq!(counter.exprs, 4 + 1 + 1 + 4);
        assert_eq!(counter.params, 2);
    }
}
