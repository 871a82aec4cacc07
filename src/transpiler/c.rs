//! C89-flavoured transpiler
//!
//! Maps the Chourse tree onto C declarations and statements:
//!
//! | Chourse                   | C                                        |
//! |---------------------------|------------------------------------------|
//! | `fun f(a: Int)`           | `int f(int a)` / `void f(int a)`         |
//! | `class A : B { ... }`     | `struct A { struct B base; ... };`       |
//! | `val x = 1` / `var x`     | `const int x = 1;` / `int x;`            |
//! | `null`                    | `NULL`                                   |
//! | `break@l`                 | `break; /* @l */`                        |
//!
//! A function returns `int` when any `return` in its own body carries a
//! value. Fields of a class are the `val`/`var` declarations of its body;
//! its functions become free functions named `Class_method` taking
//! `struct Class *self` first. There is no type checking: variable types are
//! guessed from their initializer.

use crate::parser::ast::*;
use crate::parser::visitor::Visitor;
use crate::transpiler::{format_double, indent, needs_parens, precedence};

/// Renders nodes as C source
#[derive(Debug, Default)]
pub struct CTranspiler {
    depth: usize,
    /// Set while rendering the methods of a class
    class_name: Option<String>,
}

impl CTranspiler {
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

    /// A variable declaration, or a struct member when `field` is set.
    fn declaration(&mut self, decl: &VarDecl, field: bool) -> String {
        let c_type = decl.initializer.as_ref().map_or("int", infer_type);
        let qualifier = if field || decl.mutable || c_type.starts_with("const") {
            ""
        } else {
            "const "
        };
        let declared = format!("{}{}", qualifier, declarator(c_type, &decl.name));

        match &decl.initializer {
            Some(init) if !field => format!("{} = {};", declared, init.accept(self)),
            _ => format!("{declared};"),
        }
    }

    fn jump(keyword: &str, label: &Option<String>) -> String {
        match label {
            Some(label) => format!("{keyword}; /* @{label} */"),
            None => format!("{keyword};"),
        }
    }
}

/// Guess the C type of an expression from its literals.
fn infer_type(expr: &Expr) -> &'static str {
    match expr {
        Expr::IntegerLiteral(_) => "int",
        Expr::DoubleLiteral(_) => "double",
        Expr::StringLiteral(_) => "const char *",
        Expr::NullLiteral => "void *",
        Expr::Unary(u) => infer_type(&u.right),
        Expr::Binary(b) => match (infer_type(&b.left), infer_type(&b.right)) {
            ("double", _) | (_, "double") => "double",
            _ => "int",
        },
        Expr::Assignment(a) => infer_type(&a.value),
        Expr::Variable(_) | Expr::Call(_) => "int",
    }
}

/// `int x`, but `char *x` for pointer types.
fn declarator(c_type: &str, name: &str) -> String {
    if c_type.ends_with('*') {
        format!("{c_type}{name}")
    } else {
        format!("{c_type} {name}")
    }
}

/// Map a Chourse type name onto a C type.
fn c_type_name(name: &str) -> String {
    match name {
        "Int" | "Bool" => "int".to_string(),
        "Double" => "double".to_string(),
        "String" => "const char *".to_string(),
        other => format!("struct {other} *"),
    }
}

/// Whether any `return` of this function's own body carries a value.
/// Nested declarations have their own returns and are not searched.
fn returns_value(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(ret) => ret.expr.is_some(),
        Stmt::Block(block) => block.statements.iter().any(returns_value),
        Stmt::If(s) => {
            returns_value(&s.then_branch) || s.else_branch.as_deref().is_some_and(returns_value)
        }
        Stmt::While(s) => returns_value(&s.body),
        _ => false,
    }
}

/// Escape a string's contents for a C string literal.
fn escape_c(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
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

impl Visitor for CTranspiler {
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
            Expr::Binary(_) | Expr::Assignment(_) | Expr::Unary(_) => {
                format!("{}({})", expr.op.symbol(), operand)
            }
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
        format!("\"{}\"", escape_c(value))
    }

    fn visit_null(&mut self) -> String {
        "NULL".to_string()
    }

    fn visit_variable(&mut self, name: &str) -> String {
        name.to_string()
    }

    fn visit_call(&mut self, expr: &CallExpr) -> String {
        let args: Vec<String> = expr.arguments.iter().map(|a| a.accept(self)).collect();
        format!("{}({})", expr.name, args.join(", "))
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> String {
        format!("{} {} {}", expr.target, expr.op.symbol(), expr.value.accept(self))
    }

    fn visit_expr_stmt(&mut self, expr: &Expr) -> String {
        format!("{};", expr.accept(self))
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
        Self::jump("break", &stmt.label)
    }

    fn visit_continue(&mut self, stmt: &JumpStmt) -> String {
        Self::jump("continue", &stmt.label)
    }

    fn visit_return(&mut self, stmt: &ReturnStmt) -> String {
        let value = match &stmt.expr {
            Some(expr) => format!("return {};", expr.accept(self)),
            None => "return;".to_string(),
        };
        match &stmt.label {
            Some(label) => format!("{value} /* @{label} */"),
            None => value,
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) -> String {
        self.declaration(decl, false)
    }

    fn visit_parameter(&mut self, param: &ParameterDef) -> String {
        declarator(&c_type_name(&param.type_name), &param.name)
    }

    fn visit_func_decl(&mut self, decl: &FuncDecl) -> String {
        let return_type = if decl.body.statements.iter().any(returns_value) {
            "int"
        } else {
            "void"
        };

        let mut params: Vec<String> = Vec::new();
        let name = match self.class_name.take() {
            Some(class) => {
                params.push(format!("struct {class} *self"));
                format!("{}_{}", class, decl.name)
            }
            None => decl.name.clone(),
        };
        params.extend(decl.parameters.iter().map(|p| p.accept(self)));
        if params.is_empty() {
            params.push("void".to_string());
        }

        format!(
            "{} {}({}) {}",
            return_type,
            name,
            params.join(", "),
            decl.body.accept(self)
        )
    }

    fn visit_class_decl(&mut self, decl: &ClassDecl) -> String {
        let pad = indent(self.depth);
        let field_pad = indent(self.depth + 1);

        let mut out = format!("struct {} {{\n", decl.name);
        if let Some(superclass) = &decl.superclass {
            out.push_str(&format!("{field_pad}struct {superclass} base;\n"));
        }

        let mut rest = Vec::new();
        for stmt in &decl.body.statements {
            match stmt {
                Stmt::VarDecl(field) => {
                    let field = self.declaration(field, true);
                    out.push_str(&field_pad);
                    out.push_str(&field);
                    out.push('\n');
                }
                Stmt::FuncDecl(method) => {
                    self.class_name = Some(decl.name.clone());
                    rest.push(self.visit_func_decl(method));
                }
                other => rest.push(other.accept(self)),
            }
        }
        out.push_str(&pad);
        out.push_str("};");

        for item in rest {
            out.push('\n');
            out.push_str(&pad);
            out.push_str(&item);
        }
        out
    }
}

/// Render a whole program as C, one top-level item per line.
pub fn render_c(program: &Program) -> String {
    let mut transpiler = CTranspiler::new();
    let mut out = String::from("#include <stddef.h>\n\n");
    for stmt in &program.statements {
        out.push_str(&stmt.accept(&mut transpiler));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_source;

    fn c(source: &str) -> String {
        let rendered = render_c(&parse_source(source).unwrap());
        rendered
            .strip_prefix("#include <stddef.h>\n\n")
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_function_with_return_value() {
        assert_eq!(
            c("fun add(a: Int, b: Int) {\n  return a + b\n}\n"),
            "int add(int a, int b) {\n  return a + b;\n}\n"
        );
    }

    #[test]
    fn test_function_without_return_value() {
        assert_eq!(
            c("fun main() {\n  print(\"hi\")\n  return\n}\n"),
            "void main(void) {\n  print(\"hi\");\n  return;\n}\n"
        );
    }

    #[test]
    fn test_nested_function_returns_do_not_count() {
        let out = c("fun outer() {\n  fun inner() { return 1 }\n}\n");
        assert!(out.starts_with("void outer(void)"), "{out}");
        assert!(out.contains("int inner(void)"), "{out}");
    }

    #[test]
    fn test_variable_declarations() {
        assert_eq!(c("val x = 1\n"), "const int x = 1;\n");
        assert_eq!(c("var y = 2.5 * x\n"), "double y = 2.5 * x;\n");
        assert_eq!(c("val s = \"hi\"\n"), "const char *s = \"hi\";\n");
        assert_eq!(c("var p = null\n"), "void *p = NULL;\n");
        assert_eq!(c("var n\n"), "int n;\n");
    }

    #[test]
    fn test_parameter_types() {
        assert_eq!(
            c("fun f(a: Double, b: String, c: Bool, d: Dog) {}\n"),
            "void f(double a, const char *b, int c, struct Dog *d) {}\n"
        );
    }

    #[test]
    fn test_class_becomes_struct() {
        let source = "class Dog : Animal {\n  val legs = 4\n  fun bark(times: Int) {\n    return times\n  }\n}\n";
        assert_eq!(
            c(source),
            "struct Dog {\n  struct Animal base;\n  int legs;\n};\nint Dog_bark(struct Dog *self, int times) {\n  return times;\n}\n"
        );
    }

    #[test]
    fn test_labels_become_comments() {
        assert_eq!(
            c("while (1) {\n  break@outer\n  continue\n}\n"),
            "while (1) {\n  break; /* @outer */\n  continue;\n}\n"
        );
        assert_eq!(c("fun f() { return@f }\n"), "void f(void) {\n  return; /* @f */\n}\n");
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(
            c("print(\"a\\b\nc\")\n"),
            "print(\"a\\\\b\\nc\");\n"
        );
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            c("if (a > 0) { return 1 } else { return 0 }\n"),
            "if (a > 0) {\n  return 1;\n} else {\n  return 0;\n}\n"
        );
        assert_eq!(
            c("if (a) x = 1\nelse x = 2\n"),
            "if (a) x = 1;\nelse x = 2;\n"
        );
    }

    #[test]
    fn test_nested_unary_is_parenthesized() {
        assert_eq!(c("- -a\n"), "-(-a);\n");
    }
}
