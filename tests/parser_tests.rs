// Integration tests for the Chourse front end

use chourse::parser::ast::*;
use chourse::parser::lexer::{scan, Lexer};
use chourse::parser::parse::{parse_source, ParseErrorKind, Parser};
use chourse::parser::token::{tokens_to_source, TokenKind};

fn param(name: &str, type_name: &str) -> ParameterDef {
    ParameterDef {
        name: name.to_string(),
        type_name: type_name.to_string(),
    }
}

fn ret(expr: Expr) -> Stmt {
    Stmt::Return(ReturnStmt {
        label: None,
        expr: Some(expr),
    })
}

#[test]
fn test_function_declaration_end_to_end() {
    let source = "fun add(a: Int, b: Int) {\n  return a + b\n}\n";

    // Scan
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    assert!(lexer.errors().is_empty());

    // Parse
    let program = Parser::new(tokens).parse_program().expect("Parsing failed");

    assert_eq!(
        program.statements,
        vec![Stmt::FuncDecl(FuncDecl {
            name: "add".to_string(),
            parameters: vec![param("a", "Int"), param("b", "Int")],
            body: Block::new(vec![ret(Expr::binary(
                Expr::variable("a"),
                BinOp::Add,
                Expr::variable("b")
            ))]),
        })]
    );
}

#[test]
fn test_if_else_end_to_end() {
    let program =
        parse_source("if (a > 0) { return 1 } else { return 0 }\n").expect("Parsing failed");

    assert_eq!(
        program.statements,
        vec![Stmt::If(IfStmt {
            condition: Expr::binary(Expr::variable("a"), BinOp::Gt, Expr::IntegerLiteral(0)),
            then_branch: Box::new(Stmt::Block(Block::new(vec![ret(Expr::IntegerLiteral(1))]))),
            else_branch: Some(Box::new(Stmt::Block(Block::new(vec![ret(
                Expr::IntegerLiteral(0)
            )])))),
        })]
    );
}

#[test]
fn test_token_stream_shape() {
    let (tokens, errors) = scan("val x = 1\n");
    assert!(errors.is_empty());

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Val,
            TokenKind::Identifier,
            TokenKind::Eq,
            TokenKind::Number,
            TokenKind::NewLine,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens_to_source(&tokens), "val x = 1 \n  ");
}

#[test]
fn test_exactly_one_eof() {
    for source in ["", "\n", "x", "fun f() {}\n", "\"open", "# $"] {
        let (tokens, _) = scan(source);
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "source {:?}", source);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}

#[test]
fn test_class_program() {
    let source = "class Dog : Animal {\n  val legs = 4\n  fun bark(times: Int) {\n    while (times > 0) {\n      print(\"woof\")\n      times -= 1\n    }\n  }\n}\n";
    let program = parse_source(source).expect("Parsing failed");

    let Stmt::ClassDecl(class) = &program.statements[0] else {
        panic!("Expected class declaration, found {:?}", program.statements[0]);
    };
    assert_eq!(class.name, "Dog");
    assert_eq!(class.superclass.as_deref(), Some("Animal"));

    let Stmt::FuncDecl(method) = &class.body.statements[1] else {
        panic!("Expected method, found {:?}", class.body.statements[1]);
    };
    assert_eq!(method.parameters, vec![param("times", "Int")]);
    assert!(matches!(method.body.statements[0], Stmt::While(_)));
}

#[test]
fn test_parse_errors_are_located() {
    let err = parse_source("fun f() {\n  return 1\n}\nx = (1 + 2\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.line(), 4);
    assert_eq!(
        err.to_string(),
        "Parse error at line 4: Expected ')' after expression, found end of line"
    );

    let err = parse_source("\n\n(a) + 1 = 2\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
    assert_eq!(err.line(), 3);
}

#[test]
fn test_lex_errors_do_not_stop_parsing() {
    let (tokens, errors) = scan("val x = 1 $\nval y = 2\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "Lexer error at line 1: Unexpected character: '$'"
    );

    let program = Parser::new(tokens).parse_program().expect("Parsing failed");
    assert_eq!(program.statements.len(), 2);
}
