use super::*;
use tsz_common::{DeferredLog, Log, SourceId};

fn parse_ok(src: &str) -> Ast {
    parse_ok_ts(src, false)
}

fn parse_ok_ts(src: &str, is_ts: bool) -> Ast {
    let log = DeferredLog::new();
    let parser = Parser::new(src, SourceId(0), &log, is_ts).expect("lex ok");
    let (ast, _scopes, _names) = parser.parse_program().expect("parse ok");
    assert!(!log.has_errors(), "unexpected diagnostics for {src:?}: {:?}", log.done());
    ast
}

fn parse_ok_tsx(src: &str) -> Ast {
    let log = DeferredLog::new();
    let parser = Parser::new_with_jsx(src, SourceId(0), &log, true, true).expect("lex ok");
    let (ast, _scopes, _names) = parser.parse_program().expect("parse ok");
    assert!(!log.has_errors(), "unexpected diagnostics for {src:?}: {:?}", log.done());
    ast
}

#[test]
fn parses_a_var_declaration() {
    let ast = parse_ok("var x = 1;");
    assert_eq!(ast.body.len(), 1);
    assert!(matches!(ast.body[0], Stmt::VarDecl { kind: VarKind::Var, .. }));
}

#[test]
fn parses_binary_precedence_left_to_right() {
    let ast = parse_ok("1 + 2 * 3;");
    let Stmt::Expr(Expr::Binary { op: BinOp::Add, right, .. }, _) = &ast.body[0] else {
        panic!("expected a top-level '+' ");
    };
    assert!(matches!(**right, Expr::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn parses_exponentiation_right_associatively() {
    let ast = parse_ok("2 ** 3 ** 2;");
    let Stmt::Expr(Expr::Binary { op: BinOp::Exponent, right, .. }, _) = &ast.body[0] else {
        panic!("expected a top-level '**'");
    };
    assert!(matches!(**right, Expr::Binary { op: BinOp::Exponent, .. }));
}

#[test]
fn parses_arrow_function_from_parenthesized_params() {
    let ast = parse_ok("const f = (a, b) => a + b;");
    let Stmt::VarDecl { declarations, .. } = &ast.body[0] else {
        panic!("expected a var decl");
    };
    let Some(Expr::Function(f)) = &declarations[0].init else {
        panic!("expected an arrow function initializer");
    };
    assert!(f.is_arrow);
    assert_eq!(f.params.len(), 2);
    assert!(f.expression_body.is_some());
}

#[test]
fn parses_optional_chain_with_chain_flags() {
    let ast = parse_ok("a?.b.c;");
    let Stmt::Expr(Expr::Dot { chain, .. }, _) = &ast.body[0] else {
        panic!("expected a dot chain");
    };
    assert!(chain.is_optional_chain);
}

#[test]
fn parses_class_with_fields_and_methods() {
    let ast = parse_ok("class C { x = 1; static y = 2; m() {} }");
    let Stmt::ClassDecl(class) = &ast.body[0] else {
        panic!("expected a class declaration");
    };
    assert_eq!(class.properties.len(), 3);
    assert!(class.properties[1].is_static);
    assert!(class.properties[2].is_method);
}

#[test]
fn parses_enum_declaration_with_mixed_members() {
    let ast = parse_ok_ts(r#"enum E { A, B = "x", C }"#, true);
    let Stmt::EnumDecl(e) = &ast.body[0] else {
        panic!("expected an enum declaration");
    };
    assert_eq!(e.members.len(), 3);
    assert_eq!(e.members[0].name, "A");
    assert!(e.members[0].initializer.is_none());
    assert_eq!(e.members[1].name, "B");
    assert!(e.members[1].initializer.is_some());
    assert!(e.members[2].initializer.is_none());
}

#[test]
fn parses_const_enum() {
    let ast = parse_ok_ts("const enum E { A }", true);
    let Stmt::EnumDecl(e) = &ast.body[0] else {
        panic!("expected an enum declaration");
    };
    assert!(e.is_const);
}

#[test]
fn const_without_enum_keyword_still_parses_as_var_decl() {
    let ast = parse_ok_ts("const x = 1;", true);
    assert!(matches!(ast.body[0], Stmt::VarDecl { kind: VarKind::Const, .. }));
}

#[test]
fn parses_namespace_declaration() {
    let ast = parse_ok_ts("namespace NS { export const x = 1; }", true);
    let Stmt::NamespaceDecl(ns) = &ast.body[0] else {
        panic!("expected a namespace declaration");
    };
    assert_eq!(ns.path, vec!["NS".to_string()]);
    assert_eq!(ns.body.len(), 1);
}

#[test]
fn parses_dotted_namespace_head() {
    let ast = parse_ok_ts("namespace A.B.C { }", true);
    let Stmt::NamespaceDecl(ns) = &ast.body[0] else {
        panic!("expected a namespace declaration");
    };
    assert_eq!(ns.path, vec!["A".to_string(), "B".to_string(), "C".to_string()]);
}

#[test]
fn ambient_module_declaration_is_erased() {
    let ast = parse_ok_ts(r#"declare module "foo" { export const x: number; }"#, true);
    assert!(matches!(ast.body[0], Stmt::TypeScript(_)));
}

#[test]
fn parses_constructor_parameter_properties() {
    let ast = parse_ok_ts("class C { constructor(public x, private readonly y) {} }", true);
    let Stmt::ClassDecl(class) = &ast.body[0] else {
        panic!("expected a class declaration");
    };
    let Some(Expr::Function(ctor)) = &class.properties[0].value else {
        panic!("expected a constructor function value");
    };
    assert!(ctor.params[0].is_param_property);
    assert!(ctor.params[1].is_param_property);
}

#[test]
fn type_annotations_are_discarded() {
    let ast = parse_ok_ts("let x: number = 1;", true);
    assert!(matches!(ast.body[0], Stmt::VarDecl { .. }));
}

#[test]
fn interface_declaration_is_erased() {
    let ast = parse_ok_ts("interface Point { x: number; y: number; }", true);
    assert!(matches!(ast.body[0], Stmt::TypeScript(_)));
}

#[test]
fn empty_file_yields_empty_body() {
    let ast = parse_ok("");
    assert!(ast.body.is_empty());
}

#[test]
fn tsx_trailing_comma_generic_arrow_is_not_a_jsx_element() {
    let ast = parse_ok_tsx("const f = <T,>(x) => x;");
    let Stmt::VarDecl { declarations, .. } = &ast.body[0] else {
        panic!("expected a var declaration");
    };
    assert!(matches!(declarations[0].init, Some(Expr::Function(_))));
}

#[test]
fn tsx_extends_bounded_generic_arrow_is_not_a_jsx_element() {
    let ast = parse_ok_tsx("const f = <T extends object>(x) => x;");
    let Stmt::VarDecl { declarations, .. } = &ast.body[0] else {
        panic!("expected a var declaration");
    };
    assert!(matches!(declarations[0].init, Some(Expr::Function(_))));
}

#[test]
fn tsx_plain_element_still_parses_as_jsx() {
    let ast = parse_ok_tsx("const el = <div></div>;");
    let Stmt::VarDecl { declarations, .. } = &ast.body[0] else {
        panic!("expected a var declaration");
    };
    assert!(matches!(declarations[0].init, Some(Expr::Jsx(_))));
}
