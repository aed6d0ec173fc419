use super::*;
use tsz_parser::ast::{EnumDecl, EnumMember};
use tsz_parser::refs::NamePool;

fn s() -> Span {
    Span::new(0, 1)
}

fn enum_ref() -> Ref {
    Ref::External(0)
}

fn member_stmts(iife: Stmt) -> Vec<Stmt> {
    let Stmt::Expr(Expr::Call { callee, .. }, _) = iife else {
        panic!("expected the IIFE call");
    };
    let Expr::Function(f) = *callee else {
        panic!("expected the wrapper function");
    };
    f.body
}

/// Digs the innermost assigned value (`E[E["K"] = <value>] = "K"`) out of a
/// member assignment statement.
fn member_value(stmt: &Stmt) -> &Expr {
    let Stmt::Expr(Expr::Binary { left, .. }, _) = stmt else {
        panic!("expected an assignment statement");
    };
    let Expr::Index { index, .. } = left.as_ref() else {
        panic!("expected E[...] on the left");
    };
    let Expr::Binary { right, .. } = index.as_ref() else {
        panic!("expected the inner E[\"K\"] = value assignment");
    };
    right.as_ref()
}

#[test]
fn numeric_members_without_initializers_count_up_from_zero() {
    let decl = Box::new(EnumDecl {
        name: enum_ref(),
        members: vec![
            EnumMember { name: "A".to_string(), initializer: None, span: s() },
            EnumMember { name: "B".to_string(), initializer: None, span: s() },
        ],
        is_const: false,
        span: s(),
    });
    let names = NamePool::new();
    let [var_decl, iife] = lower_enum(decl, "", &names);
    assert!(matches!(var_decl, Stmt::VarDecl { kind: VarKind::Var, .. }));
    let body = member_stmts(iife);
    assert_eq!(body.len(), 2);
    assert!(matches!(member_value(&body[0]), Expr::Number(n, _) if *n == 0.0));
    assert!(matches!(member_value(&body[1]), Expr::Number(n, _) if *n == 1.0));
}

#[test]
fn string_valued_member_breaks_the_numeric_sequence() {
    let decl = Box::new(EnumDecl {
        name: enum_ref(),
        members: vec![
            EnumMember { name: "A".to_string(), initializer: Some(Expr::String("x".encode_utf16().collect(), s())), span: s() },
            EnumMember { name: "B".to_string(), initializer: None, span: s() },
        ],
        is_const: false,
        span: s(),
    });
    let names = NamePool::new();
    let [_, iife] = lower_enum(decl, "", &names);
    let body = member_stmts(iife);
    assert!(matches!(member_value(&body[0]), Expr::String(..)));
    assert!(matches!(member_value(&body[1]), Expr::Undefined(_)), "no successor can be guessed after a string member");
}

#[test]
fn sibling_member_self_reference_is_rewritten_to_an_index_expression() {
    let decl = Box::new(EnumDecl {
        name: enum_ref(),
        members: vec![
            EnumMember { name: "A".to_string(), initializer: Some(Expr::Number(1.0, s())), span: s() },
            EnumMember {
                name: "B".to_string(),
                initializer: Some(Expr::Identifier(Ref::Unresolved { offset: 0, length: 1 }, s())),
                span: s(),
            },
        ],
        is_const: false,
        span: s(),
    });
    let names = NamePool::new();
    let [_, iife] = lower_enum(decl, "A", &names);
    let body = member_stmts(iife);
    assert!(matches!(member_value(&body[1]), Expr::Index { .. }), "bare `A` inside B's initializer becomes E[\"A\"]");
}

#[test]
fn non_member_identifier_is_left_alone() {
    let decl = Box::new(EnumDecl {
        name: enum_ref(),
        members: vec![EnumMember {
            name: "A".to_string(),
            initializer: Some(Expr::Identifier(Ref::Unresolved { offset: 0, length: 3 }, s())),
            span: s(),
        }],
        is_const: false,
        span: s(),
    });
    let names = NamePool::new();
    let [_, iife] = lower_enum(decl, "Foo", &names);
    let body = member_stmts(iife);
    assert!(matches!(member_value(&body[0]), Expr::Identifier(..)), "a reference to something that isn't a sibling member is untouched");
}
