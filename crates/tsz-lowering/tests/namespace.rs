use super::*;
use tsz_binder::SymbolKind;
use tsz_common::SourceId;
use tsz_parser::ast::{Function, VarDeclarator};

fn s() -> Span {
    Span::new(0, 1)
}

fn sym_ref(symbols: &mut SymbolTable, name: &str) -> Ref {
    let id = symbols.alloc(SymbolKind::Other, name.to_string());
    Ref::Symbol { source: SourceId(0), slot: id.0 }
}

fn no_temp() -> impl FnMut() -> Ref {
    || panic!("no temporary should be needed for a single-segment namespace")
}

#[test]
fn empty_namespace_is_erased() {
    let mut symbols = SymbolTable::new();
    let name = sym_ref(&mut symbols, "Empty");
    let out = lower_namespace(name, &["Empty".to_string()], vec![], s(), &symbols, &mut no_temp());
    assert!(out.is_empty());
}

#[test]
fn non_empty_namespace_becomes_an_iife_with_export_assignment() {
    let mut symbols = SymbolTable::new();
    let name = sym_ref(&mut symbols, "A");
    let f_ref = sym_ref(&mut symbols, "f");
    let func_decl = Stmt::FunctionDecl(Box::new(Function {
        name: Some(f_ref),
        params: vec![],
        body: vec![],
        is_async: false,
        is_generator: false,
        is_arrow: false,
        expression_body: None,
        span: s(),
    }));
    let out = lower_namespace(name, &["A".to_string()], vec![func_decl], s(), &symbols, &mut no_temp());
    assert_eq!(out.len(), 2, "var decl + IIFE call");
    assert!(matches!(out[0], Stmt::VarDecl { kind: VarKind::Var, .. }));
    let Stmt::Expr(Expr::Call { callee, args, .. }, _) = &out[1] else {
        panic!("expected the IIFE call");
    };
    assert_eq!(args.len(), 1);
    let Expr::Function(f) = callee.as_ref() else {
        panic!("expected the wrapper function");
    };
    assert_eq!(f.body.len(), 2, "original function decl plus the export assignment");
    assert!(matches!(f.body[1], Stmt::Expr(Expr::Binary { op: BinOp::Assign(None), .. }, _)));
}

#[test]
fn var_decl_with_destructuring_is_not_exported() {
    let mut symbols = SymbolTable::new();
    let name = sym_ref(&mut symbols, "A");
    let var_decl = Stmt::VarDecl {
        kind: VarKind::Var,
        declarations: vec![VarDeclarator { name: Expr::Array { elements: vec![], span: s() }, init: None }],
        span: s(),
    };
    let out = lower_namespace(name, &["A".to_string()], vec![var_decl], s(), &symbols, &mut no_temp());
    let Stmt::Expr(Expr::Call { callee, .. }, _) = &out[1] else {
        panic!("expected the IIFE call");
    };
    let Expr::Function(f) = callee.as_ref() else {
        panic!("expected the wrapper function");
    };
    assert_eq!(f.body.len(), 1, "no export assignment for an unnamed destructuring pattern");
}

#[test]
fn every_declarator_in_a_multi_binding_var_is_exported() {
    let mut symbols = SymbolTable::new();
    let name = sym_ref(&mut symbols, "A");
    let a_ref = sym_ref(&mut symbols, "a");
    let b_ref = sym_ref(&mut symbols, "b");
    let var_decl = Stmt::VarDecl {
        kind: VarKind::Var,
        declarations: vec![
            VarDeclarator { name: Expr::Identifier(a_ref, s()), init: None },
            VarDeclarator { name: Expr::Identifier(b_ref, s()), init: None },
        ],
        span: s(),
    };
    let out = lower_namespace(name, &["A".to_string()], vec![var_decl], s(), &symbols, &mut no_temp());
    let Stmt::Expr(Expr::Call { callee, .. }, _) = &out[1] else {
        panic!("expected the IIFE call");
    };
    let Expr::Function(f) = callee.as_ref() else {
        panic!("expected the wrapper function");
    };
    assert_eq!(f.body.len(), 3, "the var decl plus an export assignment for each of a and b");
    let properties: Vec<&str> = f.body[1..]
        .iter()
        .map(|stmt| {
            let Stmt::Expr(Expr::Binary { left, .. }, _) = stmt else {
                panic!("expected an export assignment");
            };
            let Expr::Dot { property, .. } = left.as_ref() else {
                panic!("expected a member assignment");
            };
            property.as_str()
        })
        .collect();
    assert_eq!(properties, vec!["a", "b"]);
}

#[test]
fn dotted_namespace_desugars_into_nested_iifes() {
    let mut symbols = SymbolTable::new();
    let name = sym_ref(&mut symbols, "A");
    let mut next = 0u32;
    let mut fresh = move || {
        let r = Ref::External(next);
        next += 1;
        r
    };
    let out = lower_namespace(name, &["A".to_string(), "B".to_string()], vec![Stmt::Empty(s())], s(), &symbols, &mut fresh);
    assert_eq!(out.len(), 2);
    let Stmt::Expr(Expr::Call { callee, args, .. }, _) = &out[1] else {
        panic!("expected the outer IIFE call");
    };
    assert!(matches!(args[0], Expr::Binary { op: BinOp::LogicalOr, .. }));
    let Expr::Function(outer_f) = callee.as_ref() else {
        panic!("expected the outer wrapper function");
    };
    assert_eq!(outer_f.body.len(), 1, "the outer body is just the inner IIFE call");
    let Stmt::Expr(Expr::Call { args: inner_args, .. }, _) = &outer_f.body[0] else {
        panic!("expected the inner IIFE call");
    };
    let Expr::Binary { left, .. } = &inner_args[0] else {
        panic!("expected A.B || (A.B = {{}})");
    };
    assert!(matches!(**left, Expr::Dot { .. }));
}
