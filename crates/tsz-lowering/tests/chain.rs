use super::*;
use tsz_common::Span;
use tsz_parser::ast::{BinOp, ChainFlags, Expr, UnOp};
use tsz_parser::refs::Ref;

fn s() -> Span {
    Span::new(0, 1)
}

fn ident(n: u32) -> Expr {
    Expr::Identifier(Ref::External(n), s())
}

fn temp_source(next: u32) -> impl FnMut() -> Ref {
    let mut counter = next;
    move || {
        let r = Ref::External(counter);
        counter += 1;
        r
    }
}

fn identity(e: Expr) -> Expr {
    e
}

#[test]
fn bare_identifier_base_needs_no_temporary() {
    // a?.b.c
    let inner = Expr::Dot {
        object: Box::new(ident(0)),
        property: "b".to_string(),
        chain: ChainFlags { is_optional_chain: true, is_parenthesized: false },
        span: s(),
    };
    let outer = Expr::Dot {
        object: Box::new(inner),
        property: "c".to_string(),
        chain: ChainFlags::default(),
        span: s(),
    };
    let mut fresh = temp_source(100);
    let got = lower_chain(outer, false, &mut identity, &mut fresh);
    let Expr::Conditional { test, consequent, alternate, .. } = got else {
        panic!("expected a conditional");
    };
    assert!(matches!(*test, Expr::Binary { op: BinOp::Eq, .. }));
    assert!(matches!(*consequent, Expr::Undefined(_)));
    let Expr::Dot { property, object, .. } = *alternate else {
        panic!("expected a.b.c rebuilt");
    };
    assert_eq!(property, "c");
    assert!(matches!(*object, Expr::Dot { .. }));
}

#[test]
fn method_call_after_call_captures_receiver_and_uses_call() {
    // a()?.b()
    let a_call = Expr::Call { callee: Box::new(ident(0)), args: vec![], chain: ChainFlags::default(), span: s() };
    let member = Expr::Dot {
        object: Box::new(a_call),
        property: "b".to_string(),
        chain: ChainFlags { is_optional_chain: true, is_parenthesized: false },
        span: s(),
    };
    let outer = Expr::Call { callee: Box::new(member), args: vec![], chain: ChainFlags::default(), span: s() };
    let mut fresh = temp_source(0);
    let got = lower_chain(outer, false, &mut identity, &mut fresh);
    let Expr::Conditional { test, alternate, .. } = got else {
        panic!("expected a conditional");
    };
    let Expr::Binary { op: BinOp::Eq, left, .. } = *test else {
        panic!("expected an == null test");
    };
    assert!(matches!(*left, Expr::Binary { op: BinOp::Assign(None), .. }));
    let Expr::Call { callee, args, .. } = *alternate else {
        panic!("expected a call in the alternate branch");
    };
    let Expr::Dot { property, .. } = *callee else {
        panic!("expected `.call` as the callee");
    };
    assert_eq!(property, "call");
    assert_eq!(args.len(), 1, "the captured receiver is passed as the first argument");
}

#[test]
fn delete_of_optional_chain_defaults_to_true() {
    let chain = Expr::Dot {
        object: Box::new(ident(0)),
        property: "b".to_string(),
        chain: ChainFlags { is_optional_chain: true, is_parenthesized: false },
        span: s(),
    };
    let mut fresh = temp_source(0);
    let got = lower_chain(chain, true, &mut identity, &mut fresh);
    let Expr::Conditional { consequent, .. } = got else {
        panic!("expected a conditional");
    };
    assert!(matches!(*consequent, Expr::Bool(true, _)));
}

#[test]
fn chain_without_any_optional_link_is_left_alone() {
    let plain = Expr::Call {
        callee: Box::new(Expr::Dot {
            object: Box::new(ident(0)),
            property: "b".to_string(),
            chain: ChainFlags::default(),
            span: s(),
        }),
        args: vec![],
        chain: ChainFlags::default(),
        span: s(),
    };
    let mut fresh = temp_source(0);
    let got = lower_chain(plain, false, &mut identity, &mut fresh);
    let Expr::Call { callee, .. } = got else {
        panic!("expected a plain call, not a conditional rewrite");
    };
    assert!(matches!(*callee, Expr::Dot { .. }), "must not be rewritten to `.call(...)`");
}

#[test]
fn parenthesized_sub_chain_is_a_barrier() {
    // (a?.b).c — the inner optional chain rewrites on its own; `.c` applies
    // to its result rather than sharing the same short-circuit.
    let inner = Expr::Dot {
        object: Box::new(ident(0)),
        property: "b".to_string(),
        chain: ChainFlags { is_optional_chain: true, is_parenthesized: true },
        span: s(),
    };
    let outer = Expr::Dot { object: Box::new(inner), property: "c".to_string(), chain: ChainFlags::default(), span: s() };
    let mut fresh = temp_source(0);
    let mut visit = |e: Expr| lower_chain(e, false, &mut identity, &mut temp_source(0));
    let got = lower_chain(outer, false, &mut visit, &mut fresh);
    let Expr::Dot { object, property, .. } = got else {
        panic!("expected the outer .c to stay a plain Dot");
    };
    assert_eq!(property, "c");
    assert!(matches!(*object, Expr::Conditional { .. }), "the parenthesized inner chain rewrites independently");
}

#[test]
fn nullish_coalescing_with_bare_identifier_skips_temporary() {
    let got = lower_nullish_coalescing(ident(0), ident(1), s(), &mut temp_source(0));
    let Expr::Conditional { test, consequent, .. } = got else {
        panic!("expected a conditional");
    };
    assert!(matches!(*test, Expr::Binary { op: BinOp::NotEq, .. }));
    assert!(matches!(*consequent, Expr::Identifier(..)));
}

#[test]
fn nullish_coalescing_with_call_captures_a_temporary() {
    let call = Expr::Call { callee: Box::new(ident(0)), args: vec![], chain: ChainFlags::default(), span: s() };
    let got = lower_nullish_coalescing(call, ident(1), s(), &mut temp_source(0));
    let Expr::Binary { op: BinOp::Comma, left, right } = got else {
        panic!("expected a comma-sequenced assignment then conditional");
    };
    assert!(matches!(*left, Expr::Binary { op: BinOp::Assign(None), .. }));
    assert!(matches!(*right, Expr::Conditional { .. }));
}

#[test]
fn unary_not_is_untouched_by_chain_lowering() {
    // sanity: this module should never be invoked for non-chain nodes, but
    // if it somehow were, it must not panic.
    let e = Expr::Unary { op: UnOp::Not, arg: Box::new(ident(0)), span: s() };
    assert!(!run_has_optional(&e));
}
