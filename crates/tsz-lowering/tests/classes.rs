use super::*;
use tsz_binder::{SymbolKind, SymbolTable};
use tsz_common::{SourceId, Span};
use tsz_parser::ast::{BinOp, ChainFlags, Class, Expr, Function, Param, Property, PropertyKind, Stmt};
use tsz_parser::refs::Ref;

fn s() -> Span {
    Span::new(0, 1)
}

fn field(name: &str, is_static: bool, init: Option<Expr>) -> Property {
    Property {
        kind: PropertyKind::Normal,
        key: Expr::String(name.encode_utf16().collect(), s()),
        value: init,
        is_method: false,
        is_static,
        is_computed: false,
        span: s(),
    }
}

fn method(name: &str, params: Vec<Param>, body: Vec<Stmt>) -> Property {
    Property {
        kind: PropertyKind::Normal,
        key: Expr::String(name.encode_utf16().collect(), s()),
        value: Some(Expr::Function(Box::new(Function {
            name: None,
            params,
            body,
            is_async: false,
            is_generator: false,
            is_arrow: false,
            expression_body: None,
            span: s(),
        }))),
        is_method: true,
        is_static: false,
        is_computed: false,
        span: s(),
    }
}

fn no_temp() -> impl FnMut() -> Ref {
    || panic!("no temporary should be needed")
}

#[test]
fn instance_field_with_initializer_synthesizes_a_constructor() {
    let mut class = Class { name: None, super_class: None, properties: vec![field("x", false, Some(Expr::Number(1.0, s())))], span: s() };
    let symbols = SymbolTable::new();
    let statics = extract_fields(&mut class, &symbols, &mut no_temp());
    assert!(statics.is_empty());
    assert_eq!(class.properties.len(), 1, "the field is replaced by a synthesized constructor");
    let ctor = constructor_function(&class.properties[0]);
    assert_eq!(ctor.body.len(), 1);
    let Stmt::Expr(Expr::Binary { op: BinOp::Assign(None), left, .. }, _) = &ctor.body[0] else {
        panic!("expected an assignment statement");
    };
    assert!(matches!(**left, Expr::Dot { .. }));
}

#[test]
fn uninitialized_field_is_dropped_without_touching_the_constructor() {
    let mut class = Class { name: None, super_class: None, properties: vec![field("x", false, None)], span: s() };
    let symbols = SymbolTable::new();
    let statics = extract_fields(&mut class, &symbols, &mut no_temp());
    assert!(statics.is_empty());
    assert!(class.properties.is_empty(), "no constructor should be synthesized for a field with no initializer");
}

#[test]
fn static_field_is_returned_instead_of_injected() {
    let mut class = Class { name: None, super_class: None, properties: vec![field("count", true, Some(Expr::Number(0.0, s())))], span: s() };
    let symbols = SymbolTable::new();
    let statics = extract_fields(&mut class, &symbols, &mut no_temp());
    assert_eq!(statics.len(), 1);
    assert!(class.properties.is_empty());
    let assign = static_field_assignment(Expr::Identifier(Ref::External(0), s()), statics.into_iter().next().unwrap());
    let Expr::Binary { op: BinOp::Assign(None), left, .. } = assign else {
        panic!("expected an assignment");
    };
    let Expr::Dot { property, .. } = *left else {
        panic!("expected a member assignment");
    };
    assert_eq!(property, "count");
}

#[test]
fn instance_assignment_is_spliced_after_an_existing_super_call() {
    let super_call = Stmt::Expr(
        Expr::Call { callee: Box::new(Expr::Super(s())), args: vec![], chain: ChainFlags::default(), span: s() },
        s(),
    );
    let user_stmt = Stmt::Expr(Expr::Number(42.0, s()), s());
    let ctor = method("constructor", vec![], vec![super_call, user_stmt]);
    let mut class = Class {
        name: None,
        super_class: Some(Box::new(Expr::Identifier(Ref::External(0), s()))),
        properties: vec![ctor, field("x", false, Some(Expr::Number(1.0, s())))],
        span: s(),
    };
    let symbols = SymbolTable::new();
    extract_fields(&mut class, &symbols, &mut no_temp());
    assert_eq!(class.properties.len(), 1);
    let ctor = constructor_function(&class.properties[0]);
    assert_eq!(ctor.body.len(), 3);
    assert!(matches!(ctor.body[0], Stmt::Expr(Expr::Call { .. }, _)), "super() stays first");
    assert!(matches!(ctor.body[1], Stmt::Expr(Expr::Binary { op: BinOp::Assign(None), .. }, _)), "field assignment follows super()");
    assert!(matches!(ctor.body[2], Stmt::Expr(Expr::Number(..), _)), "user code stays last");
}

#[test]
fn constructor_parameter_property_becomes_a_field_assignment() {
    let mut symbols = SymbolTable::new();
    let id = symbols.alloc(SymbolKind::Other, "x".to_string());
    let r = Ref::Symbol { source: SourceId(0), slot: id.0 };
    let param = Param { pattern: Expr::Identifier(r, s()), default: None, is_rest: false, is_param_property: true };
    let ctor = method("constructor", vec![param], vec![]);
    let mut class = Class { name: None, super_class: None, properties: vec![ctor], span: s() };
    extract_fields(&mut class, &symbols, &mut no_temp());
    let ctor = constructor_function(&class.properties[0]);
    assert_eq!(ctor.body.len(), 1);
    let Stmt::Expr(Expr::Binary { op: BinOp::Assign(None), left, right }, _) = &ctor.body[0] else {
        panic!("expected an assignment");
    };
    let Expr::Dot { property, .. } = &**left else {
        panic!("expected this.x");
    };
    assert_eq!(property, "x");
    assert!(matches!(**right, Expr::Identifier(..)));
}

#[test]
fn synthesized_constructor_for_a_derived_class_forwards_arguments_to_super() {
    let mut class = Class {
        name: None,
        super_class: Some(Box::new(Expr::Identifier(Ref::External(0), s()))),
        properties: vec![field("x", false, Some(Expr::Number(1.0, s())))],
        span: s(),
    };
    let symbols = SymbolTable::new();
    let mut next = 0u32;
    let mut fresh = move || {
        let r = Ref::External(next);
        next += 1;
        r
    };
    extract_fields(&mut class, &symbols, &mut fresh);
    let ctor = constructor_function(&class.properties[0]);
    assert_eq!(ctor.params.len(), 1);
    assert!(ctor.params[0].is_rest);
    assert_eq!(ctor.body.len(), 2, "super(...args) then the field assignment");
    assert!(matches!(ctor.body[0], Stmt::Expr(Expr::Call { .. }, _)));
}
