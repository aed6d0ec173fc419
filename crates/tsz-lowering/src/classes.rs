//! Class field lowering (`spec.md` §4.4): instance fields move into the
//! constructor body, static fields become assignments the caller attaches
//! to whatever the class evaluates to, and TypeScript constructor
//! parameter properties become field assignments of their own.
//!
//! Uninitialized fields are dropped rather than emitted as `this.x =
//! undefined`, matching the TypeScript compiler's observed behavior
//! (`DESIGN.md`).

use tsz_binder::SymbolTable;
use tsz_common::Span;
use tsz_parser::ast::{BinOp, ChainFlags, Class, Expr, Function, Param, Property, PropertyKind, Stmt};
use tsz_parser::refs::Ref;

/// A static field lifted out of the class body, still owed an assignment
/// target once the caller knows what the class evaluates to.
pub struct StaticField {
    pub key: Expr,
    pub is_computed: bool,
    pub init: Expr,
}

/// Strips instance and static fields out of `class.properties`, splicing
/// instance field assignments (and any constructor parameter property
/// assignments) into the constructor, synthesizing one if the class has
/// none. Returns the static fields still owed an assignment target.
pub fn extract_fields(class: &mut Class, symbols: &SymbolTable, fresh_temp: &mut dyn FnMut() -> Ref) -> Vec<StaticField> {
    let mut statics = Vec::new();
    let mut instance_assignments = Vec::new();
    let mut ctor_index = None;
    let mut kept = Vec::with_capacity(class.properties.len());
    for prop in std::mem::take(&mut class.properties) {
        if prop.is_method {
            if !prop.is_static && is_constructor_key(&prop.key) {
                ctor_index = Some(kept.len());
            }
            kept.push(prop);
            continue;
        }
        let Some(init) = prop.value else {
            continue;
        };
        if prop.is_static {
            statics.push(StaticField { key: prop.key, is_computed: prop.is_computed, init });
        } else {
            instance_assignments.push(field_assignment(prop.key, prop.is_computed, init));
        }
    }
    class.properties = kept;

    let param_assignments = ctor_index.map(|i| param_property_assignments(&class.properties[i], symbols)).unwrap_or_default();

    if instance_assignments.is_empty() && param_assignments.is_empty() {
        return statics;
    }

    let has_super = class.super_class.is_some();
    let ctor_index = ctor_index.unwrap_or_else(|| {
        class.properties.push(synthesize_constructor(has_super, class.span, fresh_temp));
        class.properties.len() - 1
    });

    let ctor = constructor_function_mut(&mut class.properties[ctor_index]);
    let insert_at = ctor.body.iter().position(is_super_call_stmt).map_or(0, |i| i + 1);
    let mut prelude = param_assignments;
    prelude.extend(instance_assignments);
    let prelude: Vec<Stmt> = prelude
        .into_iter()
        .map(|e| {
            let span = e.span();
            Stmt::Expr(e, span)
        })
        .collect();
    ctor.body.splice(insert_at..insert_at, prelude);

    statics
}

/// Builds the assignment the caller attaches a lifted static field to once
/// `class_ref` (the class's own binding, or a generated temporary for an
/// anonymous class expression) is known.
#[must_use]
pub fn static_field_assignment(class_ref: Expr, field: StaticField) -> Expr {
    assign_to_member(class_ref, field.key, field.is_computed, field.init)
}

fn field_assignment(key: Expr, is_computed: bool, init: Expr) -> Expr {
    let this_span = key.span();
    assign_to_member(Expr::This(this_span), key, is_computed, init)
}

fn assign_to_member(object: Expr, key: Expr, is_computed: bool, init: Expr) -> Expr {
    let span = init.span();
    let target = if is_computed {
        Expr::Index { object: Box::new(object), index: Box::new(key), chain: ChainFlags::default(), span }
    } else {
        Expr::Dot { object: Box::new(object), property: property_name(&key), chain: ChainFlags::default(), span }
    };
    Expr::Binary { op: BinOp::Assign(None), left: Box::new(target), right: Box::new(init), span }
}

/// Non-computed class member keys are always parsed as literals (`spec.md`
/// §3): a bare name becomes `Expr::String`, a bare number becomes
/// `Expr::Number`.
fn property_name(key: &Expr) -> String {
    match key {
        Expr::String(units, _) => String::from_utf16_lossy(units),
        Expr::Number(n, _) => n.to_string(),
        other => unreachable!("non-computed class member key is not a literal: {other:?}"),
    }
}

fn is_constructor_key(key: &Expr) -> bool {
    matches!(key, Expr::String(units, _) if String::from_utf16_lossy(units) == "constructor")
}

fn constructor_function_mut(prop: &mut Property) -> &mut Function {
    match prop.value.as_mut().expect("constructor property always has a function value") {
        Expr::Function(f) => f.as_mut(),
        _ => unreachable!("constructor property value is always a Function"),
    }
}

fn constructor_function(prop: &Property) -> &Function {
    match prop.value.as_ref().expect("constructor property always has a function value") {
        Expr::Function(f) => f,
        _ => unreachable!("constructor property value is always a Function"),
    }
}

fn is_super_call_stmt(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Expr(Expr::Call { callee, .. }, _) if matches!(**callee, Expr::Super(_)))
}

/// `constructor(public x: number)` declares and assigns a field in one step
/// (`spec.md` §4.4); the parser only records `is_param_property`, so
/// lowering reads the bound name back out of the symbol table.
fn param_property_assignments(ctor_prop: &Property, symbols: &SymbolTable) -> Vec<Expr> {
    let ctor = constructor_function(ctor_prop);
    ctor.params
        .iter()
        .filter(|p| p.is_param_property)
        .filter_map(|p| param_name_assignment(p, symbols))
        .collect()
}

fn param_name_assignment(param: &Param, symbols: &SymbolTable) -> Option<Expr> {
    let Expr::Identifier(r, span) = &param.pattern else {
        return None;
    };
    let Ref::Symbol { slot, .. } = *r else {
        return None;
    };
    let name = symbols.get(symbols.resolve(tsz_binder::SymbolId(slot))).name.clone();
    let key = Expr::String(name.encode_utf16().collect(), *span);
    Some(field_assignment(key, false, Expr::Identifier(*r, *span)))
}

fn synthesize_constructor(has_super: bool, span: Span, fresh_temp: &mut dyn FnMut() -> Ref) -> Property {
    let (params, body) = if has_super {
        let args = fresh_temp();
        let params = vec![Param { pattern: Expr::Identifier(args, span), default: None, is_rest: true, is_param_property: false }];
        let super_call = Expr::Call {
            callee: Box::new(Expr::Super(span)),
            args: vec![Expr::Spread(Box::new(Expr::Identifier(args, span)), span)],
            chain: ChainFlags::default(),
            span,
        };
        (params, vec![Stmt::Expr(super_call, span)])
    } else {
        (Vec::new(), Vec::new())
    };
    Property {
        kind: PropertyKind::Normal,
        key: Expr::String("constructor".encode_utf16().collect(), span),
        value: Some(Expr::Function(Box::new(Function {
            name: None,
            params,
            body,
            is_async: false,
            is_generator: false,
            is_arrow: false,
            expression_body: None,
            span,
        }))),
        is_method: true,
        is_static: false,
        is_computed: false,
        span,
    }
}

#[cfg(test)]
#[path = "../tests/classes.rs"]
mod tests;
