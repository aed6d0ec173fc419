//! TypeScript `namespace`/`module` lowering (`spec.md` §4.4).
//!
//! An empty namespace body is erased outright — it declares nothing and
//! has no runtime effect. A non-empty one becomes an IIFE whose parameter
//! is the namespace's own binding, with every top-level declaration inside
//! the body exposed as a property of that parameter:
//! ```text
//! var A;
//! (function (A) {
//!     function f() { }
//!     A.f = f;
//! })(A || (A = {}));
//! ```
//! The parser loses which declarations were actually `export`ed once it
//! reaches a namespace body, so every top-level declaration is exposed
//! (`DESIGN.md`) — a deliberate approximation, not an oversight.
//!
//! A dotted head (`namespace A.B`) desugars into nested IIFEs, one per
//! segment; only the first segment names a real bound symbol, so the rest
//! get synthetic parameters from `fresh_temp`.

use tsz_binder::{SymbolId, SymbolTable};
use tsz_common::Span;
use tsz_parser::ast::{BinOp, ChainFlags, Expr, Function, Param, Stmt, VarDeclarator, VarKind};
use tsz_parser::refs::Ref;

/// Lowers one namespace declaration given its (already individually
/// lowered) body statements. Returns the replacement statements — empty if
/// the namespace had no body.
pub fn lower_namespace(name: Ref, path: &[String], body: Vec<Stmt>, span: Span, symbols: &SymbolTable, fresh_temp: &mut dyn FnMut() -> Ref) -> Vec<Stmt> {
    if body.is_empty() {
        return Vec::new();
    }

    let param_refs: Vec<Ref> = path.iter().enumerate().map(|(i, _)| if i == 0 { name } else { fresh_temp() }).collect();
    let innermost = *param_refs.last().expect("namespace always has at least one path segment");

    let exports: Vec<Stmt> = body
        .iter()
        .flat_map(|s| exported_bindings(s, symbols))
        .map(|(n, r)| export_assignment(innermost, &n, r, span))
        .collect();
    let mut current_body = body;
    current_body.extend(exports);

    for i in (1..path.len()).rev() {
        let outer_param = param_refs[i - 1];
        let member = Expr::Dot { object: Box::new(Expr::Identifier(outer_param, span)), property: path[i].clone(), chain: ChainFlags::default(), span };
        let argument = init_or(member, span);
        let func = wrap_in_function(param_refs[i], current_body, span);
        current_body = vec![Stmt::Expr(Expr::Call { callee: Box::new(func), args: vec![argument], chain: ChainFlags::default(), span }, span)];
    }

    let outer_argument = init_or(Expr::Identifier(name, span), span);
    let outer_func = wrap_in_function(name, current_body, span);
    let call = Expr::Call { callee: Box::new(outer_func), args: vec![outer_argument], chain: ChainFlags::default(), span };

    let var_decl = Stmt::VarDecl { kind: VarKind::Var, declarations: vec![VarDeclarator { name: Expr::Identifier(name, span), init: None }], span };
    vec![var_decl, Stmt::Expr(call, span)]
}

/// `target || (target = {})`
fn init_or(target: Expr, span: Span) -> Expr {
    let init = Expr::Binary { op: BinOp::Assign(None), left: Box::new(target.clone()), right: Box::new(Expr::Object { properties: vec![], span }), span };
    Expr::Binary { op: BinOp::LogicalOr, left: Box::new(target), right: Box::new(init), span }
}

fn wrap_in_function(param_ref: Ref, body: Vec<Stmt>, span: Span) -> Expr {
    Expr::Function(Box::new(Function {
        name: None,
        params: vec![Param { pattern: Expr::Identifier(param_ref, span), default: None, is_rest: false, is_param_property: false }],
        body,
        is_async: false,
        is_generator: false,
        is_arrow: false,
        expression_body: None,
        span,
    }))
}

/// `Inner.name = name;`
fn export_assignment(inner: Ref, name: &str, value_ref: Ref, span: Span) -> Stmt {
    let member = Expr::Dot { object: Box::new(Expr::Identifier(inner, span)), property: name.to_string(), chain: ChainFlags::default(), span };
    let value = Expr::Identifier(value_ref, span);
    Stmt::Expr(Expr::Binary { op: BinOp::Assign(None), left: Box::new(member), right: Box::new(value), span }, span)
}

fn declared_ref(stmt: &Stmt) -> Option<Ref> {
    match stmt {
        Stmt::FunctionDecl(f) => f.name,
        Stmt::ClassDecl(c) => c.name,
        Stmt::EnumDecl(e) => Some(e.name),
        Stmt::NamespaceDecl(n) => Some(n.name),
        _ => None,
    }
}

/// Every top-level declaration with a name gets exposed; destructuring
/// `var` patterns have no single name to expose and are skipped. A `var`
/// statement can declare several comma-separated bindings at once, so
/// every declarator is exposed, not just the first.
fn exported_bindings(stmt: &Stmt, symbols: &SymbolTable) -> Vec<(String, Ref)> {
    if let Stmt::VarDecl { declarations, .. } = stmt {
        return declarations
            .iter()
            .filter_map(|d| match &d.name {
                Expr::Identifier(r, _) => symbol_name(*r, symbols).map(|n| (n, *r)),
                _ => None,
            })
            .collect();
    }
    declared_ref(stmt).and_then(|r| symbol_name(r, symbols).map(|n| (n, r))).into_iter().collect()
}

fn symbol_name(r: Ref, symbols: &SymbolTable) -> Option<String> {
    match r {
        Ref::Symbol { slot, .. } => Some(symbols.get(symbols.resolve(SymbolId(slot))).name.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/namespace.rs"]
mod tests;
