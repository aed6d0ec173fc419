//! TypeScript `enum` lowering (`spec.md` §4.4, end-to-end scenario 3).
//!
//! `enum E { A, B = "x", C }` becomes:
//! ```text
//! var E;
//! (function (E) {
//!     E[E["A"] = 0] = "A";
//!     E[E["B"] = "x"] = "B";
//!     E[E["C"] = void 0] = "C";
//! })(E || (E = {}));
//! ```
//! Numeric members without an explicit initializer continue the previous
//! value + 1; once a member's value isn't a known numeric literal, every
//! later implicit member becomes `undefined` rather than guessing a
//! successor. A member initializer may refer to an earlier member by its
//! bare name (`B = A + 1`) — the binder deliberately leaves those
//! references unresolved (`tsz-binder`'s `visit_enum`), so this module reads
//! the name straight off the original source text and rewrites it into
//! `E["A"]` itself rather than relying on symbol resolution.

use tsz_common::Span;
use tsz_parser::ast::{BinOp, ChainFlags, EnumDecl, Expr, Stmt, VarDeclarator, VarKind};
use tsz_parser::refs::{load_name_from_ref, NamePool, Ref};

enum Prev {
    /// No member has been emitted yet; the next implicit value is `0`.
    None,
    /// The last member's value is a known numeric constant.
    Numeric(f64),
    /// The last member's value isn't a known literal; implicit successors
    /// are `undefined` (matches the behavior after a string-valued member,
    /// and is the simplest safe default for anything else non-numeric).
    Other,
}

/// Lowers one `enum` declaration into `var Name;` plus the IIFE statement.
/// The enum's own `name` ref (already bound by the binder) is reused both as
/// the outer `var` and the IIFE's parameter.
pub fn lower_enum(e: Box<EnumDecl>, source_text: &str, names: &NamePool) -> [Stmt; 2] {
    let enum_ref = e.name;
    let span = e.span;
    let member_names: std::collections::HashSet<&str> = e.members.iter().map(|m| m.name.as_str()).collect();

    let mut prev = Prev::None;
    let mut body = Vec::with_capacity(e.members.len());
    for member in e.members {
        let value = match member.initializer {
            Some(init) => rewrite_self_references(init, enum_ref, &member_names, source_text, names),
            None => match prev {
                Prev::Numeric(n) => Expr::Number(n + 1.0, member.span),
                Prev::Other => Expr::Undefined(member.span),
                Prev::None => Expr::Number(0.0, member.span),
            },
        };
        prev = match &value {
            Expr::Number(n, _) => Prev::Numeric(*n),
            _ => Prev::Other,
        };
        body.push(member_assignment(enum_ref, &member.name, value, member.span));
    }

    let var_decl = Stmt::VarDecl {
        kind: VarKind::Var,
        declarations: vec![VarDeclarator { name: Expr::Identifier(enum_ref, span), init: None }],
        span,
    };
    let iife = wrap_in_iife(enum_ref, body, span);
    [var_decl, iife]
}

/// `E[E["K"] = V] = "K";`
fn member_assignment(enum_ref: Ref, name: &str, value: Expr, span: Span) -> Stmt {
    let key = Expr::String(name.encode_utf16().collect(), span);
    let inner_assign = Expr::Binary {
        op: BinOp::Assign(None),
        left: Box::new(Expr::Index {
            object: Box::new(Expr::Identifier(enum_ref, span)),
            index: Box::new(key.clone()),
            chain: ChainFlags::default(),
            span,
        }),
        right: Box::new(value),
        span,
    };
    let outer = Expr::Binary {
        op: BinOp::Assign(None),
        left: Box::new(Expr::Index {
            object: Box::new(Expr::Identifier(enum_ref, span)),
            index: Box::new(inner_assign),
            chain: ChainFlags::default(),
            span,
        }),
        right: Box::new(key),
        span,
    };
    Stmt::Expr(outer, span)
}

/// `(function (E) { ... })(E || (E = {}));`
fn wrap_in_iife(enum_ref: Ref, body: Vec<Stmt>, span: Span) -> Stmt {
    let param = Expr::Identifier(enum_ref, span);
    let iife_fn = Expr::Function(Box::new(tsz_parser::ast::Function {
        name: None,
        params: vec![tsz_parser::ast::Param { pattern: param, default: None, is_rest: false, is_param_property: false }],
        body,
        is_async: false,
        is_generator: false,
        is_arrow: false,
        expression_body: None,
        span,
    }));
    let init_or = Expr::Binary {
        op: BinOp::LogicalOr,
        left: Box::new(Expr::Identifier(enum_ref, span)),
        right: Box::new(Expr::Binary {
            op: BinOp::Assign(None),
            left: Box::new(Expr::Identifier(enum_ref, span)),
            right: Box::new(Expr::Object { properties: vec![], span }),
            span,
        }),
        span,
    };
    let call = Expr::Call { callee: Box::new(iife_fn), args: vec![init_or], chain: ChainFlags::default(), span };
    Stmt::Expr(call, span)
}

/// Rewrites every bare identifier in `init` that names a sibling enum member
/// into `E["member"]`. Everything else is left untouched — enum member
/// initializers are typically literal/arithmetic expressions, and the
/// binder never visited them, so there is nothing else here to fold.
fn rewrite_self_references(init: Expr, enum_ref: Ref, member_names: &std::collections::HashSet<&str>, source_text: &str, names: &NamePool) -> Expr {
    match init {
        Expr::Identifier(r, span) if !r.is_resolved() => {
            let name = load_name_from_ref(r, source_text, names);
            if member_names.contains(name) {
                Expr::Index {
                    object: Box::new(Expr::Identifier(enum_ref, span)),
                    index: Box::new(Expr::String(name.encode_utf16().collect(), span)),
                    chain: ChainFlags::default(),
                    span,
                }
            } else {
                Expr::Identifier(r, span)
            }
        }
        Expr::Binary { op, left, right, span } => Expr::Binary {
            op,
            left: Box::new(rewrite_self_references(*left, enum_ref, member_names, source_text, names)),
            right: Box::new(rewrite_self_references(*right, enum_ref, member_names, source_text, names)),
            span,
        },
        Expr::Unary { op, arg, span } => {
            Expr::Unary { op, arg: Box::new(rewrite_self_references(*arg, enum_ref, member_names, source_text, names)), span }
        }
        Expr::Conditional { test, consequent, alternate, span } => Expr::Conditional {
            test: Box::new(rewrite_self_references(*test, enum_ref, member_names, source_text, names)),
            consequent: Box::new(rewrite_self_references(*consequent, enum_ref, member_names, source_text, names)),
            alternate: Box::new(rewrite_self_references(*alternate, enum_ref, member_names, source_text, names)),
            span,
        },
        Expr::Dot { object, property, chain, span } => Expr::Dot {
            object: Box::new(rewrite_self_references(*object, enum_ref, member_names, source_text, names)),
            property,
            chain,
            span,
        },
        Expr::Index { object, index, chain, span } => Expr::Index {
            object: Box::new(rewrite_self_references(*object, enum_ref, member_names, source_text, names)),
            index: Box::new(rewrite_self_references(*index, enum_ref, member_names, source_text, names)),
            chain,
            span,
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "../tests/enum_lower.rs"]
mod tests;
