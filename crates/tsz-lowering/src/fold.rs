//! Pure constant folding for literal-only subexpressions (`spec.md` §4.3
//! item 4: "Applies constant folding for pure cases").
//!
//! These helpers assume bottom-up evaluation: a caller folds an
//! expression's children first, then asks whether the parent itself folds.
//! Nothing here has side effects and nothing recurses — the driving
//! traversal in [`crate::lowering`] owns recursion order.

use tsz_common::Span;
use tsz_parser::ast::{BinOp, Expr, UnOp};

/// `Some(true/false)` if `e`'s truthiness is known from its literal shape
/// alone; `None` if it depends on a runtime value.
#[must_use]
pub fn truthiness(e: &Expr) -> Option<bool> {
    match e {
        Expr::Null(_) | Expr::Undefined(_) => Some(false),
        Expr::Bool(b, _) => Some(*b),
        Expr::Number(n, _) => Some(*n != 0.0 && !n.is_nan()),
        Expr::String(s, _) => Some(!s.is_empty()),
        Expr::Function(_) | Expr::Class(_) | Expr::Array { .. } | Expr::Object { .. } => Some(true),
        _ => None,
    }
}

/// `Some(true)` if `e` is definitely `null`/`undefined`, `Some(false)` if
/// it's definitely neither, `None` if unknown.
#[must_use]
pub fn nullishness(e: &Expr) -> Option<bool> {
    match e {
        Expr::Null(_) | Expr::Undefined(_) => Some(true),
        Expr::Bool(..)
        | Expr::Number(..)
        | Expr::String(..)
        | Expr::BigInt(..)
        | Expr::Function(_)
        | Expr::Class(_)
        | Expr::Array { .. }
        | Expr::Object { .. } => Some(false),
        _ => None,
    }
}

fn as_string_units(e: &Expr) -> Option<Vec<u16>> {
    match e {
        Expr::String(units, _) => Some(units.clone()),
        Expr::Template { quasis, exprs, .. } if exprs.is_empty() && quasis.len() == 1 => {
            Some(quasis[0].clone())
        }
        _ => None,
    }
}

/// Unary folds: `!`, `void`, `typeof`, unary `+`/`-` of literal operands.
#[must_use]
pub fn fold_unary(op: UnOp, arg: &Expr, span: Span) -> Option<Expr> {
    match op {
        UnOp::Not => truthiness(arg).map(|t| Expr::Bool(!t, span)),
        UnOp::Void => is_pure_literal(arg).then(|| Expr::Undefined(span)),
        UnOp::Typeof => typeof_tag(arg).map(|s| Expr::String(s.encode_utf16().collect(), span)),
        UnOp::Plus => match arg {
            Expr::Number(n, _) => Some(Expr::Number(*n, span)),
            Expr::Bool(b, _) => Some(Expr::Number(if *b { 1.0 } else { 0.0 }, span)),
            Expr::Null(_) => Some(Expr::Number(0.0, span)),
            _ => None,
        },
        UnOp::Minus => match arg {
            Expr::Number(n, _) => Some(Expr::Number(-n, span)),
            _ => None,
        },
        _ => None,
    }
}

fn is_pure_literal(e: &Expr) -> bool {
    matches!(
        e,
        Expr::Null(_)
            | Expr::Undefined(_)
            | Expr::Bool(..)
            | Expr::Number(..)
            | Expr::BigInt(..)
            | Expr::String(..)
            | Expr::This(_)
            | Expr::Identifier(..)
    )
}

fn typeof_tag(e: &Expr) -> Option<&'static str> {
    match e {
        Expr::Undefined(_) => Some("undefined"),
        Expr::Null(_) => Some("object"),
        Expr::Bool(..) => Some("boolean"),
        Expr::Number(..) => Some("number"),
        Expr::BigInt(..) => Some("bigint"),
        Expr::String(..) => Some("string"),
        Expr::Function(_) => Some("function"),
        _ => None,
    }
}

/// `==`/`!=`/`===`/`!==` of two literal operands, and `||`/`&&`/`??` when
/// the left operand's truthiness/nullishness is known without evaluating
/// it. `||`/`&&`/`??` fold to a *clone* of whichever literal side wins,
/// which is safe here because both sides have already been established to
/// be side-effect-free literals by the time this is called.
#[must_use]
pub fn fold_binary(op: BinOp, left: &Expr, right: &Expr, span: Span) -> Option<Expr> {
    match op {
        BinOp::LogicalOr => match truthiness(left) {
            Some(true) => Some(reposition(left, span)),
            Some(false) => Some(reposition(right, span)),
            None => None,
        },
        BinOp::LogicalAnd => match truthiness(left) {
            Some(true) => Some(reposition(right, span)),
            Some(false) => Some(reposition(left, span)),
            None => None,
        },
        BinOp::NullishCoalescing => match nullishness(left) {
            Some(true) => Some(reposition(right, span)),
            Some(false) => Some(reposition(left, span)),
            None => None,
        },
        BinOp::Eq | BinOp::NotEq | BinOp::StrictEq | BinOp::StrictNotEq => {
            fold_equality(op, left, right, span)
        }
        BinOp::Add => as_string_units(left).zip(as_string_units(right)).map(|(mut l, r)| {
            l.extend(r);
            Expr::String(l, span)
        }),
        _ => None,
    }
}

fn reposition(e: &Expr, span: Span) -> Expr {
    let mut clone = e.clone();
    reposition_in_place(&mut clone, span);
    clone
}

fn reposition_in_place(e: &mut Expr, span: Span) {
    match e {
        Expr::Null(s)
        | Expr::Undefined(s)
        | Expr::Bool(_, s)
        | Expr::Number(_, s)
        | Expr::BigInt(_, s)
        | Expr::String(_, s)
        | Expr::Identifier(_, s)
        | Expr::This(s) => *s = span,
        _ => {}
    }
}

fn fold_equality(op: BinOp, left: &Expr, right: &Expr, span: Span) -> Option<Expr> {
    let strict = matches!(op, BinOp::StrictEq | BinOp::StrictNotEq);
    let negate = matches!(op, BinOp::NotEq | BinOp::StrictNotEq);
    let raw = match (left, right) {
        (Expr::Number(a, _), Expr::Number(b, _)) => Some(a == b),
        (Expr::String(a, _), Expr::String(b, _)) => Some(a == b),
        (Expr::Bool(a, _), Expr::Bool(b, _)) => Some(a == b),
        (Expr::Null(_), Expr::Null(_)) | (Expr::Undefined(_), Expr::Undefined(_)) => Some(true),
        (Expr::Null(_), Expr::Undefined(_)) | (Expr::Undefined(_), Expr::Null(_)) => {
            if strict { Some(false) } else { Some(true) }
        }
        _ => None,
    }?;
    Some(Expr::Bool(if negate { !raw } else { raw }, span))
}

#[cfg(test)]
#[path = "../tests/fold.rs"]
mod tests;
