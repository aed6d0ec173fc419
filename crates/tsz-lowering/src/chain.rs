//! Optional chaining (`?.`) and nullish coalescing (`??`) lowering
//! (`spec.md` §4.4, end-to-end scenarios 1–2).
//!
//! A chain is a run of `Dot`/`Index`/`Call` nodes connected through their
//! `object`/`callee` without an intervening parenthesization barrier. At
//! most one rewrite happens per run, at its outermost node: the run is
//! flattened into a root plus an ordered list of [`Link`]s, then rebuilt
//! bottom-up. Each optional link wraps everything after it in a
//! `base == null ? <default> : <rest>` conditional; a non-optional link
//! just applies normally. A `Call` link whose value is a member access
//! reached through this same rebuild is emitted as `member.call(receiver,
//! …args)` rather than `member(...)`, uniformly, so `this` binds correctly
//! whether or not the receiver needed a temporary.
//!
//! `visit` is the caller's full expression lowering (folding, defines,
//! nested chains); every subexpression this module doesn't itself rewrite
//! (call arguments, index expressions, the eventual root, a parenthesized
//! sub-chain) is still run through it.

use tsz_common::Span;
use tsz_parser::ast::{BinOp, ChainFlags, Expr};
use tsz_parser::refs::Ref;

enum Link {
    Dot { property: String, is_optional: bool, span: Span },
    Index { index: Box<Expr>, is_optional: bool, span: Span },
    Call { args: Vec<Expr>, is_optional: bool, span: Span },
}

impl Link {
    fn is_optional(&self) -> bool {
        match self {
            Link::Dot { is_optional, .. } | Link::Index { is_optional, .. } | Link::Call { is_optional, .. } => {
                *is_optional
            }
        }
    }
}

fn chain_flags(e: &Expr) -> Option<ChainFlags> {
    match e {
        Expr::Dot { chain, .. } | Expr::Index { chain, .. } | Expr::Call { chain, .. } => Some(*chain),
        _ => None,
    }
}

/// Lowers `e`, delegating anything outside this module's scope to `visit`.
/// `is_delete_target` marks `e` as the direct argument of `delete`, which
/// changes the short-circuit default from `undefined` to `true`.
pub fn lower_chain(
    e: Expr,
    is_delete_target: bool,
    visit: &mut dyn FnMut(Expr) -> Expr,
    fresh_temp: &mut dyn FnMut() -> Ref,
) -> Expr {
    if !run_has_optional(&e) {
        return visit_children_only(e, visit);
    }
    let (root, links) = flatten(e, visit, fresh_temp);
    lower_links(root, None, &links, is_delete_target, fresh_temp)
}

fn run_has_optional(e: &Expr) -> bool {
    match e {
        Expr::Dot { object, chain, .. } => chain.is_optional_chain || barrier_aware_has_optional(object),
        Expr::Index { object, chain, .. } => chain.is_optional_chain || barrier_aware_has_optional(object),
        Expr::Call { callee, chain, .. } => chain.is_optional_chain || barrier_aware_has_optional(callee),
        _ => false,
    }
}

fn barrier_aware_has_optional(e: &Expr) -> bool {
    match chain_flags(e) {
        Some(flags) if flags.is_parenthesized => false,
        Some(_) => run_has_optional(e),
        None => false,
    }
}

/// Used directly by callers that already know a chain has no `?.` to
/// lower (e.g. the visitor skips chain-rewrite entirely at `ESNext`).
pub fn visit_children_only_pub(e: Expr, visit: &mut dyn FnMut(Expr) -> Expr) -> Expr {
    visit_children_only(e, visit)
}

fn visit_children_only(e: Expr, visit: &mut dyn FnMut(Expr) -> Expr) -> Expr {
    match e {
        Expr::Dot { object, property, chain, span } => {
            Expr::Dot { object: Box::new(visit(*object)), property, chain, span }
        }
        Expr::Index { object, index, chain, span } => Expr::Index {
            object: Box::new(visit(*object)),
            index: Box::new(visit(*index)),
            chain,
            span,
        },
        Expr::Call { callee, args, chain, span } => Expr::Call {
            callee: Box::new(visit(*callee)),
            args: args.into_iter().map(|a| visit(a)).collect(),
            chain,
            span,
        },
        other => other,
    }
}

fn flatten(
    e: Expr,
    visit: &mut dyn FnMut(Expr) -> Expr,
    fresh_temp: &mut dyn FnMut() -> Ref,
) -> (Expr, Vec<Link>) {
    match e {
        Expr::Dot { object, property, chain, span } => {
            let (root, mut links) = flatten_child(*object, visit, fresh_temp);
            links.push(Link::Dot { property, is_optional: chain.is_optional_chain, span });
            (root, links)
        }
        Expr::Index { object, index, chain, span } => {
            let index = Box::new(visit(*index));
            let (root, mut links) = flatten_child(*object, visit, fresh_temp);
            links.push(Link::Index { index, is_optional: chain.is_optional_chain, span });
            (root, links)
        }
        Expr::Call { callee, args, chain, span } => {
            let args = args.into_iter().map(|a| visit(a)).collect();
            let (root, mut links) = flatten_child(*callee, visit, fresh_temp);
            links.push(Link::Call { args, is_optional: chain.is_optional_chain, span });
            (root, links)
        }
        other => (visit(other), Vec::new()),
    }
}

fn flatten_child(
    e: Expr,
    visit: &mut dyn FnMut(Expr) -> Expr,
    fresh_temp: &mut dyn FnMut() -> Ref,
) -> (Expr, Vec<Link>) {
    match chain_flags(&e) {
        Some(flags) if flags.is_parenthesized => (visit(e), Vec::new()),
        Some(_) => flatten(e, visit, fresh_temp),
        None => (visit(e), Vec::new()),
    }
}

fn lower_links(
    value: Expr,
    receiver: Option<Expr>,
    links: &[Link],
    is_delete_target: bool,
    fresh_temp: &mut dyn FnMut() -> Ref,
) -> Expr {
    let Some((first, rest)) = links.split_first() else {
        return value;
    };
    if !first.is_optional() {
        let (next_value, next_receiver) = apply_link(value, receiver, first);
        return lower_links(next_value, next_receiver, rest, is_delete_target, fresh_temp);
    }
    let span = value.span();
    let (test_expr, use_expr) = capture_if_needed(value, fresh_temp);
    let default = if is_delete_target { Expr::Bool(true, span) } else { Expr::Undefined(span) };
    let (next_value, next_receiver) = apply_link(use_expr, None, first);
    let continuation = lower_links(next_value, next_receiver, rest, is_delete_target, fresh_temp);
    Expr::Conditional {
        test: Box::new(Expr::Binary {
            op: BinOp::Eq,
            left: Box::new(test_expr),
            right: Box::new(Expr::Null(span)),
            span,
        }),
        consequent: Box::new(default),
        alternate: Box::new(continuation),
        span,
    }
}

/// `this` and bare identifiers are safe to re-read without a temporary
/// (re-evaluating them has no side effect and yields the same value).
fn capture_if_needed(e: Expr, fresh_temp: &mut dyn FnMut() -> Ref) -> (Expr, Expr) {
    if matches!(e, Expr::Identifier(..) | Expr::This(_)) {
        (e.clone(), e)
    } else {
        let span = e.span();
        let temp = fresh_temp();
        let assign = Expr::Binary {
            op: BinOp::Assign(None),
            left: Box::new(Expr::Identifier(temp, span)),
            right: Box::new(e),
            span,
        };
        (assign, Expr::Identifier(temp, span))
    }
}

fn apply_link(value: Expr, receiver: Option<Expr>, link: &Link) -> (Expr, Option<Expr>) {
    let start = value.span().start;
    match link {
        Link::Dot { property, span, .. } => {
            let full = Span::new(start, span.end);
            let out = Expr::Dot {
                object: Box::new(value.clone()),
                property: property.clone(),
                chain: ChainFlags::default(),
                span: full,
            };
            (out, Some(value))
        }
        Link::Index { index, span, .. } => {
            let full = Span::new(start, span.end);
            let out = Expr::Index {
                object: Box::new(value.clone()),
                index: index.clone(),
                chain: ChainFlags::default(),
                span: full,
            };
            (out, Some(value))
        }
        Link::Call { args, span, .. } => {
            let full = Span::new(start, span.end);
            if let Some(recv) = receiver {
                let callee = Expr::Dot {
                    object: Box::new(value),
                    property: "call".to_string(),
                    chain: ChainFlags::default(),
                    span: full,
                };
                let mut call_args = Vec::with_capacity(args.len() + 1);
                call_args.push(recv);
                call_args.extend(args.iter().cloned());
                (Expr::Call { callee: Box::new(callee), args: call_args, chain: ChainFlags::default(), span: full }, None)
            } else {
                (Expr::Call { callee: Box::new(value), args: args.clone(), chain: ChainFlags::default(), span: full }, None)
            }
        }
    }
}

/// `x ?? y`: a bare identifier left operand reads straight through;
/// anything else is captured in a temporary first (`spec.md` §4.4).
pub fn lower_nullish_coalescing(left: Expr, right: Expr, span: Span, fresh_temp: &mut dyn FnMut() -> Ref) -> Expr {
    if matches!(left, Expr::Identifier(..) | Expr::This(_)) {
        let test = Expr::Binary {
            op: BinOp::NotEq,
            left: Box::new(left.clone()),
            right: Box::new(Expr::Null(span)),
            span,
        };
        Expr::Conditional { test: Box::new(test), consequent: Box::new(left), alternate: Box::new(right), span }
    } else {
        let temp = fresh_temp();
        let assign = Expr::Binary {
            op: BinOp::Assign(None),
            left: Box::new(Expr::Identifier(temp, span)),
            right: Box::new(left),
            span,
        };
        let temp_read = Expr::Identifier(temp, span);
        let test = Expr::Binary {
            op: BinOp::NotEq,
            left: Box::new(temp_read.clone()),
            right: Box::new(Expr::Null(span)),
            span,
        };
        let conditional =
            Expr::Conditional { test: Box::new(test), consequent: Box::new(temp_read), alternate: Box::new(right), span };
        Expr::Binary { op: BinOp::Comma, left: Box::new(assign), right: Box::new(conditional), span }
    }
}

#[cfg(test)]
#[path = "../tests/chain.rs"]
mod tests;
