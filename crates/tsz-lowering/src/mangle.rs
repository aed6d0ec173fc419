//! `mangle_syntax` (`spec.md` §4.3): a purely syntactic simplification pass
//! applied after every other lowering rule has already run. Each rule is
//! small and the pass is idempotent — running it twice changes nothing.
//!
//! Only statement bodies reachable by walking declarations (function/class
//! method bodies, block/control-flow bodies) are visited; a function
//! expression buried inside an arbitrary expression is left alone, since
//! `spec.md`'s scope is syntactic lowering, not full tree minification.

use tsz_parser::ast::{BinOp, CatchClause, Expr, Stmt, SwitchCase, VarDeclarator, VarKind};

/// Entry point: simplifies one statement list end to end.
pub fn mangle_statements(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let simplified: Vec<Stmt> = stmts.into_iter().map(simplify_stmt).collect();
    let simplified = eliminate_constant_branches(simplified);
    drop_dead_code(collapse_if_return(merge_adjacent(simplified)))
}

fn simplify_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Block(body, span) => Stmt::Block(mangle_statements(body), span),
        Stmt::If { test, consequent, alternate, span } => {
            let consequent = Box::new(unwrap_single(simplify_stmt(*consequent)));
            let alternate = alternate.and_then(|a| {
                let a = simplify_stmt(*a);
                if is_empty(&a) {
                    None
                } else {
                    Some(Box::new(unwrap_single(a)))
                }
            });
            Stmt::If { test, consequent, alternate, span }
        }
        Stmt::While { test, body, span } => {
            let body = Box::new(unwrap_single(simplify_stmt(*body)));
            Stmt::For { init: None, test: Some(test), update: None, body, span }
        }
        Stmt::For { init, test, update, body, span } => Stmt::For {
            init: init.map(|b| Box::new(simplify_stmt(*b))),
            test,
            update,
            body: Box::new(unwrap_single(simplify_stmt(*body))),
            span,
        },
        Stmt::ForIn { left, right, body, span } => {
            Stmt::ForIn { left, right, body: Box::new(unwrap_single(simplify_stmt(*body))), span }
        }
        Stmt::ForOf { left, right, body, is_await, span } => {
            Stmt::ForOf { left, right, body: Box::new(unwrap_single(simplify_stmt(*body))), is_await, span }
        }
        Stmt::DoWhile { body, test, span } => Stmt::DoWhile { body: Box::new(unwrap_single(simplify_stmt(*body))), test, span },
        Stmt::With { object, body, span } => Stmt::With { object, body: Box::new(unwrap_single(simplify_stmt(*body))), span },
        Stmt::Labeled { label, body, span } => Stmt::Labeled { label, body: Box::new(unwrap_single(simplify_stmt(*body))), span },
        Stmt::Switch { discriminant, cases, span } => {
            let cases = cases.into_iter().map(|c| SwitchCase { test: c.test, body: mangle_statements(c.body) }).collect();
            Stmt::Switch { discriminant, cases, span }
        }
        Stmt::Try { block, handler, finalizer, span } => {
            let block = mangle_statements(block);
            let handler = handler.map(|h| CatchClause { param: h.param, body: mangle_statements(h.body) });
            let finalizer = finalizer.map(mangle_statements);
            Stmt::Try { block, handler, finalizer, span }
        }
        Stmt::FunctionDecl(mut f) => {
            f.body = mangle_statements(std::mem::take(&mut f.body));
            Stmt::FunctionDecl(f)
        }
        Stmt::ClassDecl(mut c) => {
            for prop in &mut c.properties {
                if let Some(Expr::Function(func)) = &mut prop.value {
                    func.body = mangle_statements(std::mem::take(&mut func.body));
                }
            }
            Stmt::ClassDecl(c)
        }
        other => other,
    }
}

fn unwrap_single(s: Stmt) -> Stmt {
    if let Stmt::Block(mut body, span) = s {
        if body.len() == 1 {
            return body.pop().expect("len checked above");
        }
        return Stmt::Block(body, span);
    }
    s
}

fn is_empty(s: &Stmt) -> bool {
    matches!(s, Stmt::Block(b, _) if b.is_empty()) || matches!(s, Stmt::Empty(_))
}

fn same_var_kind(a: &VarKind, b: &VarKind) -> bool {
    matches!((a, b), (VarKind::Var, VarKind::Var) | (VarKind::Let, VarKind::Let) | (VarKind::Const, VarKind::Const))
}

/// Merges adjacent `var`/`let`/`const` declarations of the same kind, and
/// adjacent expression statements via the comma operator.
fn merge_adjacent(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut out: Vec<Stmt> = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        let merged = match (out.pop(), stmt) {
            (Some(Stmt::VarDecl { kind: pk, declarations: mut pd, span }), Stmt::VarDecl { kind: nk, declarations: nd, .. })
                if same_var_kind(&pk, &nk) =>
            {
                pd.extend(nd);
                Stmt::VarDecl { kind: pk, declarations: pd, span }
            }
            (Some(Stmt::Expr(pe, span)), Stmt::Expr(ne, _)) => {
                Stmt::Expr(Expr::Binary { op: BinOp::Comma, left: Box::new(pe), right: Box::new(ne), span }, span)
            }
            (Some(prev), cur) => {
                out.push(prev);
                cur
            }
            (None, cur) => cur,
        };
        out.push(merged);
    }
    out
}

/// `if (false) var x; x = 1;` -> `var x; x = 1;` (scenario 5): an `if` whose
/// test already folded to a literal boolean is replaced by whichever branch
/// runs, flattened into the surrounding list; the branch that doesn't run
/// still contributes any hoisted `var` names it declares, initializers
/// discarded, so later references keep seeing `undefined` rather than a
/// reference error.
fn eliminate_constant_branches(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut out = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        match stmt {
            Stmt::If { test: Expr::Bool(b, _), consequent, alternate, .. } => {
                let (taken, dropped) =
                    if b { (Some(*consequent), alternate.map(|a| *a)) } else { (alternate.map(|a| *a), Some(*consequent)) };
                if let Some(t) = taken {
                    out.extend(flatten_into_list(t));
                }
                if let Some(d) = &dropped {
                    let mut hoisted = Vec::new();
                    collect_hoisted(d, &mut hoisted);
                    if !hoisted.is_empty() {
                        let span = hoisted[0].name.span();
                        out.push(Stmt::VarDecl { kind: VarKind::Var, declarations: hoisted, span });
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn flatten_into_list(s: Stmt) -> Vec<Stmt> {
    match s {
        Stmt::Block(body, _) => body,
        Stmt::Empty(_) => Vec::new(),
        other => vec![other],
    }
}

fn is_bare_return(s: &Stmt) -> bool {
    matches!(s, Stmt::Return(..))
}

/// `if (e) return a; return b;` -> `return e ? a : b;`
fn collapse_if_return(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut out: Vec<Stmt> = Vec::with_capacity(stmts.len());
    for stmt in stmts {
        let merged = match (out.pop(), stmt) {
            (Some(Stmt::If { test, consequent, alternate: None, span }), Stmt::Return(else_value, _)) if is_bare_return(&consequent) => {
                let Stmt::Return(then_value, _) = *consequent else {
                    unreachable!("checked by is_bare_return above")
                };
                let value = Expr::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(then_value.unwrap_or(Expr::Undefined(span))),
                    alternate: Box::new(else_value.unwrap_or(Expr::Undefined(span))),
                    span,
                };
                Stmt::Return(Some(value), span)
            }
            (Some(prev), cur) => {
                out.push(prev);
                cur
            }
            (None, cur) => cur,
        };
        out.push(merged);
    }
    out
}

/// Drops statements made unreachable by a preceding `return`/`throw`/
/// `break`/`continue`, but keeps any `var` bindings they declared (with
/// their initializers discarded) so later references still see `undefined`
/// instead of a reference error.
fn drop_dead_code(stmts: Vec<Stmt>) -> Vec<Stmt> {
    let mut out = Vec::with_capacity(stmts.len());
    let mut terminated = false;
    let mut hoisted: Vec<VarDeclarator> = Vec::new();
    for stmt in stmts {
        if terminated {
            collect_hoisted(&stmt, &mut hoisted);
            continue;
        }
        let is_terminator = matches!(stmt, Stmt::Return(..) | Stmt::Throw(..) | Stmt::Break(..) | Stmt::Continue(..));
        out.push(stmt);
        if is_terminator {
            terminated = true;
        }
    }
    if !hoisted.is_empty() {
        let span = hoisted[0].name.span();
        out.push(Stmt::VarDecl { kind: VarKind::Var, declarations: hoisted, span });
    }
    out
}

fn collect_hoisted(stmt: &Stmt, out: &mut Vec<VarDeclarator>) {
    match stmt {
        Stmt::VarDecl { kind: VarKind::Var, declarations, .. } => {
            out.extend(declarations.iter().map(|d| VarDeclarator { name: d.name.clone(), init: None }));
        }
        Stmt::Block(body, _) => body.iter().for_each(|s| collect_hoisted(s, out)),
        Stmt::If { consequent, alternate, .. } => {
            collect_hoisted(consequent, out);
            if let Some(a) = alternate {
                collect_hoisted(a, out);
            }
        }
        Stmt::For { init, body, .. } => {
            if let Some(i) = init {
                collect_hoisted(i, out);
            }
            collect_hoisted(body, out);
        }
        Stmt::ForIn { left, body, .. } | Stmt::ForOf { left, body, .. } => {
            collect_hoisted(left, out);
            collect_hoisted(body, out);
        }
        Stmt::While { body, .. } | Stmt::DoWhile { body, .. } | Stmt::Labeled { body, .. } | Stmt::With { body, .. } => {
            collect_hoisted(body, out);
        }
        Stmt::Try { block, handler, finalizer, .. } => {
            block.iter().for_each(|s| collect_hoisted(s, out));
            if let Some(h) = handler {
                h.body.iter().for_each(|s| collect_hoisted(s, out));
            }
            if let Some(f) = finalizer {
                f.iter().for_each(|s| collect_hoisted(s, out));
            }
        }
        Stmt::Switch { cases, .. } => cases.iter().for_each(|c| c.body.iter().for_each(|s| collect_hoisted(s, out))),
        _ => {}
    }
}

#[cfg(test)]
#[path = "../tests/mangle.rs"]
mod tests;
