use super::*;
use tsz_common::{DeferredLog, ImportKind, Log, ScriptTarget, Source, SourceId};
use tsz_parser::ast::{BinOp, Expr, Stmt};
use tsz_parser::Parser;

struct Lowered {
    ast: tsz_parser::Ast,
    import_paths: Vec<tsz_common::ImportPath>,
}

fn lower_source(src: &str, target: ScriptTarget, is_bundling: bool) -> Lowered {
    let log = DeferredLog::new();
    let parser = Parser::new(src, SourceId(0), &log, false).expect("lex ok");
    let (mut ast, mut scopes, mut names) = parser.parse_program().expect("parse ok");
    let source = Source::new(SourceId(0), "k".into(), "p.js".into(), src.to_string());
    let bound = tsz_binder::Binder::new(&source, &names, &mut scopes, &log, is_bundling).bind(&mut ast);
    assert!(!log.has_errors(), "unexpected diagnostics for {src:?}: {:?}", log.done());
    let defines = Defines::new(std::iter::empty());
    let options = LoweringOptions { target, defines: &defines, mangle_syntax: false, is_bundling };
    let output = Lowering::new(&source, &mut names, &mut scopes, &bound.symbols, options).lower(&mut ast);
    Lowered { ast, import_paths: output.import_paths }
}

#[test]
fn optional_chain_lowers_to_a_null_check_conditional_below_es2020() {
    let lowered = lower_source("a?.b;", ScriptTarget::ES2015, false);
    let Stmt::Expr(Expr::Conditional { test, .. }, _) = &lowered.ast.body[0] else {
        panic!("expected a conditional expression statement");
    };
    assert!(matches!(**test, Expr::Binary { op: BinOp::Eq, .. }));
}

#[test]
fn optional_chain_is_left_alone_at_esnext() {
    let lowered = lower_source("a?.b;", ScriptTarget::ESNext, false);
    assert!(matches!(lowered.ast.body[0], Stmt::Expr(Expr::Dot { .. }, _)));
}

#[test]
fn nullish_coalescing_lowers_to_a_not_equal_conditional() {
    let lowered = lower_source("a ?? b;", ScriptTarget::ES2015, false);
    let Stmt::Expr(Expr::Conditional { test, .. }, _) = &lowered.ast.body[0] else {
        panic!("expected a conditional expression statement");
    };
    assert!(matches!(**test, Expr::Binary { op: BinOp::NotEq, .. }));
}

#[test]
fn nullish_coalescing_with_literal_operands_still_lowers_to_a_conditional_at_es2019() {
    // spec.md §8 scenario 1: `let x = 1 ?? 2` at ES2019 must become
    // `1 != null ? 1 : 2`, not fold straight to the literal `1`.
    let lowered = lower_source("let x = 1 ?? 2;", ScriptTarget::ES2019, false);
    let Stmt::VarDecl { declarations, .. } = &lowered.ast.body[0] else {
        panic!("expected a var declaration");
    };
    let Some(Expr::Conditional { test, consequent, alternate, .. }) = &declarations[0].init else {
        panic!("expected a conditional initializer");
    };
    assert!(matches!(**test, Expr::Binary { op: BinOp::NotEq, .. }));
    assert!(matches!(**consequent, Expr::Number(n, _) if n == 1.0));
    assert!(matches!(**alternate, Expr::Number(n, _) if n == 2.0));
}

#[test]
fn nullish_coalescing_with_literal_operands_is_preserved_verbatim_at_esnext() {
    let lowered = lower_source("let x = 1 ?? 2;", ScriptTarget::ESNext, false);
    let Stmt::VarDecl { declarations, .. } = &lowered.ast.body[0] else {
        panic!("expected a var declaration");
    };
    assert!(matches!(declarations[0].init, Some(Expr::Binary { op: BinOp::NullishCoalescing, .. })));
}

#[test]
fn class_field_becomes_a_constructor_assignment() {
    let lowered = lower_source("class C { x = 1; }", ScriptTarget::ES2015, false);
    let Stmt::ClassDecl(class) = &lowered.ast.body[0] else {
        panic!("expected a class declaration");
    };
    // The field is gone; a synthesized constructor assigning `this.x` is
    // the class's only remaining member.
    assert_eq!(class.properties.len(), 1);
    assert!(class.properties[0].is_method);
    let Some(Expr::Function(ctor)) = &class.properties[0].value else {
        panic!("expected the synthesized constructor's function value");
    };
    assert_eq!(ctor.body.len(), 1);
    assert!(matches!(
        ctor.body[0],
        Stmt::Expr(Expr::Binary { op: BinOp::Assign(None), .. }, _)
    ));
}

#[test]
fn require_inside_a_statically_dead_branch_is_not_recorded_as_an_import() {
    let lowered = lower_source(r#"if (false) { require("./dead"); }"#, ScriptTarget::ES2015, true);
    assert!(lowered.import_paths.is_empty());
}

#[test]
fn import_paths_are_recorded_static_first_then_visit_order() {
    let src = r#"require("./a"); import("./b"); import c from "./c";"#;
    let lowered = lower_source(src, ScriptTarget::ES2015, true);
    let paths: Vec<_> = lowered.import_paths.iter().map(|p| (p.path.as_str(), p.kind)).collect();
    assert_eq!(
        paths,
        vec![("./c", ImportKind::Static), ("./a", ImportKind::Require), ("./b", ImportKind::Dynamic)]
    );
}

#[test]
fn single_argument_require_call_parses_as_a_distinct_require_node() {
    let lowered = lower_source(r#"require("./a");"#, ScriptTarget::ES2015, true);
    assert!(matches!(lowered.ast.body[0], Stmt::Expr(Expr::Require { .. }, _)));
    assert_eq!(lowered.import_paths, vec![tsz_common::ImportPath { path: "./a".into(), kind: ImportKind::Require }]);
}
