use super::*;
use tsz_common::Span;
use tsz_parser::ast::{Ast, ImportStmt};
use tsz_parser::refs::Ref;

fn s() -> Span {
    Span::new(0, 1)
}

fn import_stmt(namespace: Option<Ref>, source: &str) -> Stmt {
    Stmt::Import(Box::new(ImportStmt {
        default: None,
        namespace,
        named: Vec::new(),
        source: source.to_string(),
        span: s(),
    }))
}

#[test]
fn static_import_paths_are_collected_in_declaration_order() {
    let ast = Ast {
        body: vec![
            import_stmt(None, "a"),
            Stmt::ExportStar { alias: None, source: "b".to_string(), span: s() },
            Stmt::ExportNamed { specifiers: vec![], source: Some("c".to_string()), span: s() },
            Stmt::ExportNamed { specifiers: vec![], source: None, span: s() },
        ],
        hashbang: None,
    };
    let paths = collect_static_import_paths(&ast);
    assert_eq!(paths.iter().map(|p| p.path.as_str()).collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert!(paths.iter().all(|p| p.kind == ImportKind::Static));
}

#[test]
fn namespace_refs_are_collected_from_import_statements() {
    let ns = Ref::External(0);
    let ast =
        Ast { body: vec![import_stmt(Some(ns), "a"), import_stmt(None, "b")], hashbang: None };
    let refs = collect_namespace_refs(&ast);
    assert_eq!(refs, vec![ns]);
}

#[test]
fn static_string_argument_accepts_string_and_no_substitution_template() {
    let string = Expr::String("foo".encode_utf16().collect(), s());
    assert_eq!(static_string_argument(&string), Some("foo".to_string()));

    let template = Expr::Template { quasis: vec!["bar".encode_utf16().collect()], exprs: vec![], span: s() };
    assert_eq!(static_string_argument(&template), Some("bar".to_string()));

    let interpolated =
        Expr::Template { quasis: vec![Vec::new(), Vec::new()], exprs: vec![Expr::Number(1.0, s())], span: s() };
    assert_eq!(static_string_argument(&interpolated), None);

    assert_eq!(static_string_argument(&Expr::Number(1.0, s())), None);
}

#[test]
fn namespace_imports_cache_one_item_ref_per_alias() {
    let mut imports = NamespaceImports::new();
    let ns = Ref::External(0);
    imports.register(ns);
    assert!(imports.is_namespace(ns));
    assert!(!imports.is_namespace(Ref::External(1)));

    assert_eq!(imports.get(ns, "x"), None);
    let first = Ref::External(10);
    imports.insert(ns, "x", first);
    assert_eq!(imports.get(ns, "x"), Some(first), "repeated accesses of the same alias share one binding");

    let second = Ref::External(11);
    imports.insert(ns, "y", second);
    assert_eq!(imports.get(ns, "y"), Some(second));
    assert_ne!(imports.get(ns, "x"), imports.get(ns, "y"));
}
