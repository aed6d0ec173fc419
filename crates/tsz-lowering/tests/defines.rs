use super::*;
use tsz_common::Span;
use tsz_parser::ast::Expr;

#[test]
fn looks_up_a_dotted_path() {
    let defines = Defines::new([("process.env.NODE_ENV".to_string(), Expr::String("production".encode_utf16().collect(), Span::new(0, 0)))]);
    let segments = vec!["process".to_string(), "env".to_string(), "NODE_ENV".to_string()];
    assert!(defines.lookup(&segments).is_some());
}

#[test]
fn looks_up_a_bare_identifier() {
    let defines = Defines::new([("DEBUG".to_string(), Expr::Bool(false, Span::new(0, 0)))]);
    assert!(defines.lookup(&["DEBUG".to_string()]).is_some());
}

#[test]
fn unknown_path_misses() {
    let defines = Defines::new([("DEBUG".to_string(), Expr::Bool(false, Span::new(0, 0)))]);
    assert!(defines.lookup(&["OTHER".to_string()]).is_none());
}

#[test]
fn partial_prefix_does_not_match_longer_key() {
    let defines = Defines::new([("a.b.c".to_string(), Expr::Bool(true, Span::new(0, 0)))]);
    assert!(defines.lookup(&["a".to_string(), "b".to_string()]).is_none());
}

#[test]
fn empty_map_reports_empty() {
    let defines = Defines::new(std::iter::empty());
    assert!(defines.is_empty());
}

#[test]
fn nonempty_map_reports_not_empty() {
    let defines = Defines::new([("x".to_string(), Expr::Bool(true, Span::new(0, 0)))]);
    assert!(!defines.is_empty());
}
