use super::*;
use tsz_common::Span;

#[test]
fn default_jsx_options_match_classic_react_runtime() {
    let jsx = JsxOptions::default();
    assert_eq!(jsx.factory, vec!["React".to_string(), "createElement".to_string()]);
    assert_eq!(jsx.fragment, vec!["React".to_string(), "Fragment".to_string()]);
}

#[test]
fn default_parse_options_enable_typescript_and_disable_jsx() {
    let options = ParseOptions::default();
    assert!(options.ts_parse);
    assert!(!options.jsx_parse);
    assert!(!options.is_bundling);
    assert!(!options.mangle_syntax);
}

#[test]
fn define_value_string_becomes_a_utf16_string_literal() {
    let value = DefineValue::String("production".to_string());
    let expr = value.to_expr(Span::dummy());
    match expr {
        Expr::String(units, _) => assert_eq!(units, "production".encode_utf16().collect::<Vec<_>>()),
        other => panic!("expected a string literal, got {other:?}"),
    }
}

#[test]
fn define_value_number_and_bool_and_null_round_trip() {
    assert!(matches!(DefineValue::Number(1.0).to_expr(Span::dummy()), Expr::Number(n, _) if n == 1.0));
    assert!(matches!(DefineValue::Bool(true).to_expr(Span::dummy()), Expr::Bool(true, _)));
    assert!(matches!(DefineValue::Null.to_expr(Span::dummy()), Expr::Null(_)));
}

#[test]
fn parse_options_round_trip_through_json() {
    let options = ParseOptions {
        is_bundling: true,
        ..Default::default()
    };
    let json = serde_json::to_string(&options).expect("serialize");
    let back: ParseOptions = serde_json::from_str(&json).expect("deserialize");
    assert!(back.is_bundling);
    assert!(back.ts_parse);
}
