use tsz_common::diagnostics::{DeferredLog, Log, MsgId};
use tsz_common::SourceId;
use tsz_scanner::{Lexer, SyntaxKind, TokenValue};

fn lex_all(src: &str) -> Vec<SyntaxKind> {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new(src, SourceId(0));
    let mut kinds = Vec::new();
    loop {
        let tok = lexer.next(&log).expect("lex error");
        let done = tok.kind == SyntaxKind::EndOfFile;
        kinds.push(tok.kind);
        if done {
            break;
        }
    }
    kinds
}

#[test]
fn lexes_identifier_and_keyword() {
    let kinds = lex_all("let x");
    assert_eq!(
        kinds,
        vec![SyntaxKind::LetKeyword, SyntaxKind::Identifier, SyntaxKind::EndOfFile]
    );
}

#[test]
fn lexes_numeric_literal_with_separators() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("1_000", SourceId(0));
    let tok = lexer.next(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::NumericLiteral);
    assert_eq!(tok.value, TokenValue::Number(1000.0));
}

#[test]
fn legacy_octal_literal_warns_but_still_lexes() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("0123", SourceId(0));
    let tok = lexer.next(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::NumericLiteral);
    let messages = log.done();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, MsgId::LexLegacyOctalLiteral);
}

#[test]
fn plain_zero_prefixed_float_does_not_warn() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("0.5", SourceId(0));
    lexer.next(&log).unwrap();
    assert!(log.done().is_empty());
}

#[test]
fn lexes_bigint_literal() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("42n", SourceId(0));
    let tok = lexer.next(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::BigIntLiteral);
}

#[test]
fn lexes_string_with_escapes_to_utf16() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new(r#""a\nb""#, SourceId(0));
    let tok = lexer.next(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::StringLiteral);
    assert_eq!(tok.value, TokenValue::String(vec!['a' as u16, '\n' as u16, 'b' as u16]));
}

#[test]
fn unterminated_string_raises_panic() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("\"abc", SourceId(0));
    assert!(lexer.next(&log).is_err());
}

#[test]
fn greedy_operator_match_picks_longest() {
    let kinds = lex_all(">>>=");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::EndOfFile
        ]
    );
}

#[test]
fn template_head_then_rescanned_tail() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("`a${1}b`", SourceId(0));
    let head = lexer.next(&log).unwrap();
    assert_eq!(head.kind, SyntaxKind::TemplateHead);
    let one = lexer.next(&log).unwrap();
    assert_eq!(one.kind, SyntaxKind::NumericLiteral);
    let tail = lexer.rescan_close_brace_as_template_token(&log).unwrap();
    assert_eq!(tail.kind, SyntaxKind::TemplateTail);
    assert_eq!(tail.value, TokenValue::String(vec!['b' as u16]));
}

#[test]
fn scan_regex_after_slash_token() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("/foo/gim", SourceId(0));
    let tok = lexer.scan_regex(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::RegularExpressionLiteral);
}

#[test]
fn newline_before_flag_enables_asi() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("a\nb", SourceId(0));
    let _a = lexer.next(&log).unwrap();
    let b = lexer.next(&log).unwrap();
    assert!(b.has_newline_before);
}

#[test]
fn expect_or_insert_semicolon_accepts_close_brace() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("}", SourceId(0));
    let _ = lexer.next(&log).unwrap();
    assert!(lexer.expect_or_insert_semicolon(&log).is_ok());
}

#[test]
fn expect_greater_than_splits_shift_token() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new(">>", SourceId(0));
    let tok = lexer.next(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::GreaterThanGreaterThanToken);
    let first = lexer.expect_greater_than(false);
    assert_eq!(first.kind, SyntaxKind::GreaterThanToken);
    assert_eq!(lexer.kind(), SyntaxKind::GreaterThanToken);
}

#[test]
fn jsx_element_mode_splits_closing_tag() {
    let log = DeferredLog::new();
    let mut lexer = Lexer::new("</div>", SourceId(0));
    let tok = lexer.next_inside_jsx_element(&log).unwrap();
    assert_eq!(tok.kind, SyntaxKind::LessThanSlashToken);
}

#[test]
fn jsx_child_mode_reads_text_until_brace() {
    let mut lexer = Lexer::new("hello {name}", SourceId(0));
    let tok = lexer.next_jsx_element_child();
    assert_eq!(tok.kind, SyntaxKind::JsxText);
    assert_eq!(
        tok.value,
        TokenValue::String("hello ".encode_utf16().collect())
    );
}
