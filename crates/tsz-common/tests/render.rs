use super::*;
use crate::diagnostics::{Diagnostic, DiagnosticRange, LogLevel, MsgId};
use crate::source::{Source, SourceId};
use crate::span::Span;

fn make_source(contents: &str) -> Source {
    Source::new(SourceId(0), "k".into(), "demo.ts".into(), contents.to_string())
}

#[test]
fn codepoint_column_counts_scalars_not_bytes() {
    // "café" - the 'é' is 2 bytes in UTF-8 but one scalar value.
    assert_eq!(codepoint_column("café", "café".len()), 4);
}

#[test]
fn codepoint_column_ignores_leading_bom() {
    let line = "\u{feff}let x";
    // byte offset of 'l' is right after the 3-byte BOM.
    let offset = '\u{feff}'.len_utf8();
    assert_eq!(codepoint_column(line, offset), 0);
}

#[test]
fn expand_tabs_rounds_up_to_next_stop() {
    let (expanded, _) = expand_tabs("a\tb");
    assert_eq!(expanded, "a b");
}

#[test]
fn truncate_centered_keeps_short_lines_untouched() {
    let (shown, shift) = truncate_centered("short", 80, 0, 2);
    assert_eq!(shown, "short");
    assert_eq!(shift, 0);
}

#[test]
fn truncate_centered_inserts_ellipsis_for_long_lines() {
    let line = "x".repeat(200);
    let (shown, _) = truncate_centered(&line, 40, 100, 101);
    assert!(shown.starts_with("..."));
    assert!(shown.ends_with("..."));
}

#[test]
fn render_diagnostic_without_location_has_no_excerpt() {
    let d = Diagnostic::new(
        MsgId::ParseExpectedSemicolon,
        LogLevel::Error,
        "Expected ';'.".into(),
        None,
    );
    let rendered = render_diagnostic(&d, None, ColorMode::Never);
    assert_eq!(rendered, "\u{2716} [ERROR]: Expected ';'.");
}

#[test]
fn render_diagnostic_with_location_includes_excerpt_and_caret() {
    let source = make_source("let x = 1\nlet y = 2;\n");
    let d = Diagnostic::new(
        MsgId::ParseUnexpectedToken,
        LogLevel::Error,
        "Unexpected token '='.".into(),
        Some(DiagnosticRange {
            source: source.index,
            span: Span::new(4, 5),
        }),
    );
    let rendered = render_diagnostic(&d, Some(&source), ColorMode::Never);
    assert!(rendered.contains("demo.ts:1:5"));
    assert!(rendered.contains('^') || rendered.contains('~'));
}

#[test]
fn render_summary_reports_counts() {
    let s = render_summary(2, 2, 1, 1);
    assert_eq!(s, "2 errors, 1 warning");
}

#[test]
fn render_summary_reports_partial_shown_count() {
    let s = render_summary(1, 2, 0, 0);
    assert_eq!(s, "2 errors (shown 1 of 2)");
}

#[test]
fn render_summary_empty_when_nothing_logged() {
    assert_eq!(render_summary(0, 0, 0, 0), "");
}

#[test]
fn wrap_note_splits_on_width() {
    let wrapped = wrap_note("one two three four five", 12, false);
    assert!(wrapped.lines().all(|l| l.chars().count() <= 10));
}

#[test]
fn linkify_wraps_urls_in_osc8() {
    let out = linkify("see https://example.com/docs for more");
    assert!(out.contains("\x1b]8;;https://example.com/docs"));
}

#[test]
fn linkify_excludes_trailing_punctuation_from_the_link() {
    let out = linkify("see https://example.com/docs, then https://example.com/more.");
    assert!(out.contains("\x1b]8;;https://example.com/docs\x1b\\https://example.com/docs\x1b]8;;\x1b\\,"));
    assert!(out.contains("\x1b]8;;https://example.com/more\x1b\\https://example.com/more\x1b]8;;\x1b\\."));
}
