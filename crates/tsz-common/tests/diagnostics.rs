use super::*;
use crate::source::{Source, SourceId};
use crate::span::Span;
use rustc_hash::FxHashMap;

fn range(start: u32, end: u32) -> DiagnosticRange {
    DiagnosticRange {
        source: SourceId(0),
        span: Span::new(start, end),
    }
}

#[test]
fn deferred_log_counts_errors() {
    let log = DeferredLog::new();
    log.add_msg(Diagnostic::new(
        MsgId::ParseExpectedSemicolon,
        LogLevel::Error,
        "Expected ';'.".into(),
        None,
    ));
    assert!(log.has_errors());
    assert_eq!(log.done().len(), 1);
}

#[test]
fn deferred_log_sorts_located_before_unlocated_last() {
    let log = DeferredLog::new();
    log.add_msg(Diagnostic::new(
        MsgId::WarnDuplicateExport,
        LogLevel::Warning,
        "z".into(),
        Some(range(10, 12)),
    ));
    log.add_msg(Diagnostic::new(
        MsgId::ParseUnexpectedToken,
        LogLevel::Error,
        "a".into(),
        None,
    ));
    let done = log.done();
    assert!(done[0].range.is_none());
    assert!(done[1].range.is_some());
}

#[test]
fn deferred_log_sorts_located_messages_by_offset() {
    let log = DeferredLog::new();
    log.add_msg(Diagnostic::new(
        MsgId::ParseUnexpectedToken,
        LogLevel::Error,
        "second".into(),
        Some(range(20, 21)),
    ));
    log.add_msg(Diagnostic::new(
        MsgId::ParseUnexpectedToken,
        LogLevel::Error,
        "first".into(),
        Some(range(5, 6)),
    ));
    let done = log.done();
    assert_eq!(done[0].text, "first");
    assert_eq!(done[1].text, "second");
}

#[test]
fn from_catalog_applies_override() {
    let mut overrides = FxHashMap::default();
    overrides.insert(MsgId::WarnDuplicateExport, LogLevel::Silent);
    let d = Diagnostic::from_catalog(MsgId::WarnDuplicateExport, &["x"], None, &overrides);
    assert_eq!(d.level, LogLevel::Silent);
    assert_eq!(d.text, "Duplicate export 'x'.");
}

#[test]
fn from_catalog_uses_default_level_without_override() {
    let overrides = FxHashMap::default();
    let d = Diagnostic::from_catalog(MsgId::ParseExpectedSemicolon, &[], None, &overrides);
    assert_eq!(d.level, LogLevel::Error);
}

#[test]
fn stderr_log_silent_override_is_dropped() {
    let mut overrides = FxHashMap::default();
    overrides.insert(MsgId::WarnDuplicateExport, LogLevel::Silent);
    let log = StderrLog::new(0, overrides, render::ColorMode::Never);
    log.add_msg(Diagnostic::new(
        MsgId::WarnDuplicateExport,
        LogLevel::Warning,
        "dup".into(),
        None,
    ));
    assert!(!log.has_errors());
    assert_eq!(log.done().len(), 0);
}

#[test]
fn stderr_log_tracks_errors_separately_from_warnings() {
    let log = StderrLog::with_defaults();
    log.add_msg(Diagnostic::new(
        MsgId::WarnDuplicateExport,
        LogLevel::Warning,
        "dup".into(),
        None,
    ));
    assert!(!log.has_errors());
    log.add_msg(Diagnostic::new(
        MsgId::ParseExpectedSemicolon,
        LogLevel::Error,
        "boom".into(),
        None,
    ));
    assert!(log.has_errors());
    assert_eq!(log.done().len(), 2);
}

#[test]
fn stderr_log_done_is_idempotent() {
    let log = StderrLog::with_defaults();
    log.add_msg(Diagnostic::new(
        MsgId::ParseExpectedSemicolon,
        LogLevel::Error,
        "boom".into(),
        None,
    ));
    let first = log.done();
    let second = log.done();
    assert_eq!(first.len(), second.len());
}

#[test]
fn log_level_parses_known_names() {
    assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
    assert_eq!(LogLevel::parse("silent"), Some(LogLevel::Silent));
    assert_eq!(LogLevel::parse("loud"), None);
}

// keep Source import referenced for range() helper's type
#[allow(dead_code)]
fn _uses_source(_s: &Source) {}
