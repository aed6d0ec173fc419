use super::*;
use crate::args::{CliArgs, LogLevelArg};
use clap::Parser;
use tsz_common::diagnostics::render::ColorMode;
use tsz_common::{ColorModeArg, DeferredLog, LogLevel, LogPreflight};

fn base_args(path: &str) -> CliArgs {
    CliArgs::parse_from(["tszfe", path])
}

#[test]
fn resolve_color_mode_prefers_explicit_flag_over_preflight() {
    let mut args = base_args("a.ts");
    args.color = Some(true);
    let preflight = LogPreflight {
        color: Some(ColorModeArg::False),
        ..Default::default()
    };
    assert_eq!(resolve_color_mode(&args, &preflight), ColorMode::Always);
}

#[test]
fn resolve_color_mode_falls_back_to_preflight_then_auto() {
    let args = base_args("a.ts");
    let preflight = LogPreflight {
        color: Some(ColorModeArg::False),
        ..Default::default()
    };
    assert_eq!(resolve_color_mode(&args, &preflight), ColorMode::Never);
    assert_eq!(resolve_color_mode(&args, &LogPreflight::default()), ColorMode::IfTerminal);
}

#[test]
fn resolve_log_limit_prefers_flag_then_preflight_then_default() {
    let mut args = base_args("a.ts");
    args.log_limit = Some(5);
    let preflight = LogPreflight { log_limit: Some(20), ..Default::default() };
    assert_eq!(resolve_log_limit(&args, &preflight), 5);

    args.log_limit = None;
    assert_eq!(resolve_log_limit(&args, &preflight), 20);
    assert_eq!(
        resolve_log_limit(&args, &LogPreflight::default()),
        tsz_common::limits::DEFAULT_LOG_MESSAGE_LIMIT
    );
}

#[test]
fn resolve_log_level_prefers_flag_then_preflight_then_info() {
    let mut args = base_args("a.ts");
    args.log_level = Some(LogLevelArg::Error);
    let preflight = LogPreflight { log_level: Some(LogLevel::Warning), ..Default::default() };
    assert_eq!(resolve_log_level(&args, &preflight), LogLevel::Error);

    args.log_level = None;
    assert_eq!(resolve_log_level(&args, &preflight), LogLevel::Warning);
    assert_eq!(resolve_log_level(&args, &LogPreflight::default()), LogLevel::Info);
}

#[test]
fn threshold_log_drops_messages_below_the_configured_level() {
    let inner = DeferredLog::new();
    let threshold = ThresholdLog::new(&inner, LogLevel::Error);
    threshold.add_msg(tsz_common::Diagnostic::new(
        tsz_common::MsgId::WarnDuplicateExport,
        LogLevel::Warning,
        "dup".into(),
        None,
    ));
    threshold.add_msg(tsz_common::Diagnostic::new(
        tsz_common::MsgId::ParseUnexpectedToken,
        LogLevel::Error,
        "bad token".into(),
        None,
    ));
    let messages = threshold.done();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, LogLevel::Error);
}

#[test]
fn run_reports_ok_for_a_clean_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("clean.ts");
    std::fs::write(&path, "let x = 1 + 2;").expect("write");

    let args = base_args(path.to_str().unwrap());
    let source = read_source(&path).expect("read source");
    let log = DeferredLog::new();
    let ok = run(&args, &source, &log).expect("run should not error");
    assert!(ok);
    assert!(log.done().is_empty());
}

#[test]
fn run_reports_not_ok_for_a_syntax_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.ts");
    std::fs::write(&path, "let x = \"unterminated").expect("write");

    let args = base_args(path.to_str().unwrap());
    let source = read_source(&path).expect("read source");
    let log = DeferredLog::new();
    let ok = run(&args, &source, &log).expect("run should not error");
    assert!(!ok);
}
