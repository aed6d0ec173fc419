use super::*;
use clap::Parser;

#[test]
fn defaults_enable_typescript_and_target_esnext() {
    let args = CliArgs::parse_from(["tszfe", "a.ts"]);
    assert!(args.ts);
    assert!(!args.jsx);
    assert_eq!(args.target, TargetArg::EsNext);
    assert!(args.color.is_none());
}

#[test]
fn target_arg_converts_to_script_target_in_order() {
    assert!(tsz_common::ScriptTarget::from(TargetArg::Es2015) < tsz_common::ScriptTarget::from(TargetArg::Es2020));
    assert_eq!(
        tsz_common::ScriptTarget::from(TargetArg::EsNext),
        tsz_common::ScriptTarget::ESNext
    );
}

#[test]
fn log_level_arg_converts_to_log_level() {
    assert_eq!(tsz_common::LogLevel::from(LogLevelArg::Error), tsz_common::LogLevel::Error);
    assert_eq!(tsz_common::LogLevel::from(LogLevelArg::Silent), tsz_common::LogLevel::Silent);
}

#[test]
fn bundle_and_mangle_flags_parse() {
    let args = CliArgs::parse_from(["tszfe", "--bundle", "--mangle", "a.ts"]);
    assert!(args.is_bundling);
    assert!(args.mangle);
}

#[test]
fn color_flag_parses_bool() {
    let args = CliArgs::parse_from(["tszfe", "--color", "true", "a.ts"]);
    assert_eq!(args.color, Some(true));
}
