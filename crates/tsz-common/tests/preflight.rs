use super::*;
use crate::diagnostics::LogLevel;
use crate::diagnostics::render::ColorMode;

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_argv_yields_all_none() {
    let preflight = preparse_log_args(&argv(&[]));
    assert_eq!(preflight, LogPreflight::default());
}

#[test]
fn recognizes_color_true_and_false() {
    assert_eq!(
        preparse_log_args(&argv(&["--color=true"])).color,
        Some(ColorModeArg::True)
    );
    assert_eq!(
        preparse_log_args(&argv(&["--color=false"])).color,
        Some(ColorModeArg::False)
    );
}

#[test]
fn recognizes_log_level() {
    let preflight = preparse_log_args(&argv(&["--log-level=warning"]));
    assert_eq!(preflight.log_level, Some(LogLevel::Warning));
}

#[test]
fn recognizes_log_limit() {
    let preflight = preparse_log_args(&argv(&["--log-limit=10"]));
    assert_eq!(preflight.log_limit, Some(10));
}

#[test]
fn unrelated_flags_are_ignored() {
    let preflight = preparse_log_args(&argv(&["build", "--project", "tsconfig.json"]));
    assert_eq!(preflight, LogPreflight::default());
}

#[test]
fn last_recognized_value_wins_on_repeats() {
    let preflight = preparse_log_args(&argv(&["--log-limit=10", "--log-limit=20"]));
    assert_eq!(preflight.log_limit, Some(20));
}

#[test]
fn invalid_values_are_ignored_rather_than_clobbering_a_prior_valid_one() {
    let preflight = preparse_log_args(&argv(&["--log-level=warning", "--log-level=bogus"]));
    assert_eq!(preflight.log_level, Some(LogLevel::Warning));
}

#[test]
fn color_into_color_mode_maps_to_always_and_never() {
    assert_eq!(ColorModeArg::True.into_color_mode(), ColorMode::Always);
    assert_eq!(ColorModeArg::False.into_color_mode(), ColorMode::Never);
}
