//! Command-line surface for the `tszfe` demonstration binary.
//!
//! Deliberately thin: the bundler's own CLI/option parsing is out of scope
//! (`spec.md` §1 "Deliberately out of scope"). This just exposes enough of
//! `ParseOptions` to exercise the pipeline end to end, plus the
//! diagnostic-affecting flags the argv preflight already recognized
//! (`spec.md` §6 "CLI surface").

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tsz_common::{LogLevel, ScriptTarget};
use tsz_core::options::JsxOptions;

/// Reads one source file, runs it through the front-end core, and prints
/// the resulting diagnostics.
#[derive(Parser, Debug)]
#[command(name = "tszfe", version, about = "tsz front-end compilation core demo")]
pub struct CliArgs {
    /// Source file to parse.
    pub path: PathBuf,

    /// Language target lowering rewrites syntax down to.
    #[arg(long, value_enum, default_value_t = TargetArg::EsNext)]
    pub target: TargetArg,

    /// Enables TypeScript syntax.
    #[arg(long = "ts", default_value_t = true)]
    pub ts: bool,

    /// Enables JSX parsing.
    #[arg(long)]
    pub jsx: bool,

    /// Pre-declares `require`/`module`/`exports`/`import` and tracks
    /// discovered dependency paths.
    #[arg(long = "bundle")]
    pub is_bundling: bool,

    /// Runs the dead-code-elimination simplification pass after lowering.
    #[arg(long)]
    pub mangle: bool,

    /// Parses `path`'s contents as a single expression rather than a
    /// program (`spec.md` §6 `keep_single_expression`).
    #[arg(long = "single-expression")]
    pub keep_single_expression: bool,

    /// Suppresses advisory warnings.
    #[arg(long)]
    pub omit_warnings: bool,

    /// `true`/`false` to force color, omit to auto-detect a terminal
    /// (`spec.md` §6). Also recognized pre-`clap` as `--color=VALUE` by
    /// [`tsz_common::preparse_log_args`].
    #[arg(long)]
    pub color: Option<bool>,

    /// Minimum severity printed.
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Maximum number of diagnostics printed (`0` = unlimited).
    #[arg(long = "log-limit")]
    pub log_limit: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    EsNext,
}

impl std::fmt::Display for TargetArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_possible_value().expect("no skipped variants").get_name())
    }
}

impl From<TargetArg> for ScriptTarget {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::Es2015 => Self::ES2015,
            TargetArg::Es2016 => Self::ES2016,
            TargetArg::Es2017 => Self::ES2017,
            TargetArg::Es2018 => Self::ES2018,
            TargetArg::Es2019 => Self::ES2019,
            TargetArg::Es2020 => Self::ES2020,
            TargetArg::EsNext => Self::ESNext,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Silent,
    Info,
    Warning,
    Error,
}

impl From<LogLevelArg> for LogLevel {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Silent => Self::Silent,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Warning => Self::Warning,
            LogLevelArg::Error => Self::Error,
        }
    }
}

impl CliArgs {
    /// JSX pragma defaults; the CLI doesn't expose `--jsx-factory` yet,
    /// matching `ParseOptions::default`'s classic React runtime.
    #[must_use]
    pub fn jsx_options(&self) -> JsxOptions {
        JsxOptions::default()
    }
}

#[cfg(test)]
#[path = "../tests/args.rs"]
mod tests;
