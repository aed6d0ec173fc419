//! Wires [`crate::args::CliArgs`] to [`tsz_core::parse`] and a
//! [`StderrLog`], the glue the thin `tszfe` binary needs (`spec.md` §6
//! "CLI demonstration binary").

use std::fs;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use tracing::info;
use tsz_common::diagnostics::render::ColorMode;
use tsz_common::{ColorModeArg, Diagnostic, Log, LogLevel, LogPreflight, Source, SourceId};
use tsz_core::options::{JsxOptions, ParseOptions};

use crate::args::CliArgs;

/// Reads `path` into a [`Source`], the caller's own job so it can register
/// the source with a [`tsz_common::StderrLog`] before any diagnostic about
/// it is logged.
pub fn read_source(path: &std::path::Path) -> Result<Source> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Source::new(
        SourceId(0),
        path.display().to_string(),
        path.display().to_string(),
        contents,
    ))
}

/// Runs `source` through the front-end core, streaming diagnostics to
/// `log` as they're found. Returns `true` if the file parsed and bound
/// without errors.
pub fn run(args: &CliArgs, source: &Source, log: &dyn Log) -> Result<bool> {
    let options = build_options(args);
    info!(path = %source.pretty_path, target = ?options.target, "parsing");

    let output = tsz_core::parse(log, source, &options)?;
    info!(
        statements = output.ast.body.len(),
        imports = output.import_paths.len(),
        ok = output.ok,
        "parsed"
    );

    Ok(output.ok && !log.has_errors())
}

fn build_options(args: &CliArgs) -> ParseOptions {
    ParseOptions {
        is_bundling: args.is_bundling,
        defines: FxHashMap::default(),
        mangle_syntax: args.mangle,
        keep_single_expression: args.keep_single_expression,
        omit_warnings: args.omit_warnings,
        ts_parse: args.ts,
        jsx_parse: args.jsx,
        jsx: jsx_options(args),
        target: args.target.into(),
        overrides: FxHashMap::default(),
    }
}

fn jsx_options(args: &CliArgs) -> JsxOptions {
    args.jsx_options()
}

/// Resolves the color mode a run should use: an explicit `--color` flag
/// wins, then the argv preflight's `--color=...` (`spec.md` §6), then
/// auto-detection.
#[must_use]
pub fn resolve_color_mode(args: &CliArgs, preflight: &LogPreflight) -> ColorMode {
    if let Some(force) = args.color {
        return if force { ColorMode::Always } else { ColorMode::Never };
    }
    match preflight.color {
        Some(ColorModeArg::True) => ColorMode::Always,
        Some(ColorModeArg::False) => ColorMode::Never,
        None => ColorMode::IfTerminal,
    }
}

/// Resolves the message limit a run should use: `--log-limit` wins, then
/// the argv preflight, then the library default.
#[must_use]
pub fn resolve_log_limit(args: &CliArgs, preflight: &LogPreflight) -> usize {
    args.log_limit
        .or(preflight.log_limit)
        .unwrap_or(tsz_common::limits::DEFAULT_LOG_MESSAGE_LIMIT)
}

/// Resolves the minimum severity a run should print: `--log-level` wins,
/// then the argv preflight, then `Info` (show everything but the
/// internal-only `Silent` sentinel).
#[must_use]
pub fn resolve_log_level(args: &CliArgs, preflight: &LogPreflight) -> LogLevel {
    args.log_level
        .map(LogLevel::from)
        .or(preflight.log_level)
        .unwrap_or(LogLevel::Info)
}

/// Wraps a [`Log`] to drop any message below `level` before it reaches the
/// inner log. `StderrLog`'s `overrides` map promotes or silences
/// individual message ids (`spec.md` §6); `--log-level` is a blanket
/// threshold instead, so it's enforced here rather than by enumerating
/// every id below the threshold into `overrides`.
pub struct ThresholdLog<'a> {
    inner: &'a dyn Log,
    level: LogLevel,
}

impl<'a> ThresholdLog<'a> {
    #[must_use]
    pub fn new(inner: &'a dyn Log, level: LogLevel) -> Self {
        Self { inner, level }
    }
}

impl Log for ThresholdLog<'_> {
    fn add_msg(&self, diagnostic: Diagnostic) {
        if diagnostic.level >= self.level {
            self.inner.add_msg(diagnostic);
        }
    }

    fn has_errors(&self) -> bool {
        self.inner.has_errors()
    }

    fn done(&self) -> Vec<Diagnostic> {
        self.inner.done()
    }
}

#[cfg(test)]
#[path = "../tests/driver.rs"]
mod tests;
