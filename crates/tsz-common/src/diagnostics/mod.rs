//! Structured diagnostic log shared by every pass.
//!
//! Three `Log` implementations share the `{ add_msg, has_errors, done }`
//! interface described in `spec.md` §4.6: [`DeferredLog`] just buffers,
//! [`StderrLog`] additionally renders at arrival. Both are safe to share
//! across file-workers: their internal state sits behind one mutex.

mod data;
pub mod preflight;
pub mod render;

pub use data::{MsgId, format_message};
pub use preflight::{ColorModeArg, LogPreflight, preparse_log_args};

use crate::limits::DEFAULT_LOG_MESSAGE_LIMIT;
use crate::source::{Source, SourceId};
use crate::span::Span;
use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Severity of a diagnostic message.
///
/// Ordered from least to most severe so `--log-level=warning` can be
/// expressed as "show everything `>= Warning`".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum LogLevel {
    Silent,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "silent" => Some(Self::Silent),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// A location a diagnostic points at: which source, and where in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticRange {
    pub source: SourceId,
    pub span: Span,
}

/// One message in the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: MsgId,
    pub level: LogLevel,
    pub text: String,
    /// `None` for diagnostics not tied to a particular source range (e.g.
    /// "too many open files"); these sort before all located diagnostics.
    pub range: Option<DiagnosticRange>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(id: MsgId, level: LogLevel, text: String, range: Option<DiagnosticRange>) -> Self {
        Self {
            id,
            level,
            text,
            range,
        }
    }

    /// Build a diagnostic from the catalog entry for `id`, applying
    /// `overrides` if `id` has one.
    #[must_use]
    pub fn from_catalog(
        id: MsgId,
        args: &[&str],
        range: Option<DiagnosticRange>,
        overrides: &FxHashMap<MsgId, LogLevel>,
    ) -> Self {
        let level = overrides.get(&id).copied().unwrap_or(id.default_level());
        let text = format_message(id.template(), args);
        Self::new(id, level, text, range)
    }
}

/// Sort key used by `done()`: `(source, line, column, kind, text)`, with
/// location-less messages ordering first (`spec.md` §8).
fn sort_key(d: &Diagnostic, pretty_path: impl Fn(SourceId) -> String) -> (u32, u32, u32, u32, u32, String) {
    match d.range {
        None => (0, 0, 0, 0, d.id as u32, d.text.clone()),
        Some(r) => {
            // We only have byte offsets here; `done()` doesn't resolve
            // line/column (that's a rendering concern), so spans are
            // ordered by source index then byte offset, which preserves
            // the same total order as line/column would for one file.
            let _ = pretty_path;
            (
                1,
                r.source.0,
                r.span.start,
                r.span.end,
                d.id as u32,
                d.text.clone(),
            )
        }
    }
}

/// Shared interface implemented by every log backend.
pub trait Log: Send + Sync {
    fn add_msg(&self, diagnostic: Diagnostic);
    fn has_errors(&self) -> bool;
    /// Flush any buffered state and return all messages in stable sort
    /// order. Idempotent: calling this twice returns the same list.
    fn done(&self) -> Vec<Diagnostic>;
}

#[derive(Default)]
struct LogState {
    messages: Vec<Diagnostic>,
    error_count: usize,
    finalized: bool,
}

/// Buffers every message; never prints. Used by hosts that want to collect
/// diagnostics and decide what to do with them themselves (e.g. serialize
/// to JSON for an editor).
#[derive(Default)]
pub struct DeferredLog {
    state: Mutex<LogState>,
}

impl DeferredLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Log for DeferredLog {
    fn add_msg(&self, diagnostic: Diagnostic) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if diagnostic.level == LogLevel::Error {
            state.error_count += 1;
        }
        state.messages.push(diagnostic);
    }

    fn has_errors(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).error_count > 0
    }

    fn done(&self) -> Vec<Diagnostic> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.finalized = true;
        let mut messages = state.messages.clone();
        messages.sort_by(|a, b| sort_key(a, |_| String::new()).cmp(&sort_key(b, |_| String::new())));
        messages
    }
}

/// Renders each message as it arrives, subject to `message_limit` (`0` =
/// unlimited). Warnings beyond half the remaining budget are deferred so at
/// least one error slot survives if errors show up later.
pub struct StderrLog {
    state: Mutex<StderrState>,
    /// Sources registered via [`StderrLog::register_source`], consulted to
    /// render an excerpt for diagnostics shown at arrival (`spec.md` §4.6).
    sources: Mutex<FxHashMap<SourceId, Source>>,
    message_limit: usize,
    overrides: FxHashMap<MsgId, LogLevel>,
    color: render::ColorMode,
}

struct StderrState {
    shown_errors: usize,
    shown_warnings: usize,
    total_errors: usize,
    total_warnings: usize,
    deferred_warnings: Vec<Diagnostic>,
    all_messages: Vec<Diagnostic>,
    did_finalize: bool,
}

impl Default for StderrState {
    fn default() -> Self {
        Self {
            shown_errors: 0,
            shown_warnings: 0,
            total_errors: 0,
            total_warnings: 0,
            deferred_warnings: Vec::new(),
            all_messages: Vec::new(),
            did_finalize: false,
        }
    }
}

impl StderrLog {
    #[must_use]
    pub fn new(message_limit: usize, overrides: FxHashMap<MsgId, LogLevel>, color: render::ColorMode) -> Self {
        Self {
            state: Mutex::new(StderrState::default()),
            sources: Mutex::new(FxHashMap::default()),
            message_limit,
            overrides,
            color,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_LOG_MESSAGE_LIMIT, FxHashMap::default(), render::ColorMode::IfTerminal)
    }

    /// Registers `source` so later diagnostics pointing at it render a
    /// source excerpt. Call once per file before running it through the
    /// passes that report diagnostics against it.
    pub fn register_source(&self, source: Source) {
        self.sources
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(source.index, source);
    }

    fn lookup_source(&self, id: SourceId) -> Option<Source> {
        self.sources.lock().unwrap_or_else(|e| e.into_inner()).get(&id).cloned()
    }

    fn remaining_budget(&self, state: &StderrState) -> Option<usize> {
        if self.message_limit == 0 {
            None
        } else {
            Some(
                self.message_limit
                    .saturating_sub(state.shown_errors + state.shown_warnings),
            )
        }
    }

    /// Render one message to stderr, looking up its source (if any) in
    /// `lookup_source` for the excerpt.
    fn render_and_print(&self, diagnostic: &Diagnostic, lookup_source: &dyn Fn(SourceId) -> Option<Source>) {
        let source = diagnostic
            .range
            .and_then(|r| lookup_source(r.source));
        let rendered = render::render_diagnostic(diagnostic, source.as_ref(), self.color);
        eprintln!("{rendered}");
    }

    /// Flush any deferred warnings and print the one-line summary. Safe to
    /// call more than once; only the first call has an effect (`did_finalize`).
    pub fn almost_done(&self, lookup_source: &dyn Fn(SourceId) -> Option<Source>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.did_finalize {
            return;
        }
        state.did_finalize = true;
        let deferred = std::mem::take(&mut state.deferred_warnings);
        drop(state);
        for d in &deferred {
            self.render_and_print(d, lookup_source);
        }
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let summary = render::render_summary(
            state.shown_errors + deferred.len().min(state.total_warnings.saturating_sub(state.shown_warnings)),
            state.total_errors,
            state.shown_warnings + deferred.len(),
            state.total_warnings,
        );
        eprintln!("{summary}");
    }
}

impl Log for StderrLog {
    fn add_msg(&self, mut diagnostic: Diagnostic) {
        if let Some(level) = self.overrides.get(&diagnostic.id) {
            diagnostic.level = *level;
        }
        if diagnostic.level == LogLevel::Silent {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match diagnostic.level {
            LogLevel::Error => state.total_errors += 1,
            LogLevel::Warning => state.total_warnings += 1,
            _ => {}
        }
        state.all_messages.push(diagnostic.clone());

        let budget = self.remaining_budget(&state);
        let should_defer = diagnostic.level == LogLevel::Warning
            && budget.is_some_and(|b| state.shown_warnings + state.shown_errors >= b / 2);
        let over_budget = budget.is_some_and(|b| state.shown_errors + state.shown_warnings >= b);

        if should_defer || over_budget {
            if diagnostic.level == LogLevel::Warning {
                state.deferred_warnings.push(diagnostic);
            }
            return;
        }

        match diagnostic.level {
            LogLevel::Error => state.shown_errors += 1,
            LogLevel::Warning => state.shown_warnings += 1,
            _ => {}
        }
        drop(state);
        self.render_and_print(&diagnostic, &|id| self.lookup_source(id));
    }

    fn has_errors(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).total_errors > 0
    }

    fn done(&self) -> Vec<Diagnostic> {
        self.almost_done(&|id| self.lookup_source(id));
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.all_messages.sort_by(|a, b| {
            sort_key(a, |_| String::new()).cmp(&sort_key(b, |_| String::new()))
        });
        state.all_messages.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/diagnostics.rs"]
mod tests;
