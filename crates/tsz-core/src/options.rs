//! Host-facing configuration for [`crate::parse`] (`spec.md` §6
//! `ParseOptions`).
//!
//! Mirrors the teacher's pattern of config structs hosts can persist as
//! JSON (`SPEC_FULL.md` §4.6): every field here round-trips through
//! `serde`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tsz_common::{LogLevel, MsgId, ScriptTarget};
use tsz_parser::ast::Expr;

/// A literal a `defines` entry substitutes in for a matching identifier
/// chain (`spec.md` §4.3 item 5). Kept as a small JSON-shaped enum rather
/// than [`Expr`] itself so [`ParseOptions`] stays plain-data serializable;
/// [`crate::parse`] turns each one into the `Expr` literal pass 3 actually
/// substitutes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefineValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl DefineValue {
    pub(crate) fn to_expr(&self, span: tsz_common::Span) -> Expr {
        match self {
            Self::String(s) => Expr::String(s.encode_utf16().collect(), span),
            Self::Number(n) => Expr::Number(*n, span),
            Self::Bool(b) => Expr::Bool(*b, span),
            Self::Null => Expr::Null(span),
        }
    }
}

/// JSX pragma configuration (`spec.md` §6): which identifiers the lowering
/// pass calls for an element and a fragment. Defaults match the classic
/// React runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct JsxOptions {
    pub factory: Vec<String>,
    pub fragment: Vec<String>,
}

impl Default for JsxOptions {
    fn default() -> Self {
        Self {
            factory: vec!["React".to_string(), "createElement".to_string()],
            fragment: vec!["React".to_string(), "Fragment".to_string()],
        }
    }
}

/// Per-file configuration passed into [`crate::parse`] (`spec.md` §6).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Pre-declares `require`/`module`/`exports` in module scope and tracks
    /// `require(...)`/`import()` dependency paths (`spec.md` §4.5).
    pub is_bundling: bool,
    /// Dotted-path or bare-identifier substitutions (`spec.md` §4.3 item 5).
    pub defines: FxHashMap<String, DefineValue>,
    /// Runs the dead-code-elimination `mangle_syntax` simplification pass
    /// after lowering.
    pub mangle_syntax: bool,
    /// Parses `contents` as a single expression rather than a program, for
    /// runtime-injected snippets (`spec.md` §6).
    pub keep_single_expression: bool,
    /// Suppresses every `Warning`-level diagnostic regardless of `overrides`.
    pub omit_warnings: bool,
    pub ts_parse: bool,
    pub jsx_parse: bool,
    pub jsx: JsxOptions,
    pub target: ScriptTarget,
    /// Per-message severity overrides (`spec.md` §6), keyed by the stable
    /// `MsgId` rather than rendered text.
    pub overrides: FxHashMap<MsgId, LogLevel>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            is_bundling: false,
            defines: FxHashMap::default(),
            mangle_syntax: false,
            keep_single_expression: false,
            omit_warnings: false,
            ts_parse: true,
            jsx_parse: false,
            jsx: JsxOptions::default(),
            target: ScriptTarget::default(),
            overrides: FxHashMap::default(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;
