//! Common types shared by every pass of the front-end compilation core.
//!
//! - [`span`] — byte-offset `Span`s carried by every AST node
//! - [`position`] — lazy byte-offset to line/column resolution for display
//! - [`source`] — the `Source` container handed in by the host
//! - [`common`] — shared enums (`ScriptTarget`, `ImportKind`)
//! - [`limits`] — centralized recursion/width/scope-walk thresholds
//! - [`numeric`] — numeric literal value parsing
//! - [`diagnostics`] — the structured diagnostic log and its renderer

pub mod common;
pub use common::{ImportKind, ImportPath, ScriptTarget};

pub mod span;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};

pub mod limits;

pub mod position;
pub use position::{LineColumnTracker, Position, Range, SourceLocation};

pub mod source;
pub use source::{Source, SourceId, SourceTooLargeError};

pub mod numeric;

pub mod diagnostics;
pub use diagnostics::{
    ColorModeArg, DeferredLog, Diagnostic, DiagnosticRange, Log, LogLevel, LogPreflight, MsgId,
    StderrLog, preparse_log_args,
};
