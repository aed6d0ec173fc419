//! Failures that abort the facade's `parse` call before any pass runs.
//!
//! Everything recoverable or source-level (lex/parse/semantic problems)
//! goes through the `Diagnostic`/`Log` stream instead — see `spec.md` §7.
//! This enum only covers host-facing preconditions the facade itself
//! checks up front.

use tsz_common::SourceTooLargeError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    SourceTooLarge(#[from] SourceTooLargeError),
}
