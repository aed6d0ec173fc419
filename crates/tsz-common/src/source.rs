//! The source container handed to the core by the external loader.
//!
//! Per `spec.md` §3: an opaque handle bundling an index, a key path (used
//! only as a map key, never shown), a pretty path (shown in diagnostics), an
//! identifier stem for generated symbol names, and the immutable contents.

use std::sync::Arc;

/// The largest byte offset a [`crate::span::Span`] can address.
///
/// A source at or beyond this length cannot be parsed: its tail would
/// overflow the 32-bit offsets the AST stores everywhere.
pub const MAX_SOURCE_LEN: usize = (1u64 << 31) as usize - 1;

/// A distinct identity for a [`Source`] within a single build, used as the
/// `outer_index` half of a resolved [`crate::span::Span`]-adjacent `Ref`.
///
/// A newtype rather than a bare `u32` so it can't be confused with a symbol
/// slot or node index at the type level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

/// An immutable source file handed to the core.
///
/// `contents` is wrapped in an `Arc<str>` so the lexer, parser, and every
/// AST node that borrows string data can share one allocation without
/// lifetime gymnastics across the pass boundary between parse and resolve.
#[derive(Clone, Debug)]
pub struct Source {
    pub index: SourceId,
    /// Namespace + path used only as a map key; never shown to the user.
    pub key_path: String,
    /// Path shown in diagnostics and source maps.
    pub pretty_path: String,
    /// Stem used when the lowering passes need to generate a fresh
    /// identifier unique to this file (e.g. a namespace IIFE temporary).
    pub identifier_name: String,
    pub contents: Arc<str>,
}

impl Source {
    /// Build a source, deriving `identifier_name` from `pretty_path` the way
    /// the loader does: strip any extension and replace non-identifier
    /// characters with `_`.
    #[must_use]
    pub fn new(index: SourceId, key_path: String, pretty_path: String, contents: String) -> Self {
        let identifier_name = identifier_name_from_path(&pretty_path);
        Self {
            index,
            key_path,
            pretty_path,
            identifier_name,
            contents: Arc::from(contents),
        }
    }

    /// `Err` if `contents` is longer than [`MAX_SOURCE_LEN`] bytes; such a
    /// file cannot be addressed by the AST's 32-bit byte offsets.
    pub fn check_len(&self) -> Result<(), SourceTooLargeError> {
        if self.contents.len() > MAX_SOURCE_LEN {
            Err(SourceTooLargeError {
                len: self.contents.len(),
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("source is {len} bytes, exceeding the maximum of {MAX_SOURCE_LEN}")]
pub struct SourceTooLargeError {
    pub len: usize,
}

fn identifier_name_from_path(pretty_path: &str) -> String {
    let stem = pretty_path
        .rsplit('/')
        .next()
        .unwrap_or(pretty_path)
        .split('.')
        .next()
        .unwrap_or(pretty_path);
    let mut out = String::with_capacity(stem.len());
    for (i, ch) in stem.chars().enumerate() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
            out.push(ch);
        } else {
            out.push('_');
        }
        if i == 0 && out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(0, '_');
        }
    }
    if out.is_empty() { "_".to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_name_strips_extension_and_dir() {
        assert_eq!(identifier_name_from_path("src/foo-bar.ts"), "foo_bar");
    }

    #[test]
    fn identifier_name_handles_leading_digit() {
        assert_eq!(identifier_name_from_path("9lives.ts"), "_9lives");
    }

    #[test]
    fn check_len_rejects_oversized_source() {
        let source = Source::new(
            SourceId(0),
            "k".into(),
            "p".into(),
            "x".repeat(MAX_SOURCE_LEN + 1),
        );
        assert!(source.check_len().is_err());
    }

    #[test]
    fn check_len_accepts_normal_source() {
        let source = Source::new(SourceId(0), "k".into(), "p".into(), "let x = 1;".into());
        assert!(source.check_len().is_ok());
    }
}
