//! Pass 3 of the front-end pipeline (`spec.md` §4.4–4.5): constant folding,
//! `defines` substitution, target-conditional syntactic lowering, and
//! import/require path tracking, run over the tree `tsz-binder` already
//! resolved.
//!
//! - [`lowering`] — the visitor that drives the other modules below
//! - [`chain`] — optional chaining / nullish coalescing
//! - [`classes`] — class field → constructor assignment
//! - [`enum_lower`] — `enum` → IIFE
//! - [`namespace`] — `namespace` → IIFE or erasure
//! - [`defines`] — compile-time identifier substitution table
//! - [`fold`] — constant folding of unary/binary expressions
//! - [`mangle`] — the optional `mangle_syntax` simplification pass
//! - [`imports`] — import/require path collection

pub mod chain;
pub mod classes;
pub mod defines;
pub mod enum_lower;
pub mod fold;
pub mod imports;
pub mod lowering;
pub mod mangle;
pub mod namespace;

pub use defines::Defines;
pub use imports::NamespaceImports;
pub use lowering::{LowerOutput, Lowering, LoweringOptions};
