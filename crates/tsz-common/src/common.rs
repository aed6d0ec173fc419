//! Common types shared across the parser, binder, and lowering crates.
//!
//! Kept here, rather than in whichever crate happens to need them first, to
//! avoid circular dependencies between `tsz-parser`, `tsz-binder`, and
//! `tsz-lowering`.

/// The configured lowering target, used by `tsz-lowering` to decide which
/// syntax needs rewriting.
///
/// Ordered: a target supports everything an earlier target supports.
/// `ESNext` supports everything and triggers no lowering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum ScriptTarget {
    ES2015 = 0,
    ES2016 = 1,
    ES2017 = 2,
    ES2018 = 3,
    ES2019 = 4,
    ES2020 = 5,
    #[default]
    ESNext = 99,
}

impl ScriptTarget {
    /// `true` if class fields, optional chaining, `??`, enums and namespaces
    /// are natively supported and need no lowering.
    #[must_use]
    pub fn supports_es2020(self) -> bool {
        self >= Self::ES2020
    }
}

/// How a module dependency was discovered, per `spec.md` §4.5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// A static `import ... from "..."` / `export ... from "..."` statement.
    Static,
    /// A `require("...")` call.
    Require,
    /// A dynamic `import("...")` expression.
    Dynamic,
}

/// A discovered module dependency, recorded but never resolved by the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportPath {
    pub path: String,
    pub kind: ImportKind,
}

#[cfg(test)]
#[path = "../tests/common.rs"]
mod tests;
