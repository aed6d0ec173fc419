//! User-specified compile-time identifier substitutions (`spec.md` §4.3
//! item 5, §6 `ParseOptions.defines`): a dotted path (`process.env.NODE_ENV`)
//! or bare identifier maps to a literal expression.
//!
//! The rewrite itself needs the symbol table (it only fires when the chain
//! bottoms out in an `Unbound` identifier), so matching lives in
//! [`crate::lowering`]; this module only owns the key → literal map.

use rustc_hash::FxHashMap;
use tsz_parser::ast::Expr;

#[derive(Default, Clone)]
pub struct Defines {
    paths: FxHashMap<Vec<String>, Expr>,
}

impl Defines {
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (String, Expr)>) -> Self {
        let mut paths = FxHashMap::default();
        for (key, value) in entries {
            let segments: Vec<String> = key.split('.').map(str::to_string).collect();
            paths.insert(segments, value);
        }
        Self { paths }
    }

    #[must_use]
    pub fn lookup(&self, segments: &[String]) -> Option<&Expr> {
        self.paths.get(segments)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/defines.rs"]
mod tests;
