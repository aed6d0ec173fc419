//! Symbol references.
//!
//! `spec.md` §3 describes a packed `(outer_index, inner_index)` pair that
//! reuses its bits to stash an unresolved identifier's name before a symbol
//! exists. `spec.md` §9 explicitly sanctions not reimplementing that packing
//! trick: "a clean reimplementation may instead store a discriminated pair
//! `{ offset, length }` ... the ergonomic and safety gain is large." This is
//! that discriminated pair, recorded as an Open Question decision in
//! `DESIGN.md`.

use tsz_common::SourceId;

/// A reference to an identifier, in one of three states: unresolved (just a
/// slice of source text, assigned during parsing before any symbol table
/// exists), external (a name with no source slice — a keyword used as an
/// identifier, or a synthetic/generated name), or resolved (a symbol slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ref {
    Unresolved { offset: u32, length: u32 },
    External(u32),
    Symbol { source: SourceId, slot: u32 },
}

impl Ref {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, Ref::Symbol { .. })
    }
}

/// Auxiliary string pool for [`Ref::External`] names: keywords used as
/// identifiers (`{ default: 1 }`), and synthetic names generated during
/// lowering (`generate_temp_ref`).
#[derive(Debug, Default, Clone)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: impl Into<String>) -> Ref {
        let idx = self.names.len() as u32;
        self.names.push(name.into());
        Ref::External(idx)
    }

    #[must_use]
    pub fn get(&self, idx: u32) -> &str {
        &self.names[idx as usize]
    }
}

/// Resolve a [`Ref::Unresolved`] or [`Ref::External`] name to a string,
/// given the source text it was sliced from. Mirrors `load_name_from_ref`.
#[must_use]
pub fn load_name_from_ref<'a>(r: Ref, source: &'a str, pool: &'a NamePool) -> &'a str {
    match r {
        Ref::Unresolved { offset, length } => {
            &source[offset as usize..(offset + length) as usize]
        }
        Ref::External(idx) => pool.get(idx),
        Ref::Symbol { .. } => {
            panic!("load_name_from_ref called on a resolved symbol Ref; use the symbol table")
        }
    }
}

#[cfg(test)]
#[path = "../tests/refs.rs"]
mod tests;
