//! Scope tree and the parse-pass scope-order recording list.
//!
//! The parser (pass 1) opens scopes and records `(offset, ScopeId)` in
//! source order; the resolver (pass 2, in `tsz-binder`) replays that same
//! order and asserts kind/offset match at each boundary (`spec.md` §3).

use crate::refs::Ref;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// A module or function body — the target of `var`/`function` hoisting.
    Entry,
    FunctionName,
    ClassName,
    Label,
    Block,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub members: FxHashMap<String, Ref>,
    pub generated: Vec<Ref>,
    pub label_ref: Option<Ref>,
}

impl Scope {
    #[must_use]
    pub fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            members: FxHashMap::default(),
            generated: Vec::new(),
            label_ref: None,
        }
    }
}

/// All scopes allocated during parsing, plus the ordered `(offset, ScopeId)`
/// list the parser appends to as it opens scopes and the resolver consumes
/// as it replays them.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
    /// Recorded in source order by `push_scope_for_parse_pass`; consumed in
    /// the same order by the resolver's `push_scope_for_visit_pass`.
    pub order: Vec<(u32, ScopeId)>,
}

impl ScopeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope_for_parse_pass(
        &mut self,
        kind: ScopeKind,
        parent: Option<ScopeId>,
        offset: u32,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, parent));
        if let Some(parent) = parent {
            self.scopes[parent.0 as usize].children.push(id);
        }
        self.order.push((offset, id));
        id
    }

    /// Truncate the scope-order list and detach a scope from its parent
    /// when a speculative parse aborts.
    pub fn pop_and_discard_scope(&mut self, saved_order_len: usize, id: ScopeId) {
        self.order.truncate(saved_order_len);
        if let Some(parent) = self.scopes[id.0 as usize].parent {
            self.scopes[parent.0 as usize].children.retain(|c| *c != id);
        }
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/scope.rs"]
mod tests;
