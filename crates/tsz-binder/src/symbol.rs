//! Symbol table: the thing `tsz-parser`'s `Ref::Unresolved` placeholders get
//! resolved into (`spec.md` §4.3).
//!
//! Symbols are never removed on redeclaration; instead `SymbolTable::link`
//! threads a union-find chain from the superseded symbol to the one that
//! replaced it, and [`SymbolTable::resolve`] walks (and compresses) that
//! chain. This keeps every `Ref::Symbol { slot, .. }` minted during parsing
//! valid forever, even after a later `var` redeclares the same name.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// What kind of declaration produced a symbol, which governs how a later
/// declaration of the same name in the same scope is allowed to merge with
/// it (`spec.md` §4.2's merge table, in `crate::merge`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// A free reference nobody in the file declares; installed lazily the
    /// first time a name fails to resolve anywhere up the scope chain.
    Unbound,
    /// `var` and `for (var ...)`.
    Hoisted,
    /// A function declaration, which hoists like `var` but also merges with
    /// another function declaration of the same name (last one wins).
    HoistedFunction,
    Class,
    /// A `catch (e)` binding — scoped to the catch clause only, never
    /// merges with anything.
    CatchIdentifier,
    TSEnum,
    TSNamespace,
    /// `let`, `const`, parameters, import bindings — anything else that
    /// can never merge with a second declaration of the same name.
    Other,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Estimated read-site count at the configured emit target; bumped only
    /// for reads the binder doesn't consider control-flow-dead.
    pub use_count_estimate: u32,
    /// Same, but counting reads inside dead code too — lowering passes that
    /// need "is this name mentioned anywhere, even unreachably" (e.g.
    /// deciding whether an import can be elided) read this one instead.
    pub ts_use_count_estimate: u32,
    link: Option<SymbolId>,
}

/// All symbols bound while resolving one source file.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: SymbolKind, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            kind,
            name,
            use_count_estimate: 0,
            ts_use_count_estimate: 0,
            link: None,
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Follow `link` chains to the symbol `id` was ultimately superseded by
    /// (or `id` itself, if it was never superseded).
    #[must_use]
    pub fn resolve(&self, id: SymbolId) -> SymbolId {
        let mut cur = id;
        while let Some(next) = self.symbols[cur.0 as usize].link {
            cur = next;
        }
        cur
    }

    /// Same as [`Self::resolve`], but rewrites every link on the path to
    /// point directly at the root so future lookups are O(1).
    pub fn resolve_compress(&mut self, id: SymbolId) -> SymbolId {
        let root = self.resolve(id);
        let mut cur = id;
        while let Some(next) = self.symbols[cur.0 as usize].link {
            if next != root {
                self.symbols[cur.0 as usize].link = Some(root);
            }
            cur = next;
        }
        root
    }

    /// Mark `old` as superseded by `new`: future `resolve(old)` calls
    /// return `new` (or whatever `new` is later superseded by).
    pub fn link(&mut self, old: SymbolId, new: SymbolId) {
        self.symbols[old.0 as usize].link = Some(new);
    }

    pub fn bump_use(&mut self, id: SymbolId, is_dead: bool) {
        let root = self.resolve_compress(id);
        let symbol = &mut self.symbols[root.0 as usize];
        symbol.ts_use_count_estimate += 1;
        if !is_dead {
            symbol.use_count_estimate += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }
}

#[cfg(test)]
#[path = "../tests/symbol.rs"]
mod tests;
