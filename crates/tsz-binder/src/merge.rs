//! The declaration-merging table (`spec.md` §4.2): when a second
//! declaration of the same name lands in the same scope as an existing
//! symbol, does it replace it, coexist with it, or conflict?

use crate::symbol::SymbolKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeAction {
    /// The existing symbol is superseded; callers link it to a fresh one.
    Replace,
    /// Both declarations refer to the same symbol; no new symbol is made.
    Keep,
    /// The second declaration is a redeclaration error.
    Forbid,
}

/// `existing` is the kind already bound to this name in the target scope;
/// `new` is the kind of the incoming declaration.
#[must_use]
pub fn merge_action(existing: SymbolKind, new: SymbolKind) -> MergeAction {
    use SymbolKind::{Class, Hoisted, HoistedFunction, TSEnum, TSNamespace, Unbound};

    if existing == Unbound {
        return MergeAction::Replace;
    }
    match (existing, new) {
        (Hoisted | HoistedFunction, Hoisted | HoistedFunction | TSNamespace) => MergeAction::Keep,
        (TSEnum | TSNamespace, TSEnum | TSNamespace) => MergeAction::Keep,
        (Class, TSNamespace) => MergeAction::Keep,
        _ => MergeAction::Forbid,
    }
}

#[cfg(test)]
#[path = "../tests/merge.rs"]
mod tests;
