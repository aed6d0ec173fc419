use super::*;

#[test]
fn alloc_returns_distinct_ids() {
    let mut table = SymbolTable::new();
    let a = table.alloc(SymbolKind::Other, "a".to_string());
    let b = table.alloc(SymbolKind::Other, "b".to_string());
    assert_ne!(a.0, b.0);
}

#[test]
fn resolve_follows_link_chain() {
    let mut table = SymbolTable::new();
    let first = table.alloc(SymbolKind::Hoisted, "x".to_string());
    let second = table.alloc(SymbolKind::Hoisted, "x".to_string());
    table.link(first, second);
    assert_eq!(table.resolve(first), second);
    assert_eq!(table.resolve(second), second);
}

#[test]
fn resolve_compress_shortens_long_chains() {
    let mut table = SymbolTable::new();
    let a = table.alloc(SymbolKind::Hoisted, "x".to_string());
    let b = table.alloc(SymbolKind::Hoisted, "x".to_string());
    let c = table.alloc(SymbolKind::Hoisted, "x".to_string());
    table.link(a, b);
    table.link(b, c);
    assert_eq!(table.resolve_compress(a), c);
    // after compression `a` should point straight at `c`
    assert_eq!(table.resolve(a), c);
}

#[test]
fn bump_use_updates_both_counters_for_live_code() {
    let mut table = SymbolTable::new();
    let id = table.alloc(SymbolKind::Other, "x".to_string());
    table.bump_use(id, false);
    table.bump_use(id, false);
    let symbol = table.get(id);
    assert_eq!(symbol.use_count_estimate, 2);
    assert_eq!(symbol.ts_use_count_estimate, 2);
}

#[test]
fn bump_use_in_dead_code_only_bumps_ts_counter() {
    let mut table = SymbolTable::new();
    let id = table.alloc(SymbolKind::Other, "x".to_string());
    table.bump_use(id, true);
    let symbol = table.get(id);
    assert_eq!(symbol.use_count_estimate, 0);
    assert_eq!(symbol.ts_use_count_estimate, 1);
}

#[test]
fn bump_use_through_a_link_credits_the_resolved_symbol() {
    let mut table = SymbolTable::new();
    let old = table.alloc(SymbolKind::Hoisted, "x".to_string());
    let new = table.alloc(SymbolKind::Hoisted, "x".to_string());
    table.link(old, new);
    table.bump_use(old, false);
    assert_eq!(table.get(new).use_count_estimate, 1);
    assert_eq!(table.get(old).use_count_estimate, 0);
}
