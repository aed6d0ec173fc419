use super::*;
use tsz_common::SourceId;

#[test]
fn unresolved_ref_is_not_resolved() {
    let r = Ref::Unresolved { offset: 0, length: 3 };
    assert!(!r.is_resolved());
}

#[test]
fn symbol_ref_is_resolved() {
    let r = Ref::Symbol { source: SourceId(0), slot: 4 };
    assert!(r.is_resolved());
}

#[test]
fn external_ref_is_not_resolved() {
    let r = Ref::External(0);
    assert!(!r.is_resolved());
}

#[test]
fn name_pool_interns_and_reads_back() {
    let mut pool = NamePool::new();
    let a = pool.intern("default");
    let b = pool.intern("__temp_0");
    assert_eq!(pool.get(match a { Ref::External(i) => i, _ => unreachable!() }), "default");
    assert_eq!(pool.get(match b { Ref::External(i) => i, _ => unreachable!() }), "__temp_0");
}

#[test]
fn load_name_from_ref_slices_unresolved_from_source() {
    let source = "const answer = 42;";
    let pool = NamePool::new();
    let r = Ref::Unresolved { offset: 6, length: 6 };
    assert_eq!(load_name_from_ref(r, source, &pool), "answer");
}

#[test]
fn load_name_from_ref_reads_external_from_pool() {
    let source = "";
    let mut pool = NamePool::new();
    let r = pool.intern("default");
    assert_eq!(load_name_from_ref(r, source, &pool), "default");
}

#[test]
#[should_panic]
fn load_name_from_ref_panics_on_resolved_symbol() {
    let source = "";
    let pool = NamePool::new();
    let r = Ref::Symbol { source: SourceId(0), slot: 0 };
    let _ = load_name_from_ref(r, source, &pool);
}
