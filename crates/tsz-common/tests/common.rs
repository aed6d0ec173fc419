use super::*;

#[test]
fn script_target_ladder_is_ordered() {
    assert!(ScriptTarget::ES2015 < ScriptTarget::ES2016);
    assert!(ScriptTarget::ES2019 < ScriptTarget::ES2020);
    assert!(ScriptTarget::ES2020 < ScriptTarget::ESNext);
}

#[test]
fn supports_es2020_matches_ladder() {
    assert!(!ScriptTarget::ES2019.supports_es2020());
    assert!(ScriptTarget::ES2020.supports_es2020());
    assert!(ScriptTarget::ESNext.supports_es2020());
}

#[test]
fn import_path_records_kind() {
    let p = ImportPath {
        path: "./a".to_string(),
        kind: ImportKind::Require,
    };
    assert_eq!(p.kind, ImportKind::Require);
}
